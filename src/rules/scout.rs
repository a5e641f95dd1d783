//! The Scout rules engine.
//!
//! `ScoutRules` validates and applies every move of a match:
//!
//! ```text
//! Waiting --start--> ReadyCheck --all ready--> Playing --end condition--> Scoring
//!                        ^                                                   |
//!                        +-------------- nextRound / restartMatch -----------+
//! ```
//!
//! ## Turn order
//!
//! Round `r` opens with seat `(r - 1) % n`; after each completed turn the
//! next seat acts. A 2-player scout keeps the turn, and a scout & show
//! keeps the turn until its show (or `endTurn`) resolves it.
//!
//! ## End conditions
//!
//! Checked when a turn completes, for the seat that just acted:
//! - its hand is empty: `EmptyHand`, that seat wins
//! - 3+ players: every other seat scouted since the last show:
//!   `RoundRobin`, the set owner wins
//! - 2 players: the turn would pass back to the set owner, or the opponent
//!   has no chips and cannot beat the set: `RoundRobin`, the set owner wins
//!
//! ## Example
//!
//! ```
//! use scout_engine::core::{MatchConfig, MatchId, Move, PhaseKind, PlayerId};
//! use scout_engine::rules::{RulesEngine, ScoutRules};
//!
//! let rules = ScoutRules::new(MatchConfig::default().with_seed(7));
//! let alice = PlayerId::from("alice");
//! let bob = PlayerId::from("bob");
//!
//! let m = rules.create_match(MatchId::from("room"));
//! let m = rules.add_player(&m, alice.clone(), "Alice").unwrap();
//! let m = rules.add_player(&m, bob.clone(), "Bob").unwrap();
//! let m = rules.start_match(&m).unwrap();
//! assert_eq!(m.phase.kind(), PhaseKind::ReadyCheck);
//!
//! let m = rules.apply_move(&m, &alice, &Move::SetReady).unwrap();
//! let m = rules.apply_move(&m, &bob, &Move::SetReady).unwrap();
//! assert_eq!(m.phase.kind(), PhaseKind::Playing);
//! ```

use tracing::{debug, info};

use super::engine::{GameResult, RulesEngine};
use super::evaluator::{can_beat_any, classify, is_stronger};
use super::scoring::score_round;
use crate::cards::{deal_round, Card};
use crate::core::{
    ActiveSet, EndReason, GameRng, Match, MatchConfig, MatchId, Move, MoveKind, MoveRecord,
    Phase, PhaseKind, Player, PlayerId, RoundOutcome, ScoutAndShow, Seat, MAX_PLAYERS,
};
use crate::error::{ContractViolation, Rejection, ScoutResult};

/// Rules engine for Scout.
#[derive(Clone, Debug, Default)]
pub struct ScoutRules {
    config: MatchConfig,
}

impl ScoutRules {
    #[must_use]
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Create an empty match waiting for players.
    #[must_use]
    pub fn create_match(&self, id: MatchId) -> Match {
        info!(match_id = %id, "match created");
        Match::new(id, GameRng::seeded_or_entropy(self.config.seed))
    }

    /// Seat a new player. The first player to join is the host.
    pub fn add_player(
        &self,
        state: &Match,
        id: PlayerId,
        name: impl Into<String>,
    ) -> ScoutResult<Match> {
        if state.phase != Phase::Waiting {
            return Err(Rejection::AlreadyStarted.into());
        }
        if state.seat_of(&id).is_some() {
            return Err(Rejection::DuplicatePlayer(id.to_string()).into());
        }
        let max = self.config.max_players.min(MAX_PLAYERS);
        if state.player_count() >= max {
            return Err(Rejection::MatchFull { max }.into());
        }

        let mut next = state.clone();
        let seat = next.players.push(Player::new(id, name));
        info!(match_id = %next.id, %seat, player = %next.players[seat].id, "player joined");
        Ok(next)
    }

    /// Deal the first round. One round is played per seat.
    pub fn start_match(&self, state: &Match) -> ScoutResult<Match> {
        if state.phase != Phase::Waiting {
            return Err(Rejection::AlreadyStarted.into());
        }
        let have = state.player_count();
        if have < self.config.min_players {
            return Err(Rejection::NotEnoughPlayers {
                min: self.config.min_players,
                have,
            }
            .into());
        }
        if have > MAX_PLAYERS {
            return Err(ContractViolation::PlayerCount(have).into());
        }

        let mut next = state.clone();
        next.total_rounds = have as u8;
        info!(match_id = %next.id, players = have, "match started");
        self.deal(&mut next);
        Ok(next)
    }

    /// Deal the next round and enter the ready check.
    fn deal(&self, state: &mut Match) {
        state.round += 1;
        let count = state.player_count();
        let reserve = state.reserve.take();
        let deal = deal_round(count, state.round, reserve, &mut state.rng);
        let chips = self.config.starting_chips(count);

        state.dealt = deal.dealt();
        for ((_, player), hand) in state.players.iter_mut().zip(deal.hands) {
            player.start_round(hand, chips);
        }
        state.reserve = deal.reserve;
        state.active_set = None;
        state.consecutive_scouts = 0;
        state.outcome = None;
        state.phase = Phase::ReadyCheck;

        info!(
            match_id = %state.id,
            round = state.round,
            total_rounds = state.total_rounds,
            dealt = state.dealt,
            "round dealt"
        );
    }

    fn try_apply(&self, state: &Match, player: &PlayerId, mv: &Move) -> ScoutResult<Match> {
        let seat = state
            .seat_of(player)
            .ok_or_else(|| Rejection::UnknownPlayer(player.to_string()))?;

        let mut next = state.clone();
        match mv {
            Move::FlipHand => flip_hand(&mut next, seat)?,
            Move::SetReady => set_ready(&mut next, seat)?,
            Move::Show { indices } => show(&mut next, seat, indices)?,
            Move::Scout { card, insert, flip } => scout(&mut next, seat, *card, *insert, *flip)?,
            Move::ScoutAndShow => scout_and_show(&mut next, seat)?,
            Move::EndTurn => end_turn(&mut next, seat)?,
            Move::NextRound => {
                check_next_round(&next, seat)?;
                self.deal(&mut next);
            }
            Move::RestartMatch => {
                check_host_in_scoring(&next, seat)?;
                next.round = 0;
                next.reserve = None;
                next.history.clear();
                for player in next.players.iter_mut().map(|(_, p)| p) {
                    player.score = 0;
                }
                info!(match_id = %next.id, "match restarted");
                self.deal(&mut next);
            }
        }

        let sequence = next.history.len() as u32;
        next.history
            .push_back(MoveRecord::new(seat, mv.clone(), next.round, sequence));
        Ok(next)
    }
}

impl RulesEngine for ScoutRules {
    fn config(&self) -> &MatchConfig {
        &self.config
    }

    fn available_moves(&self, state: &Match, player: &PlayerId) -> Vec<MoveKind> {
        state
            .seat_of(player)
            .map(|seat| available_moves(state, seat))
            .unwrap_or_default()
    }

    fn apply_move(&self, state: &Match, player: &PlayerId, mv: &Move) -> ScoutResult<Match> {
        let result = self.try_apply(state, player, mv);
        match &result {
            Ok(next) => debug!(
                match_id = %state.id,
                %player,
                kind = ?mv.kind(),
                phase = ?next.phase.kind(),
                "move accepted"
            ),
            Err(err) => debug!(
                match_id = %state.id,
                %player,
                kind = ?mv.kind(),
                reason = %err,
                "move rejected"
            ),
        }
        result
    }

    fn is_terminal(&self, state: &Match) -> Option<GameResult> {
        GameResult::from_leaders(state.leaders())
    }
}

/// Move kinds `seat` could issue right now. Advisory only.
#[must_use]
pub fn available_moves(state: &Match, seat: Seat) -> Vec<MoveKind> {
    let mut moves = Vec::new();

    if check_hand_open(state, seat).is_ok() {
        moves.push(MoveKind::FlipHand);
        moves.push(MoveKind::SetReady);
    }
    if check_show(state, seat).is_ok() {
        let hand = state.players[seat].hand_cards();
        let table = table_cards(state);
        if can_beat_any(&hand, table.as_deref()) {
            moves.push(MoveKind::Show);
        }
    }
    if check_scout(state, seat).is_ok() {
        moves.push(MoveKind::Scout);
    }
    if check_scout_and_show(state, seat).is_ok() {
        moves.push(MoveKind::ScoutAndShow);
    }
    if check_end_turn(state, seat).is_ok() {
        moves.push(MoveKind::EndTurn);
    }
    if check_next_round(state, seat).is_ok() {
        moves.push(MoveKind::NextRound);
    }
    if check_host_in_scoring(state, seat).is_ok() {
        moves.push(MoveKind::RestartMatch);
    }
    moves
}

// === Validation ===

fn require_phase(state: &Match, expected: PhaseKind) -> Result<(), Rejection> {
    let actual = state.phase.kind();
    if actual == expected {
        Ok(())
    } else {
        Err(Rejection::WrongPhase { expected, actual })
    }
}

/// The turn holder's scout & show progress, if `seat` holds the turn.
fn require_turn(state: &Match, seat: Seat) -> Result<ScoutAndShow, Rejection> {
    require_phase(state, PhaseKind::Playing)?;
    match state.phase {
        Phase::Playing { turn, pending } if turn == seat => Ok(pending),
        Phase::Playing { turn, .. } => Err(Rejection::NotYourTurn { holder: turn }),
        _ => Err(Rejection::WrongPhase {
            expected: PhaseKind::Playing,
            actual: state.phase.kind(),
        }),
    }
}

fn check_hand_open(state: &Match, seat: Seat) -> Result<(), Rejection> {
    require_phase(state, PhaseKind::ReadyCheck)?;
    if state.players[seat].ready {
        return Err(Rejection::AlreadyReady);
    }
    Ok(())
}

fn check_show(state: &Match, seat: Seat) -> Result<ScoutAndShow, Rejection> {
    let pending = require_turn(state, seat)?;
    if pending == ScoutAndShow::AwaitingScout {
        return Err(Rejection::MustScoutFirst);
    }
    Ok(pending)
}

fn check_scout(state: &Match, seat: Seat) -> Result<ScoutAndShow, Rejection> {
    let pending = require_turn(state, seat)?;
    if pending == ScoutAndShow::AwaitingShowOrEnd {
        return Err(Rejection::AlreadyScouted);
    }
    check_can_scout(state, seat)?;
    Ok(pending)
}

/// Table and chip requirements shared by `scout` and `scoutAndShow`.
fn check_can_scout(state: &Match, seat: Seat) -> Result<(), Rejection> {
    let active = state.active_set.as_ref().ok_or(Rejection::NoActiveSet)?;
    if active.owner == seat {
        return Err(Rejection::ScoutOwnSet);
    }
    if state.player_count() == 2 && state.players[seat].scout_chips == 0 {
        return Err(Rejection::NoScoutChips);
    }
    Ok(())
}

fn check_scout_and_show(state: &Match, seat: Seat) -> Result<(), Rejection> {
    if require_turn(state, seat)? != ScoutAndShow::NotStarted {
        return Err(Rejection::ScoutAndShowPending);
    }
    if state.players[seat].used_scout_and_show {
        return Err(Rejection::ScoutAndShowUsed);
    }
    // A declared scout & show that cannot scout could never resolve.
    check_can_scout(state, seat)
}

fn check_end_turn(state: &Match, seat: Seat) -> Result<(), Rejection> {
    if require_turn(state, seat)? != ScoutAndShow::AwaitingShowOrEnd {
        return Err(Rejection::CannotEndTurn);
    }
    Ok(())
}

fn check_host_in_scoring(state: &Match, seat: Seat) -> Result<(), Rejection> {
    require_phase(state, PhaseKind::Scoring)?;
    if seat != Seat::HOST {
        return Err(Rejection::NotHost);
    }
    Ok(())
}

fn check_next_round(state: &Match, seat: Seat) -> Result<(), Rejection> {
    check_host_in_scoring(state, seat)?;
    if state.round >= state.total_rounds {
        return Err(Rejection::NoRoundsLeft);
    }
    Ok(())
}

fn table_cards(state: &Match) -> Option<Vec<Card>> {
    state
        .active_set
        .as_ref()
        .map(|set| set.cards.iter().copied().collect())
}

// === Moves ===

fn flip_hand(state: &mut Match, seat: Seat) -> ScoutResult<()> {
    check_hand_open(state, seat)?;
    state.players[seat].flip_hand();
    Ok(())
}

fn set_ready(state: &mut Match, seat: Seat) -> ScoutResult<()> {
    check_hand_open(state, seat)?;
    state.players[seat].ready = true;

    if state.players.values().all(|p| p.ready) {
        let turn = state.starting_seat(state.round);
        state.phase = Phase::Playing {
            turn,
            pending: ScoutAndShow::NotStarted,
        };
        info!(match_id = %state.id, round = state.round, %turn, "all players ready");
    }
    Ok(())
}

fn show(state: &mut Match, seat: Seat, indices: &[usize]) -> ScoutResult<()> {
    let pending = check_show(state, seat)?;
    if indices.is_empty() {
        return Err(Rejection::EmptySelection.into());
    }

    let len = state.players[seat].hand.len();
    if let Some(&index) = indices.iter().find(|&&i| i >= len) {
        return Err(ContractViolation::HandIndex { index, len }.into());
    }

    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if sorted.windows(2).any(|w| w[1] != w[0] + 1) {
        return Err(Rejection::NotContiguous.into());
    }
    let start = sorted[0];
    let end = start + sorted.len();

    let hand = &mut state.players[seat].hand;
    let mut shown = hand.split_off(start);
    let rest = shown.split_off(end - start);

    let candidate: Vec<Card> = shown.iter().copied().collect();
    let table = table_cards(state);
    // Anything opens an empty table; an invalid set can only be scouted away.
    if table.is_some() && classify(&candidate).is_none() {
        return Err(Rejection::NotASet.into());
    }
    if !is_stronger(&candidate, table.as_deref()) {
        return Err(Rejection::NotStronger.into());
    }

    let player = &mut state.players[seat];
    player.hand.append(rest);
    if let Some(beaten) = state.active_set.take() {
        player.collected.append(beaten.cards);
    }
    if pending == ScoutAndShow::AwaitingShowOrEnd {
        player.used_scout_and_show = true;
    }
    state.active_set = Some(ActiveSet {
        cards: shown,
        owner: seat,
    });
    state.consecutive_scouts = 0;

    complete_turn(state, seat);
    Ok(())
}

fn scout(state: &mut Match, seat: Seat, card: usize, insert: usize, flip: bool) -> ScoutResult<()> {
    let pending = check_scout(state, seat)?;

    let Some(active) = state.active_set.as_mut() else {
        return Err(Rejection::NoActiveSet.into());
    };
    if !active.is_end(card) {
        return Err(Rejection::NotAnEnd { index: card }.into());
    }
    let len = state.players[seat].hand.len();
    if insert > len {
        return Err(ContractViolation::InsertIndex { index: insert, len }.into());
    }

    let owner = active.owner;
    let mut taken = active.cards.remove(card);
    if active.is_empty() {
        state.active_set = None;
    }
    if flip {
        taken.flip();
    }
    state.players[seat].hand.insert(insert, taken);

    let two_player = state.player_count() == 2;
    if two_player {
        let chips = &mut state.players[seat].scout_chips;
        *chips = chips.saturating_sub(1);
    } else {
        let chips = &mut state.players[owner].scout_chips;
        *chips = chips.saturating_add(1);
    }
    state.consecutive_scouts = state.consecutive_scouts.saturating_add(1);

    if pending == ScoutAndShow::AwaitingScout {
        state.phase = Phase::Playing {
            turn: seat,
            pending: ScoutAndShow::AwaitingShowOrEnd,
        };
    } else if two_player {
        // The scouter keeps the turn; the round ends if that leaves them stuck.
        if let Some(winner) = stuck_against(state, seat) {
            end_round(
                state,
                RoundOutcome {
                    reason: EndReason::RoundRobin,
                    winner,
                },
            );
        }
    } else {
        complete_turn(state, seat);
    }
    Ok(())
}

fn scout_and_show(state: &mut Match, seat: Seat) -> ScoutResult<()> {
    check_scout_and_show(state, seat)?;
    state.phase = Phase::Playing {
        turn: seat,
        pending: ScoutAndShow::AwaitingScout,
    };
    Ok(())
}

fn end_turn(state: &mut Match, seat: Seat) -> ScoutResult<()> {
    check_end_turn(state, seat)?;
    state.players[seat].used_scout_and_show = true;
    complete_turn(state, seat);
    Ok(())
}

// === Turn flow ===

/// End the round if an end condition holds for `actor`, else pass the turn.
fn complete_turn(state: &mut Match, actor: Seat) {
    match round_end(state, actor) {
        Some(outcome) => end_round(state, outcome),
        None => {
            let turn = actor.next(state.player_count());
            state.phase = Phase::Playing {
                turn,
                pending: ScoutAndShow::NotStarted,
            };
        }
    }
}

fn round_end(state: &Match, actor: Seat) -> Option<RoundOutcome> {
    if state.players[actor].hand.is_empty() {
        return Some(RoundOutcome {
            reason: EndReason::EmptyHand,
            winner: actor,
        });
    }

    let count = state.player_count();
    let winner = if count > 2 {
        state
            .active_set
            .as_ref()
            .filter(|_| usize::from(state.consecutive_scouts) >= count - 1)
            .map(|set| set.owner)
    } else {
        let other = actor.next(count);
        match state.active_set.as_ref() {
            // The set came back around to its owner unbeaten.
            Some(set) if set.owner == other => Some(other),
            _ => stuck_against(state, other),
        }
    };
    winner.map(|winner| RoundOutcome {
        reason: EndReason::RoundRobin,
        winner,
    })
}

/// Owner of the active set, if `seat` can neither scout nor beat it.
fn stuck_against(state: &Match, seat: Seat) -> Option<Seat> {
    let active = state.active_set.as_ref()?;
    let player = &state.players[seat];
    if active.owner == seat || player.scout_chips > 0 {
        return None;
    }
    let table: Vec<Card> = active.cards.iter().copied().collect();
    (!can_beat_any(&player.hand_cards(), Some(table.as_slice()))).then_some(active.owner)
}

fn end_round(state: &mut Match, outcome: RoundOutcome) {
    state.outcome = Some(outcome);
    score_round(state);
    state.phase = Phase::Scoring;

    info!(
        match_id = %state.id,
        round = state.round,
        reason = ?outcome.reason,
        winner = %outcome.winner,
        "round ended"
    );
    if state.is_over() {
        info!(match_id = %state.id, leaders = ?state.leaders(), "match over");
    }
}

/// Cards dealt this round that are still accounted for.
#[must_use]
pub fn cards_conserved(state: &Match) -> bool {
    state.phase == Phase::Waiting || state.cards_in_play() == state.dealt
}
