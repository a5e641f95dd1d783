//! Match state: the aggregate every move reads and replaces.
//!
//! ## Match
//!
//! Seats (turn order), phase, the active set on the table, round counters,
//! the latest round outcome and the move history.
//!
//! ## Phase
//!
//! An explicit state machine. The turn holder and their progress through
//! scout & show live inside `Phase::Playing`, so a turn holder outside
//! `Playing` or a half-finished scout & show on a non-holder cannot be
//! represented.
//!
//! Hands, collected piles and history use `im::Vector`, so cloning a
//! `Match` for a new snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::player::{PlayerId, Seat, SeatMap};
use super::rng::GameRng;
use crate::cards::Card;

/// Match identifier chosen by the collaborator (usually a room code).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub String);

impl MatchId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for MatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress of the turn holder through scout & show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoutAndShow {
    /// Ordinary turn.
    #[default]
    NotStarted,
    /// Declared; the scout comes next.
    AwaitingScout,
    /// Scouted; show, or end the turn without showing.
    AwaitingShowOrEnd,
}

/// Match phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Seats filling; nothing dealt yet.
    Waiting,
    /// Hands dealt; players may flip their hand until ready.
    ReadyCheck,
    /// Turns in progress.
    Playing { turn: Seat, pending: ScoutAndShow },
    /// Round scored; the host continues or restarts.
    Scoring,
}

impl Phase {
    /// Phase without its payload.
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Waiting => PhaseKind::Waiting,
            Phase::ReadyCheck => PhaseKind::ReadyCheck,
            Phase::Playing { .. } => PhaseKind::Playing,
            Phase::Scoring => PhaseKind::Scoring,
        }
    }

    /// Turn holder, only while playing.
    #[must_use]
    pub fn turn(&self) -> Option<Seat> {
        match self {
            Phase::Playing { turn, .. } => Some(*turn),
            _ => None,
        }
    }

    /// Scout & show progress of the turn holder, only while playing.
    #[must_use]
    pub fn pending(&self) -> Option<ScoutAndShow> {
        match self {
            Phase::Playing { pending, .. } => Some(*pending),
            _ => None,
        }
    }
}

/// Phase discriminant, used in rejections and views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseKind {
    Waiting,
    ReadyCheck,
    Playing,
    Scoring,
}

/// The cards on the table and who put them there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSet {
    /// Never empty; an emptied set is cleared to `None`.
    pub cards: Vector<Card>,
    pub owner: Seat,
}

impl ActiveSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether `index` addresses the first or last card.
    #[must_use]
    pub fn is_end(&self, index: usize) -> bool {
        !self.cards.is_empty() && (index == 0 || index == self.cards.len() - 1)
    }
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndReason {
    /// A player emptied their hand.
    EmptyHand,
    /// The active set survived a full circuit unbeaten.
    RoundRobin,
}

/// How the latest round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub reason: EndReason,
    /// Exempt from the hand penalty.
    pub winner: Seat,
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Order matters: only adjacent cards can be shown together.
    pub hand: Vector<Card>,
    /// Cumulative across rounds.
    pub score: i32,
    pub scout_chips: u8,
    /// Cards claimed by beating a set.
    pub collected: Vector<Card>,
    /// Ready-check confirmation.
    pub ready: bool,
    /// Scout & show spent (or abandoned) this round.
    pub used_scout_and_show: bool,
    /// Score of the latest finished round.
    pub round_score: Option<i32>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vector::new(),
            score: 0,
            scout_chips: 0,
            collected: Vector::new(),
            ready: false,
            used_scout_and_show: false,
            round_score: None,
        }
    }

    /// Reset per-round state around a freshly dealt hand.
    pub fn start_round(&mut self, hand: Vec<Card>, scout_chips: u8) {
        self.hand = hand.into_iter().collect();
        self.scout_chips = scout_chips;
        self.collected = Vector::new();
        self.ready = false;
        self.used_scout_and_show = false;
        self.round_score = None;
    }

    /// Swap both faces of every card in hand.
    pub fn flip_hand(&mut self) {
        for card in self.hand.iter_mut() {
            card.flip();
        }
    }

    /// Hand as a plain slice-friendly vector.
    #[must_use]
    pub fn hand_cards(&self) -> Vec<Card> {
        self.hand.iter().copied().collect()
    }
}

/// The match aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,

    /// Seating order is turn order. Seat 0 is the host.
    pub players: SeatMap<Player>,

    pub phase: Phase,

    /// `None` when the table is empty.
    pub active_set: Option<ActiveSet>,

    /// Current round (1-based); 0 before the first deal.
    pub round: u8,

    /// One round per player, each started by a different seat.
    pub total_rounds: u8,

    /// Scouts since the last show.
    pub consecutive_scouts: u8,

    /// Set when a round ends; cleared on the next deal.
    pub outcome: Option<RoundOutcome>,

    /// Cards dealt to players this round.
    pub dealt: usize,

    /// 2-player only: the half of the deck saved for the next round.
    pub(crate) reserve: Option<Vec<Card>>,

    /// Accepted moves since the match (re)started.
    pub history: Vector<MoveRecord>,

    /// Never serialized: players must not be able to predict deals.
    #[serde(skip)]
    pub(crate) rng: GameRng,
}

impl Match {
    /// Create an empty match waiting for players.
    #[must_use]
    pub fn new(id: MatchId, rng: GameRng) -> Self {
        Self {
            id,
            players: SeatMap::empty(),
            phase: Phase::Waiting,
            active_set: None,
            round: 0,
            total_rounds: 0,
            consecutive_scouts: 0,
            outcome: None,
            dealt: 0,
            reserve: None,
            history: Vector::new(),
            rng,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Seat of a player, if seated.
    #[must_use]
    pub fn seat_of(&self, id: &PlayerId) -> Option<Seat> {
        self.players.position(|p| &p.id == id)
    }

    /// Player at a seat.
    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat)
    }

    /// Player by id.
    #[must_use]
    pub fn player_by_id(&self, id: &PlayerId) -> Option<&Player> {
        self.seat_of(id).and_then(|seat| self.players.get(seat))
    }

    /// Current turn holder.
    #[must_use]
    pub fn turn(&self) -> Option<Seat> {
        self.phase.turn()
    }

    /// Whether `seat` holds the turn and is in the middle of scout & show.
    #[must_use]
    pub fn performing_scout_and_show(&self, seat: Seat) -> bool {
        matches!(
            self.phase,
            Phase::Playing { turn, pending } if turn == seat && pending != ScoutAndShow::NotStarted
        )
    }

    /// Whether `seat` has scouted during the scout & show in progress.
    #[must_use]
    pub fn scouted_in_scout_and_show(&self, seat: Seat) -> bool {
        matches!(
            self.phase,
            Phase::Playing { turn, pending: ScoutAndShow::AwaitingShowOrEnd } if turn == seat
        )
    }

    /// Seat that starts `round` (1-based): the starting seat rotates.
    #[must_use]
    pub fn starting_seat(&self, round: u8) -> Seat {
        let count = self.player_count().max(1);
        Seat::new(((usize::from(round).saturating_sub(1)) % count) as u8)
    }

    /// Cards currently in hands, on the table and in collected piles.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        let held: usize = self
            .players
            .values()
            .map(|p| p.hand.len() + p.collected.len())
            .sum();
        held + self.active_set.as_ref().map_or(0, ActiveSet::len)
    }

    /// True once the final round has been scored.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::Scoring && self.total_rounds > 0 && self.round >= self.total_rounds
    }

    /// Seats ordered by cumulative score, best first; ties keep seat order.
    #[must_use]
    pub fn standings(&self) -> Vec<Seat> {
        let mut seats: Vec<Seat> = self.players.seats().collect();
        seats.sort_by_key(|&s| std::cmp::Reverse(self.players[s].score));
        seats
    }

    /// Seats sharing the top cumulative score, once the match is over.
    #[must_use]
    pub fn leaders(&self) -> Vec<Seat> {
        if !self.is_over() {
            return Vec::new();
        }
        let Some(best) = self.players.values().map(|p| p.score).max() else {
            return Vec::new();
        };
        self.players
            .iter()
            .filter(|(_, p)| p.score == best)
            .map(|(s, _)| s)
            .collect()
    }

    /// Encode a snapshot with bincode. The RNG is not included.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    /// Decode a snapshot. The restored match gets a fresh entropy-seeded RNG.
    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}
