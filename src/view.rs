//! Per-player redacted snapshots.
//!
//! A `MatchView` is what a collaborator broadcasts to one player after each
//! accepted move. It shows the viewer's own hand in full and only the hand
//! *sizes* of everyone else. The 2-player reserve and the RNG never appear.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{ActiveSet, Match, MatchId, MoveKind, Phase, PlayerId, RoundOutcome, Seat};
use crate::rules::available_moves;

/// Public information about one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: Seat,
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub score: i32,
    pub scout_chips: u8,
    pub collected: usize,
    pub ready: bool,
    pub used_scout_and_show: bool,
    pub round_score: Option<i32>,
}

/// A match as seen by one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub phase: Phase,
    pub round: u8,
    pub total_rounds: u8,
    pub active_set: Option<ActiveSet>,
    pub outcome: Option<RoundOutcome>,
    pub seats: Vec<SeatView>,

    /// The viewer's seat; `None` for spectators.
    pub you: Option<Seat>,
    /// The viewer's hand, in order.
    pub hand: Vec<Card>,
    pub your_turn: bool,
    /// Move kinds the viewer can issue right now.
    pub available: Vec<MoveKind>,
}

impl MatchView {
    /// Build the view for `viewer`. Unknown ids get a spectator view.
    #[must_use]
    pub fn for_player(state: &Match, viewer: &PlayerId) -> Self {
        Self::build(state, state.seat_of(viewer))
    }

    /// Public view with no hand revealed.
    #[must_use]
    pub fn spectator(state: &Match) -> Self {
        Self::build(state, None)
    }

    fn build(state: &Match, you: Option<Seat>) -> Self {
        let seats = state
            .players
            .iter()
            .map(|(seat, p)| SeatView {
                seat,
                id: p.id.clone(),
                name: p.name.clone(),
                hand_size: p.hand.len(),
                score: p.score,
                scout_chips: p.scout_chips,
                collected: p.collected.len(),
                ready: p.ready,
                used_scout_and_show: p.used_scout_and_show,
                round_score: p.round_score,
            })
            .collect();

        Self {
            id: state.id.clone(),
            phase: state.phase,
            round: state.round,
            total_rounds: state.total_rounds,
            active_set: state.active_set.clone(),
            outcome: state.outcome,
            seats,
            you,
            hand: you.map(|s| state.players[s].hand_cards()).unwrap_or_default(),
            your_turn: you.is_some() && state.turn() == you,
            available: you.map(|s| available_moves(state, s)).unwrap_or_default(),
        }
    }
}
