//! Move representation.
//!
//! A `Move` is what a collaborator submits on behalf of a player. Moves
//! carry only indices into state the player can see (their own hand, the
//! active set); the engine validates them against the current `Match`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Seat;

/// Hand indices for a show. Most shows are 1-4 cards.
pub type Selection = SmallVec<[usize; 4]>;

/// A move a player can request.
///
/// ## Example
///
/// ```
/// use scout_engine::core::{Move, MoveKind};
///
/// let show = Move::show(&[2, 3, 4]);
/// assert_eq!(show.kind(), MoveKind::Show);
///
/// // Take the left end of the active set, flip it, put it first in hand.
/// let scout = Move::scout(0, 0, true);
/// assert_eq!(scout.kind(), MoveKind::Scout);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Move {
    /// Swap both faces of every card in hand (ready check only).
    FlipHand,
    /// Confirm hand orientation (ready check only).
    SetReady,
    /// Play adjacent hand cards to beat the active set.
    Show { indices: Selection },
    /// Take an end card of the active set into hand.
    Scout {
        /// Active set index; must be 0 or the last index.
        card: usize,
        /// Hand position to insert at (0..=hand length).
        insert: usize,
        /// Flip the card before inserting it.
        flip: bool,
    },
    /// Begin the once-per-round scout-then-show.
    ScoutAndShow,
    /// Decline to show after scouting during scout & show.
    EndTurn,
    /// Host: deal the next round.
    NextRound,
    /// Host: reset scores and start again from round 1.
    RestartMatch,
}

impl Move {
    /// Create a show move.
    #[must_use]
    pub fn show(indices: &[usize]) -> Self {
        Move::Show {
            indices: SmallVec::from_slice(indices),
        }
    }

    /// Create a scout move.
    #[must_use]
    pub fn scout(card: usize, insert: usize, flip: bool) -> Self {
        Move::Scout { card, insert, flip }
    }

    /// The kind of this move.
    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::FlipHand => MoveKind::FlipHand,
            Move::SetReady => MoveKind::SetReady,
            Move::Show { .. } => MoveKind::Show,
            Move::Scout { .. } => MoveKind::Scout,
            Move::ScoutAndShow => MoveKind::ScoutAndShow,
            Move::EndTurn => MoveKind::EndTurn,
            Move::NextRound => MoveKind::NextRound,
            Move::RestartMatch => MoveKind::RestartMatch,
        }
    }
}

/// Move kind without arguments, used when listing what a player may do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveKind {
    FlipHand,
    SetReady,
    Show,
    Scout,
    ScoutAndShow,
    EndTurn,
    NextRound,
    RestartMatch,
}

/// An accepted move with its position in the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Seat that made the move.
    pub seat: Seat,

    /// The move.
    pub mv: Move,

    /// Round in which it was made (1-based).
    pub round: u8,

    /// Sequence number within the match.
    pub sequence: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(seat: Seat, mv: Move, round: u8, sequence: u32) -> Self {
        Self {
            seat,
            mv,
            round,
            sequence,
        }
    }
}
