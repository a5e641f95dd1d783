//! Rules engine trait.
//!
//! The engine defines:
//! - Which moves a player may currently issue
//! - How an accepted move produces the next snapshot
//! - When the match is over, and who leads
//!
//! Implementations never mutate the `Match` they are given. A rejected move
//! returns an error and the caller keeps its snapshot as it was.

use crate::core::{Match, MatchConfig, Move, MoveKind, PlayerId, Seat};
use crate::error::ScoutResult;

/// Result of a completed match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single leader.
    Winner(Seat),
    /// Several seats share the top score.
    Winners(Vec<Seat>),
}

impl GameResult {
    /// Build a result from the seats sharing the top score.
    #[must_use]
    pub fn from_leaders(mut leaders: Vec<Seat>) -> Option<Self> {
        match leaders.len() {
            0 => None,
            1 => leaders.pop().map(GameResult::Winner),
            _ => Some(GameResult::Winners(leaders)),
        }
    }

    /// Check if a seat won.
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        match self {
            GameResult::Winner(s) => *s == seat,
            GameResult::Winners(ss) => ss.contains(&seat),
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `available_moves`: advisory; return empty if the player can't act
/// - `apply_move`: authoritative; must leave `state` untouched
/// - `is_terminal`: `None` while rounds remain
pub trait RulesEngine {
    /// Get the match configuration.
    fn config(&self) -> &MatchConfig;

    /// Move kinds the player could issue right now.
    fn available_moves(&self, state: &Match, player: &PlayerId) -> Vec<MoveKind>;

    /// Validate and apply a move, returning the next snapshot.
    fn apply_move(&self, state: &Match, player: &PlayerId, mv: &Move) -> ScoutResult<Match>;

    /// Final result once every round has been scored.
    fn is_terminal(&self, state: &Match) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether a move of `kind` is currently available to the player.
    fn can_issue(&self, state: &Match, player: &PlayerId, kind: MoveKind) -> bool {
        self.available_moves(state, player).contains(&kind)
    }

    /// Apply a sequence of moves, stopping at the first rejection.
    fn apply_all<'a, I>(&self, state: &Match, moves: I) -> ScoutResult<Match>
    where
        I: IntoIterator<Item = (&'a PlayerId, &'a Move)>,
    {
        let mut current = state.clone();
        for (player, mv) in moves {
            current = self.apply_move(&current, player, mv)?;
        }
        Ok(current)
    }
}
