//! Match configuration.
//!
//! The rules engine is configured once via `MatchConfig` and applies the
//! same table limits and chip allowances to every match it creates.

use serde::{Deserialize, Serialize};

/// Smallest table the rules support.
pub const MIN_PLAYERS: usize = 2;

/// Largest table the rules support.
pub const MAX_PLAYERS: usize = 5;

/// Table limits and per-round allowances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Players required before the host can start (at least 2).
    pub min_players: usize,

    /// Seats available (at most 5).
    pub max_players: usize,

    /// Scout chips each player receives per round in a 2-player match.
    /// Larger tables start every round with none.
    pub two_player_scout_chips: u8,

    /// Fixed RNG seed. `None` seeds every match from OS entropy.
    /// Only tests should set this.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            two_player_scout_chips: 3,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Use a fixed seed (deterministic deals).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Change the minimum table size, clamped to the supported range.
    #[must_use]
    pub fn with_min_players(mut self, count: usize) -> Self {
        self.min_players = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    /// Change the seat limit, clamped to the supported range.
    #[must_use]
    pub fn with_max_players(mut self, count: usize) -> Self {
        self.max_players = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    /// Change the 2-player chip allowance.
    #[must_use]
    pub fn with_two_player_scout_chips(mut self, chips: u8) -> Self {
        self.two_player_scout_chips = chips;
        self
    }

    /// Scout chips every player starts a round with at a table of `player_count`.
    #[must_use]
    pub fn starting_chips(&self, player_count: usize) -> u8 {
        if player_count == 2 {
            self.two_player_scout_chips
        } else {
            0
        }
    }
}
