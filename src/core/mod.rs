//! Core engine types: identities, seats, RNG, configuration, moves, state.
//!
//! Everything here is plain data. The rules that move a `Match` from one
//! snapshot to the next live in `crate::rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{PlayerId, Seat, SeatMap};
pub use rng::{GameRng, GameRngState};
pub use config::{MatchConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Move, MoveKind, MoveRecord, Selection};
pub use state::{
    ActiveSet, EndReason, Match, MatchId, Phase, PhaseKind, Player, RoundOutcome, ScoutAndShow,
};
