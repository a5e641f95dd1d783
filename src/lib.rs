//! # scout-engine
//!
//! Authoritative rules engine for the card game Scout, for 2 to 5 players.
//!
//! ## Design Principles
//!
//! 1. **Snapshots In, Snapshots Out**: Every operation takes a `&Match` and
//!    returns a new `Match` or an error. The input is never modified, so a
//!    rejected move leaves the caller's state exactly as it was.
//!
//! 2. **Explicit Phases**: Turn holder and scout & show progress live in
//!    `Phase::Playing`; invalid flag combinations cannot be built.
//!
//! 3. **No Global State**: Live matches sit in an injected `MatchStore`;
//!    the `Lobby` locks one match per move.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Hands and history use `im-rs`, so the
//!   per-move snapshot clone is O(1).
//!
//! - **Private Randomness**: Each match owns a ChaCha RNG that is never
//!   serialized or shown to players.
//!
//! ## Modules
//!
//! - `core`: Ids, seats, RNG, configuration, moves, match state
//! - `cards`: Double-valued cards and the deck builder
//! - `rules`: Set evaluator, scoring and the `ScoutRules` state machine
//! - `view`: Per-player redacted snapshots
//! - `store`: Match storage and the lobby
//! - `error`: Rejections and contract violations

pub mod core;
pub mod cards;
pub mod rules;
pub mod view;
pub mod store;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, Seat, SeatMap,
    GameRng, GameRngState,
    MatchConfig, MAX_PLAYERS, MIN_PLAYERS,
    Move, MoveKind, MoveRecord, Selection,
    ActiveSet, EndReason, Match, MatchId, Phase, PhaseKind, Player, RoundOutcome, ScoutAndShow,
};

pub use crate::cards::{Card, CardId, Deal};

pub use crate::rules::{GameResult, RulesEngine, ScoutRules, SetInfo, SetKind};

pub use crate::view::{MatchView, SeatView};

pub use crate::store::{InMemoryStore, Lobby, MatchHandle, MatchStore};

pub use crate::error::{ContractViolation, Rejection, ScoutError, ScoutResult, ViolationKind};
