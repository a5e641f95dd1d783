//! Game rules.
//!
//! - `evaluator`: set classification and strength comparison
//! - `scoring`: end-of-round scores
//! - `engine`: the `RulesEngine` trait collaborators drive
//! - `scout`: `ScoutRules`, the phase and turn state machine
//!
//! Callers only ever go through `RulesEngine`; the evaluator and scorer are
//! pure helpers it calls.

pub mod engine;
pub mod evaluator;
pub mod scoring;
pub mod scout;

pub use engine::{GameResult, RulesEngine};
pub use evaluator::{can_beat_any, classify, first_beating_range, is_stronger, SetInfo, SetKind};
pub use scoring::{round_score, score_round};
pub use scout::{available_moves, cards_conserved, ScoutRules};
