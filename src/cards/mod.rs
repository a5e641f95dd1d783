//! Card system: double-valued cards and the per-round deck builder.
//!
//! ## Architecture
//!
//! - `Card`: a pair of distinct face values with a stable identity
//! - `deck`: builds the player-count-adjusted, shuffled deck and deals it

pub mod card;
pub mod deck;

pub use card::{Card, CardId};
pub use deck::{build_deck, deal_round, deck_size, hand_size, Deal};
