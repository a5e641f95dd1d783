//! Match storage and the lobby that serializes moves per match.
//!
//! ## Architecture
//!
//! - `MatchStore`: get/put/remove by `MatchId`, injected into the lobby
//! - `InMemoryStore`: the default store, a locked hash map
//! - `Lobby`: drives `ScoutRules` against stored matches
//!
//! Each match lives behind its own `Mutex`. A move holds that lock from
//! validation to commit, so two moves on one match never interleave while
//! different matches proceed in parallel.

pub mod lobby;
pub mod memory;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{Match, MatchId};

pub use lobby::Lobby;
pub use memory::InMemoryStore;

/// Shared, exclusively-lockable match.
pub type MatchHandle = Arc<Mutex<Match>>;

/// Storage for live matches.
pub trait MatchStore: Send + Sync {
    /// Handle for a stored match.
    fn get(&self, id: &MatchId) -> Option<MatchHandle>;

    /// Store a match, replacing any match with the same id.
    fn put(&self, state: Match) -> MatchHandle;

    /// Store `state` unless its id is taken; returns the stored handle
    /// and whether it was inserted.
    fn put_if_absent(&self, state: Match) -> (MatchHandle, bool);

    /// Remove a match, returning its handle.
    fn remove(&self, id: &MatchId) -> Option<MatchHandle>;

    /// Ids of every stored match.
    fn ids(&self) -> Vec<MatchId>;

    fn contains(&self, id: &MatchId) -> bool {
        self.get(id).is_some()
    }

    fn len(&self) -> usize {
        self.ids().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
