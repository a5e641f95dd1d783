//! In-memory match store.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use super::{MatchHandle, MatchStore};
use crate::core::{Match, MatchId};

/// Matches kept in a process-local map. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    matches: RwLock<FxHashMap<MatchId, MatchHandle>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchStore for InMemoryStore {
    fn get(&self, id: &MatchId) -> Option<MatchHandle> {
        self.matches.read().get(id).cloned()
    }

    fn put(&self, state: Match) -> MatchHandle {
        let id = state.id.clone();
        let handle = Arc::new(Mutex::new(state));
        self.matches.write().insert(id, Arc::clone(&handle));
        handle
    }

    fn put_if_absent(&self, state: Match) -> (MatchHandle, bool) {
        let mut matches = self.matches.write();
        if let Some(existing) = matches.get(&state.id) {
            return (Arc::clone(existing), false);
        }
        let id = state.id.clone();
        let handle = Arc::new(Mutex::new(state));
        matches.insert(id, Arc::clone(&handle));
        (handle, true)
    }

    fn remove(&self, id: &MatchId) -> Option<MatchHandle> {
        self.matches.write().remove(id)
    }

    fn ids(&self) -> Vec<MatchId> {
        let mut ids: Vec<MatchId> = self.matches.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn len(&self) -> usize {
        self.matches.read().len()
    }
}
