//! Lobby: the collaborator-facing entry point over a `MatchStore`.

use std::sync::Arc;

use tracing::info;

use super::{MatchHandle, MatchStore};
use crate::core::{Match, MatchId, Move, PlayerId, Seat};
use crate::error::{ContractViolation, Rejection, ScoutResult};
use crate::rules::{RulesEngine, ScoutRules};
use crate::view::MatchView;

/// Routes requests to stored matches and commits accepted moves.
///
/// Every operation that changes a match locks its handle for the whole
/// validate, apply and commit cycle. Rejections leave the stored match as
/// it was.
pub struct Lobby<S: MatchStore> {
    rules: ScoutRules,
    store: Arc<S>,
}

impl<S: MatchStore> Lobby<S> {
    #[must_use]
    pub fn new(rules: ScoutRules, store: S) -> Self {
        Self {
            rules,
            store: Arc::new(store),
        }
    }

    #[must_use]
    pub fn rules(&self) -> &ScoutRules {
        &self.rules
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open an empty match. Fails if the id is taken.
    pub fn create(&self, id: MatchId) -> ScoutResult<Match> {
        let (handle, inserted) = self.store.put_if_absent(self.rules.create_match(id.clone()));
        if !inserted {
            return Err(ContractViolation::MatchExists(id.to_string()).into());
        }
        let snapshot = handle.lock().clone();
        Ok(snapshot)
    }

    /// Seat a player, opening the match on first join.
    pub fn join(
        &self,
        id: &MatchId,
        player: PlayerId,
        name: impl Into<String>,
    ) -> ScoutResult<Match> {
        let handle = match self.store.get(id) {
            Some(handle) => handle,
            None => self.store.put_if_absent(self.rules.create_match(id.clone())).0,
        };
        let name = name.into();
        self.commit(&handle, |state| self.rules.add_player(state, player, name))
    }

    /// Deal the first round. Only the host may start.
    pub fn start(&self, id: &MatchId, requester: &PlayerId) -> ScoutResult<Match> {
        let handle = self.handle(id)?;
        self.commit(&handle, |state| {
            match state.seat_of(requester) {
                Some(Seat::HOST) => {}
                Some(_) => return Err(Rejection::NotHost.into()),
                None => return Err(Rejection::UnknownPlayer(requester.to_string()).into()),
            }
            self.rules.start_match(state)
        })
    }

    /// Apply one move on behalf of `player`.
    pub fn submit(&self, id: &MatchId, player: &PlayerId, mv: &Move) -> ScoutResult<Match> {
        let handle = self.handle(id)?;
        self.commit(&handle, |state| self.rules.apply_move(state, player, mv))
    }

    /// Current full snapshot.
    pub fn snapshot(&self, id: &MatchId) -> ScoutResult<Match> {
        let handle = self.handle(id)?;
        let snapshot = handle.lock().clone();
        Ok(snapshot)
    }

    /// Current snapshot as seen by `player`.
    pub fn view(&self, id: &MatchId, player: &PlayerId) -> ScoutResult<MatchView> {
        let handle = self.handle(id)?;
        let state = handle.lock();
        Ok(MatchView::for_player(&state, player))
    }

    /// Remove a match, returning its final snapshot.
    pub fn close(&self, id: &MatchId) -> ScoutResult<Match> {
        let handle = self
            .store
            .remove(id)
            .ok_or_else(|| ContractViolation::UnknownMatch(id.to_string()))?;
        info!(match_id = %id, "match closed");
        let last = handle.lock().clone();
        Ok(last)
    }

    fn handle(&self, id: &MatchId) -> ScoutResult<MatchHandle> {
        self.store
            .get(id)
            .ok_or_else(|| ContractViolation::UnknownMatch(id.to_string()).into())
    }

    /// Run `step` under the match lock and store its result if accepted.
    fn commit<F>(&self, handle: &MatchHandle, step: F) -> ScoutResult<Match>
    where
        F: FnOnce(&Match) -> ScoutResult<Match>,
    {
        let mut state = handle.lock();
        let next = step(&state)?;
        *state = next.clone();
        Ok(next)
    }
}

impl<S: MatchStore> Clone for Lobby<S> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MatchConfig, Phase, PhaseKind};
    use crate::error::ScoutError;
    use crate::store::InMemoryStore;

    fn lobby() -> Lobby<InMemoryStore> {
        Lobby::new(
            ScoutRules::new(MatchConfig::default().with_seed(4)),
            InMemoryStore::new(),
        )
    }

    #[test]
    fn test_first_join_opens_match() {
        let lobby = lobby();
        let room = MatchId::from("room");

        let m = lobby.join(&room, PlayerId::from("a"), "A").unwrap();
        assert_eq!(m.player_count(), 1);
        let m = lobby.join(&room, PlayerId::from("b"), "B").unwrap();
        assert_eq!(m.player_count(), 2);
        assert_eq!(lobby.store().ids(), vec![room.clone()]);

        assert!(matches!(
            lobby.create(room),
            Err(ScoutError::Contract(ContractViolation::MatchExists(_)))
        ));
    }

    #[test]
    fn test_only_host_starts() {
        let lobby = lobby();
        let room = MatchId::from("room");
        lobby.join(&room, PlayerId::from("a"), "A").unwrap();
        lobby.join(&room, PlayerId::from("b"), "B").unwrap();

        let err = lobby.start(&room, &PlayerId::from("b")).unwrap_err();
        assert_eq!(err.rejection(), Some(&Rejection::NotHost));
        assert_eq!(lobby.snapshot(&room).unwrap().phase, Phase::Waiting);

        let m = lobby.start(&room, &PlayerId::from("a")).unwrap();
        assert_eq!(m.phase.kind(), PhaseKind::ReadyCheck);
    }

    #[test]
    fn test_submit_commits_only_accepted_moves() {
        let lobby = lobby();
        let room = MatchId::from("room");
        lobby.join(&room, PlayerId::from("a"), "A").unwrap();
        lobby.join(&room, PlayerId::from("b"), "B").unwrap();
        lobby.start(&room, &PlayerId::from("a")).unwrap();

        let before = lobby.snapshot(&room).unwrap();
        assert!(lobby.submit(&room, &PlayerId::from("a"), &Move::EndTurn).is_err());
        assert_eq!(lobby.snapshot(&room).unwrap(), before);

        lobby.submit(&room, &PlayerId::from("a"), &Move::SetReady).unwrap();
        let view = lobby.view(&room, &PlayerId::from("a")).unwrap();
        assert!(view.seats[0].ready);
    }

    #[test]
    fn test_unknown_match() {
        let lobby = lobby();
        let ghost = MatchId::from("ghost");
        assert!(matches!(
            lobby.submit(&ghost, &PlayerId::from("a"), &Move::SetReady),
            Err(ScoutError::Contract(ContractViolation::UnknownMatch(_)))
        ));
        assert!(lobby.close(&ghost).is_err());
    }

    #[test]
    fn test_close_removes_match() {
        let lobby = lobby();
        let room = MatchId::from("room");
        lobby.join(&room, PlayerId::from("a"), "A").unwrap();

        let last = lobby.close(&room).unwrap();
        assert_eq!(last.player_count(), 1);
        assert!(lobby.store().is_empty());
    }
}
