//! Lobby concurrency tests.
//!
//! Moves on one match are serialized by its lock; separate matches run
//! side by side without sharing state.

mod common;

use std::sync::Barrier;
use std::thread;

use common::{init_logging, player_ids};
use scout_engine::core::{MatchConfig, MatchId, Move, PhaseKind, Seat};
use scout_engine::error::Rejection;
use scout_engine::rules::{cards_conserved, ScoutRules};
use scout_engine::store::{InMemoryStore, Lobby, MatchStore};

fn lobby(seed: u64) -> Lobby<InMemoryStore> {
    Lobby::new(
        ScoutRules::new(MatchConfig::default().with_seed(seed)),
        InMemoryStore::new(),
    )
}

/// Bring a match to its first turn.
fn open(lobby: &Lobby<InMemoryStore>, room: &MatchId, count: usize) {
    let ids = player_ids(count);
    for id in &ids {
        lobby.join(room, id.clone(), id.as_str()).unwrap();
    }
    lobby.start(room, &ids[0]).unwrap();
    for id in &ids {
        lobby.submit(room, id, &Move::SetReady).unwrap();
    }
}

/// Two racing scouts of the same end: exactly one wins.
#[test]
fn test_racing_moves_are_serialized() {
    init_logging();
    let lobby = lobby(1);
    let room = MatchId::from("race");
    open(&lobby, &room, 3);

    let holder = player_ids(3).remove(0);
    lobby.submit(&room, &holder, &Move::show(&[0])).unwrap();
    let next = lobby.snapshot(&room).unwrap().turn().unwrap();
    let scout_id = player_ids(3).remove(next.index());

    let barrier = Barrier::new(2);
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    lobby.submit(&room, &scout_id, &Move::scout(0, 0, false))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let failed = results.iter().find_map(|r| r.as_ref().err()).unwrap();
    assert!(matches!(
        failed.rejection(),
        Some(Rejection::NotYourTurn { .. })
    ));

    let m = lobby.snapshot(&room).unwrap();
    assert_eq!(m.history.iter().filter(|r| r.seat == next).count(), 2);
    assert!(cards_conserved(&m));
}

/// Concurrent joins never seat the same player twice or exceed five seats.
#[test]
fn test_concurrent_joins() {
    let lobby = lobby(2);
    let room = MatchId::from("busy");

    let joined: usize = thread::scope(|s| {
        let handles: Vec<_> = player_ids(5)
            .into_iter()
            .chain(player_ids(3))
            .chain(["x".into(), "y".into()])
            .map(|id| {
                let lobby = lobby.clone();
                let room = room.clone();
                s.spawn(move || lobby.join(&room, id, "name").is_ok())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    let m = lobby.snapshot(&room).unwrap();
    assert_eq!(m.player_count(), joined);
    assert_eq!(m.player_count(), 5);
    let mut ids: Vec<_> = m.players.values().map(|p| p.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

/// Separate matches progress independently on separate threads.
#[test]
fn test_matches_are_isolated() {
    let lobby = lobby(3);
    let rooms: Vec<MatchId> = (0..4).map(|i| MatchId::new(format!("room-{i}"))).collect();

    thread::scope(|s| {
        for (i, room) in rooms.iter().enumerate() {
            let lobby = &lobby;
            s.spawn(move || open(lobby, room, 2 + i % 4));
        }
    });

    assert_eq!(lobby.store().len(), 4);
    for (i, room) in rooms.iter().enumerate() {
        let m = lobby.snapshot(room).unwrap();
        assert_eq!(m.player_count(), 2 + i % 4);
        assert_eq!(m.phase.kind(), PhaseKind::Playing);
        assert_eq!(m.turn(), Some(Seat::HOST));
    }
}

/// Views redact other hands; closing forgets the match.
#[test]
fn test_view_and_close() {
    let lobby = lobby(4);
    let room = MatchId::from("room");
    open(&lobby, &room, 2);
    let ids = player_ids(2);

    let view = lobby.view(&room, &ids[1]).unwrap();
    assert_eq!(view.you, Some(Seat::new(1)));
    assert_eq!(view.hand.len(), 11);
    assert!(!view.your_turn);

    lobby.close(&room).unwrap();
    assert!(lobby.snapshot(&room).is_err());
    assert!(lobby.store().is_empty());
}
