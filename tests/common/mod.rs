//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use im::Vector;
use scout_engine::cards::{Card, CardId};
use scout_engine::core::{Match, MatchConfig, MatchId, Phase, PlayerId, ScoutAndShow, Seat};
use scout_engine::rules::{RulesEngine, ScoutRules};
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Initialize test logging once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn player_ids(count: usize) -> Vec<PlayerId> {
    (0..count).map(|i| PlayerId::new(format!("p{i}"))).collect()
}

/// Rules with a fixed seed.
pub fn seeded_rules(seed: u64) -> ScoutRules {
    ScoutRules::new(MatchConfig::default().with_seed(seed))
}

/// A started match in the ready check, players `p0..`.
pub fn started(rules: &ScoutRules, count: usize) -> Match {
    let mut m = rules.create_match(MatchId::from("room"));
    for (i, id) in player_ids(count).into_iter().enumerate() {
        m = rules.add_player(&m, id, format!("Player {i}")).unwrap();
    }
    rules.start_match(&m).unwrap()
}

/// A started match with every player ready.
pub fn playing(rules: &ScoutRules, count: usize) -> Match {
    let mut m = started(rules, count);
    for id in player_ids(count) {
        m = rules.apply_move(&m, &id, &scout_engine::Move::SetReady).unwrap();
    }
    m
}

/// Cards showing `values`, ids starting at `first_id`.
pub fn cards(first_id: u8, values: &[u8]) -> Vector<Card> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let hidden = if v == 10 { 1 } else { v + 1 };
            Card::new(CardId::new(first_id + i as u8), v, hidden)
        })
        .collect()
}

/// Replace every hand and hand the turn to `turn`.
pub fn rig(state: &mut Match, hands: &[&[u8]], turn: u8) {
    for (i, values) in hands.iter().enumerate() {
        let seat = Seat::new(i as u8);
        state.players[seat].hand = cards(10 * (i as u8 + 1), values);
        state.players[seat].collected = Vector::new();
    }
    state.active_set = None;
    state.consecutive_scouts = 0;
    state.dealt = state.cards_in_play();
    state.phase = Phase::Playing {
        turn: Seat::new(turn),
        pending: ScoutAndShow::NotStarted,
    };
}
