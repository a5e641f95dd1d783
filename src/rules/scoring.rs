//! Round scoring.
//!
//! Each player scores one point per collected card and per scout chip, and
//! loses one point per card left in hand. The round winner keeps every
//! card in hand without penalty.

use crate::core::{Match, Player, RoundOutcome, Seat};

/// Score a single player at round end.
#[must_use]
pub fn round_score(player: &Player, seat: Seat, outcome: Option<RoundOutcome>) -> i32 {
    let mut score = player.collected.len() as i32 + i32::from(player.scout_chips);
    if outcome.map_or(true, |o| o.winner != seat) {
        score -= player.hand.len() as i32;
    }
    score
}

/// Write each player's round score and add it to their running total.
///
/// Reads only the final round state; `state.outcome` decides who is exempt
/// from the hand penalty.
pub fn score_round(state: &mut Match) {
    let outcome = state.outcome;
    for (seat, player) in state.players.iter_mut() {
        let score = round_score(player, seat, outcome);
        player.round_score = Some(score);
        player.score += score;
    }
}
