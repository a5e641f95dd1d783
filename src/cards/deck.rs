//! Deck building and dealing.
//!
//! The full deck has one card per unordered pair of distinct values
//! 1..=10 (45 cards). Smaller tables remove cards before shuffling:
//!
//! | Players | Removed            | Deck | Hand |
//! |---------|--------------------|------|------|
//! | 2       | the 9/10 card      | 44   | 11   |
//! | 3       | every card with 10 | 36   | 12   |
//! | 4       | the 9/10 card      | 44   | 11   |
//! | 5       | nothing            | 45   | 9    |
//!
//! A 2-player table builds one 44-card deck every two rounds: the odd
//! round deals the first 22 cards and keeps the rest in reserve for the
//! following round.

use tracing::warn;

use super::card::{Card, CardId};
use crate::core::GameRng;

/// Cards in the unadjusted deck.
pub const FULL_DECK_SIZE: usize = 45;

/// Cards dealt per round at a 2-player table (11 each).
const TWO_PLAYER_HALF: usize = 22;

/// Every card of the unadjusted deck, unshuffled, `top` holding the lower face.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(FULL_DECK_SIZE);
    let mut id = 1u8;
    for low in 1..=9u8 {
        for high in (low + 1)..=10u8 {
            deck.push(Card::new(CardId::new(id), low, high));
            id += 1;
        }
    }
    deck
}

/// The unshuffled deck for a table of `player_count` (2..=5).
#[must_use]
pub fn deck_for(player_count: usize) -> Vec<Card> {
    let deck = full_deck();
    match player_count {
        3 => deck.into_iter().filter(|c| !c.bears(10)).collect(),
        2 | 4 => deck.into_iter().filter(|c| c.faces() != (9, 10)).collect(),
        _ => deck,
    }
}

/// Size of the adjusted deck for a table of `player_count`.
#[must_use]
pub fn deck_size(player_count: usize) -> usize {
    match player_count {
        3 => 36,
        2 | 4 => 44,
        _ => FULL_DECK_SIZE,
    }
}

/// Cards dealt to each player per round.
#[must_use]
pub fn hand_size(player_count: usize) -> usize {
    match player_count {
        3 => 12,
        2 | 4 => 11,
        _ => 9,
    }
}

/// Build a shuffled deck with randomized orientation.
///
/// The deck is uniformly permuted, then each card independently has a
/// 50% chance of having its faces swapped.
#[must_use]
pub fn build_deck(player_count: usize, rng: &mut GameRng) -> Vec<Card> {
    let mut deck = deck_for(player_count);
    rng.shuffle(&mut deck);
    for card in &mut deck {
        if rng.gen_bool(0.5) {
            card.flip();
            // Orientation at deal time is not a player flip.
            card.flipped = false;
        }
    }
    deck
}

/// Result of dealing one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// One hand per seat, in seat order.
    pub hands: Vec<Vec<Card>>,
    /// Undealt cards, unused this round.
    pub set_aside: Vec<Card>,
    /// 2-player only: the half kept for the next round.
    pub reserve: Option<Vec<Card>>,
}

impl Deal {
    /// Total cards handed out to players.
    #[must_use]
    pub fn dealt(&self) -> usize {
        self.hands.iter().map(Vec::len).sum()
    }
}

/// Deal the hands for `round` (1-based).
///
/// `reserve` is the half kept back by the previous 2-player round; it is
/// ignored at larger tables. Each fresh build draws from its own fork of
/// the match RNG.
#[must_use]
pub fn deal_round(
    player_count: usize,
    round: u8,
    reserve: Option<Vec<Card>>,
    rng: &mut GameRng,
) -> Deal {
    let per_hand = hand_size(player_count);

    if player_count == 2 {
        let (mut cards, reserve) = if round % 2 == 1 {
            let mut deck = build_deck(player_count, &mut rng.fork());
            let rest = deck.split_off(TWO_PLAYER_HALF);
            (deck, Some(rest))
        } else {
            match reserve {
                Some(half) if half.len() == TWO_PLAYER_HALF => (half, None),
                other => {
                    warn!(
                        round,
                        reserve = ?other.as_ref().map(Vec::len),
                        "2-player reserve half missing, rebuilding deck"
                    );
                    let mut deck = build_deck(player_count, &mut rng.fork());
                    deck.truncate(TWO_PLAYER_HALF);
                    (deck, None)
                }
            }
        };
        let second = cards.split_off(per_hand);
        return Deal {
            hands: vec![cards, second],
            set_aside: Vec::new(),
            reserve,
        };
    }

    let mut deck = build_deck(player_count, &mut rng.fork());
    let mut hands = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        let rest = deck.split_off(per_hand.min(deck.len()));
        hands.push(std::mem::replace(&mut deck, rest));
    }
    Deal {
        hands,
        set_aside: deck,
        reserve: None,
    }
}
