//! Set classification and strength comparison.
//!
//! A set is a non-empty sequence of cards read by their active faces, in
//! hand order:
//!
//! - **single**: one card
//! - **group**: every face equal
//! - **run**: faces step by exactly +1 or exactly -1 the whole way
//!
//! Sets compare by length first, then group over run, then value (the
//! common face of a group, the lowest face of a run).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Shape of a valid set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SetKind {
    Single,
    Group,
    Run,
}

impl SetKind {
    /// Tie-break rank at equal length.
    fn rank(self) -> u8 {
        match self {
            SetKind::Single | SetKind::Run => 0,
            SetKind::Group => 1,
        }
    }
}

/// Classification of a valid set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SetInfo {
    pub kind: SetKind,
    pub value: u8,
    pub len: usize,
}

impl SetInfo {
    fn strength(&self) -> (usize, u8, u8) {
        (self.len, self.kind.rank(), self.value)
    }
}

impl PartialOrd for SetInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SetInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.strength().cmp(&other.strength())
    }
}

/// Classify `cards`, or `None` if they do not form a set.
///
/// ```
/// use scout_engine::cards::{Card, CardId};
/// use scout_engine::rules::{classify, SetKind};
///
/// let run: Vec<Card> = [7, 6, 5]
///     .iter()
///     .enumerate()
///     .map(|(i, &v)| Card::new(CardId::new(i as u8 + 1), v, if v == 1 { 2 } else { 1 }))
///     .collect();
/// let info = classify(&run).unwrap();
/// assert_eq!(info.kind, SetKind::Run);
/// assert_eq!(info.value, 5);
/// ```
#[must_use]
pub fn classify(cards: &[Card]) -> Option<SetInfo> {
    let first = cards.first()?.value();
    let len = cards.len();

    if len == 1 {
        return Some(SetInfo {
            kind: SetKind::Single,
            value: first,
            len,
        });
    }

    if cards.iter().all(|c| c.value() == first) {
        return Some(SetInfo {
            kind: SetKind::Group,
            value: first,
            len,
        });
    }

    let steps = |delta: i16| {
        cards
            .windows(2)
            .all(|w| i16::from(w[1].value()) - i16::from(w[0].value()) == delta)
    };
    if steps(1) || steps(-1) {
        let value = cards.iter().map(Card::value).min().unwrap_or(first);
        return Some(SetInfo {
            kind: SetKind::Run,
            value,
            len,
        });
    }

    None
}

/// Whether `candidate` beats `current`.
///
/// An empty table (`None`) is beaten by anything. Otherwise both must be
/// valid sets and `candidate` must be strictly stronger; equal strength is
/// not enough.
#[must_use]
pub fn is_stronger(candidate: &[Card], current: Option<&[Card]>) -> bool {
    let Some(current) = current else {
        return true;
    };
    match (classify(candidate), classify(current)) {
        (Some(new), Some(old)) => new > old,
        _ => false,
    }
}

/// Whether some adjacent run of `hand` forms a valid set beating `current`.
#[must_use]
pub fn can_beat_any(hand: &[Card], current: Option<&[Card]>) -> bool {
    first_beating_range(hand, current).is_some()
}

/// First `start..end` range of `hand` (shortest first from each start)
/// forming a valid set that beats `current`.
#[must_use]
pub fn first_beating_range(hand: &[Card], current: Option<&[Card]>) -> Option<std::ops::Range<usize>> {
    // Only sets at least as long as the current one can win.
    let min_len = current.map_or(1, <[Card]>::len).max(1);
    for start in 0..hand.len() {
        for end in (start + min_len)..=hand.len() {
            let slice = &hand[start..end];
            if classify(slice).is_some() && is_stronger(slice, current) {
                return Some(start..end);
            }
        }
    }
    None
}
