//! Double-valued Scout cards.
//!
//! Every card carries two distinct values in 1..=10. The `top` face is the
//! one currently in play; flipping swaps the faces. Identity (`CardId`) is
//! stable across flips so clients can animate the same card.

use serde::{Deserialize, Serialize};

/// Stable card identity within a round's deck (1..=45).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card in hand, on the table, or in a collected pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Active face.
    pub top: u8,
    /// Inactive face.
    pub bottom: u8,
    /// Toggled on every flip. Display only.
    #[serde(default)]
    pub flipped: bool,
}

impl Card {
    /// Create a card with `top` active.
    #[must_use]
    pub fn new(id: CardId, top: u8, bottom: u8) -> Self {
        debug_assert!(top != bottom, "card faces must differ");
        debug_assert!((1..=10).contains(&top) && (1..=10).contains(&bottom));
        Self {
            id,
            top,
            bottom,
            flipped: false,
        }
    }

    /// The value that counts when the card is played.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.top
    }

    /// Swap faces in place.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.top, &mut self.bottom);
        self.flipped = !self.flipped;
    }

    /// Copy of this card with faces swapped.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Whether either face shows `value`.
    #[must_use]
    pub fn bears(&self, value: u8) -> bool {
        self.top == value || self.bottom == value
    }

    /// Faces as an unordered pair (low, high).
    #[must_use]
    pub fn faces(&self) -> (u8, u8) {
        (self.top.min(self.bottom), self.top.max(self.bottom))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.top, self.bottom)
    }
}
