//! Player identification and per-seat data storage.
//!
//! ## PlayerId
//!
//! Durable identity supplied by the collaborator. It is never tied to a
//! transport session, so a reconnecting client maps back onto the same
//! player.
//!
//! ## Seat
//!
//! 0-based seating index. Seating order is turn order.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Durable player identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat index supporting up to 255 seats.
///
/// The first player to join sits at `Seat(0)` and is the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seat(pub u8);

impl Seat {
    /// The host seat.
    pub const HOST: Seat = Seat(0);

    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next seat clockwise at a table of `seat_count`.
    ///
    /// ```
    /// use scout_engine::core::Seat;
    ///
    /// assert_eq!(Seat::new(1).next(3), Seat::new(2));
    /// assert_eq!(Seat::new(2).next(3), Seat::new(0));
    /// ```
    #[must_use]
    pub fn next(self, seat_count: usize) -> Self {
        debug_assert!(seat_count > 0, "next seat at an empty table");
        Self(((self.index() + 1) % seat_count) as u8)
    }

    /// Iterate over all seats at a table of `seat_count`.
    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// Seats are appended as players join (`push`) and never removed while
/// a match is open.
///
/// ## Example
///
/// ```
/// use scout_engine::core::{Seat, SeatMap};
///
/// let mut chips: SeatMap<u8> = SeatMap::new(3, |_| 0);
/// chips[Seat::new(1)] += 2;
/// assert_eq!(chips[Seat::new(1)], 2);
/// assert_eq!(chips.len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> Default for SeatMap<T> {
    fn default() -> Self {
        Self { data: Vec::new() }
    }
}

impl<T> SeatMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(seat_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8).map(|i| factory(Seat(i))).collect();
        Self { data }
    }

    /// Create an empty map.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a value at the next free seat and return that seat.
    pub fn push(&mut self, value: T) -> Seat {
        assert!(self.data.len() < 255, "At most 255 seats supported");
        self.data.push(value);
        Seat((self.data.len() - 1) as u8)
    }

    /// Number of occupied seats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<&T> {
        self.data.get(seat.index())
    }

    pub fn get_mut(&mut self, seat: Seat) -> Option<&mut T> {
        self.data.get_mut(seat.index())
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all occupied seats.
    pub fn seats(&self) -> impl Iterator<Item = Seat> {
        Seat::all(self.data.len())
    }

    /// First seat whose value matches `pred`.
    pub fn position(&self, pred: impl Fn(&T) -> bool) -> Option<Seat> {
        self.data.iter().position(pred).map(|i| Seat(i as u8))
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_basics() {
        let s0 = Seat::new(0);
        let s1 = Seat::new(1);

        assert_eq!(s0.index(), 0);
        assert_eq!(s1.index(), 1);
        assert_eq!(s0, Seat::HOST);
        assert_eq!(format!("{}", s1), "Seat 1");
    }

    #[test]
    fn test_seat_next_wraps() {
        assert_eq!(Seat::new(0).next(2), Seat::new(1));
        assert_eq!(Seat::new(1).next(2), Seat::new(0));
        assert_eq!(Seat::new(4).next(5), Seat::new(0));
    }

    #[test]
    fn test_seat_all() {
        let seats: Vec<_> = Seat::all(4).collect();
        assert_eq!(seats, vec![Seat(0), Seat(1), Seat(2), Seat(3)]);
    }

    #[test]
    fn test_player_id_display() {
        let id = PlayerId::from("alice");
        assert_eq!(id.as_str(), "alice");
        assert_eq!(format!("{}", id), "alice");
    }

    #[test]
    fn test_seat_map_push_assigns_seats_in_order() {
        let mut map: SeatMap<&str> = SeatMap::empty();
        assert!(map.is_empty());

        assert_eq!(map.push("a"), Seat(0));
        assert_eq!(map.push("b"), Seat(1));
        assert_eq!(map.len(), 2);
        assert_eq!(map[Seat(1)], "b");
    }

    #[test]
    fn test_seat_map_position() {
        let map: SeatMap<i32> = SeatMap::new(3, |s| s.index() as i32 * 10);

        assert_eq!(map.position(|v| *v == 20), Some(Seat(2)));
        assert_eq!(map.position(|v| *v == 99), None);
        assert_eq!(map.get(Seat(5)), None);
    }

    #[test]
    fn test_seat_map_mutation() {
        let mut map: SeatMap<i32> = SeatMap::new(2, |_| 0);

        map[Seat(0)] = 10;
        *map.get_mut(Seat(1)).unwrap() = 20;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Seat(0), &10), (Seat(1), &20)]);
    }

    #[test]
    fn test_seat_map_serializes_as_list() {
        let map: SeatMap<i32> = SeatMap::new(2, |s| s.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, "[1,2]");

        let back: SeatMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
