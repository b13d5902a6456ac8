//! Turn order for a single hand.

use super::{
    entities::{Player, SeatIndex},
    interfaces::Seating,
};

/// Circular turn order with a cursor. Members can be removed (fold) but
/// never re-admitted; the order itself is fixed for the hand.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Round {
    order: Vec<SeatIndex>,
    contesting: Vec<bool>,
    cursor: usize,
}

impl Round {
    #[must_use]
    pub fn new(order: Vec<SeatIndex>) -> Self {
        let contesting = vec![true; order.len()];
        Self {
            order,
            contesting,
            cursor: 0,
        }
    }

    /// Number of players still contesting the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contesting.iter().filter(|c| **c).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, seat: SeatIndex) -> bool {
        self.position(seat).is_some_and(|idx| self.contesting[idx])
    }

    /// Contesting seats in turn order, starting from the first seat of the
    /// hand (left of the button).
    #[must_use]
    pub fn members(&self) -> Vec<SeatIndex> {
        self.order
            .iter()
            .zip(&self.contesting)
            .filter_map(|(seat, contesting)| contesting.then_some(*seat))
            .collect()
    }

    /// Every seat dealt into the hand, folded or not.
    #[must_use]
    pub fn seats(&self) -> &[SeatIndex] {
        &self.order
    }

    /// Return the contesting seat under the cursor and advance past it.
    pub fn next(&mut self) -> Option<SeatIndex> {
        let idx = self.scan(self.cursor)?;
        self.cursor = (idx + 1) % self.order.len();
        Some(self.order[idx])
    }

    /// The seat `next` would return, without moving the cursor.
    #[must_use]
    pub fn peek(&self) -> Option<SeatIndex> {
        self.scan(self.cursor).map(|idx| self.order[idx])
    }

    /// Fold a seat out of the hand. Returns whether it was contesting.
    pub fn remove(&mut self, seat: SeatIndex) -> bool {
        match self.position(seat) {
            Some(idx) if self.contesting[idx] => {
                self.contesting[idx] = false;
                true
            }
            _ => false,
        }
    }

    /// Put the cursor on `seat`, or on the first contesting seat after it.
    pub fn seek(&mut self, seat: SeatIndex) {
        if let Some(idx) = self.position(seat) {
            self.cursor = idx;
        }
    }

    /// First contesting seat after `seat`, wrapping. May be `seat` itself
    /// when nobody else contests.
    #[must_use]
    pub fn following(&self, seat: SeatIndex) -> Option<SeatIndex> {
        let idx = self.position(seat)?;
        self.scan((idx + 1) % self.order.len())
            .map(|idx| self.order[idx])
    }

    /// Seat dealt in immediately before `seat`, contesting or not.
    #[must_use]
    pub fn preceding(&self, seat: SeatIndex) -> Option<SeatIndex> {
        let idx = self.position(seat)?;
        let n = self.order.len();
        Some(self.order[(idx + n - 1) % n])
    }

    fn position(&self, seat: SeatIndex) -> Option<usize> {
        self.order.iter().position(|s| *s == seat)
    }

    fn scan(&self, start: usize) -> Option<usize> {
        let n = self.order.len();
        (0..n)
            .map(|offset| (start + offset) % n)
            .find(|idx| self.contesting[*idx])
    }
}

/// Deals every funded seat in, rotating the start by one seat per hand so
/// the button moves around the table.
#[derive(Debug, Default)]
pub struct RotatingSeating;

impl Seating for RotatingSeating {
    fn seat_players(&self, players: &[Player], hand: u64) -> Round {
        let mut funded: Vec<SeatIndex> = players
            .iter()
            .filter(|player| player.stack() > 0)
            .map(|player| player.seat)
            .collect();
        if !funded.is_empty() {
            let shift = (hand % funded.len() as u64) as usize;
            funded.rotate_left(shift);
        }
        Round::new(funded)
    }
}
