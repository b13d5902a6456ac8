//! Resource kinds that can live in a pile.

use std::{collections::VecDeque, fmt};

use crate::game::entities::{Card, Chips};

/// Something a pile can hold, split, and merge.
///
/// `take` must be all-or-nothing: it either removes exactly `amount` and
/// returns it, or returns `None` and leaves `self` untouched.
pub trait Resource: Default + fmt::Debug + Send {
    type Amount: Copy + Default + Ord + fmt::Display + Into<u64> + Send;

    fn total(&self) -> Self::Amount;

    fn take(&mut self, amount: Self::Amount) -> Option<Self>;

    fn give(&mut self, other: Self);
}

/// A quantity of chips.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChipStack(Chips);

impl ChipStack {
    #[must_use]
    pub const fn new(amount: Chips) -> Self {
        Self(amount)
    }
}

impl Resource for ChipStack {
    type Amount = Chips;

    fn total(&self) -> Chips {
        self.0
    }

    fn take(&mut self, amount: Chips) -> Option<Self> {
        let rest = self.0.checked_sub(amount)?;
        self.0 = rest;
        Some(Self(amount))
    }

    fn give(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// An ordered run of cards. Cards are taken from the front and given to the
/// back, so a shuffled deck deals in its shuffled order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CardStack(VecDeque<Card>);

impl CardStack {
    #[must_use]
    pub fn cards(&self) -> Vec<Card> {
        self.0.iter().copied().collect()
    }
}

impl From<Vec<Card>> for CardStack {
    fn from(value: Vec<Card>) -> Self {
        Self(value.into())
    }
}

impl Resource for CardStack {
    // A 52 card deck never needs more.
    type Amount = u32;

    fn total(&self) -> u32 {
        self.0.len() as u32
    }

    fn take(&mut self, amount: u32) -> Option<Self> {
        let amount = amount as usize;
        if amount > self.0.len() {
            return None;
        }
        Some(Self(self.0.drain(..amount).collect()))
    }

    fn give(&mut self, mut other: Self) {
        self.0.append(&mut other.0);
    }
}
