//! All-in side pots.

use super::entities::{Chips, SeatIndex, SidePotView};
use crate::pile::{ChipStack, Pile, PileResult, transfer};

/// Chips staked up to one all-in player's commitment level.
#[derive(Clone, Debug)]
pub struct SidePot {
    pub owner: SeatIndex,
    /// Commitment level the pot is pinned to. Never changes once opened.
    pub threshold: Chips,
    pub chips: Pile<ChipStack>,
}

/// Side pots in creation order. Thresholds never decrease along the list
/// because an all-in is only accepted when it at least calls.
#[derive(Clone, Debug, Default)]
pub struct SidePotLedger {
    pots: Vec<SidePot>,
}

impl SidePotLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an empty pot for `owner` pinned at `threshold`.
    pub fn open(&mut self, owner: SeatIndex, threshold: Chips) -> &SidePot {
        log::debug!("opening side pot for seat {owner} at {threshold}");
        self.pots.push(SidePot {
            owner,
            threshold,
            chips: Pile::new(),
        });
        &self.pots[self.pots.len() - 1]
    }

    /// Spread a wager over the open pots in creation order. The running
    /// level starts at the player's `prior` commitment; each pot above the
    /// level takes what is needed to lift the level to its threshold.
    /// Returns the part of the wager left over for the main pot.
    ///
    /// # Errors
    ///
    /// Fails when `from` holds less than a share; shares moved before the
    /// failure stay moved.
    pub fn distribute(
        &self,
        from: &Pile<ChipStack>,
        prior: Chips,
        amount: Chips,
    ) -> PileResult<Chips> {
        let mut level = prior;
        let mut remaining = amount;
        for pot in &self.pots {
            if remaining == 0 {
                break;
            }
            if pot.threshold <= level {
                continue;
            }
            let share = remaining.min(pot.threshold - level);
            transfer(from, share, &pot.chips)?;
            level += share;
            remaining -= share;
        }
        Ok(remaining)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SidePot> {
        self.pots.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }

    /// Whether `seat` went all-in this hand.
    #[must_use]
    pub fn owned_by(&self, seat: SeatIndex) -> bool {
        self.pots.iter().any(|pot| pot.owner == seat)
    }

    #[must_use]
    pub fn total(&self) -> Chips {
        self.pots.iter().map(|pot| pot.chips.total()).sum()
    }

    #[must_use]
    pub fn views(&self) -> Vec<SidePotView> {
        self.pots
            .iter()
            .map(|pot| SidePotView {
                owner: pot.owner,
                threshold: pot.threshold,
                size: pot.chips.total(),
            })
            .collect()
    }

    /// Forget every pot. Callers drain the pots first.
    pub fn clear(&mut self) {
        if self.total() > 0 {
            log::error!("clearing side pots still holding {} chips", self.total());
        }
        self.pots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_fills_pots_up_to_threshold() {
        let mut ledger = SidePotLedger::new();
        ledger.open(0, 50);
        ledger.open(1, 100);
        let stack = Pile::with(ChipStack::new(200));

        let rest = ledger.distribute(&stack, 0, 150).unwrap();
        assert_eq!(rest, 50);
        let sizes: Vec<_> = ledger.iter().map(|pot| pot.chips.total()).collect();
        assert_eq!(sizes, vec![50, 50]);
        assert_eq!(stack.total(), 100);
    }

    #[test]
    fn test_distribute_starts_at_prior_commitment() {
        let mut ledger = SidePotLedger::new();
        ledger.open(0, 50);
        ledger.open(1, 100);
        let stack = Pile::with(ChipStack::new(100));

        // Already in for 60: nothing more is owed to the 50 pot.
        let rest = ledger.distribute(&stack, 60, 50).unwrap();
        assert_eq!(rest, 10);
        let sizes: Vec<_> = ledger.iter().map(|pot| pot.chips.total()).collect();
        assert_eq!(sizes, vec![0, 40]);
    }

    #[test]
    fn test_distribute_with_no_pots_returns_everything() {
        let ledger = SidePotLedger::new();
        let stack = Pile::with(ChipStack::new(10));
        assert_eq!(ledger.distribute(&stack, 0, 10), Ok(10));
        assert_eq!(stack.total(), 10);
    }

    #[test]
    fn test_owned_by_and_total() {
        let mut ledger = SidePotLedger::new();
        let pot = ledger.open(3, 20).chips.clone();
        let stack = Pile::with(ChipStack::new(20));
        transfer(&stack, 20, &pot).unwrap();

        assert!(ledger.owned_by(3));
        assert!(!ledger.owned_by(4));
        assert_eq!(ledger.total(), 20);
        assert_eq!(ledger.views()[0].size, 20);
    }
}
