//! Shared piles and the transfer primitive.

use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use super::{
    errors::{PileError, PileResult},
    resource::Resource,
};

/// Source of pile ids. Ids order lock acquisition.
static NEXT_PILE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug)]
struct Shared<R> {
    id: u64,
    contents: Mutex<R>,
}

/// A shared handle to one pile. Cloning the handle does not copy the
/// contents; every clone refers to the same pile.
pub struct Pile<R: Resource> {
    inner: Arc<Shared<R>>,
}

impl<R: Resource> Pile<R> {
    /// Create an empty pile.
    #[must_use]
    pub fn new() -> Self {
        Self::with(R::default())
    }

    /// Create a pile holding `contents`. This is the only way a resource
    /// enters the system (buy-in, a freshly shuffled deck).
    #[must_use]
    pub fn with(contents: R) -> Self {
        Self {
            inner: Arc::new(Shared {
                id: NEXT_PILE_ID.fetch_add(1, Ordering::Relaxed),
                contents: Mutex::new(contents),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Consistent snapshot of the pile's total.
    #[must_use]
    pub fn total(&self) -> R::Amount {
        self.lock().total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == R::Amount::default()
    }

    /// Whether both handles refer to the same pile.
    #[must_use]
    pub fn same_pile(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> R
    where
        R: Clone,
    {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, R> {
        // A panic while holding the lock cannot leave a half-applied
        // transfer behind (take/give never unwind midway), so the data is
        // still consistent.
        self.inner
            .contents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Resource> Clone for Pile<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Resource> Default for Pile<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> fmt::Debug for Pile<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pile")
            .field("id", &self.inner.id)
            .field("contents", &*self.lock())
            .finish()
    }
}

/// Lock both piles in ascending id order. Returns `(source, destination)`.
fn lock_pair<'a, R: Resource>(
    from: &'a Pile<R>,
    to: &'a Pile<R>,
) -> (MutexGuard<'a, R>, MutexGuard<'a, R>) {
    if from.id() < to.id() {
        let src = from.lock();
        let dst = to.lock();
        (src, dst)
    } else {
        let dst = to.lock();
        let src = from.lock();
        (src, dst)
    }
}

fn insufficient<R: Resource>(available: R::Amount, requested: R::Amount) -> PileError {
    PileError::InsufficientResource {
        available: available.into(),
        requested: requested.into(),
    }
}

/// Move exactly `amount` from `from` to `to` as one indivisible step.
///
/// # Errors
///
/// * `PileError::InsufficientResource` - `from` holds less than `amount`;
///   neither pile is modified.
pub fn transfer<R: Resource>(from: &Pile<R>, amount: R::Amount, to: &Pile<R>) -> PileResult<R::Amount> {
    if from.same_pile(to) {
        let available = from.total();
        if available < amount {
            return Err(insufficient::<R>(available, amount));
        }
        return Ok(amount);
    }

    let (mut src, mut dst) = lock_pair(from, to);
    let escrow = src
        .take(amount)
        .ok_or_else(|| insufficient::<R>(src.total(), amount))?;
    dst.give(escrow);
    Ok(amount)
}

/// Move everything `from` holds into `to` and return how much moved.
///
/// The balance is read under the same locks that perform the move, so a
/// concurrent transfer cannot slip in between the read and the move.
pub fn drain<R: Resource>(from: &Pile<R>, to: &Pile<R>) -> PileResult<R::Amount> {
    if from.same_pile(to) {
        return Ok(from.total());
    }

    let (mut src, mut dst) = lock_pair(from, to);
    let amount = src.total();
    let escrow = src
        .take(amount)
        .ok_or_else(|| insufficient::<R>(src.total(), amount))?;
    dst.give(escrow);
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pile::resource::ChipStack;
    use std::thread;

    #[test]
    fn test_transfer_moves_exact_amount() {
        let a = Pile::with(ChipStack::new(100));
        let b = Pile::<ChipStack>::new();

        assert_eq!(transfer(&a, 30, &b), Ok(30));
        assert_eq!(a.total(), 70);
        assert_eq!(b.total(), 30);
    }

    #[test]
    fn test_insufficient_transfer_changes_nothing() {
        let a = Pile::with(ChipStack::new(10));
        let b = Pile::with(ChipStack::new(5));

        let err = transfer(&a, 11, &b).unwrap_err();
        assert_eq!(
            err,
            PileError::InsufficientResource {
                available: 10,
                requested: 11
            }
        );
        assert_eq!(a.total(), 10);
        assert_eq!(b.total(), 5);
    }

    #[test]
    fn test_transfer_to_same_pile_is_noop() {
        let a = Pile::with(ChipStack::new(10));
        let alias = a.clone();

        assert_eq!(transfer(&a, 10, &alias), Ok(10));
        assert_eq!(a.total(), 10);
        assert!(transfer(&a, 11, &alias).is_err());
    }

    #[test]
    fn test_drain_empties_source() {
        let a = Pile::with(ChipStack::new(42));
        let b = Pile::with(ChipStack::new(8));

        assert_eq!(drain(&a, &b), Ok(42));
        assert!(a.is_empty());
        assert_eq!(b.total(), 50);
        assert_eq!(drain(&a, &b), Ok(0));
    }

    #[test]
    fn test_concurrent_opposite_transfers_conserve_and_do_not_deadlock() {
        let a = Pile::with(ChipStack::new(10_000));
        let b = Pile::with(ChipStack::new(10_000));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (from, to) = if i % 2 == 0 {
                    (a.clone(), b.clone())
                } else {
                    (b.clone(), a.clone())
                };
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        // Failures are fine here, partial moves are not.
                        let _ = transfer(&from, 7, &to);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("transfer thread panicked");
        }

        assert_eq!(a.total() + b.total(), 20_000);
    }
}
