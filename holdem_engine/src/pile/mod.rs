//! Resource piles and the atomic transfer primitive.
//!
//! This module implements:
//! - `Resource`: a quantity (chips) or an ordered sequence (cards)
//! - `Pile`: a shared, lock-guarded container for one resource
//! - `transfer`/`drain`: all-or-nothing moves between two piles
//!
//! ## Locking
//!
//! Every pile carries its own mutex and a process-unique id. A transfer locks
//! both piles in ascending id order and holds both guards while it moves the
//! resource, so no observer ever sees the source decremented without the
//! destination incremented. Transfers over disjoint piles never contend.
//!
//! ## Example
//!
//! ```
//! use holdem_engine::pile::{ChipStack, Pile, transfer};
//!
//! let stack = Pile::with(ChipStack::new(100));
//! let pot = Pile::<ChipStack>::new();
//!
//! transfer(&stack, 40, &pot).unwrap();
//! assert_eq!(stack.total(), 60);
//! assert_eq!(pot.total(), 40);
//!
//! // Asking for more than the pile holds fails and moves nothing.
//! assert!(transfer(&stack, 61, &pot).is_err());
//! assert_eq!(stack.total(), 60);
//! ```

pub mod errors;
pub mod resource;
pub mod transfer;

pub use errors::{PileError, PileResult};
pub use resource::{CardStack, ChipStack, Resource};
pub use transfer::{Pile, drain, transfer};
