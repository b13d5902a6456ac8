//! Hold'em game engine - betting, side pots, settlement and hand sequencing.
//!
//! This module provides the per-table game:
//! - Turn order with fold removal ([`round`])
//! - The per-phase betting loop and wager application ([`betting`])
//! - All-in side pots ([`side_pots`]) and layered payouts ([`settlement`])
//! - The hand state machine ([`state_machine`])
//! - Collaborator seams and their reference implementations ([`interfaces`],
//!   [`functional`])

pub mod betting;
pub mod constants;
pub mod entities;
pub mod errors;
pub mod functional;
pub mod interfaces;
pub mod round;
pub mod settlement;
pub mod side_pots;
pub mod state_machine;
pub mod table;

pub use errors::{GameError, GameResult};
pub use state_machine::{Collaborators, HandSummary, HoldemGame};
