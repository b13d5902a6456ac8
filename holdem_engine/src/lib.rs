//! # Hold'em Engine
//!
//! A no-limit Texas Hold'em betting and pot-settlement engine.
//!
//! Chips and cards live in shared [`pile::Pile`]s and only ever move through
//! [`pile::transfer`], which locks both piles in a fixed order and moves the
//! whole amount or nothing. On top of that the engine runs the betting
//! protocol, forms side pots when players go all-in at different stack sizes
//! and pays the pots out in layers at showdown.
//!
//! ## Architecture
//!
//! Each hand runs through five phases:
//!
//! - **Blinds**: small and big blind, folding anyone who can't cover theirs
//! - **Deal**: two hole cards each, then preflop betting
//! - **Flop/Turn/River**: board cards, each followed by a betting pass
//!
//! and is settled as soon as it ends, either at the river or when a single
//! contestant is left.
//!
//! ## Core Modules
//!
//! - [`pile`]: resource piles and the atomic transfer primitive
//! - [`game`]: betting, side pots, settlement and the hand state machine
//! - [`table`]: an async actor running one table, plus remote seats
//! - [`bot`]: rule-based bot seats
//!
//! ## Example
//!
//! ```
//! use holdem_engine::{
//!     Collaborators, GameResult, HoldemGame,
//!     bot::BotDecider,
//!     entities::{Blinds, Player, Username},
//!     table::BotDifficulty,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> GameResult<()> {
//!     let players = (0..3)
//!         .map(|seat| {
//!             let bot = BotDecider::new(BotDifficulty::Easy, 10).seeded(seat as u64);
//!             Player::with_stack(seat, Username::new(&format!("bot{seat}")), 500, Arc::new(bot))
//!         })
//!         .collect();
//!     let mut game = HoldemGame::new(players, Blinds::default(), Collaborators::standard("doc"));
//!
//!     let summary = game.play_hand().await?;
//!     assert_eq!(game.chips_in_play(), 1500);
//!     println!("hand #{} paid out {}", summary.hand, summary.pot());
//!     Ok(())
//! }
//! ```

/// Resource piles and atomic transfers.
pub mod pile;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    Collaborators, GameError, GameResult, HandSummary, HoldemGame,
    constants::{self, MAX_PLAYERS},
    entities::{self, DEFAULT_BIG_BLIND, DEFAULT_BUY_IN, DEFAULT_SMALL_BLIND},
    functional,
};

/// Table actor and remote seats.
pub mod table;

/// Bot seats.
pub mod bot;
