//! Table module running a game inside an async actor.
//!
//! This module implements:
//! - TableActor: Async actor driving hands for one table
//! - Message-based cash-in, cash-out and view requests over tokio channels
//! - Channel-backed remote seats with an optional action timeout
//! - Table configuration loaded from defaults or the environment
//!
//! ## Architecture
//!
//! Each table runs in its own Tokio task with an mpsc message inbox. The
//! inbox is drained between hands, so cash-ins and cash-outs never touch a
//! stack that has chips committed to a pot. Two tables share nothing and
//! bet and settle independently.
//!
//! ## Example
//!
//! ```no_run
//! use holdem_engine::{
//!     bot::BotDecider,
//!     game::{Collaborators, entities::{Player, Username}},
//!     table::{TableActor, TableConfig},
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = TableConfig::default();
//!     let players = (0..3)
//!         .map(|seat| {
//!             let bot = Arc::new(BotDecider::new(config.bot_difficulty, config.big_blind));
//!             Player::with_stack(seat, Username::new(&format!("bot{seat}")), config.buy_in, bot)
//!         })
//!         .collect();
//!
//!     let (actor, handle) = TableActor::new(config, players, Collaborators::standard("demo"));
//!     let table = tokio::spawn(actor.with_hand_limit(10).run());
//!
//!     let view = handle.view().await;
//!     println!("{view:?}");
//!     let hands = table.await.unwrap().unwrap();
//!     println!("played {hands} hands");
//! }
//! ```

pub mod actor;
pub mod config;
pub mod decider;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use config::{BotDifficulty, ConfigError, TableConfig, TableSpeed};
pub use decider::{ChannelDecider, PendingBet, channel};
pub use messages::{TableClosed, TableMessage, TableResponse};
