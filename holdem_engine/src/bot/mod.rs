//! Bot module providing automatic seats with difficulty presets.
//!
//! This module implements:
//! - BotDecisionMaker: strength and probability based betting rules
//! - Difficulty presets (Easy, Standard, TAG) with distinct play styles
//! - BotDecider: plugs a bot into a seat, with optional human-like pacing
//!
//! ## Difficulty Presets
//!
//! ### Easy (Loose-Passive)
//! - VPIP: 45% (plays many hands)
//! - Aggression: 0.5 (passive)
//! - Never bluffs
//!
//! ### Standard (Balanced TAG)
//! - VPIP: 30% (moderate range)
//! - Aggression: 1.5 (moderately aggressive)
//! - Bluffs 15% of time
//!
//! ### TAG (Tight-Aggressive)
//! - VPIP: 20% (very tight)
//! - Aggression: 2.5 (very aggressive)
//! - Bluffs 25% of time

pub mod decision;
pub mod models;

use async_trait::async_trait;
use rand::Rng;
use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

pub use decision::{BotAction, BotDecisionMaker};
pub use models::DifficultyParams;

use crate::{
    game::{
        entities::Chips,
        interfaces::{BetRequest, DecisionError, Decider},
    },
    table::config::BotDifficulty,
};

/// A bot seat.
#[derive(Debug)]
pub struct BotDecider {
    params: DifficultyParams,
    big_blind: Chips,
    think_time: Duration,
    maker: Mutex<BotDecisionMaker>,
}

impl BotDecider {
    #[must_use]
    pub fn new(difficulty: BotDifficulty, big_blind: Chips) -> Self {
        Self {
            params: DifficultyParams::from_difficulty(difficulty),
            big_blind,
            think_time: Duration::ZERO,
            maker: Mutex::new(BotDecisionMaker::new()),
        }
    }

    /// Use a fixed seed so the bot's choices can be replayed.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.maker = Mutex::new(BotDecisionMaker::seeded(seed));
        self
    }

    /// Pause around `think_time` before answering.
    #[must_use]
    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    fn decide(&self, request: &BetRequest) -> (BotAction, Duration) {
        let mut maker = self.maker.lock().unwrap_or_else(PoisonError::into_inner);
        let action = maker.decide_action(&self.params, request);
        let delay = if self.think_time.is_zero() {
            Duration::ZERO
        } else {
            let (low, high) = self.params.think_time_range(self.think_time);
            rand::rng().random_range(low..=high)
        };
        (action, delay)
    }
}

#[async_trait]
impl Decider for BotDecider {
    async fn bet_minimum_of(&self, request: &BetRequest) -> Result<Chips, DecisionError> {
        let (action, delay) = self.decide(request);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let amount = action.to_chips(request, self.big_blind);
        log::debug!("bot at seat {} chose {action:?} ({amount})", request.seat);
        Ok(amount)
    }
}
