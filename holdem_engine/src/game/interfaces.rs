//! Narrow seams between the betting engine and its collaborators.
//!
//! The engine never shuffles, ranks hands, renders, or asks a human
//! anything itself. Each of those goes through one of the traits here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    entities::{Card, Chips, GameEvent, GameView, Phase, Player, SeatIndex},
    round::Round,
};

/// Produces a freshly ordered 52 card deck for each hand.
pub trait DeckSource: Send + Sync {
    fn shuffle(&mut self) -> Vec<Card>;
}

/// Ranks showdown hands.
pub trait HandEvaluator: Send + Sync {
    /// Return the indices into `hands` holding the best hand. Ties return
    /// several indices.
    fn determine_winners(&self, board: &[Card], hands: &[(SeatIndex, Vec<Card>)]) -> Vec<usize>;
}

/// Fixes the turn order of a hand.
pub trait Seating: Send + Sync {
    /// Build the hand's turn order from the seated players. The first
    /// member pays the small blind unless forced out.
    fn seat_players(&self, players: &[Player], hand: u64) -> Round;
}

/// Everything a seat sees when it is asked to act.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct BetRequest {
    pub seat: SeatIndex,
    pub phase: Phase,
    /// Chips needed to match the table bet. Zero means checking is free.
    pub required: Chips,
    pub stack: Chips,
    pub committed: Chips,
    pub table_bet: Chips,
    pub pot: Chips,
    pub hole: Vec<Card>,
    pub board: Vec<Card>,
}

impl BetRequest {
    /// Smallest amount that raises instead of calling.
    #[must_use]
    pub fn min_raise(&self, big_blind: Chips) -> Chips {
        self.required + big_blind.max(1)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecisionError {
    #[error("Decider disconnected")]
    Disconnected,
    #[error("Decider transport failure: {0}")]
    Transport(String),
}

/// Source of betting decisions for one seat.
///
/// The returned amount is interpreted by the betting engine: anything that
/// brings the seat's commitment to the table bet is a call or raise, the
/// whole stack is an all-in, anything short of a call is a fold.
#[async_trait]
pub trait Decider: Send + Sync {
    async fn bet_minimum_of(&self, request: &BetRequest) -> Result<Chips, DecisionError>;
}

/// Observer of a table.
#[async_trait]
pub trait ViewSink: Send + Sync {
    async fn announce(&self, event: &GameEvent);

    async fn update_view(&self, view: &GameView);
}

/// Sink that logs events and serializes views at debug level.
#[derive(Debug, Default)]
pub struct LogViewSink {
    table: String,
}

impl LogViewSink {
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl ViewSink for LogViewSink {
    async fn announce(&self, event: &GameEvent) {
        log::info!("[{}] {event}", self.table);
    }

    async fn update_view(&self, view: &GameView) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        match serde_json::to_string(view) {
            Ok(json) => log::debug!("[{}] view: {json}", self.table),
            Err(e) => log::warn!("[{}] failed to serialize view: {e}", self.table),
        }
    }
}

/// Sink that discards everything.
#[derive(Debug, Default)]
pub struct NullViewSink;

#[async_trait]
impl ViewSink for NullViewSink {
    async fn announce(&self, _event: &GameEvent) {}

    async fn update_view(&self, _view: &GameView) {}
}
