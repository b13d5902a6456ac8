//! Game error types.

use thiserror::Error;

use super::{
    entities::{Chips, SeatIndex},
    interfaces::DecisionError,
};
use crate::pile::PileError;

/// Errors that abort a hand.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Showdown produced no winner among {contestants} contestants")]
    UnresolvedShowdown { contestants: usize },

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error(transparent)]
    Pile(#[from] PileError),

    #[error("Need at least two players covering the small blind, have {0}")]
    NotEnoughPlayers(usize),

    #[error("No player can post the {0} big blind")]
    BigBlindUncovered(Chips),

    #[error("Seat {seat} would commit {committed}, short of the {table_bet} table bet")]
    ShortWager {
        seat: SeatIndex,
        committed: Chips,
        table_bet: Chips,
    },

    #[error("No player at seat {0}")]
    UnknownSeat(SeatIndex),
}

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;
