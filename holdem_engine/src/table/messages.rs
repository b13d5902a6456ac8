//! Table actor message types.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::game::{
    HandSummary,
    entities::{Chips, GameView, SeatIndex},
};

/// Messages that can be sent to a TableActor. They are handled between
/// hands, never while chips are in the pots.
#[derive(Debug)]
pub enum TableMessage {
    /// Finish the current hand, then shut down
    Stop,

    /// Move chips from the cashier to a seat's stack
    CashIn {
        seat: SeatIndex,
        amount: Chips,
        response: oneshot::Sender<TableResponse>,
    },

    /// Move a seat's whole stack back to the cashier
    CashOut {
        seat: SeatIndex,
        response: oneshot::Sender<TableResponse>,
    },

    /// Get the current game view
    GetView {
        response: oneshot::Sender<GameView>,
    },

    /// Receive a summary after every settled hand
    Subscribe { sender: mpsc::Sender<HandSummary> },
}

/// Response from table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableResponse {
    /// Operation succeeded
    Success,

    /// Stack returned to the cashier
    CashedOut(Chips),

    /// Cashier can't cover the cash-in
    InsufficientChips { required: Chips, available: Chips },

    /// No player at that seat
    NotAtTable,

    /// Operation failed
    Error(String),
}

impl TableResponse {
    /// Check if response is success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, TableResponse::Success | TableResponse::CashedOut(_))
    }

    /// Get error message if response is error
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self {
            TableResponse::Error(msg) => Some(msg.clone()),
            TableResponse::InsufficientChips {
                required,
                available,
            } => Some(format!(
                "Insufficient chips: need {required}, have {available}"
            )),
            TableResponse::NotAtTable => Some("Not at table".to_string()),
            TableResponse::Success | TableResponse::CashedOut(_) => None,
        }
    }
}

/// The actor is gone and can't take messages.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Table is closed")]
pub struct TableClosed;
