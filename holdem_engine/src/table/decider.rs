//! Remote seats: betting decisions requested over channels.

use async_trait::async_trait;
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time,
};

use crate::game::{
    entities::Chips,
    interfaces::{BetRequest, DecisionError, Decider},
};

/// A bet request waiting for an answer from the remote seat.
#[derive(Debug)]
pub struct PendingBet {
    pub request: BetRequest,
    response: oneshot::Sender<Chips>,
}

impl PendingBet {
    /// Answer the request. Returns `false` if the table stopped waiting
    /// (the request timed out).
    pub fn respond(self, amount: Chips) -> bool {
        self.response.send(amount).is_ok()
    }
}

/// Decider that forwards each request to a receiver and waits for the
/// answer. Only one request is ever in flight.
#[derive(Debug)]
pub struct ChannelDecider {
    sender: mpsc::Sender<PendingBet>,
    timeout: Option<Duration>,
}

/// Create a remote seat. A `timeout` answers with zero (check, or fold
/// when chips are owed) if the seat does not respond in time.
#[must_use]
pub fn channel(timeout: Option<Duration>) -> (ChannelDecider, mpsc::Receiver<PendingBet>) {
    let (sender, receiver) = mpsc::channel(1);
    (ChannelDecider { sender, timeout }, receiver)
}

#[async_trait]
impl Decider for ChannelDecider {
    async fn bet_minimum_of(&self, request: &BetRequest) -> Result<Chips, DecisionError> {
        // The timeout covers queueing the request too: a seat that stopped
        // reading still holds its last request in the channel.
        let exchange = async {
            let (response, reply) = oneshot::channel();
            self.sender
                .send(PendingBet {
                    request: request.clone(),
                    response,
                })
                .await
                .map_err(|_| DecisionError::Disconnected)?;
            reply.await.map_err(|_| DecisionError::Disconnected)
        };

        match self.timeout {
            Some(timeout) => time::timeout(timeout, exchange).await.unwrap_or_else(|_| {
                log::warn!(
                    "seat {} did not act within {timeout:?}, checking or folding",
                    request.seat
                );
                Ok(0)
            }),
            None => exchange.await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Phase;

    fn request() -> BetRequest {
        BetRequest {
            seat: 2,
            phase: Phase::Flop,
            required: 10,
            stack: 100,
            committed: 0,
            table_bet: 10,
            pot: 30,
            hole: vec![],
            board: vec![],
        }
    }

    #[tokio::test]
    async fn test_request_round_trip() {
        let (decider, mut inbox) = channel(None);
        let remote = tokio::spawn(async move {
            let pending = inbox.recv().await.unwrap();
            assert_eq!(pending.request.required, 10);
            pending.respond(25)
        });

        assert_eq!(decider.bet_minimum_of(&request()).await, Ok(25));
        assert!(remote.await.unwrap());
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_disconnect() {
        let (decider, inbox) = channel(None);
        drop(inbox);
        assert_eq!(
            decider.bet_minimum_of(&request()).await,
            Err(DecisionError::Disconnected)
        );
    }

    #[tokio::test]
    async fn test_unanswered_request_is_disconnect() {
        let (decider, mut inbox) = channel(None);
        tokio::spawn(async move {
            let pending = inbox.recv().await.unwrap();
            drop(pending);
        });
        assert_eq!(
            decider.bet_minimum_of(&request()).await,
            Err(DecisionError::Disconnected)
        );
    }

    #[tokio::test]
    async fn test_timeout_answers_zero() {
        let (decider, mut inbox) = channel(Some(Duration::from_millis(20)));
        let remote = tokio::spawn(async move {
            let pending = inbox.recv().await.unwrap();
            time::sleep(Duration::from_millis(200)).await;
            pending.respond(50)
        });

        assert_eq!(decider.bet_minimum_of(&request()).await, Ok(0));
        assert!(!remote.await.unwrap());
    }

    #[tokio::test]
    async fn test_seat_that_stopped_reading_still_times_out() {
        let (decider, _inbox) = channel(Some(Duration::from_millis(20)));

        // The first request fills the channel and is never read.
        assert_eq!(decider.bet_minimum_of(&request()).await, Ok(0));
        let second_request = request();
        let second = time::timeout(Duration::from_millis(500), decider.bet_minimum_of(&second_request));
        assert_eq!(second.await, Ok(Ok(0)));
    }
}
