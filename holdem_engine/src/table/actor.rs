//! Table actor implementation with async message handling.

use tokio::sync::{mpsc, oneshot};

use super::{
    config::TableConfig,
    messages::{TableClosed, TableMessage, TableResponse},
};
use crate::{
    game::{
        Collaborators, GameError, GameResult, HandSummary, HoldemGame,
        entities::{Chips, GameView, Player, SeatIndex},
    },
    pile::{ChipStack, Pile, PileError, drain, transfer},
};

const INBOX_CAPACITY: usize = 100;

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    /// Send a message to the table
    ///
    /// # Errors
    ///
    /// * `TableClosed` - the actor has exited.
    pub async fn send(&self, message: TableMessage) -> Result<(), TableClosed> {
        self.sender.send(message).await.map_err(|_| TableClosed)
    }

    /// Ask the table to stop after the current hand.
    ///
    /// # Errors
    ///
    /// * `TableClosed` - the actor has exited.
    pub async fn stop(&self) -> Result<(), TableClosed> {
        self.send(TableMessage::Stop).await
    }

    /// Stop request usable outside an async context (signal handlers).
    /// Returns whether the request was queued.
    pub fn try_stop(&self) -> bool {
        self.sender.try_send(TableMessage::Stop).is_ok()
    }

    /// # Errors
    ///
    /// * `TableClosed` - the actor exited before answering.
    pub async fn cash_in(&self, seat: SeatIndex, amount: Chips) -> Result<TableResponse, TableClosed> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::CashIn {
            seat,
            amount,
            response,
        })
        .await?;
        reply.await.map_err(|_| TableClosed)
    }

    /// # Errors
    ///
    /// * `TableClosed` - the actor exited before answering.
    pub async fn cash_out(&self, seat: SeatIndex) -> Result<TableResponse, TableClosed> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::CashOut { seat, response }).await?;
        reply.await.map_err(|_| TableClosed)
    }

    /// # Errors
    ///
    /// * `TableClosed` - the actor exited before answering.
    pub async fn view(&self) -> Result<GameView, TableClosed> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::GetView { response }).await?;
        reply.await.map_err(|_| TableClosed)
    }

    /// Receive a summary after every settled hand.
    ///
    /// # Errors
    ///
    /// * `TableClosed` - the actor has exited.
    pub async fn subscribe(&self, capacity: usize) -> Result<mpsc::Receiver<HandSummary>, TableClosed> {
        let (sender, receiver) = mpsc::channel(capacity);
        self.send(TableMessage::Subscribe { sender }).await?;
        Ok(receiver)
    }
}

/// Table actor running one game
pub struct TableActor {
    /// Table configuration
    config: TableConfig,

    game: HoldemGame,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Source of cash-ins and sink of cash-outs
    cashier: Pile<ChipStack>,

    /// Stop after this many hands
    hand_limit: Option<u64>,

    /// Is table closed
    is_closed: bool,

    /// Hand summary subscribers
    subscribers: Vec<mpsc::Sender<HandSummary>>,
}

impl TableActor {
    /// Create a new table actor
    ///
    /// The cashier is minted with one buy-in per seat the table allows.
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor and handle for sending messages
    #[must_use]
    pub fn new(
        config: TableConfig,
        players: Vec<Player>,
        collaborators: Collaborators,
    ) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let bank = config.buy_in.saturating_mul(config.max_players as Chips);
        let game = HoldemGame::new(players, config.blinds(), collaborators);

        let actor = Self {
            config,
            game,
            inbox,
            cashier: Pile::with(ChipStack::new(bank)),
            hand_limit: None,
            is_closed: false,
            subscribers: Vec::new(),
        };
        (actor, TableHandle { sender })
    }

    /// Stop on its own after `hands` hands.
    #[must_use]
    pub fn with_hand_limit(mut self, hands: u64) -> Self {
        self.hand_limit = Some(hands);
        self
    }

    /// Chips the cashier holds.
    #[must_use]
    pub fn cashier_balance(&self) -> Chips {
        self.cashier.total()
    }

    /// Run the table actor event loop. Returns the number of hands played.
    ///
    /// # Errors
    ///
    /// A hand that fails (decider disconnect, unresolved showdown) stops the
    /// table with that error. Its chips stay in the pots.
    pub async fn run(mut self) -> GameResult<u64> {
        log::info!(
            "Table '{}' starting with blinds {}",
            self.config.name,
            self.config.blinds()
        );

        let mut played = 0;
        loop {
            self.drain_inbox();
            if self.is_closed {
                break;
            }
            if self.hand_limit.is_some_and(|limit| played >= limit) {
                log::info!("Table '{}' reached its hand limit", self.config.name);
                break;
            }
            if let Err(e) = self.game.ready() {
                log::info!("Table '{}' can't deal another hand: {e}", self.config.name);
                break;
            }

            match self.game.play_hand().await {
                Ok(summary) => {
                    played += 1;
                    self.notify(&summary);
                }
                Err(e) => {
                    log::error!("Table '{}': hand failed: {e}", self.config.name);
                    return Err(e);
                }
            }
            tokio::task::yield_now().await;
        }

        log::info!(
            "Table '{}' closed after {played} hands",
            self.config.name
        );
        Ok(played)
    }

    fn drain_inbox(&mut self) {
        while let Ok(message) = self.inbox.try_recv() {
            self.handle_message(message);
        }
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Stop => {
                log::info!("Table '{}' stopping", self.config.name);
                self.is_closed = true;
            }

            TableMessage::CashIn {
                seat,
                amount,
                response,
            } => {
                let result = self.handle_cash_in(seat, amount);
                let _ = response.send(result);
            }

            TableMessage::CashOut { seat, response } => {
                let result = self.handle_cash_out(seat);
                let _ = response.send(result);
            }

            TableMessage::GetView { response } => {
                let _ = response.send(self.game.view());
            }

            TableMessage::Subscribe { sender } => {
                self.subscribers.push(sender);
            }
        }
    }

    fn handle_cash_in(&self, seat: SeatIndex, amount: Chips) -> TableResponse {
        let Some(player) = self.game.player(seat) else {
            return TableResponse::NotAtTable;
        };
        match transfer(&self.cashier, amount, &player.chips) {
            Ok(_) => {
                log::info!("{} cashed in {amount}", player.name);
                TableResponse::Success
            }
            Err(PileError::InsufficientResource { available, .. }) => {
                TableResponse::InsufficientChips {
                    required: amount,
                    available: Chips::try_from(available).unwrap_or(Chips::MAX),
                }
            }
        }
    }

    fn handle_cash_out(&self, seat: SeatIndex) -> TableResponse {
        let Some(player) = self.game.player(seat) else {
            return TableResponse::NotAtTable;
        };
        match drain(&player.chips, &self.cashier) {
            Ok(amount) => {
                log::info!("{} cashed out {amount}", player.name);
                TableResponse::CashedOut(amount)
            }
            Err(e) => TableResponse::Error(GameError::from(e).to_string()),
        }
    }

    /// Send the summary to every subscriber, dropping closed ones.
    fn notify(&mut self, summary: &HandSummary) {
        self.subscribers.retain(|subscriber| {
            match subscriber.try_send(summary.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("hand summary subscriber is lagging, dropping summary");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }
}
