//! Hand sequencing.
//!
//! A hand runs `Blinds -> Deal -> Flop -> Turn -> River` and then settles.
//! Each wagering phase hands control to the betting loop; the hand stops
//! dealing as soon as a single contestant is left. Settlement always runs
//! at the end of the hand, so the next hand starts from empty pots. A hand
//! that failed midway is refunded by the next call before anything is
//! dealt.

use std::{collections::BTreeMap, sync::Arc};

use super::{
    betting::{post_blind, seat_of, take_bets},
    constants,
    entities::{Blinds, Card, Chips, GameEvent, GameView, Phase, Player, RandomDeck, SeatIndex},
    errors::{GameError, GameResult},
    functional::BestHandEvaluator,
    interfaces::{DeckSource, HandEvaluator, LogViewSink, Seating, ViewSink},
    round::{Round, RotatingSeating},
    settlement::{Payout, settle},
    table::Table,
};
use crate::pile::{CardStack, Pile, transfer};

/// External collaborators of a game.
pub struct Collaborators {
    pub deck: Box<dyn DeckSource>,
    pub evaluator: Box<dyn HandEvaluator>,
    pub seating: Box<dyn Seating>,
    pub view: Arc<dyn ViewSink>,
}

impl Collaborators {
    /// Random deck, best-hand evaluator, rotating button and a log sink.
    #[must_use]
    pub fn standard(table_name: &str) -> Self {
        Self {
            deck: Box::new(RandomDeck),
            evaluator: Box::new(BestHandEvaluator),
            seating: Box::new(RotatingSeating),
            view: Arc::new(LogViewSink::new(table_name)),
        }
    }
}

/// Result of one settled hand.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandSummary {
    pub hand: u64,
    /// Last phase that was played.
    pub phase: Phase,
    pub board: Vec<Card>,
    pub payouts: Vec<Payout>,
}

impl HandSummary {
    /// Chips won per seat, summed over every pot.
    #[must_use]
    pub fn winnings(&self) -> BTreeMap<SeatIndex, Chips> {
        let mut winnings = BTreeMap::new();
        for payout in &self.payouts {
            *winnings.entry(payout.seat).or_default() += payout.amount;
        }
        winnings
    }

    #[must_use]
    pub fn pot(&self) -> Chips {
        self.payouts.iter().map(|payout| payout.amount).sum()
    }
}

/// Positions fixed by the blinds.
#[derive(Clone, Copy, Debug)]
struct Positions {
    button: SeatIndex,
    preflop: SeatIndex,
}

/// One table's game: its players, the shared table state and the hand
/// counter.
pub struct HoldemGame {
    hand: u64,
    phase: Option<Phase>,
    players: Vec<Player>,
    table: Table,
    round: Round,
    collaborators: Collaborators,
}

impl HoldemGame {
    /// Players must be seated at the index matching their `seat`.
    #[must_use]
    pub fn new(players: Vec<Player>, blinds: Blinds, collaborators: Collaborators) -> Self {
        debug_assert!(players.len() <= constants::MAX_PLAYERS);
        Self {
            hand: 0,
            phase: None,
            players,
            table: Table::new(blinds),
            round: Round::default(),
            collaborators,
        }
    }

    #[must_use]
    pub fn hand_number(&self) -> u64 {
        self.hand
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        seat_of(&self.players, seat).ok()
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Smallest stack dealt into a hand: enough to post the small blind.
    #[must_use]
    pub fn min_stack(&self) -> Chips {
        self.table.blinds.small.max(1)
    }

    /// Players whose stacks cover the small blind. Shorter stacks sit out.
    #[must_use]
    pub fn funded_players(&self) -> usize {
        let min_stack = self.min_stack();
        self.players
            .iter()
            .filter(|player| player.stack() >= min_stack)
            .count()
    }

    /// Check that another hand can be dealt: two funded players, at least
    /// one of them able to post the big blind. Without the big blind every
    /// hand would end in forced folds.
    ///
    /// # Errors
    ///
    /// * `GameError::NotEnoughPlayers` - fewer than two funded players.
    /// * `GameError::BigBlindUncovered` - no stack covers the big blind.
    pub fn ready(&self) -> GameResult<()> {
        let funded = self.funded_players();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers(funded));
        }
        let big = self.table.blinds.big;
        if self.players.iter().all(|player| player.stack() < big) {
            return Err(GameError::BigBlindUncovered(big));
        }
        Ok(())
    }

    /// Chips in stacks plus chips in pots.
    #[must_use]
    pub fn chips_in_play(&self) -> Chips {
        self.players.iter().map(Player::stack).sum::<Chips>() + self.table.chips_in_pots()
    }

    #[must_use]
    pub fn view(&self) -> GameView {
        self.table
            .view(self.hand, self.phase, &self.round, &self.players)
    }

    async fn publish(&self) {
        self.collaborators.view.update_view(&self.view()).await;
    }

    async fn announce(&self, event: GameEvent) {
        self.collaborators.view.announce(&event).await;
    }

    /// Play one full hand and settle it. Seats that can't post the small
    /// blind sit the hand out.
    ///
    /// # Errors
    ///
    /// * `GameError::NotEnoughPlayers`, `GameError::BigBlindUncovered` - see
    ///   [`HoldemGame::ready`].
    /// * `GameError::Decision` - a decider failed mid-hand. The pots are left
    ///   as they were so the chips stay accounted for; the next call voids
    ///   that hand before dealing.
    /// * `GameError::UnresolvedShowdown` - the evaluator gave no winner; no
    ///   chips moved out of the pots.
    pub async fn play_hand(&mut self) -> GameResult<HandSummary> {
        if self.phase.is_some() {
            self.void_hand()?;
        }
        self.ready()?;

        let min_stack = self.min_stack();
        let funded: Vec<Player> = self
            .players
            .iter()
            .filter(|player| player.stack() >= min_stack)
            .cloned()
            .collect();
        self.round = self.collaborators.seating.seat_players(&funded, self.hand);
        log::debug!("hand #{} order: {:?}", self.hand, self.round.seats());
        self.announce(GameEvent::HandStarted(self.hand)).await;

        let mut positions = None;
        let mut last = Phase::Blinds;
        for phase in Phase::ALL {
            self.phase = Some(phase);
            last = phase;
            self.announce(GameEvent::PhaseStarted(phase)).await;
            match phase {
                Phase::Blinds => positions = self.collect_blinds().await?,
                Phase::Deal => self.deal()?,
                Phase::Flop | Phase::Turn | Phase::River => {
                    transfer(&self.table.deck, phase.board_cards(), &self.table.board)?;
                }
            }
            self.publish().await;

            if let (true, Some(positions)) = (phase.has_betting(), positions) {
                let first = match phase {
                    Phase::Deal => Some(positions.preflop),
                    _ => self.round.following(positions.button),
                };
                if let Some(first) = first {
                    take_bets(
                        self.hand,
                        phase,
                        &mut self.round,
                        &mut self.table,
                        &self.players,
                        first,
                        self.collaborators.view.as_ref(),
                    )
                    .await?;
                }
            }
            if self.round.len() <= 1 {
                break;
            }
        }

        let summary = self.finish_hand(last).await?;
        self.phase = None;
        self.hand += 1;
        Ok(summary)
    }

    /// Refund an unfinished hand and clear the table.
    fn void_hand(&mut self) -> GameResult<()> {
        let refunded = self.table.refund(&self.players)?;
        log::warn!(
            "hand #{} was not finished, returned {refunded} chips",
            self.hand
        );
        self.table.reset(&self.players)?;
        self.phase = None;
        self.hand += 1;
        Ok(())
    }

    /// Small blind then big blind, each charged to the next seat that can
    /// cover it. Returns `None` when forced folds end the hand.
    async fn collect_blinds(&mut self) -> GameResult<Option<Positions>> {
        let Blinds { small, big } = self.table.blinds;
        let view = Arc::clone(&self.collaborators.view);
        let mut candidate = self.round.peek();
        let mut payers = Vec::with_capacity(2);

        for blind in [small, big] {
            while let Some(seat) = candidate {
                if self.round.len() < 2 {
                    return Ok(None);
                }
                let player = seat_of(&self.players, seat)?;
                let posted =
                    post_blind(&mut self.table, &mut self.round, player, blind, view.as_ref())
                        .await?;
                candidate = self.round.following(seat);
                if posted {
                    payers.push(seat);
                    break;
                }
            }
        }

        match payers.as_slice() {
            [small_blind, big_blind] if self.round.len() >= 2 => {
                let button = self.round.preceding(*small_blind).unwrap_or(*small_blind);
                let preflop = self.round.following(*big_blind).unwrap_or(*big_blind);
                Ok(Some(Positions { button, preflop }))
            }
            _ => Ok(None),
        }
    }

    fn deal(&mut self) -> GameResult<()> {
        let cards = self.collaborators.deck.shuffle();
        self.table.deck = Pile::with(CardStack::from(cards));
        for seat in self.round.members() {
            let player = seat_of(&self.players, seat)?;
            transfer(&self.table.deck, constants::HOLE_CARDS, &player.hole)?;
        }
        Ok(())
    }

    async fn finish_hand(&mut self, phase: Phase) -> GameResult<HandSummary> {
        let board = self.table.board.snapshot().cards();
        let payouts = settle(
            &self.table,
            &self.round,
            &self.players,
            self.collaborators.evaluator.as_ref(),
        )?;

        let summary = HandSummary {
            hand: self.hand,
            phase,
            board,
            payouts,
        };
        for (seat, amount) in summary.winnings() {
            let player = seat_of(&self.players, seat)?;
            self.announce(GameEvent::Won(player.name.clone(), amount))
                .await;
        }

        self.table.reset(&self.players)?;
        self.announce(GameEvent::HandFinished(self.hand)).await;
        self.publish().await;
        Ok(summary)
    }
}
