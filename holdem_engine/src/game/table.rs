//! Shared state of one hand: pots, cards and commitments.

use std::collections::{BTreeMap, HashMap};

use super::{
    entities::{Blinds, Chips, GameView, Phase, Player, PlayerView, PotView, SeatIndex},
    round::Round,
    side_pots::SidePotLedger,
};
use crate::pile::{CardStack, ChipStack, Pile, PileResult, drain, transfer};

#[derive(Debug)]
pub struct Table {
    pub blinds: Blinds,
    pub pot: Pile<ChipStack>,
    pub deck: Pile<CardStack>,
    pub board: Pile<CardStack>,
    /// Highest commitment of the hand.
    pub table_bet: Chips,
    /// Commitment of each seat over the whole hand.
    pub bets: HashMap<SeatIndex, Chips>,
    pub side_pots: SidePotLedger,
    /// Commitments of seats that folded this hand.
    forfeited: HashMap<SeatIndex, Chips>,
    muck: Pile<CardStack>,
}

impl Table {
    #[must_use]
    pub fn new(blinds: Blinds) -> Self {
        Self {
            blinds,
            pot: Pile::new(),
            deck: Pile::new(),
            board: Pile::new(),
            table_bet: 0,
            bets: HashMap::new(),
            side_pots: SidePotLedger::new(),
            forfeited: HashMap::new(),
            muck: Pile::new(),
        }
    }

    #[must_use]
    pub fn committed(&self, seat: SeatIndex) -> Chips {
        self.bets.get(&seat).copied().unwrap_or_default()
    }

    /// Drop a seat's commitment, keeping a record of it for `refund`.
    pub(crate) fn forfeit(&mut self, seat: SeatIndex) {
        if let Some(bet) = self.bets.remove(&seat) {
            *self.forfeited.entry(seat).or_default() += bet;
        }
    }

    /// Chips in the main pot and every side pot.
    #[must_use]
    pub fn chips_in_pots(&self) -> Chips {
        self.pot.total() + self.side_pots.total()
    }

    #[must_use]
    pub fn pot_view(&self) -> PotView {
        PotView {
            main: self.pot.total(),
            side_pots: self.side_pots.views(),
        }
    }

    /// Snapshot for observers. Hole cards are left out.
    #[must_use]
    pub fn view(
        &self,
        hand: u64,
        phase: Option<Phase>,
        round: &Round,
        players: &[Player],
    ) -> GameView {
        GameView {
            hand,
            phase,
            blinds: self.blinds,
            board: self.board.snapshot().cards(),
            table_bet: self.table_bet,
            pot: self.pot_view(),
            players: players
                .iter()
                .map(|player| PlayerView {
                    seat: player.seat,
                    name: player.name.clone(),
                    stack: player.stack(),
                    committed: self.committed(player.seat),
                    contesting: round.contains(player.seat),
                })
                .collect(),
        }
    }

    /// Give every seat back what it committed this hand, folded or not,
    /// taking from the side pots in order and then the main pot. Used to
    /// void a hand that could not be finished.
    ///
    /// # Errors
    ///
    /// Only fails if a chip pile is corrupted mid-transfer.
    pub fn refund(&self, players: &[Player]) -> PileResult<Chips> {
        let mut commitments: BTreeMap<SeatIndex, Chips> = BTreeMap::new();
        for (seat, bet) in self.bets.iter().chain(&self.forfeited) {
            *commitments.entry(*seat).or_default() += bet;
        }

        let mut refunded = 0;
        for (seat, bet) in commitments {
            let Some(player) = players.iter().find(|player| player.seat == seat) else {
                log::error!("seat {seat} committed {bet} but is not seated");
                continue;
            };
            let mut owed = bet;
            let pots = self
                .side_pots
                .iter()
                .map(|side_pot| &side_pot.chips)
                .chain(std::iter::once(&self.pot));
            for pot in pots {
                if owed == 0 {
                    break;
                }
                let take = owed.min(pot.total());
                refunded += transfer(pot, take, &player.chips)?;
                owed -= take;
            }
            if owed > 0 {
                log::error!("seat {seat} is still owed {owed} after the refund");
            }
        }
        Ok(refunded)
    }

    /// Muck every card and forget the hand's commitments. The pots must
    /// already be settled.
    ///
    /// # Errors
    ///
    /// Only fails if a card pile is corrupted mid-drain.
    pub fn reset(&mut self, players: &[Player]) -> PileResult<()> {
        drain(&self.board, &self.muck)?;
        drain(&self.deck, &self.muck)?;
        for player in players {
            drain(&player.hole, &self.muck)?;
        }
        self.muck = Pile::new();
        self.table_bet = 0;
        self.bets.clear();
        self.forfeited.clear();
        self.side_pots.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        betting::{commit_wager, fold},
        entities::Username,
        interfaces::{BetRequest, DecisionError, Decider},
    };
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Idle;

    #[async_trait]
    impl Decider for Idle {
        async fn bet_minimum_of(&self, _request: &BetRequest) -> Result<Chips, DecisionError> {
            Ok(0)
        }
    }

    fn seat(seat: SeatIndex, stack: Chips) -> Player {
        Player::with_stack(seat, Username::new(&format!("p{seat}")), stack, Arc::new(Idle))
    }

    #[test]
    fn test_refund_returns_commitments_across_side_pots() {
        let players = vec![seat(0, 50), seat(1, 100), seat(2, 200), seat(3, 300)];
        let mut table = Table::new(Blinds::default());
        let mut round = Round::new(vec![0, 1, 2, 3]);
        commit_wager(&mut table, &players[3], 10).unwrap();
        fold(&mut table, &mut round, 3);
        commit_wager(&mut table, &players[0], 50).unwrap();
        commit_wager(&mut table, &players[1], 100).unwrap();
        commit_wager(&mut table, &players[2], 120).unwrap();
        assert_eq!(table.side_pots.len(), 2);
        assert_eq!(table.chips_in_pots(), 280);

        let refunded = table.refund(&players).unwrap();
        table.reset(&players).unwrap();

        assert_eq!(refunded, 280);
        assert_eq!(table.chips_in_pots(), 0);
        let stacks: Vec<Chips> = players.iter().map(Player::stack).collect();
        assert_eq!(stacks, vec![50, 100, 200, 300]);
        assert!(table.bets.is_empty());
        assert!(table.forfeited.is_empty());
    }
}
