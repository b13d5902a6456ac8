//! Showdown payouts.
//!
//! Pots are settled as layers: the side pots in the order they were opened,
//! then the main pot. Once a side pot is paid out its owner is out of every
//! later layer, because they never staked chips above that pot's threshold.
//! The whole plan is computed before any chip moves, so an evaluator failure
//! leaves every pot untouched.

use std::collections::HashSet;

use super::{
    betting::seat_of,
    entities::{Card, Chips, Player, SeatIndex},
    errors::{GameError, GameResult},
    interfaces::HandEvaluator,
    round::Round,
    table::Table,
};
use crate::pile::transfer;

/// One planned chip movement from a pot to a player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Payout {
    pub seat: SeatIndex,
    pub amount: Chips,
    /// Index of the side pot paying out, or the number of side pots for
    /// the main pot.
    pub layer: usize,
}

/// Split `size` evenly among `winners`. Odd chips go one each to the
/// earliest winners in turn order.
fn split(size: Chips, winners: &[SeatIndex], layer: usize, payouts: &mut Vec<Payout>) {
    let n = winners.len() as Chips;
    let share = size / n;
    let odd = (size % n) as usize;
    for (i, seat) in winners.iter().enumerate() {
        let amount = share + Chips::from(i < odd);
        if amount > 0 {
            payouts.push(Payout {
                seat: *seat,
                amount,
                layer,
            });
        }
    }
}

/// Work out every payout without moving chips.
///
/// # Errors
///
/// * `GameError::UnresolvedShowdown` - the evaluator returned no winner or
///   an index outside the hands it was given.
/// * `GameError::UnknownSeat` - the round names a seat with no player.
pub fn plan_settlement(
    table: &Table,
    round: &Round,
    players: &[Player],
    evaluator: &dyn HandEvaluator,
) -> GameResult<Vec<Payout>> {
    let members = round.members();
    let board = table.board.snapshot().cards();

    let mut layers: Vec<(Option<SeatIndex>, Chips)> = table
        .side_pots
        .iter()
        .map(|pot| (Some(pot.owner), pot.chips.total()))
        .collect();
    layers.push((None, table.pot.total()));

    let mut payouts = Vec::new();
    let mut excluded = HashSet::new();
    let mut previous: Vec<SeatIndex> = Vec::new();
    let mut cached: Option<(Vec<SeatIndex>, Vec<SeatIndex>)> = None;

    for (layer, (owner, size)) in layers.into_iter().enumerate() {
        if size > 0 {
            let contestants: Vec<SeatIndex> = members
                .iter()
                .copied()
                .filter(|seat| !excluded.contains(seat))
                .collect();

            let winners = match contestants.as_slice() {
                [] if previous.is_empty() => {
                    return Err(GameError::UnresolvedShowdown { contestants: 0 });
                }
                // Only folded chips are left in this layer.
                [] => previous.clone(),
                [sole] => vec![*sole],
                _ => {
                    let hit = cached
                        .as_ref()
                        .filter(|(seen, _)| *seen == contestants)
                        .map(|(_, winners)| winners.clone());
                    match hit {
                        Some(winners) => winners,
                        None => {
                            let winners = showdown(&board, &contestants, players, evaluator)?;
                            cached = Some((contestants.clone(), winners.clone()));
                            winners
                        }
                    }
                }
            };

            split(size, &winners, layer, &mut payouts);
            previous = winners;
        }
        if let Some(owner) = owner {
            excluded.insert(owner);
        }
    }
    Ok(payouts)
}

fn showdown(
    board: &[Card],
    contestants: &[SeatIndex],
    players: &[Player],
    evaluator: &dyn HandEvaluator,
) -> GameResult<Vec<SeatIndex>> {
    let hands = contestants
        .iter()
        .map(|seat| Ok((*seat, seat_of(players, *seat)?.hole_cards())))
        .collect::<GameResult<Vec<_>>>()?;
    let indices = evaluator.determine_winners(board, &hands);
    if indices.is_empty() || indices.iter().any(|idx| *idx >= hands.len()) {
        return Err(GameError::UnresolvedShowdown {
            contestants: hands.len(),
        });
    }
    // Keep turn order for odd chips.
    Ok(contestants
        .iter()
        .enumerate()
        .filter_map(|(idx, seat)| indices.contains(&idx).then_some(*seat))
        .collect())
}

/// Plan and then pay out every pot, oldest side pot first.
///
/// # Errors
///
/// Planning errors leave the pots untouched. `GameError::Pile` while paying
/// means a pot changed under the plan.
pub fn settle(
    table: &Table,
    round: &Round,
    players: &[Player],
    evaluator: &dyn HandEvaluator,
) -> GameResult<Vec<Payout>> {
    let payouts = plan_settlement(table, round, players, evaluator)?;
    let side_pots: Vec<_> = table.side_pots.iter().collect();
    for payout in &payouts {
        let source = side_pots
            .get(payout.layer)
            .map_or(&table.pot, |pot| &pot.chips);
        let player = seat_of(players, payout.seat)?;
        transfer(source, payout.amount, &player.chips)?;
    }
    log::debug!(
        "settled {} payouts totalling {}",
        payouts.len(),
        payouts.iter().map(|payout| payout.amount).sum::<Chips>()
    );
    Ok(payouts)
}
