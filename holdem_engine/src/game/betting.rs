//! Wager application and the per-phase betting loop.

use super::{
    entities::{Chips, GameEvent, Phase, Player, SeatIndex},
    errors::{GameError, GameResult},
    interfaces::{BetRequest, ViewSink},
    round::Round,
    table::Table,
};
use crate::pile::{drain, transfer};

/// Outcome of an accepted wager.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Wager {
    pub amount: Chips,
    /// Seat's commitment for the hand after the wager.
    pub committed: Chips,
    pub all_in: bool,
    /// Whether the wager lifted the table bet.
    pub raised: bool,
}

pub(crate) fn seat_of(players: &[Player], seat: SeatIndex) -> GameResult<&Player> {
    players
        .get(seat)
        .filter(|player| player.seat == seat)
        .ok_or(GameError::UnknownSeat(seat))
}

/// Move an accepted wager out of the player's stack.
///
/// The wager first tops up the open side pots in creation order. If it is
/// the player's whole stack, a new side pot pinned at the player's new
/// commitment swallows the main pot and then the rest of the wager;
/// otherwise the rest goes to the main pot.
///
/// # Errors
///
/// * `GameError::ShortWager` - the wager leaves the seat below the table
///   bet. A short call is a fold, never a wager.
/// * `GameError::Pile` - the player holds less than `amount`.
pub fn commit_wager(table: &mut Table, player: &Player, amount: Chips) -> GameResult<Wager> {
    let seat = player.seat;
    let stack = player.stack();
    let prior = table.committed(seat);
    let committed = prior + amount;
    if committed < table.table_bet {
        return Err(GameError::ShortWager {
            seat,
            committed,
            table_bet: table.table_bet,
        });
    }
    let all_in = amount > 0 && amount == stack;

    let rest = table.side_pots.distribute(&player.chips, prior, amount)?;
    if all_in {
        let threshold = committed.max(table.table_bet);
        let pot = table.side_pots.open(seat, threshold).chips.clone();
        drain(&table.pot, &pot)?;
        transfer(&player.chips, rest, &pot)?;
    } else {
        transfer(&player.chips, rest, &table.pot)?;
    }

    let raised = committed > table.table_bet;
    table.bets.insert(seat, committed);
    table.table_bet = table.table_bet.max(committed);
    Ok(Wager {
        amount,
        committed,
        all_in,
        raised,
    })
}

/// Remove a seat from the hand. Its chips stay where they were wagered.
pub fn fold(table: &mut Table, round: &mut Round, seat: SeatIndex) {
    round.remove(seat);
    table.forfeit(seat);
}

/// Charge a forced blind, or fold the player if they cannot cover it.
/// Returns whether the blind was posted.
///
/// # Errors
///
/// * `GameError::Pile` - the stack changed between the check and the move.
pub async fn post_blind(
    table: &mut Table,
    round: &mut Round,
    player: &Player,
    blind: Chips,
    view: &dyn ViewSink,
) -> GameResult<bool> {
    if player.stack() < blind {
        log::debug!(
            "{} holds {} and can't cover the {blind} blind",
            player.name,
            player.stack()
        );
        fold(table, round, player.seat);
        view.announce(&GameEvent::ForcedFold(player.name.clone()))
            .await;
        return Ok(false);
    }

    let wager = commit_wager(table, player, blind)?;
    view.announce(&GameEvent::BlindPosted(player.name.clone(), blind))
        .await;
    if wager.all_in {
        view.announce(&GameEvent::AllIn(player.name.clone(), wager.committed))
            .await;
    }
    Ok(true)
}

fn can_act(players: &[Player], seat: SeatIndex) -> bool {
    players.get(seat).is_some_and(|player| player.stack() > 0)
}

/// Run one betting pass.
///
/// Action starts at `first_to_act` (or the next contesting seat after it)
/// and ends when every seat able to act has acted since the last raise, or
/// when a single contestant is left. All-in seats are never prompted.
///
/// # Errors
///
/// * `GameError::Decision` - a decider failed; the pass is abandoned.
/// * `GameError::UnknownSeat` - the round names a seat with no player.
pub async fn take_bets(
    hand: u64,
    phase: Phase,
    round: &mut Round,
    table: &mut Table,
    players: &[Player],
    first_to_act: SeatIndex,
    view: &dyn ViewSink,
) -> GameResult<()> {
    if round.len() < 2 {
        return Ok(());
    }
    let able: Vec<SeatIndex> = round
        .members()
        .into_iter()
        .filter(|seat| can_act(players, *seat))
        .collect();
    match able.as_slice() {
        [] => return Ok(()),
        [seat] if table.committed(*seat) >= table.table_bet => return Ok(()),
        _ => {}
    }

    round.seek(first_to_act);
    let mut to_act = able.len();
    while to_act > 0 && round.len() > 1 {
        let Some(seat) = round.next() else {
            break;
        };
        let player = seat_of(players, seat)?;
        let stack = player.stack();
        if stack == 0 {
            continue;
        }

        let committed = table.committed(seat);
        let request = BetRequest {
            seat,
            phase,
            required: table.table_bet.saturating_sub(committed),
            stack,
            committed,
            table_bet: table.table_bet,
            pot: table.chips_in_pots(),
            hole: player.hole_cards(),
            board: table.board.snapshot().cards(),
        };
        let mut amount = player.decider.bet_minimum_of(&request).await?;
        if amount > stack {
            log::warn!(
                "{} asked to bet {amount} holding {stack}, clamping",
                player.name
            );
            amount = stack;
        }

        if committed + amount >= table.table_bet {
            let wager = commit_wager(table, player, amount)?;
            let event = if wager.all_in {
                GameEvent::AllIn(player.name.clone(), wager.committed)
            } else {
                GameEvent::Wagered(player.name.clone(), amount)
            };
            view.announce(&event).await;
            if wager.raised {
                to_act = round
                    .members()
                    .into_iter()
                    .filter(|other| *other != seat && can_act(players, *other))
                    .count();
            } else {
                to_act -= 1;
            }
        } else {
            fold(table, round, seat);
            view.announce(&GameEvent::Folded(player.name.clone())).await;
            to_act -= 1;
        }

        view.update_view(&table.view(hand, Some(phase), round, players))
            .await;
    }
    Ok(())
}
