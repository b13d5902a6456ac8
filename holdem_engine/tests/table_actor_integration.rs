//! Table actor lifecycle: stopping, the cashier, views, subscriptions and
//! remote seats.

mod common;

use common::{
    DisconnectedDecider, RankedEvaluator, RecordingSink, ScriptedDecider, collaborators, player,
};
use holdem_engine::{
    bot::BotDecider,
    game::{
        Collaborators, GameError,
        entities::{Chips, Player},
        interfaces::DecisionError,
    },
    table::{BotDifficulty, TableActor, TableClosed, TableConfig, TableResponse, channel},
};
use std::{sync::Arc, time::Duration};

fn config(name: &str) -> TableConfig {
    TableConfig {
        name: name.to_string(),
        ..TableConfig::default()
    }
}

fn quiet() -> Collaborators {
    collaborators(
        &RankedEvaluator::new(&[&[0, 1, 2, 3]]),
        &Arc::new(RecordingSink::default()),
    )
}

fn folders(n: usize, stack: Chips) -> Vec<Player> {
    (0..n)
        .map(|seat| player(seat, stack, ScriptedDecider::folding()))
        .collect()
}

fn total(players: &[Player]) -> Chips {
    players.iter().map(Player::stack).sum()
}

#[tokio::test]
async fn test_stop_before_first_hand() {
    let (actor, handle) = TableActor::new(config("stop"), folders(2, 100), quiet());
    handle.stop().await.unwrap();

    let played = actor.run().await.unwrap();

    assert_eq!(played, 0);
    assert_eq!(handle.view().await, Err(TableClosed));
}

#[tokio::test]
async fn test_hand_limit_and_subscription() {
    let players = folders(3, 100);
    let seats = players.clone();
    let (actor, handle) = TableActor::new(config("limit"), players, quiet());
    let mut summaries = handle.subscribe(16).await.unwrap();

    let played = actor.with_hand_limit(5).run().await.unwrap();

    assert_eq!(played, 5);
    let mut hands = Vec::new();
    while let Some(summary) = summaries.recv().await {
        // Everyone folds to the big blind.
        assert_eq!(summary.pot(), 15);
        hands.push(summary.hand);
    }
    assert_eq!(hands, vec![0, 1, 2, 3, 4]);
    assert_eq!(total(&seats), 300);
}

#[tokio::test]
async fn test_stop_after_running_hands() {
    let (actor, handle) = TableActor::new(config("running"), folders(2, 100), quiet());
    let mut summaries = handle.subscribe(4).await.unwrap();
    let table = tokio::spawn(actor.run());

    summaries.recv().await.unwrap();
    summaries.recv().await.unwrap();
    handle.stop().await.unwrap();

    let played = table.await.unwrap().unwrap();
    assert!(played >= 2);
}

#[tokio::test]
async fn test_cashier_moves_chips_between_hands() {
    let (actor, handle) = TableActor::new(config("cashier"), folders(2, 100), quiet());
    let bank = actor.cashier_balance();
    assert_eq!(bank, 5400);
    let table = tokio::spawn(actor.run());

    assert_eq!(
        handle.cash_in(0, 10_000).await.unwrap(),
        TableResponse::InsufficientChips {
            required: 10_000,
            available: bank,
        }
    );
    assert_eq!(
        handle.cash_in(7, 10).await.unwrap(),
        TableResponse::NotAtTable
    );
    assert!(handle.cash_in(0, 100).await.unwrap().is_success());

    // Views are taken between hands, with every chip back in a stack.
    let view = handle.view().await.unwrap();
    assert_eq!(view.pot.total(), 0);
    assert_eq!(view.players.iter().map(|p| p.stack).sum::<Chips>(), 300);

    let TableResponse::CashedOut(amount) = handle.cash_out(1).await.unwrap() else {
        panic!("cash out refused");
    };
    assert!(amount > 0);

    // One funded seat left, so the table closes on its own.
    table.await.unwrap().unwrap();
    assert_eq!(handle.cash_in(0, 1).await, Err(TableClosed));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tables_play_independently() {
    let seat_bots = |seed: u64| -> Vec<Player> {
        (0..4)
            .map(|seat| {
                let bot = BotDecider::new(BotDifficulty::Standard, 10).seeded(seed + seat as u64);
                player(seat, 600, Arc::new(bot))
            })
            .collect()
    };
    let first = seat_bots(1);
    let second = seat_bots(100);
    let (a, _a_handle) = TableActor::new(
        config("a"),
        first.clone(),
        Collaborators::standard("a"),
    );
    let (b, _b_handle) = TableActor::new(
        config("b"),
        second.clone(),
        Collaborators::standard("b"),
    );

    let (a_hands, b_hands) = tokio::join!(
        tokio::spawn(a.with_hand_limit(25).run()),
        tokio::spawn(b.with_hand_limit(25).run()),
    );

    assert!(a_hands.unwrap().unwrap() > 0);
    assert!(b_hands.unwrap().unwrap() > 0);
    assert_eq!(total(&first), 2400);
    assert_eq!(total(&second), 2400);
}

fn small_blinds(name: &str) -> TableConfig {
    TableConfig {
        small_blind: 2,
        big_blind: 4,
        ..config(name)
    }
}

#[tokio::test]
async fn test_table_stops_when_stacks_cannot_post_blinds() {
    for stacks in [[1, 100], [3, 3]] {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(seat, stack)| player(seat, *stack, ScriptedDecider::folding()))
            .collect();
        let (actor, _handle) = TableActor::new(small_blinds("short"), players, quiet());

        let played = tokio::time::timeout(Duration::from_secs(1), actor.run())
            .await
            .expect("table should stop on its own")
            .unwrap();

        assert_eq!(played, 0);
    }
}

#[tokio::test]
async fn test_short_stack_plays_the_small_blind_then_sits_out() {
    let players = vec![
        player(0, 100, ScriptedDecider::folding()),
        player(1, 3, ScriptedDecider::folding()),
    ];
    let seats = players.clone();
    let (actor, _handle) = TableActor::new(small_blinds("short"), players, quiet());

    let played = tokio::time::timeout(Duration::from_secs(1), actor.run())
        .await
        .expect("table should stop on its own")
        .unwrap();

    // Hand 0 ends on the forced fold, hand 1 takes the small blind.
    assert_eq!(played, 2);
    let stacks: Vec<Chips> = seats.iter().map(Player::stack).collect();
    assert_eq!(stacks, vec![102, 1]);
}

#[tokio::test]
async fn test_decider_failure_stops_the_table() {
    let players = vec![
        player(0, 100, Arc::new(DisconnectedDecider)),
        player(1, 100, ScriptedDecider::calling()),
    ];
    let seats = players.clone();
    let (actor, _handle) = TableActor::new(config("broken"), players, quiet());

    let err = actor.run().await.unwrap_err();

    assert!(matches!(
        err,
        GameError::Decision(DecisionError::Disconnected)
    ));
    // The blinds are still in the pots.
    assert_eq!(total(&seats), 185);
}

#[tokio::test]
async fn test_remote_seat_answers_over_channel() {
    let (remote, mut requests) = channel(None);
    let players = vec![
        player(0, 100, Arc::new(remote)),
        player(1, 100, ScriptedDecider::calling()),
    ];
    let (actor, _handle) = TableActor::new(config("remote"), players, quiet());

    let seat = tokio::spawn(async move {
        let mut asked = 0;
        while let Some(pending) = requests.recv().await {
            assert_eq!(pending.request.seat, 0);
            assert_eq!(pending.request.hole.len(), 2);
            let required = pending.request.required;
            assert!(pending.respond(required));
            asked += 1;
        }
        asked
    });

    let played = actor.with_hand_limit(2).run().await.unwrap();

    assert_eq!(played, 2);
    // Dropping the actor drops the decider and ends the request stream.
    assert!(seat.await.unwrap() > 0);
}

#[tokio::test]
async fn test_silent_remote_seat_folds_on_timeout() {
    let (remote, _requests) = channel(Some(Duration::from_millis(20)));
    let players = vec![
        player(0, 100, Arc::new(remote)),
        player(1, 100, ScriptedDecider::calling()),
    ];
    let seats = players.clone();
    let (actor, _handle) = TableActor::new(config("timeout"), players, quiet());

    actor.with_hand_limit(1).run().await.unwrap();

    assert_eq!(seats[0].stack(), 95);
    assert_eq!(seats[1].stack(), 105);
}
