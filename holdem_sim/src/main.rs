//! Bot table simulator.
//!
//! Seats rule-based bots at a single table actor, plays hands until the
//! hand limit, a Ctrl+C, or until one player holds every chip, then checks
//! that no chip was created or lost.

use anyhow::{Error, bail};
use ctrlc::set_handler;
use holdem_engine::{
    bot::BotDecider,
    game::{
        Collaborators,
        entities::{Chips, Player, Username},
    },
    table::{TableActor, TableConfig},
};
use log::{info, warn};
use pico_args::Arguments;
use std::sync::Arc;

const HELP: &str = "\
Run bot players through a hold'em table

USAGE:
  holdem_sim [OPTIONS]

OPTIONS:
  --hands      N           Stop after N hands         [default: 100]
  --players    N           Number of bots to seat     [default: env HOLDEM_MAX_PLAYERS or 9]
  --seed       N           Seed the bots for a replayable run

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  HOLDEM_TABLE_NAME        Table name used in logs
  HOLDEM_SMALL_BLIND       Small blind
  HOLDEM_BIG_BLIND         Big blind
  HOLDEM_BUY_IN            Starting stack of every bot
  HOLDEM_BOT_DIFFICULTY    easy, standard or tag
  HOLDEM_BOT_THINK_MS      Simulated think time per decision
  RUST_LOG                 Log filter [default: info]
";

struct Args {
    hands: u64,
    players: usize,
    seed: Option<u64>,
}

fn seat_bots(config: &TableConfig, players: usize, seed: Option<u64>) -> Vec<Player> {
    (0..players)
        .map(|seat| {
            let mut bot = BotDecider::new(config.bot_difficulty, config.big_blind)
                .with_think_time(config.bot_think_time());
            if let Some(seed) = seed {
                bot = bot.seeded(seed.wrapping_add(seat as u64));
            }
            Player::with_stack(
                seat,
                Username::new(&format!("bot{seat}")),
                config.buy_in,
                Arc::new(bot),
            )
        })
        .collect()
}

fn stacks(players: &[Player]) -> Chips {
    players.iter().map(Player::stack).sum()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let mut config = TableConfig::from_env()?;
    let args = Args {
        hands: pargs.opt_value_from_str("--hands")?.unwrap_or(100),
        players: pargs
            .opt_value_from_str("--players")?
            .unwrap_or(config.max_players),
        seed: pargs.opt_value_from_str("--seed")?,
    };
    config.max_players = args.players;
    config.validate()?;

    let players = seat_bots(&config, args.players, args.seed);
    let seats = players.clone();
    let starting = stacks(&seats);

    let (actor, handle) = TableActor::new(
        config.clone(),
        players,
        Collaborators::standard(&config.name),
    );
    let actor = actor.with_hand_limit(args.hands);

    // Catching signals for exit. The table stops once the current hand is
    // settled.
    let stopper = handle.clone();
    set_handler(move || {
        if !stopper.try_stop() {
            warn!("Table is busy or closed, stop request dropped");
        }
    })?;

    let mut summaries = handle.subscribe(64).await?;
    let reporter = tokio::spawn(async move {
        while let Some(summary) = summaries.recv().await {
            info!(
                "hand #{} ended at {}, {} chips paid as {:?}",
                summary.hand,
                summary.phase,
                summary.pot(),
                summary.winnings()
            );
        }
    });

    info!(
        "Seating {} {} bots with {} chips each at '{}'",
        args.players, config.bot_difficulty, config.buy_in, config.name
    );
    let played = tokio::spawn(actor.run()).await??;
    reporter.await?;

    for player in &seats {
        info!("{}: {}", player.name, player.stack());
    }
    let remaining = stacks(&seats);
    info!("Played {played} hands, {remaining} of {starting} chips on the table");
    if remaining != starting {
        bail!("chip count drifted from {starting} to {remaining}");
    }

    Ok(())
}
