//! Admin harness for the assassins mini-game.
//!
//! Wires the roster reconciler to the in-memory backend for local runs:
//! the `demo` command plays out a full admin session (sign-in, directory
//! fetch, bulk add, admin grant, method edit, abort) and prints the merged
//! view after each step.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

mod cli;
mod config;
mod prompt;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use assassins_reconciler::{AlwaysConfirm, ConfirmPrompt, RosterReconcilerBuilder, RosterState};
use assassins_store::InMemoryGameStore;
use assassins_types::{default_methods, MethodField};

use cli::{Cli, Command};
use config::Seed;
use prompt::StdinConfirm;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Demo => run_demo(&cli).await,
        Command::Methods => {
            print_methods();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn print_methods() {
    for (i, method) in default_methods().iter().enumerate() {
        let marker = if method.is_incomplete() { " (incomplete)" } else { "" };
        println!("{i}. {} {}{marker}", method.title, method.description);
        if !method.instructions.trim().is_empty() {
            println!("   {}", method.instructions);
        }
    }
}

async fn run_demo(cli: &Cli) -> Result<()> {
    let seed = match &cli.seed {
        Some(path) => Seed::load(path)?,
        None => Seed::builtin(),
    };
    let confirm: Arc<dyn ConfirmPrompt> = if cli.yes {
        Arc::new(AlwaysConfirm)
    } else {
        Arc::new(StdinConfirm)
    };

    demo_session(seed, confirm).await
}

async fn demo_session(seed: Seed, confirm: Arc<dyn ConfirmPrompt>) -> Result<()> {
    let store = Arc::new(InMemoryGameStore::with_attendees(seed.attendees));
    let mut reconciler = RosterReconcilerBuilder::new()
        .with_store(store.clone())
        .with_confirm(confirm)
        .build()
        .context("building reconciler")?;

    let mut feed = reconciler.start(store.as_ref()).await.context("starting session")?;
    apply_pending(&mut reconciler, &mut feed).await?;
    print_state("session started", reconciler.state());

    if reconciler.add_all_players().await? {
        apply_pending(&mut reconciler, &mut feed).await?;
        print_state("added all attendees", reconciler.state());
    }

    if let Some(first) = reconciler.state().players().first().map(|p| p.id.clone()) {
        reconciler.set_admin(&first, true).await?;
        apply_pending(&mut reconciler, &mut feed).await?;
        print_state("granted admin to the first player", reconciler.state());
    }

    reconciler
        .update_method_field(3, MethodField::Description, "Shake hands with your target.")
        .await?;
    reconciler
        .update_method_field(3, MethodField::Instructions, "Offer a handshake and hold eye contact.")
        .await?;
    apply_pending(&mut reconciler, &mut feed).await?;
    print_state("completed the placeholder method", reconciler.state());

    // Simulate a round starting, then abort it.
    store.set_targets().await;
    apply_pending(&mut reconciler, &mut feed).await?;
    info!(in_progress = reconciler.state().game_in_progress(), "round started");

    if reconciler.abort_game().await? {
        apply_pending(&mut reconciler, &mut feed).await?;
        print_state("aborted the round", reconciler.state());
    }

    Ok(())
}

async fn apply_pending(
    reconciler: &mut assassins_reconciler::RosterReconciler,
    feed: &mut assassins_store::StoreSubscription,
) -> Result<()> {
    loop {
        match feed.try_recv() {
            Ok(Some(event)) => reconciler.apply(event).await?,
            Ok(None) => return Ok(()),
            Err(assassins_store::Error::Lagged { .. }) => continue,
            Err(_) => return Ok(()),
        }
    }
}

fn print_state(stage: &str, state: &RosterState) {
    println!("== {stage} ==");
    if state.is_loading() {
        println!("  (loading attendee directory)");
        return;
    }
    let non_players = state
        .non_players()
        .map(|list| list.len())
        .unwrap_or_default();
    println!(
        "  players: {}, non-players: {}, game in progress: {}",
        state.players().len(),
        non_players,
        state.game_in_progress(),
    );
    for player in state.players() {
        let admin = if state.is_admin(&player.id) { " [admin]" } else { "" };
        println!("  - {} {}{admin}", player.first_name, player.last_name);
    }
    let incomplete = state
        .methods()
        .iter()
        .filter(|m| m.is_incomplete())
        .count();
    println!("  methods incomplete: {incomplete}/4");
}
