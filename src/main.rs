//! Demo phase (fixed add/match/cancel scenario + `self_check`) followed by an
//! optional simulator phase.

use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lob_sim::cli::{Cli, print_order_book};
use lob_sim::engine::MatchingEngine;
use lob_sim::orderbook::OrderBook;
use lob_sim::sim::{SimConfig, Simulator};
use lob_sim::types::Side;

/// Seeds a small resting book, crosses it with a marketable limit order, then
/// cancels one of the survivors.
fn run_demo() -> anyhow::Result<()> {
    let mut book = OrderBook::new();
    let mut engine = MatchingEngine::new();

    book.add_limit(lob_sim::order::Order::new_limit(1, Side::Sell, 101, 5, 0.1))
        .context("seeding demo order 1")?;
    book.add_limit(lob_sim::order::Order::new_limit(2, Side::Sell, 102, 3, 0.2))
        .context("seeding demo order 2")?;
    book.add_limit(lob_sim::order::Order::new_limit(3, Side::Buy, 95, 10, 0.3))
        .context("seeding demo order 3")?;

    println!("Seeded book:");
    print_order_book(&book);

    let (taker_id, fills) = engine
        .submit_limit(&mut book, Side::Buy, 102, 8, 1.0)
        .context("submitting demo crossing order")?;
    info!(taker_id, n_fills = fills.len(), "demo crossing order matched");
    println!("Crossing limit buy (id={taker_id}) produced {} fill(s):", fills.len());
    for fill in &fills {
        println!("  {fill:?}");
    }

    if !book.cancel(3) {
        warn!("expected seeded bid id=3 to still be resting");
    }

    println!("Book after demo:");
    print_order_book(&book);

    if !book.self_check() {
        bail!("self_check failed after demo phase");
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("initializing tracing subscriber")?;

    let cli = Cli::parse();

    run_demo()?;

    if cli.run_sim {
        let mut cfg = SimConfig::default();
        if let Some(events) = cli.events {
            cfg.max_events = events;
        }
        if let Some(seed) = cli.seed {
            cfg.seed = seed;
        }
        info!(max_events = cfg.max_events, seed = cfg.seed, "starting simulator phase");
        let mut sim = Simulator::new(cfg);
        sim.run();
    }

    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
