//! Flag parsing and the demo phase's book pretty-printer.
//!
//! A flat flag surface — `--run-sim`, `--events`, `--seed` — replaces an
//! earlier interactive `Add`/`Match`/`Book` subcommand layout; unknown flags
//! are silently ignored.

use clap::Parser;

use crate::orderbook::OrderBook;

/// A demo of a single-symbol limit order book and its market simulator.
#[derive(Parser, Debug)]
#[command(name = "lob-sim", version, about, ignore_errors = true)]
pub struct Cli {
    /// Run the event-driven simulator phase after the demo phase.
    #[arg(long = "run-sim")]
    pub run_sim: bool,

    /// Overrides the simulator's max_events (default 200000).
    #[arg(long = "events")]
    pub events: Option<u64>,

    /// Overrides the simulator's PRNG seed (default 42).
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

/// Prints aggregated per-level quantity, best-first each side.
pub fn print_order_book(book: &OrderBook) {
    println!("------ Order Book ------");
    println!("Bids (highest first):");
    for (price, orders) in book.bids.iter().rev() {
        let total_qty: i64 = orders.iter().map(|o| o.qty).sum();
        println!("  price={price} qty={total_qty} depth={}", orders.len());
    }
    println!("Asks (lowest first):");
    for (price, orders) in book.asks.iter() {
        let total_qty: i64 = orders.iter().map(|o| o.qty).sum();
        println!("  price={price} qty={total_qty} depth={}", orders.len());
    }
    println!("-------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_flags_parse_as_expected() {
        let cli = Cli::try_parse_from(["lob-sim", "--run-sim", "--events", "10", "--seed", "7"])
            .unwrap();
        assert!(cli.run_sim);
        assert_eq!(cli.events, Some(10));
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn unknown_flag_is_silently_ignored() {
        let cli = Cli::try_parse_from(["lob-sim", "--bogus-flag"]).unwrap();
        assert!(!cli.run_sim);
        assert_eq!(cli.events, None);
        assert_eq!(cli.seed, None);
    }
}
