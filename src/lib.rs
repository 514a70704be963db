//! Single-symbol limit order book with price-time-priority matching, driven by
//! an event-driven stochastic market simulator.

pub mod cli;
pub mod engine;
pub mod errors;
pub mod fill;
pub mod order;
pub mod orderbook;
pub mod sim;
pub mod types;

pub mod prelude {
    pub use crate::engine::MatchingEngine;
    pub use crate::errors::BookError;
    pub use crate::fill::Fill;
    pub use crate::order::Order;
    pub use crate::orderbook::OrderBook;
    pub use crate::sim::{SimConfig, SimEvent, Simulator};
    pub use crate::types::{EventType, OrdType, OrderId, Price, Qty, Regime, Side, TimePoint};
}
