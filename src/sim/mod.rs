//! The event-driven stochastic market simulator.

pub mod config;
pub mod live_ids;
pub mod regime;
pub mod rng;
pub mod sampler;
pub mod simulator;
pub mod telemetry;

pub use config::{RegimeParams, SimConfig};
pub use simulator::{SimEvent, Simulator};
pub use telemetry::Telemetry;
