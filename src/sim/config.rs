use serde::{Deserialize, Serialize};

use crate::types::Price;

/// Per-regime tunables: arrival rate, event-type mix, and self-transition
/// probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegimeParams {
    /// Poisson arrival rate, events/sec.
    pub lambda: f64,
    /// `(p_limit_buy, p_limit_sell, p_mkt_buy, p_mkt_sell, p_cancel)`, intended to sum to 1.
    pub mix: [f64; 5],
    /// Probability of staying in this regime at the next event boundary.
    pub p_stay: f64,
}

/// Tunables for one simulator run. A plain hand-built `Clone` struct rather
/// than a file/env loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    pub max_events: u64,
    pub seed: u64,
    /// Emit a snapshot header every N events; 0 disables snapshots.
    pub snapshot_every: u64,

    pub low: RegimeParams,
    pub high: RegimeParams,

    /// `alpha` of the two-sided geometric (discrete-Laplace) offset draw, clamped to `(0, 1]`.
    pub geolap_alpha: f64,
    /// Hard cap on the absolute offset magnitude; 0 means unbounded.
    pub max_offset_ticks: i64,
    /// Mean of the shifted-geometric quantity draw.
    pub mean_qty: f64,
    /// Mid used before the book has two-sided liquidity.
    pub initial_mid_ticks: Price,
    /// Floor applied to every generated limit price.
    pub min_price_ticks: Price,
    /// Never actually read: the anti-cross branch always flips a fair coin
    /// regardless of this value. See DESIGN.md, Open Question 2.
    pub keep_cross_prob: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_events: 200_000,
            seed: 42,
            snapshot_every: 0,
            low: RegimeParams {
                lambda: 5.0,
                mix: [0.30, 0.30, 0.12, 0.12, 0.16],
                p_stay: 0.995,
            },
            high: RegimeParams {
                lambda: 40.0,
                mix: [0.22, 0.22, 0.20, 0.20, 0.16],
                p_stay: 0.98,
            },
            geolap_alpha: 0.35,
            max_offset_ticks: 50,
            mean_qty: 8.0,
            initial_mid_ticks: 10_000,
            min_price_ticks: 1,
            keep_cross_prob: 0.5,
        }
    }
}
