//! The two-state Markov regime switcher.

use rand::Rng;

use crate::sim::config::RegimeParams;
use crate::types::Regime;

/// Draws the regime transition for the next event boundary. Called once per
/// event, before event-type sampling, so the draw sequence stays fixed.
pub fn maybe_switch_regime(
    current: Regime,
    low: &RegimeParams,
    high: &RegimeParams,
    rng: &mut impl Rng,
) -> Regime {
    let stay_prob = match current {
        Regime::Low => low.p_stay,
        Regime::High => high.p_stay,
    };
    let stays = rng.random::<f64>() < stay_prob;
    match (current, stays) {
        (Regime::Low, true) => Regime::Low,
        (Regime::Low, false) => Regime::High,
        (Regime::High, true) => Regime::High,
        (Regime::High, false) => Regime::Low,
    }
}
