//! Event-type, quantity, offset, and limit-price samplers.

use rand::Rng;
use rand_distr::{Distribution, Geometric};

use crate::sim::config::SimConfig;
use crate::types::{EventType, Price, Qty, Side};

/// Draws the event type from the active regime's `mix`, in cumulative-threshold
/// order `(limit_buy, limit_sell, mkt_buy, mkt_sell, cancel)`.
pub fn draw_event_type(mix: &[f64; 5], rng: &mut impl Rng) -> EventType {
    let u: f64 = rng.random();
    let mut cum = 0.0;
    for (i, p) in mix.iter().enumerate() {
        cum += p;
        if u < cum {
            return match i {
                0 => EventType::LimitBuy,
                1 => EventType::LimitSell,
                2 => EventType::MktBuy,
                3 => EventType::MktSell,
                _ => EventType::Cancel,
            };
        }
    }
    EventType::Cancel
}

/// Shifted-geometric quantity draw: geometric on `{0,1,2,...}` with `p = 1/mean`
/// (or `p = 1` when `mean <= 1`), shifted by one so quantities land on `{1,2,...}`.
pub fn draw_geometric_mean(mean: f64, rng: &mut impl Rng) -> Qty {
    let p = if mean <= 1.0 { 1.0 } else { 1.0 / mean };
    let dist = Geometric::new(p).expect("p derived from mean is always in (0, 1]");
    (dist.sample(rng) + 1) as Qty
}

/// Symmetric discrete-Laplace ("geolap") offset: `Geometric(alpha)` shifted by
/// one, optionally capped, then signed by a fair coin flip.
pub fn draw_two_sided_offset(alpha: f64, max_offset_ticks: i64, rng: &mut impl Rng) -> i64 {
    let alpha = alpha.clamp(f64::MIN_POSITIVE, 1.0);
    let dist = Geometric::new(alpha).expect("alpha clamped into (0, 1]");
    let k = dist.sample(rng) as i64;
    let mut k_prime = k + 1;
    if max_offset_ticks > 0 {
        k_prime = k_prime.min(max_offset_ticks);
    }
    if rng.random_bool(0.5) { k_prime } else { -k_prime }
}

/// Decides the limit price for a new `side` order, given the book's current
/// mid/best quotes.
///
/// The anti-cross rule's "keep the cross" coin is a hard-coded `Bernoulli(0.5)`
/// — `cfg.keep_cross_prob` is carried but never read here, matching the
/// original source's behavior (DESIGN.md, Open Question 2).
pub fn decide_limit_price(
    side: Side,
    mid: Price,
    best_bid: Price,
    best_ask: Price,
    cfg: &SimConfig,
    rng: &mut impl Rng,
) -> Price {
    let off = draw_two_sided_offset(cfg.geolap_alpha, cfg.max_offset_ticks, rng);
    let mut px = mid + off;

    let crosses = match side {
        Side::Buy => best_ask > 0 && px >= best_ask,
        Side::Sell => best_bid > 0 && px <= best_bid,
    };
    if crosses {
        let keep_cross = rng.random_bool(0.5);
        if !keep_cross {
            px = match side {
                Side::Buy => best_bid.min(mid - off.abs()),
                Side::Sell => best_ask.max(mid + off.abs()),
            };
        }
    }

    px.max(cfg.min_price_ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng;

    #[test]
    fn event_type_respects_cumulative_thresholds() {
        let mix = [1.0, 0.0, 0.0, 0.0, 0.0];
        let mut r = rng::seeded(1);
        for _ in 0..50 {
            assert_eq!(draw_event_type(&mix, &mut r), EventType::LimitBuy);
        }
    }

    #[test]
    fn geometric_mean_is_always_at_least_one() {
        let mut r = rng::seeded(2);
        for _ in 0..1000 {
            assert!(draw_geometric_mean(8.0, &mut r) >= 1);
        }
        for _ in 0..1000 {
            assert!(draw_geometric_mean(0.5, &mut r) >= 1);
        }
    }

    #[test]
    fn two_sided_offset_is_never_zero_and_respects_cap() {
        let mut r = rng::seeded(3);
        for _ in 0..1000 {
            let off = draw_two_sided_offset(0.4, 5, &mut r);
            assert_ne!(off, 0);
            assert!(off.abs() <= 5);
        }
    }

    #[test]
    fn decide_limit_price_never_below_floor() {
        let cfg = SimConfig { min_price_ticks: 3, ..SimConfig::default() };
        let mut r = rng::seeded(4);
        for _ in 0..1000 {
            let px = decide_limit_price(Side::Buy, 5, 0, 0, &cfg, &mut r);
            assert!(px >= 3);
        }
    }
}
