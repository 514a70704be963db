//! Scalar aliases and tag enums shared by the book, the engine and the simulator.

/// Integer tick price. Must be `>= 1` for any order that rests in the book.
pub type Price = i64;

/// Integer unit quantity. Must be `> 0` for any order that is live.
pub type Qty = i64;

/// Monotonic identifier assigned by the matching engine on submission.
pub type OrderId = u64;

/// Seconds since the start of the run. Non-decreasing across events.
pub type TimePoint = f64;

/// Which side of the book an order rests on or an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// The kind of an order. `Cancel` never appears on a resting [`crate::order::Order`] —
/// it exists here only so `add_limit` has something to reject when handed one
/// (see [`crate::errors::BookError::WrongOrderType`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrdType {
    Limit,
    Market,
    Cancel,
}

/// Hidden Markov state governing the simulator's arrival rate and event mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Low,
    High,
}

/// The five event kinds the simulator's categorical sampler can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    LimitBuy,
    LimitSell,
    MktBuy,
    MktSell,
    Cancel,
}
