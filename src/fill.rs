use crate::types::{OrderId, Price, Qty, Side, TimePoint};

/// A single execution produced by the matching engine.
///
/// The price is always the **maker's** posted price; `taker_side` is the side of
/// the aggressing order (the maker is on the opposite side).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub taker_id: OrderId,
    pub maker_id: OrderId,
    pub taker_side: Side,
    pub price: Price,
    pub qty: Qty,
    pub ts: TimePoint,
}
