use crate::types::{OrdType, OrderId, Price, Qty, Side, TimePoint};

/// A single order, resting or in-flight.
///
/// `limit_price` is `None` for market orders and immutable once posted for limit
/// orders; `qty` is the only field a fill ever mutates.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub order_type: OrdType,
    pub limit_price: Option<Price>,
    pub qty: Qty,
    pub ts: TimePoint,
}

impl Order {
    pub fn new_limit(id: OrderId, side: Side, price: Price, qty: Qty, ts: TimePoint) -> Self {
        Self {
            id,
            side,
            order_type: OrdType::Limit,
            limit_price: Some(price),
            qty,
            ts,
        }
    }

    pub fn new_market(id: OrderId, side: Side, qty: Qty, ts: TimePoint) -> Self {
        Self {
            id,
            side,
            order_type: OrdType::Market,
            limit_price: None,
            qty,
            ts,
        }
    }
}
