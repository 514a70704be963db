//! The matching engine: submission boundary, taker id allocation, and the
//! price-time-priority matching algorithm built on [`OrderBook::match_against`].

use tracing::{info, trace};

use crate::errors::BookError;
use crate::fill::Fill;
use crate::order::Order;
use crate::orderbook::OrderBook;
use crate::types::{OrderId, Price, Qty, Side, TimePoint};

/// Allocates monotonically increasing taker ids and submits orders against one
/// [`OrderBook`]. The engine does not own the book — callers pass it in, which
/// keeps the simulator free to also query `best_bid`/`mid`/`cancel` directly on
/// the same book between submissions.
pub struct MatchingEngine {
    next_id: OrderId,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    fn allocate_id(&mut self) -> OrderId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Consumes liquidity from the opposite side until `qty` is exhausted or
    /// that side empties. Any residual is discarded — a market order never
    /// rests.
    pub fn submit_market(
        &mut self,
        book: &mut OrderBook,
        side: Side,
        qty: Qty,
        ts: TimePoint,
    ) -> Result<(OrderId, Vec<Fill>), BookError> {
        if qty <= 0 {
            return Err(BookError::NonPositiveQty);
        }
        let id = self.allocate_id();
        let mut remaining = qty;
        let mut fills = Vec::new();
        trace!(id, ?side, qty, "submit_market");
        book.match_against(side, None, id, &mut remaining, ts, &mut fills);
        if remaining > 0 {
            trace!(id, remaining, "market order residual discarded");
        }
        info!(id, ?side, filled = qty - remaining, "market order processed");
        Ok((id, fills))
    }

    /// Matches against the opposite side (gated by `price`); any quantity left
    /// over after matching is posted as a resting limit order under the same id.
    pub fn submit_limit(
        &mut self,
        book: &mut OrderBook,
        side: Side,
        price: Price,
        qty: Qty,
        ts: TimePoint,
    ) -> Result<(OrderId, Vec<Fill>), BookError> {
        if qty <= 0 {
            return Err(BookError::NonPositiveQty);
        }
        if price <= 0 {
            return Err(BookError::NonPositivePrice);
        }
        let id = self.allocate_id();
        let mut remaining = qty;
        let mut fills = Vec::new();
        trace!(id, ?side, price, qty, "submit_limit");
        book.match_against(side, Some(price), id, &mut remaining, ts, &mut fills);
        if remaining > 0 {
            let residual = Order::new_limit(id, side, price, remaining, ts);
            book.add_limit(residual)
                .expect("residual of a freshly allocated id always posts cleanly");
        }
        info!(id, ?side, price, filled = qty - remaining, "limit order processed");
        Ok((id, fills))
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_sell(book: &mut OrderBook, id: OrderId, price: Price, qty: Qty, ts: TimePoint) {
        book.add_limit(Order::new_limit(id, Side::Sell, price, qty, ts))
            .unwrap();
    }

    fn seed_buy(book: &mut OrderBook, id: OrderId, price: Price, qty: Qty, ts: TimePoint) {
        book.add_limit(Order::new_limit(id, Side::Buy, price, qty, ts))
            .unwrap();
    }

    /// Crossing limit buy walks two same-price-tier asks in FIFO order.
    #[test]
    fn crossing_limit_buy_fifo_priority() {
        let mut book = OrderBook::new();
        seed_sell(&mut book, 1, 101, 5, 0.1);
        seed_sell(&mut book, 2, 102, 3, 0.2);

        let mut engine = MatchingEngine::new();
        let (taker, fills) = engine
            .submit_limit(&mut book, Side::Buy, 102, 8, 1.0)
            .unwrap();

        assert_eq!(taker, 3);
        assert_eq!(fills.len(), 2);
        assert_eq!(fills[0].maker_id, 1);
        assert_eq!(fills[0].price, 101);
        assert_eq!(fills[0].qty, 5);
        assert_eq!(fills[1].maker_id, 2);
        assert_eq!(fills[1].price, 102);
        assert_eq!(fills[1].qty, 3);
        assert!(book.asks.is_empty());
        assert!(book.self_check());
    }

    /// Market sell walks the bid book, leaving a partial remainder.
    #[test]
    fn market_sell_walks_bid_book() {
        let mut book = OrderBook::new();
        seed_buy(&mut book, 1, 100, 6, 0.0);
        seed_buy(&mut book, 2, 99, 4, 0.0);

        let mut engine = MatchingEngine::new();
        let (taker, fills) = engine.submit_market(&mut book, Side::Sell, 7, 2.0).unwrap();

        assert_eq!(taker, 3);
        assert_eq!(fills.len(), 2);
        assert_eq!((fills[0].maker_id, fills[0].price, fills[0].qty), (1, 100, 6));
        assert_eq!((fills[1].maker_id, fills[1].price, fills[1].qty), (2, 99, 1));
        assert_eq!(book.bids.get(&99).unwrap()[0].qty, 3);
        assert!(book.self_check());
    }

    /// Partial limit residual posts under the taker's own id.
    #[test]
    fn partial_limit_residual_is_posted() {
        let mut book = OrderBook::new();
        seed_sell(&mut book, 1, 105, 4, 0.0);

        let mut engine = MatchingEngine::new();
        let (taker, fills) = engine
            .submit_limit(&mut book, Side::Buy, 105, 10, 1.0)
            .unwrap();

        assert_eq!(taker, 2);
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].qty, 4);
        let resting = book.bids.get(&105).unwrap();
        assert_eq!(resting.len(), 1);
        assert_eq!(resting[0].id, 2);
        assert_eq!(resting[0].qty, 6);
        assert!(book.self_check());
    }

    /// Cancel of an unknown id is a silent no-op.
    #[test]
    fn cancel_unknown_id_is_silent() {
        let mut book = OrderBook::new();
        seed_buy(&mut book, 1, 100, 5, 0.0);
        assert!(!book.cancel(424242));
        assert!(book.self_check());
    }

    /// Cancelling the only order at a level erases that level.
    #[test]
    fn level_erasure_on_cancel() {
        let mut book = OrderBook::new();
        seed_sell(&mut book, 1, 105, 2, 0.0);
        assert!(book.cancel(1));
        assert!(!book.asks.contains_key(&105));
    }

    #[test]
    fn taker_ids_strictly_increase_across_submissions() {
        let mut book = OrderBook::new();
        let mut engine = MatchingEngine::new();
        let (a, _) = engine.submit_limit(&mut book, Side::Buy, 10, 1, 0.0).unwrap();
        let (b, _) = engine.submit_limit(&mut book, Side::Sell, 20, 1, 0.0).unwrap();
        let (c, _) = engine.submit_market(&mut book, Side::Buy, 1, 0.0).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn submit_rejects_non_positive_qty_and_price() {
        let mut book = OrderBook::new();
        let mut engine = MatchingEngine::new();
        assert_eq!(
            engine
                .submit_market(&mut book, Side::Buy, 0, 0.0)
                .unwrap_err(),
            BookError::NonPositiveQty
        );
        assert_eq!(
            engine
                .submit_limit(&mut book, Side::Buy, 0, 5, 0.0)
                .unwrap_err(),
            BookError::NonPositivePrice
        );
    }
}
