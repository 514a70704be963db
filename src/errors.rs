use thiserror::Error;

use crate::types::OrderId;

/// Invalid-argument failures raised at the submission boundary.
///
/// These are programmer errors, not run-of-the-mill market conditions: an unknown
/// id on `cancel` is a silent no-op, not a `BookError`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookError {
    #[error("order id {0} already resting in the book")]
    DuplicateId(OrderId),
    #[error("quantity must be > 0")]
    NonPositiveQty,
    #[error("limit price must be >= 1")]
    NonPositivePrice,
    #[error("add_limit requires an order of type Limit")]
    WrongOrderType,
}
