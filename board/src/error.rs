//! Failure modes of board operations.
//!
//! None of these are fatal. The store and drag session report them as
//! `Result`s so callers and tests can tell what happened; the engine absorbs
//! them into no-ops and logs them at `debug` level.

use crate::order::OrderId;

/// Error returned by store and drag-session operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The operation referenced an order id the store does not hold.
    #[error("order not found: {0}")]
    NotFound(OrderId),
    /// A column name outside the fixed column set.
    #[error("unrecognized column: {0:?}")]
    InvalidColumn(String),
}
