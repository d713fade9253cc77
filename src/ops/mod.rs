//! FX operations
//!
//! Resolves the two rate legs of an operation and derives its P&L.

mod pnl;
mod resolver;
mod types;

pub use pnl::{compute_pnl, PnlBreakdown};
pub use resolver::{resolve_input, resolve_pair};
pub use types::{
    Direction, OperationError, OperationFilter, OperationRecord, OperationRequest,
    OperationStatus, RateInput, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
