//! Persistence boundary
//!
//! The durable store (a spreadsheet in production) is an external
//! collaborator; the crate only sees this trait. [`MemoryStore`] backs tests
//! and one-shot CLI runs. Duplicate-date rejection is a normal outcome of
//! appending, not an error.

mod memory;

pub use memory::MemoryStore;

use crate::dof::RateRecord;
use crate::ops::{OperationFilter, OperationRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// Outcome of appending a rate record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Stored as a new row
    Inserted,
    /// A record for that date already exists; nothing was written
    Duplicate,
}

impl AppendOutcome {
    /// Whether the record was actually written
    pub fn accepted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

/// Receipt for a stored operation
#[derive(Debug, Clone, Serialize)]
pub struct AppendReceipt {
    pub id: Uuid,
    /// Zero-based position in the store
    pub position: usize,
}

/// Durable record store for rates and operations
#[async_trait]
pub trait FxStore: Send + Sync {
    /// Append a rate record unless its date is already present
    async fn append_record(&self, record: RateRecord) -> anyhow::Result<AppendOutcome>;

    /// Records within the inclusive date range, ordered by date
    async fn list_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<RateRecord>>;

    /// Append a computed operation
    async fn append_operation(&self, operation: OperationRecord) -> anyhow::Result<AppendReceipt>;

    /// Operations matching `filter`, paginated per its limit and offset
    async fn list_operations(
        &self,
        filter: OperationFilter,
    ) -> anyhow::Result<Vec<OperationRecord>>;
}
