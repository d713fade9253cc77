//! In-memory store for tests and one-shot runs

use super::{AppendOutcome, AppendReceipt, FxStore};
use crate::dof::RateRecord;
use crate::ops::{OperationFilter, OperationRecord};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

/// Volatile [`FxStore`] with the same dedup and filter semantics as the
/// durable backend
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<RateRecord>>,
    operations: RwLock<Vec<OperationRecord>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FxStore for MemoryStore {
    async fn append_record(&self, record: RateRecord) -> anyhow::Result<AppendOutcome> {
        let mut records = self.records.write().await;

        if records.iter().any(|existing| existing.date == record.date) {
            tracing::info!(date = %record.date, "Rate record already present, skipping");
            return Ok(AppendOutcome::Duplicate);
        }

        records.push(record);
        Ok(AppendOutcome::Inserted)
    }

    async fn list_records(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Vec<RateRecord>> {
        let records = self.records.read().await;

        let mut selected: Vec<RateRecord> = records
            .iter()
            .filter(|record| from.is_none_or(|from| record.date >= from))
            .filter(|record| to.is_none_or(|to| record.date <= to))
            .cloned()
            .collect();

        selected.sort_by_key(|record| record.date);
        Ok(selected)
    }

    async fn append_operation(&self, operation: OperationRecord) -> anyhow::Result<AppendReceipt> {
        let mut operations = self.operations.write().await;
        let receipt = AppendReceipt {
            id: operation.id,
            position: operations.len(),
        };

        operations.push(operation);
        Ok(receipt)
    }

    async fn list_operations(
        &self,
        filter: OperationFilter,
    ) -> anyhow::Result<Vec<OperationRecord>> {
        let operations = self.operations.read().await;

        Ok(operations
            .iter()
            .filter(|operation| filter.matches(operation))
            .skip(filter.effective_offset())
            .take(filter.effective_limit())
            .cloned()
            .collect())
    }
}
