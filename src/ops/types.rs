//! Operation value types

use crate::dof::{ResolveError, ResolvedRate};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Hard cap on a listing page
pub const MAX_PAGE_SIZE: usize = 100;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Direction of the USD leg of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// The holder receives USD and converts to MXN later
    ReceiveUsd,
    /// The payer acquires USD with MXN
    PayUsd,
}

/// One rate leg of an operation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateInput {
    /// Resolve through the publication pipeline; `None` means today in the
    /// configured zone (the textual "today" sentinel is parsed at the wire)
    Dof { date: Option<NaiveDate> },
    /// Use an explicitly supplied value
    Manual { value: Decimal },
}

/// Lifecycle state of a stored operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationStatus {
    Pending,
    Closed,
    Cancelled,
}

/// Inputs of a new FX operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRequest {
    pub direction: Direction,
    pub operation_date: NaiveDate,
    pub usd_amount: Decimal,
    pub base: RateInput,
    pub comparison: RateInput,
    pub concept: Option<String>,
    pub counterparty: Option<String>,
    pub notes: Option<String>,
}

/// A fully computed operation as persisted and returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub direction: Direction,
    pub operation_date: NaiveDate,
    pub usd_amount: Decimal,
    pub base_rate: ResolvedRate,
    pub comparison_rate: ResolvedRate,
    pub mxn_base: Decimal,
    pub mxn_comparison: Decimal,
    pub pnl_mxn: Decimal,
    pub pnl_pct: Decimal,
    pub status: OperationStatus,
    pub concept: Option<String>,
    pub counterparty: Option<String>,
    pub notes: Option<String>,
}

/// Filters for listing stored operations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationFilter {
    /// Inclusive lower bound on the operation date
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the operation date
    pub to: Option<NaiveDate>,
    pub direction: Option<Direction>,
    pub status: Option<OperationStatus>,
    /// Case-insensitive match over concept, counterparty and notes
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl OperationFilter {
    /// Requested page size, clamped to the hard cap
    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    /// Requested offset, defaulting to the first page
    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Whether `operation` passes every set criterion
    pub fn matches(&self, operation: &OperationRecord) -> bool {
        if let Some(from) = self.from {
            if operation.operation_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if operation.operation_date > to {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if operation.direction != direction {
                return false;
            }
        }
        if let Some(status) = self.status {
            if operation.status != status {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let fields = [&operation.concept, &operation.counterparty, &operation.notes];
            let hit = fields
                .iter()
                .any(|field| field.as_deref().is_some_and(|text| text.to_lowercase().contains(&needle)));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// Failures while resolving the rate legs of an operation
#[derive(Debug, Error)]
pub enum OperationError {
    /// Manual rates must be strictly positive
    #[error("manual rate must be > 0, got {value}")]
    InvalidManualRate { value: Decimal },
    /// The publication pipeline could not produce a rate
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
