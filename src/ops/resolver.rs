//! Per-leg rate resolution for operations

use super::types::{OperationError, RateInput};
use crate::dof::{DofResolver, ResolvedRate};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Resolve one rate leg.
///
/// Manual values are validated and passed through; publication lookups go
/// through the pipeline, defaulting to `today` when no date is given.
pub async fn resolve_input(
    resolver: &DofResolver,
    today: NaiveDate,
    input: &RateInput,
) -> Result<ResolvedRate, OperationError> {
    match input {
        RateInput::Manual { value } => {
            if *value <= Decimal::ZERO {
                return Err(OperationError::InvalidManualRate { value: *value });
            }
            tracing::debug!(%value, "Using manual rate");
            Ok(ResolvedRate::manual(*value))
        }
        RateInput::Dof { date } => {
            let requested = date.unwrap_or(today);
            Ok(resolver.resolve(requested).await?)
        }
    }
}

/// Resolve both legs of an operation concurrently.
///
/// The legs are data-independent; neither blocks the other.
pub async fn resolve_pair(
    resolver: &DofResolver,
    today: NaiveDate,
    base: &RateInput,
    comparison: &RateInput,
) -> Result<(ResolvedRate, ResolvedRate), OperationError> {
    let (base, comparison) = tokio::join!(
        resolve_input(resolver, today, base),
        resolve_input(resolver, today, comparison),
    );
    Ok((base?, comparison?))
}
