//! Secondary-source cross-validation
//!
//! The Banxico FIX rate is an independent publication of the same quantity;
//! comparing it against the resolved DOF value catches extraction drift.
//! Validation is best-effort: no credential means no cross-check, and a
//! divergence is a flag on the result, never a failure.

mod client;

pub use client::{BanxicoClient, BANXICO_API_URL, FIX_SERIES};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A secondary provider of same-date USD/MXN rates
#[async_trait]
pub trait SecondaryRateSource: Send + Sync {
    /// The rate observed for `date`, or `None` when the source has no data
    async fn rate_for(&self, date: NaiveDate) -> anyhow::Result<Option<Decimal>>;
}

/// Relative gap between two independently sourced rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    /// Absolute difference relative to the secondary rate, in percent
    pub percent_difference: Decimal,
    /// Whether the gap is strictly beyond the configured threshold
    pub exceeds_threshold: bool,
}

/// Compare a primary rate against a secondary observation.
///
/// The difference is relative to the secondary value, which must be
/// non-zero.
pub fn compare(primary: Decimal, secondary: Decimal, threshold_pct: Decimal) -> Divergence {
    let percent_difference = ((primary - secondary) / secondary * dec!(100)).abs();
    let exceeds_threshold = percent_difference > threshold_pct;

    if exceeds_threshold {
        tracing::warn!(
            %primary,
            %secondary,
            %percent_difference,
            %threshold_pct,
            "Primary and secondary rates diverge beyond threshold"
        );
    }

    Divergence {
        percent_difference,
        exceeds_threshold,
    }
}
