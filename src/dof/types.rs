//! Resolution value types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Source label stamped on records resolved from the gazette
pub const DOF_SOURCE_LABEL: &str = "DOF";

/// Typical publication time of the daily gazette edition
pub const DOF_PUBLICATION_TIME: &str = "12:00";

/// How a resolved rate was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateKind {
    /// Extracted from a gazette publication
    Published,
    /// Supplied explicitly by the caller
    Manual,
}

/// A rate resolved for an operation, either published or manual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// Provenance of the value
    pub kind: RateKind,
    /// Date the caller asked for (published rates only)
    pub requested_date: Option<NaiveDate>,
    /// Date whose publication was actually used
    pub effective_date: Option<NaiveDate>,
    /// The USD/MXN rate
    pub value: Decimal,
    /// Provenance note, set when fallback moved the effective date
    pub note: Option<String>,
}

impl ResolvedRate {
    /// A rate extracted from the publication for `effective` while resolving
    /// `requested`. The note records the fallback when the two differ.
    pub fn published(requested: NaiveDate, effective: NaiveDate, value: Decimal) -> Self {
        let note = (requested != effective).then(|| {
            format!("no publication for {requested}; used prior business day {effective}")
        });
        Self {
            kind: RateKind::Published,
            requested_date: Some(requested),
            effective_date: Some(effective),
            value,
            note,
        }
    }

    /// An explicitly supplied rate. Positivity is enforced where manual
    /// input enters the system, not here.
    pub fn manual(value: Decimal) -> Self {
        Self {
            kind: RateKind::Manual,
            requested_date: None,
            effective_date: None,
            value,
            note: None,
        }
    }

    /// Whether fallback moved the effective date off the requested one
    pub fn fell_back(&self) -> bool {
        match (self.requested_date, self.effective_date) {
            (Some(requested), Some(effective)) => requested != effective,
            _ => false,
        }
    }
}

/// A dated rate observation as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// Publication date
    pub date: NaiveDate,
    /// USD/MXN rate
    pub rate: Decimal,
    /// Originating source label (e.g. "DOF")
    pub source: String,
    /// Publication time as printed by the source
    pub published_at: String,
}

impl RateRecord {
    /// Build a record for a gazette publication
    pub fn from_publication(date: NaiveDate, rate: Decimal) -> Self {
        Self {
            date,
            rate,
            source: DOF_SOURCE_LABEL.to_string(),
            published_at: DOF_PUBLICATION_TIME.to_string(),
        }
    }
}

/// Terminal failures of the resolution pipeline
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No source published a value for the requested date or any prior
    /// business day within the attempt budget
    #[error("no published rate for {requested} within {attempts} attempts")]
    Unavailable { requested: NaiveDate, attempts: u32 },
    /// The caller-supplied deadline elapsed mid-resolution
    #[error("resolution deadline elapsed while resolving {requested}")]
    DeadlineExceeded { requested: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_published_without_fallback_has_no_note() {
        let rate = ResolvedRate::published(date(2025, 10, 1), date(2025, 10, 1), dec!(18.1234));
        assert_eq!(rate.kind, RateKind::Published);
        assert!(rate.note.is_none());
        assert!(!rate.fell_back());
    }

    #[test]
    fn test_published_with_fallback_records_note() {
        let rate = ResolvedRate::published(date(2025, 10, 6), date(2025, 10, 3), dec!(18.1234));
        assert!(rate.fell_back());
        let note = rate.note.unwrap();
        assert!(note.contains("2025-10-06"));
        assert!(note.contains("2025-10-03"));
    }

    #[test]
    fn test_manual_rate_has_no_dates() {
        let rate = ResolvedRate::manual(dec!(18.50));
        assert_eq!(rate.kind, RateKind::Manual);
        assert!(rate.requested_date.is_none());
        assert!(rate.effective_date.is_none());
        assert!(!rate.fell_back());
    }

    #[test]
    fn test_record_from_publication() {
        let record = RateRecord::from_publication(date(2025, 10, 1), dec!(18.1234));
        assert_eq!(record.source, "DOF");
        assert_eq!(record.published_at, "12:00");
    }
}
