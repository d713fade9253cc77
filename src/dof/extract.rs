//! Heuristic rate extraction from the gazette's monthly history page
//!
//! The DOF page is semi-structured markup, not an API. The extractor splits
//! the document on table-row boundaries, finds the row mentioning the target
//! date and scans it (plus a couple of following rows, the layout sometimes
//! puts the value in its own row) for the first number shaped like a rate.
//! A plausibility band backstops the scan so stray markup numbers are not
//! mistaken for the rate.
//!
//! Extraction is a pluggable strategy: the resolver only sees [`RateExtract`],
//! so the pattern set and band can change without touching orchestration.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// A strategy for locating the rate for a date inside a raw document
pub trait RateExtract: Send + Sync {
    /// Extract the rate for `date`, or `None` when the document has no
    /// acceptable value for it. A miss is expected, not an error.
    fn extract(&self, document: &str, date: NaiveDate) -> Option<Decimal>;
}

/// Row-oriented extractor tuned to the DOF monthly history layout
pub struct DofRowExtractor {
    row_boundary: Regex,
    number: Regex,
    whitespace: Regex,
    band_low: Decimal,
    band_high: Decimal,
    row_lookahead: usize,
}

impl DofRowExtractor {
    /// Create an extractor with the USD/MXN plausibility band (10, 30)
    pub fn new() -> Self {
        Self {
            row_boundary: Regex::new(r"(?i)</tr>").expect("row boundary pattern is valid"),
            number: Regex::new(r"\b\d{1,2}\.\d{4,6}\b").expect("number pattern is valid"),
            whitespace: Regex::new(r"\s+").expect("whitespace pattern is valid"),
            band_low: dec!(10),
            band_high: dec!(30),
            row_lookahead: 2,
        }
    }

    /// Override the plausibility band (both boundaries exclusive)
    pub fn with_band(mut self, low: Decimal, high: Decimal) -> Self {
        self.band_low = low;
        self.band_high = high;
        self
    }

    /// Date pattern in the publication's d/m/yyyy form, tolerating missing
    /// leading zeros on day and month
    fn date_pattern(date: NaiveDate) -> Regex {
        let pattern = format!(r"\b0?{}/0?{}/{}\b", date.day(), date.month(), date.year());
        Regex::new(&pattern).expect("date pattern is valid")
    }

    /// First number in `row` that parses and sits strictly inside the band
    fn first_plausible_value(&self, row: &str) -> Option<Decimal> {
        let normalized = self.whitespace.replace_all(row, " ");
        let token = self.number.find(&normalized)?;
        let value = Decimal::from_str(token.as_str()).ok()?;
        (self.band_low < value && value < self.band_high).then_some(value)
    }
}

impl Default for DofRowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RateExtract for DofRowExtractor {
    fn extract(&self, document: &str, date: NaiveDate) -> Option<Decimal> {
        let date_re = Self::date_pattern(date);
        let rows: Vec<&str> = self.row_boundary.split(document).collect();

        for (index, row) in rows.iter().enumerate() {
            if !date_re.is_match(row) {
                continue;
            }

            let window_end = (index + self.row_lookahead + 1).min(rows.len());
            for candidate in &rows[index..window_end] {
                if let Some(value) = self.first_plausible_value(candidate) {
                    return Some(value);
                }
            }
        }

        None
    }
}
