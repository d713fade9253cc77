//! Weekly and monthly averages over recorded rates
//!
//! Only days with an actual publication count toward an average; weekends
//! and holidays are never imputed. An empty period is absent, which callers
//! must keep distinct from a zero-valued average.

use crate::calendar;
use crate::dof::RateRecord;
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Mean rate over one ISO week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAverage {
    pub iso_year: i32,
    pub iso_week: u32,
    pub mean: Decimal,
    pub days_counted: usize,
}

/// Mean rate over one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub year: i32,
    pub month: u32,
    pub mean: Decimal,
    pub days_counted: usize,
}

/// Averages for the week and month containing a reference date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Averages {
    pub weekly: Option<WeeklyAverage>,
    pub monthly: Option<MonthlyAverage>,
}

/// Compute both period averages around `reference`.
///
/// `records` may be a superset of either period; filtering happens here.
pub fn compute_averages(records: &[RateRecord], reference: NaiveDate) -> Averages {
    Averages {
        weekly: weekly_average(records, reference),
        monthly: monthly_average(records, reference),
    }
}

/// Mean over the ISO week containing `reference`, absent when no day in the
/// week has a positive-rate record
pub fn weekly_average(records: &[RateRecord], reference: NaiveDate) -> Option<WeeklyAverage> {
    let (iso_year, iso_week) = calendar::iso_week_of(reference);
    let (start, end) = calendar::week_range(iso_year, iso_week);
    let rates = qualifying(records, start, end);

    if rates.is_empty() {
        return None;
    }

    tracing::debug!(iso_year, iso_week, days = rates.len(), "Weekly average computed");

    Some(WeeklyAverage {
        iso_year,
        iso_week,
        mean: mean_of(&rates),
        days_counted: rates.len(),
    })
}

/// Mean over the calendar month containing `reference`, absent when no day
/// in the month has a positive-rate record
pub fn monthly_average(records: &[RateRecord], reference: NaiveDate) -> Option<MonthlyAverage> {
    let year = reference.year();
    let month = reference.month();
    let (start, end) = calendar::month_range(year, month)?;
    let rates = qualifying(records, start, end);

    if rates.is_empty() {
        return None;
    }

    tracing::debug!(year, month, days = rates.len(), "Monthly average computed");

    Some(MonthlyAverage {
        year,
        month,
        mean: mean_of(&rates),
        days_counted: rates.len(),
    })
}

/// Rates of records inside the inclusive range with a strictly positive rate
fn qualifying(records: &[RateRecord], start: NaiveDate, end: NaiveDate) -> Vec<Decimal> {
    records
        .iter()
        .filter(|record| record.date >= start && record.date <= end && record.rate > Decimal::ZERO)
        .map(|record| record.rate)
        .collect()
}

/// Arithmetic mean rounded half-up to 4 decimal places
fn mean_of(rates: &[Decimal]) -> Decimal {
    let sum: Decimal = rates.iter().copied().sum();
    (sum / Decimal::from(rates.len()))
        .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
