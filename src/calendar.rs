//! Calendar arithmetic for publication dates
//!
//! ISO week numbering, week/month ranges and the business-day fallback used
//! when the gazette has no publication for a requested date. All functions
//! are pure; "today" is derived once by the caller in the configured zone.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// ISO-8601 year and week containing `date`.
///
/// A date belongs to the ISO year that owns the Thursday of its week; week 1
/// is the week containing the year's first Thursday.
pub fn iso_week_of(date: NaiveDate) -> (i32, u32) {
    let week = date.iso_week();
    (week.year(), week.week())
}

/// Monday-through-Sunday range of an ISO week, inclusive on both ends.
///
/// Week 1 always contains Jan 4, so its Monday is the Monday on or before
/// that date; later weeks are whole-week offsets from it.
pub fn week_range(iso_year: i32, iso_week: u32) -> (NaiveDate, NaiveDate) {
    let jan4 = NaiveDate::from_ymd_opt(iso_year, 1, 4).expect("Jan 4 exists in every year");
    let week_one_monday = jan4 - Duration::days(jan4.weekday().num_days_from_monday() as i64);
    let start = week_one_monday + Duration::weeks(iso_week as i64 - 1);
    (start, start + Duration::days(6))
}

/// First and last calendar day of a month, or `None` for an invalid month.
pub fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    Some((start, next_month - Duration::days(1)))
}

/// The business day preceding `date`.
///
/// Steps back one calendar day, then skips over a weekend landing: Sunday
/// rolls back to Friday, Saturday rolls back to Friday. Official holidays
/// are not consulted; the gazette fallback is weekend-only.
pub fn previous_business_day(date: NaiveDate) -> NaiveDate {
    let prev = date - Duration::days(1);
    match prev.weekday() {
        Weekday::Sun => prev - Duration::days(2),
        Weekday::Sat => prev - Duration::days(1),
        _ => prev,
    }
}

/// Whether `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_week_of_midyear() {
        assert_eq!(iso_week_of(date(2025, 10, 1)), (2025, 40));
    }

    #[test]
    fn test_iso_week_of_year_boundary() {
        // Dec 30 2024 is the Monday of 2025's week 1
        assert_eq!(iso_week_of(date(2024, 12, 30)), (2025, 1));
        // Jan 1 2021 still belongs to 2020's week 53
        assert_eq!(iso_week_of(date(2021, 1, 1)), (2020, 53));
    }

    #[test]
    fn test_week_range_monday_through_sunday() {
        let (start, end) = week_range(2025, 40);
        assert_eq!(start, date(2025, 9, 29));
        assert_eq!(end, date(2025, 10, 5));
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(end.weekday(), Weekday::Sun);
        assert_eq!(end - start, Duration::days(6));
    }

    #[test]
    fn test_week_range_always_seven_days() {
        for year in [2020, 2021, 2024, 2025] {
            for week in [1, 26, 52] {
                let (start, end) = week_range(year, week);
                assert_eq!(start.weekday(), Weekday::Mon);
                assert_eq!(end.weekday(), Weekday::Sun);
                assert_eq!(end - start, Duration::days(6));
            }
        }
    }

    #[test]
    fn test_week_range_contains_its_dates() {
        let d = date(2025, 10, 1);
        let (iso_year, iso_week) = iso_week_of(d);
        let (start, end) = week_range(iso_year, iso_week);
        assert!(start <= d && d <= end);
    }

    #[test]
    fn test_month_range_february() {
        let (start, end) = month_range(2025, 2).unwrap();
        assert_eq!(start, date(2025, 2, 1));
        assert_eq!(end, date(2025, 2, 28));

        let (_, leap_end) = month_range(2024, 2).unwrap();
        assert_eq!(leap_end, date(2024, 2, 29));
    }

    #[test]
    fn test_month_range_lengths() {
        assert_eq!(month_range(2025, 4).unwrap().1, date(2025, 4, 30));
        assert_eq!(month_range(2025, 12).unwrap().1, date(2025, 12, 31));
        assert_eq!(month_range(2025, 1).unwrap().1, date(2025, 1, 31));
    }

    #[test]
    fn test_month_range_invalid_month() {
        assert!(month_range(2025, 13).is_none());
        assert!(month_range(2025, 0).is_none());
    }

    #[test]
    fn test_previous_business_day_weekend_landings() {
        // Saturday and Sunday both roll back to Friday Aug 1
        assert_eq!(previous_business_day(date(2025, 8, 2)), date(2025, 8, 1));
        assert_eq!(previous_business_day(date(2025, 8, 3)), date(2025, 8, 1));
        // Monday steps over the whole weekend
        assert_eq!(previous_business_day(date(2025, 8, 4)), date(2025, 8, 1));
        // Midweek is a plain one-day step
        assert_eq!(previous_business_day(date(2025, 8, 6)), date(2025, 8, 5));
    }

    #[test]
    fn test_previous_business_day_month_and_year_boundaries() {
        assert_eq!(previous_business_day(date(2025, 9, 1)), date(2025, 8, 29));
        assert_eq!(previous_business_day(date(2025, 1, 1)), date(2024, 12, 31));
    }

    #[test]
    fn test_previous_business_day_never_weekend() {
        let mut d = date(2025, 1, 1);
        for _ in 0..400 {
            assert!(!is_weekend(previous_business_day(d)));
            d = d.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date(2025, 8, 2)));
        assert!(is_weekend(date(2025, 8, 3)));
        assert!(!is_weekend(date(2025, 8, 1)));
        assert!(!is_weekend(date(2025, 8, 4)));
    }
}
