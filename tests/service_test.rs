//! End-to-end tests wiring the service facade from scripted collaborators

use async_trait::async_trait;
use chrono::NaiveDate;
use dof_fx::banxico::SecondaryRateSource;
use dof_fx::dof::{
    DocumentSource, DofResolver, DofRowExtractor, FetchError, RateKind, RateRecord,
};
use dof_fx::ops::{Direction, OperationFilter, OperationRequest, RateInput};
use dof_fx::service::{FxService, ValidationStatus};
use dof_fx::store::{AppendOutcome, MemoryStore};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Gazette fake serving one page per (year, month)
struct ScriptedGazette {
    endpoints: Vec<String>,
    pages: HashMap<(i32, u32), String>,
}

impl ScriptedGazette {
    fn new(pages: HashMap<(i32, u32), String>) -> Self {
        Self {
            endpoints: vec!["mirror-a".to_string(), "mirror-b".to_string()],
            pages,
        }
    }
}

#[async_trait]
impl DocumentSource for ScriptedGazette {
    fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    async fn fetch(&self, _: &str, year: i32, month: u32) -> Result<String, FetchError> {
        Ok(self.pages.get(&(year, month)).cloned().unwrap_or_default())
    }
}

/// Secondary source fake with a fixed per-date answer
struct ScriptedFix(HashMap<NaiveDate, Decimal>);

#[async_trait]
impl SecondaryRateSource for ScriptedFix {
    async fn rate_for(&self, date: NaiveDate) -> anyhow::Result<Option<Decimal>> {
        Ok(self.0.get(&date).copied())
    }
}

fn row(d: &str, value: &str) -> String {
    format!("<tr><td>{d}</td><td>{value}</td></tr>")
}

fn october_service(secondary: Option<Arc<dyn SecondaryRateSource>>) -> FxService {
    let pages = HashMap::from([(
        (2025, 10),
        format!(
            "{}{}",
            row("01/10/2025", "18.1234"),
            row("03/10/2025", "18.3456")
        ),
    )]);

    let resolver = DofResolver::new(
        Arc::new(ScriptedGazette::new(pages)),
        Arc::new(DofRowExtractor::new()),
    );

    FxService::new(
        resolver,
        secondary,
        Arc::new(MemoryStore::new()),
        dec!(1.0),
        chrono_tz::America::Mexico_City,
    )
}

#[tokio::test]
async fn test_quote_with_fallback_and_cross_validation() {
    // Tuesday Oct 7 has no publication; fallback lands on Friday Oct 3 and
    // the FIX comparison uses the effective date.
    let fix = ScriptedFix(HashMap::from([(date(2025, 10, 3), dec!(18.3000))]));
    let service = october_service(Some(Arc::new(fix)));

    let quote = service.quote(date(2025, 10, 7)).await.unwrap();

    assert_eq!(quote.resolved.value, dec!(18.3456));
    assert_eq!(quote.resolved.effective_date, Some(date(2025, 10, 3)));
    assert!(quote.resolved.note.is_some());
    assert_eq!(quote.secondary_rate, Some(dec!(18.3000)));
    // 0.0456 / 18.30 is about 0.25%, inside the 1% threshold
    assert_eq!(quote.status, ValidationStatus::Ok);
}

#[tokio::test]
async fn test_quote_flags_divergent_secondary() {
    let fix = ScriptedFix(HashMap::from([(date(2025, 10, 1), dec!(17.00))]));
    let service = october_service(Some(Arc::new(fix)));

    let quote = service.quote(date(2025, 10, 1)).await.unwrap();

    assert_eq!(quote.status, ValidationStatus::DivergesFromSecondary);
    assert!(quote.divergence.unwrap().exceeds_threshold);
}

#[tokio::test]
async fn test_operation_mixing_published_and_manual_legs() {
    let service = october_service(None);

    let request = OperationRequest {
        direction: Direction::PayUsd,
        operation_date: date(2025, 10, 1),
        usd_amount: dec!(1000),
        base: RateInput::Manual { value: dec!(18.50) },
        comparison: RateInput::Dof {
            date: Some(date(2025, 10, 1)),
        },
        concept: Some("Supplier payment".to_string()),
        counterparty: Some("ACME".to_string()),
        notes: None,
    };

    let (operation, receipt) = service.create_operation(request).await.unwrap();

    assert_eq!(operation.base_rate.kind, RateKind::Manual);
    assert_eq!(operation.comparison_rate.kind, RateKind::Published);
    // 1000 * 18.50 = 18500.00, 1000 * 18.1234 = 18123.40; paying gains 376.60
    assert_eq!(operation.mxn_base, dec!(18500.00));
    assert_eq!(operation.mxn_comparison, dec!(18123.40));
    assert_eq!(operation.pnl_mxn, dec!(376.60));
    assert_eq!(receipt.position, 0);

    let filter = OperationFilter {
        query: Some("supplier".to_string()),
        ..Default::default()
    };
    let listed = service.list_operations(filter).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, operation.id);
}

#[tokio::test]
async fn test_register_and_average_records() {
    let service = october_service(None);
    let today = service.today();

    assert!(service
        .register_record(RateRecord::from_publication(today, dec!(18.20)))
        .await
        .unwrap()
        .accepted());

    // Same date again is a conflict outcome, not an error
    let again = service
        .register_record(RateRecord::from_publication(today, dec!(18.99)))
        .await
        .unwrap();
    assert_eq!(again, AppendOutcome::Duplicate);

    let averages = service.averages(None, None).await.unwrap();

    let weekly = averages.weekly.expect("today's record is in this week");
    assert_eq!(weekly.mean, dec!(18.2000));
    assert_eq!(weekly.days_counted, 1);

    let monthly = averages.monthly.expect("today's record is in this month");
    assert_eq!(monthly.mean, dec!(18.2000));
    assert_eq!(monthly.days_counted, 1);
}

#[tokio::test]
async fn test_averages_absent_when_no_records() {
    let service = october_service(None);
    let averages = service.averages(None, None).await.unwrap();

    assert!(averages.weekly.is_none());
    assert!(averages.monthly.is_none());
}
