//! Service facade consumed by the delivery layer
//!
//! Wires the resolution pipeline, cross-validation, persistence and
//! averaging behind the calls the HTTP layer exposes. Every dependency is
//! passed in, so tests assemble the facade from fakes.

use crate::banxico::{self, BanxicoClient, Divergence, SecondaryRateSource};
use crate::config::Config;
use crate::dof::{
    DofFetcher, DofResolver, DofRowExtractor, RateRecord, ResolveError, ResolvedRate,
};
use crate::ops::{
    self, compute_pnl, OperationError, OperationFilter, OperationRecord, OperationRequest,
    OperationStatus, RateInput,
};
use crate::stats::{self, Averages};
use crate::store::{AppendOutcome, AppendReceipt, FxStore};
use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Cross-validation verdict attached to a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    /// No divergence, or no secondary data available to compare against
    Ok,
    /// Primary and secondary rates differ beyond the configured threshold
    DivergesFromSecondary,
}

/// A resolved published rate together with its cross-validation
#[derive(Debug, Clone, Serialize)]
pub struct RateQuote {
    pub resolved: ResolvedRate,
    pub secondary_rate: Option<Decimal>,
    pub divergence: Option<Divergence>,
    pub status: ValidationStatus,
}

/// The crate's produced interface
pub struct FxService {
    resolver: DofResolver,
    secondary: Option<Arc<dyn SecondaryRateSource>>,
    store: Arc<dyn FxStore>,
    divergence_threshold_pct: Decimal,
    timezone: Tz,
}

impl FxService {
    /// Assemble a service from explicit parts
    pub fn new(
        resolver: DofResolver,
        secondary: Option<Arc<dyn SecondaryRateSource>>,
        store: Arc<dyn FxStore>,
        divergence_threshold_pct: Decimal,
        timezone: Tz,
    ) -> Self {
        Self {
            resolver,
            secondary,
            store,
            divergence_threshold_pct,
            timezone,
        }
    }

    /// Assemble the production wiring from configuration
    pub fn from_config(config: &Config, store: Arc<dyn FxStore>) -> anyhow::Result<Self> {
        let fetcher = DofFetcher::with_config(config.resolver.fetch_config());
        let resolver = DofResolver::new(Arc::new(fetcher), Arc::new(DofRowExtractor::new()))
            .with_max_attempts(config.resolver.max_attempts);

        let secondary = config.banxico.token.as_ref().map(|token| {
            Arc::new(BanxicoClient::new(token.clone())) as Arc<dyn SecondaryRateSource>
        });
        if secondary.is_none() {
            tracing::info!("No Banxico token configured, cross-validation disabled");
        }

        Ok(Self::new(
            resolver,
            secondary,
            store,
            config.banxico.divergence_threshold_pct,
            config.resolver.tz()?,
        ))
    }

    /// Today in the configured zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Resolve the published rate for `date` and cross-validate it.
    ///
    /// Divergence flags the quote, it never fails the resolution; a failing
    /// or unconfigured secondary source degrades to "no divergence data".
    pub async fn quote(&self, date: NaiveDate) -> Result<RateQuote, ResolveError> {
        let resolved = self.resolver.resolve(date).await?;
        let effective = resolved.effective_date.unwrap_or(date);

        let secondary_rate = match &self.secondary {
            Some(source) => match source.rate_for(effective).await {
                Ok(rate) => rate,
                Err(error) => {
                    tracing::warn!(
                        %error,
                        date = %effective,
                        "Secondary source lookup failed, skipping cross-validation"
                    );
                    None
                }
            },
            None => None,
        };

        let divergence = secondary_rate
            .map(|fix| banxico::compare(resolved.value, fix, self.divergence_threshold_pct));
        let status = match &divergence {
            Some(d) if d.exceeds_threshold => ValidationStatus::DivergesFromSecondary,
            _ => ValidationStatus::Ok,
        };

        Ok(RateQuote {
            resolved,
            secondary_rate,
            divergence,
            status,
        })
    }

    /// Resolve a single rate input, published or manual
    pub async fn resolve_rate(&self, input: &RateInput) -> Result<ResolvedRate, OperationError> {
        ops::resolve_input(&self.resolver, self.today(), input).await
    }

    /// Resolve both rate legs, compute P&L and persist the operation
    pub async fn create_operation(
        &self,
        request: OperationRequest,
    ) -> anyhow::Result<(OperationRecord, AppendReceipt)> {
        let (base_rate, comparison_rate) = ops::resolve_pair(
            &self.resolver,
            self.today(),
            &request.base,
            &request.comparison,
        )
        .await?;

        let pnl = compute_pnl(
            request.direction,
            request.usd_amount,
            &base_rate,
            &comparison_rate,
        );

        let operation = OperationRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            direction: request.direction,
            operation_date: request.operation_date,
            usd_amount: request.usd_amount,
            base_rate,
            comparison_rate,
            mxn_base: pnl.mxn_base,
            mxn_comparison: pnl.mxn_comparison,
            pnl_mxn: pnl.pnl_mxn,
            pnl_pct: pnl.pnl_pct,
            status: OperationStatus::Pending,
            concept: request.concept,
            counterparty: request.counterparty,
            notes: request.notes,
        };

        let receipt = self.store.append_operation(operation.clone()).await?;
        tracing::info!(id = %receipt.id, position = receipt.position, "Operation recorded");

        Ok((operation, receipt))
    }

    /// Persist a rate record; a duplicate date is a conflict outcome, not
    /// an error
    pub async fn register_record(&self, record: RateRecord) -> anyhow::Result<AppendOutcome> {
        self.store.append_record(record).await
    }

    /// Stored operations matching `filter`
    pub async fn list_operations(
        &self,
        filter: OperationFilter,
    ) -> anyhow::Result<Vec<OperationRecord>> {
        self.store.list_operations(filter).await
    }

    /// Weekly and monthly averages around today over stored records.
    ///
    /// Defaults to the first day of the current month through today when no
    /// range is given.
    pub async fn averages(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> anyhow::Result<Averages> {
        let today = self.today();
        let from = from.unwrap_or_else(|| today.with_day(1).expect("day 1 exists in every month"));
        let to = to.unwrap_or(today);

        let records = self.store.list_records(Some(from), Some(to)).await?;
        Ok(stats::compute_averages(&records, today))
    }
}
