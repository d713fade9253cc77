//! Rate resolution pipeline
//!
//! Orchestrates fetch and extraction over a bounded attempt budget. For each
//! candidate date every endpoint is probed concurrently and the first
//! successful extraction wins; a sweep that yields nothing falls back one
//! business day. Fallback across dates is strictly sequential because the
//! decision depends on the full sweep outcome.

use super::extract::RateExtract;
use super::fetch::DocumentSource;
use super::types::{ResolveError, ResolvedRate};
use crate::calendar;
use chrono::{Datelike, NaiveDate};
use futures_util::stream::{FuturesUnordered, StreamExt};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Candidate dates tried per resolution before giving up
pub const MAX_DATE_ATTEMPTS: u32 = 3;

/// Resolves published rates with an endpoint sweep and business-day fallback
pub struct DofResolver {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn RateExtract>,
    max_attempts: u32,
}

impl DofResolver {
    /// Create a resolver over an injected source and extraction strategy
    pub fn new(source: Arc<dyn DocumentSource>, extractor: Arc<dyn RateExtract>) -> Self {
        Self {
            source,
            extractor,
            max_attempts: MAX_DATE_ATTEMPTS,
        }
    }

    /// Override the date-attempt budget (minimum 1)
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Resolve the published rate for `requested`, stepping back across
    /// prior business days when a date has no publication.
    pub async fn resolve(&self, requested: NaiveDate) -> Result<ResolvedRate, ResolveError> {
        let mut candidate = requested;

        for attempt in 1..=self.max_attempts {
            if let Some(value) = self.sweep(candidate).await {
                let resolved = ResolvedRate::published(requested, candidate, value);
                if resolved.fell_back() {
                    tracing::info!(
                        requested = %requested,
                        effective = %candidate,
                        attempt,
                        "Resolved rate via business-day fallback"
                    );
                } else {
                    tracing::info!(date = %candidate, value = %value, "Resolved published rate");
                }
                return Ok(resolved);
            }

            tracing::debug!(
                date = %candidate,
                attempt,
                "No publication found, falling back one business day"
            );
            candidate = calendar::previous_business_day(candidate);
        }

        Err(ResolveError::Unavailable {
            requested,
            attempts: self.max_attempts,
        })
    }

    /// Resolve under an overall deadline spanning the whole fallback loop,
    /// so callers are never blocked by repeated attempts.
    pub async fn resolve_within(
        &self,
        requested: NaiveDate,
        budget: Duration,
    ) -> Result<ResolvedRate, ResolveError> {
        match tokio::time::timeout(budget, self.resolve(requested)).await {
            Ok(result) => result,
            Err(_) => Err(ResolveError::DeadlineExceeded { requested }),
        }
    }

    /// Probe every endpoint for `date` concurrently; the first successful
    /// extraction wins. A fast failure never short-circuits a still-pending
    /// probe, it only drops out of the race.
    async fn sweep(&self, date: NaiveDate) -> Option<Decimal> {
        let mut probes: FuturesUnordered<_> = self
            .source
            .endpoints()
            .iter()
            .map(|endpoint| self.probe(endpoint, date))
            .collect();

        while let Some(found) = probes.next().await {
            if found.is_some() {
                return found;
            }
        }

        None
    }

    /// Fetch one endpoint's document for the month containing `date` and run
    /// extraction. Fetch failures are logged and count as "no value".
    async fn probe(&self, endpoint: &str, date: NaiveDate) -> Option<Decimal> {
        match self.source.fetch(endpoint, date.year(), date.month()).await {
            Ok(document) => self.extractor.extract(&document, date),
            Err(error) => {
                tracing::warn!(
                    endpoint,
                    date = %date,
                    %error,
                    "Fetch failed, continuing with remaining endpoints"
                );
                None
            }
        }
    }
}
