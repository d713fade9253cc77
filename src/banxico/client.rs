//! Banxico SIE API client for the FIX reference rate

use super::SecondaryRateSource;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Banxico SIE REST base URL
pub const BANXICO_API_URL: &str = "https://www.banxico.org.mx/SieAPIRest/service/v1/series";

/// Series id of the FIX USD/MXN reference rate
pub const FIX_SERIES: &str = "SF43718";

/// Client for the Banxico SIE series API
///
/// Requires an API token; callers without one skip cross-validation
/// entirely instead of constructing a client.
pub struct BanxicoClient {
    base_url: String,
    token: String,
    client: Client,
}

impl BanxicoClient {
    /// Create a client against the production API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(BANXICO_API_URL, token)
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            token: token.into(),
            client,
        }
    }
}

/// SIE payload: `{"bmx": {"series": [{"datos": [{"fecha": ..., "dato": ...}]}]}}`
#[derive(Debug, Deserialize)]
struct SeriesResponse {
    bmx: Bmx,
}

#[derive(Debug, Deserialize)]
struct Bmx {
    series: Vec<Series>,
}

#[derive(Debug, Deserialize)]
struct Series {
    datos: Option<Vec<Observation>>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    /// Observation date in the API's d/m/yyyy form
    #[allow(dead_code)]
    fecha: String,
    /// Rate as text; "N/E" marks a day without data
    dato: String,
}

fn first_observation(payload: &SeriesResponse) -> Option<&Observation> {
    payload.bmx.series.first()?.datos.as_ref()?.first()
}

/// Parse an observation value, normalizing a comma decimal separator
fn parse_rate(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace(',', ".")).ok()
}

#[async_trait]
impl SecondaryRateSource for BanxicoClient {
    async fn rate_for(&self, date: NaiveDate) -> anyhow::Result<Option<Decimal>> {
        let day = date.format("%Y-%m-%d");
        let url = format!("{}/{}/datos/{day}/{day}", self.base_url, FIX_SERIES);

        tracing::debug!(url = %url, "Fetching Banxico FIX rate");

        let response = self
            .client
            .get(&url)
            .header("Bmx-Token", &self.token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(date = %date, "Banxico has no FIX data for this date");
            return Ok(None);
        }

        if !response.status().is_success() {
            anyhow::bail!("Banxico API error: {}", response.status());
        }

        let payload: SeriesResponse = response.json().await?;

        match first_observation(&payload) {
            Some(observation) => match parse_rate(&observation.dato) {
                Some(rate) => Ok(Some(rate)),
                None => {
                    tracing::warn!(
                        date = %date,
                        raw = %observation.dato,
                        "Banxico observation is not a number"
                    );
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }
}
