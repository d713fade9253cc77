//! Gazette document fetcher
//!
//! Downloads the monthly exchange-rate history page from the DOF, trying one
//! candidate endpoint at a time. The upstream serves legacy windows-1252, so
//! bodies are fetched as bytes and decoded explicitly rather than trusting
//! the advertised charset. Retry policy lives in the resolver, not here.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Primary and mirror hosts of the DOF monthly indicator page
pub const DOF_ENDPOINTS: [&str; 2] = [
    "https://www.dof.gob.mx/indicadores_detalle.php",
    "https://dof.gob.mx/indicadores_detalle.php",
];

/// Browser-like agent; the gazette rejects bare clients
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Failure reaching or reading a single candidate endpoint
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or timeout
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Endpoint answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: StatusCode },
}

/// A provider of monthly gazette documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Candidate endpoints in preference order
    fn endpoints(&self) -> &[String];

    /// Fetch and decode the document for (year, month) from one endpoint
    async fn fetch(&self, endpoint: &str, year: i32, month: u32) -> Result<String, FetchError>;
}

/// Configuration for the DOF fetcher
#[derive(Debug, Clone)]
pub struct DofFetchConfig {
    /// Candidate endpoints in preference order
    pub endpoints: Vec<String>,
    /// Budget per fetch attempt
    pub timeout: Duration,
}

impl Default for DofFetchConfig {
    fn default() -> Self {
        Self {
            endpoints: DOF_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the DOF monthly history pages
pub struct DofFetcher {
    config: DofFetchConfig,
    client: Client,
}

impl DofFetcher {
    /// Create a fetcher with the default endpoints and timeout
    pub fn new() -> Self {
        Self::with_config(DofFetchConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: DofFetchConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the monthly history URL for an endpoint
    fn build_url(endpoint: &str, year: i32, month: u32) -> String {
        format!("{endpoint}?cod_tipo=1&year={year}&month={month}")
    }

    /// Decode a response body as windows-1252
    fn decode_body(bytes: &[u8]) -> String {
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
        text.into_owned()
    }
}

impl Default for DofFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentSource for DofFetcher {
    fn endpoints(&self) -> &[String] {
        &self.config.endpoints
    }

    async fn fetch(&self, endpoint: &str, year: i32, month: u32) -> Result<String, FetchError> {
        let url = Self::build_url(endpoint, year, month);

        tracing::debug!(url = %url, "Fetching DOF monthly history");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let bytes = response.bytes().await.map_err(|source| FetchError::Http {
            url: url.clone(),
            source,
        })?;

        Ok(Self::decode_body(&bytes))
    }
}
