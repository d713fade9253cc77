//! DOF resolution pipeline
//!
//! Fetches the gazette's monthly exchange-rate history, extracts the value
//! for a day and applies business-day fallback when a date has no
//! publication. Fetching, extraction and orchestration are separate seams so
//! each can be swapped or scripted in tests.

mod extract;
mod fetch;
mod resolver;
mod types;

pub use extract::{DofRowExtractor, RateExtract};
pub use fetch::{DocumentSource, DofFetchConfig, DofFetcher, FetchError, DOF_ENDPOINTS};
pub use resolver::{DofResolver, MAX_DATE_ATTEMPTS};
pub use types::{
    RateKind, RateRecord, ResolveError, ResolvedRate, DOF_PUBLICATION_TIME, DOF_SOURCE_LABEL,
};
