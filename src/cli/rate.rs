//! Rate command implementation

use crate::config::Config;
use crate::service::FxService;
use crate::store::MemoryStore;
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RateArgs {
    /// Date to resolve (YYYY-MM-DD), or "today"
    #[arg(default_value = "today")]
    pub date: String,
}

impl RateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = FxService::from_config(config, Arc::new(MemoryStore::new()))?;

        let date = parse_date_or_today(&self.date, service.today())?;
        let quote = service.quote(date).await?;

        println!("{}", serde_json::to_string_pretty(&quote)?);
        Ok(())
    }
}

/// Parse a date argument, honoring the "today" sentinel ("hoy" works too)
pub(crate) fn parse_date_or_today(raw: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    if raw.eq_ignore_ascii_case("today") || raw.eq_ignore_ascii_case("hoy") {
        return Ok(today);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid date {raw:?}: {e}"))
}
