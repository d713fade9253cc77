//! Operation command implementation

use super::rate::parse_date_or_today;
use crate::config::Config;
use crate::ops::{Direction, OperationRequest, RateInput};
use crate::service::FxService;
use crate::store::MemoryStore;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct OperationArgs {
    /// Direction of the USD leg
    #[arg(long, value_enum)]
    pub direction: DirectionArg,

    /// USD notional amount
    #[arg(long)]
    pub usd: Decimal,

    /// Base rate: "today", a date (YYYY-MM-DD) or "manual=<value>"
    #[arg(long, value_parser = parse_rate_input)]
    pub base: RateInput,

    /// Comparison rate, same forms as --base
    #[arg(long, value_parser = parse_rate_input)]
    pub comparison: RateInput,

    /// Operation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<String>,

    /// Free-text concept
    #[arg(long)]
    pub concept: Option<String>,

    /// Counterparty name
    #[arg(long)]
    pub counterparty: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

/// CLI spelling of the operation direction
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    /// Holder receives USD
    ReceiveUsd,
    /// Payer acquires USD
    PayUsd,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::ReceiveUsd => Direction::ReceiveUsd,
            DirectionArg::PayUsd => Direction::PayUsd,
        }
    }
}

impl OperationArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = FxService::from_config(config, Arc::new(MemoryStore::new()))?;

        let operation_date = match &self.date {
            Some(raw) => parse_date_or_today(raw, service.today())?,
            None => service.today(),
        };

        let request = OperationRequest {
            direction: self.direction.into(),
            operation_date,
            usd_amount: self.usd,
            base: self.base.clone(),
            comparison: self.comparison.clone(),
            concept: self.concept.clone(),
            counterparty: self.counterparty.clone(),
            notes: self.notes.clone(),
        };

        let (operation, _receipt) = service.create_operation(request).await?;
        println!("{}", serde_json::to_string_pretty(&operation)?);
        Ok(())
    }
}

/// Parse a rate leg: the "today" sentinel, an explicit date, or a manual value
fn parse_rate_input(raw: &str) -> Result<RateInput, String> {
    if raw.eq_ignore_ascii_case("today") || raw.eq_ignore_ascii_case("hoy") {
        return Ok(RateInput::Dof { date: None });
    }

    if let Some(value) = raw.strip_prefix("manual=") {
        let value = value
            .parse::<Decimal>()
            .map_err(|e| format!("invalid manual rate {value:?}: {e}"))?;
        return Ok(RateInput::Manual { value });
    }

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date {raw:?}: {e}"))?;
    Ok(RateInput::Dof { date: Some(date) })
}
