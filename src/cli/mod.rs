//! CLI interface for dof-fx
//!
//! Provides subcommands for:
//! - `rate`: resolve and cross-validate a day's published rate
//! - `operation`: compute and record an FX operation
//! - `config`: show current configuration

mod operation;
mod rate;

pub use operation::{DirectionArg, OperationArgs};
pub use rate::RateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dof-fx")]
#[command(about = "USD/MXN reference-rate resolution and FX P&L engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve and cross-validate a day's published rate
    Rate(RateArgs),
    /// Compute and record an FX operation
    Operation(OperationArgs),
    /// Show current configuration
    Config,
}
