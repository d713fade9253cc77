//! dof-fx: USD/MXN reference-rate resolution and FX P&L engine
//!
//! This library provides the core components for:
//! - Fetching the DOF's monthly exchange-rate publication from mirrored hosts
//! - Heuristic extraction of a day's value with business-day fallback
//! - Cross-validation against the Banxico FIX rate
//! - Rate resolution for FX operations (published or manual legs)
//! - Deterministic P&L computation with auditable rounding
//! - Weekly and monthly averages over recorded rates
//! - A persistence boundary with an in-memory implementation

pub mod banxico;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod dof;
pub mod ops;
pub mod service;
pub mod stats;
pub mod store;
pub mod telemetry;
