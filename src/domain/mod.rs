//! Core domain types and logic.

pub mod align;
pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod nav;
pub mod rules;
pub mod timeseries;
