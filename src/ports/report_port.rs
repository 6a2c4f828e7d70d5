//! Backtest report port trait.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::FundwatchError;

/// Port for writing backtest results. `ledger_path`, when given, receives the
/// full daily ledger alongside the summary.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        ledger_path: Option<&Path>,
    ) -> Result<(), FundwatchError>;
}
