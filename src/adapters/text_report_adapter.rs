//! Text backtest report adapter: summary on stdout, optional ledger CSV.

use std::path::Path;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::FundwatchError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        ledger_path: Option<&Path>,
    ) -> Result<(), FundwatchError> {
        print!("{}", render_summary(result));
        if let Some(path) = ledger_path {
            write_ledger_csv(result, path)?;
            println!("ledger written to {}", path.display());
        }
        Ok(())
    }
}

pub fn render_summary(result: &BacktestResult) -> String {
    let mut out = String::new();
    out.push_str("=== backtest result ===\n");
    out.push_str(&format!("initial capital:   {:.2}\n", result.initial_capital));
    out.push_str(&format!(
        "initial holdings:  {:.2}\n",
        result.initial_holdings_value
    ));
    out.push_str(&format!("final capital:     {:.2}\n", result.final_capital));
    out.push_str(&format!(
        "final holdings:    {:.2} ({:.2} shares @ {:.4})\n",
        result.final_holdings_value, result.final_holdings_shares, result.final_nav
    ));
    out.push_str(&format!("total assets:      {:.2}\n", result.total_assets));
    out.push_str(&format!("return rate:       {:.2}%\n", result.return_rate_pct));
    out.push_str(&format!(
        "buys / sells:      {} / {}\n",
        result.up_position_changes, result.down_position_changes
    ));
    out.push_str(&format!("max drawdown:      {:.2}%\n", result.max_drawdown_pct));
    out.push_str(&format!("peak holdings:     {:.2}\n", result.peak_holdings));
    out.push_str(&format!("trading days:      {}\n", result.trading_days));
    if result.skipped_days > 0 {
        out.push_str(&format!(
            "skipped days:      {} (data gaps)\n",
            result.skipped_days
        ));
    }
    out
}

pub fn write_ledger_csv(result: &BacktestResult, path: &Path) -> Result<(), FundwatchError> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| FundwatchError::Data {
        reason: format!("failed to open {}: {}", path.display(), e),
    })?;

    wtr.write_record([
        "date",
        "prior_index_change_pct",
        "nav",
        "capital",
        "holdings_shares",
        "total_assets",
        "action",
    ])
    .map_err(write_error)?;

    for entry in &result.daily_ledger {
        wtr.write_record([
            entry.date.to_string(),
            format!("{:.4}", entry.prior_index_change_pct),
            format!("{:.4}", entry.nav),
            format!("{:.2}", entry.capital),
            format!("{:.4}", entry.holdings_shares),
            format!("{:.2}", entry.total_assets),
            entry.action.label().to_string(),
        ])
        .map_err(write_error)?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_error(e: csv::Error) -> FundwatchError {
    FundwatchError::Data {
        reason: format!("CSV write error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{run_rebalance, RebalanceConfig};
    use crate::domain::timeseries::{Observation, TimeSeries};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_result() -> BacktestResult {
        let series = |values: &[(u32, f64)]| {
            TimeSeries::from_observations(
                values
                    .iter()
                    .map(|&(d, value)| Observation {
                        date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                        value,
                    })
                    .collect(),
            )
        };
        let index = series(&[(1, 2.5), (2, -1.0), (3, 0.2), (4, 0.0)]);
        let navs = series(&[(1, 1.00), (2, 1.01), (3, 1.02), (4, 1.03)]);
        run_rebalance(&index, &navs, &RebalanceConfig::default()).unwrap()
    }

    #[test]
    fn summary_mentions_key_figures() {
        let result = sample_result();
        let text = render_summary(&result);

        assert!(text.contains("initial capital:   100000.00"));
        assert!(text.contains("trading days:      4"));
        assert!(text.contains("buys / sells:      1 / 1"));
        assert!(!text.contains("skipped days"));
    }

    #[test]
    fn ledger_csv_round_trips() {
        let result = sample_result();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");

        write_ledger_csv(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,prior_index_change_pct,nav,capital,holdings_shares,total_assets,action"
        );
        // header + one row per ledger entry
        assert_eq!(content.lines().count(), result.daily_ledger.len() + 1);
        assert!(content.contains("sell"));
        assert!(content.contains("buy"));
        assert!(content.contains("hold"));
    }
}
