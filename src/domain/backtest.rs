//! Threshold-rebalance backtest over aligned index/fund history.
//!
//! The walk uses the **prior** aligned day's index percent change as the
//! trigger signal and trades at the **current** day's NAV. Sells are capped by
//! current holdings, buys by current capital, so shares and capital never go
//! negative.

use chrono::NaiveDate;

use super::align::align;
use super::error::FundwatchError;
use super::timeseries::TimeSeries;

/// Rebalance strategy parameters. All externally supplied; the walk itself
/// has no hidden defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RebalanceConfig {
    pub initial_capital: f64,
    pub initial_holdings_value: f64,
    pub up_position_change: f64,
    pub down_position_change: f64,
    pub up_threshold_pct: f64,
    pub down_threshold_pct: f64,
}

impl Default for RebalanceConfig {
    fn default() -> Self {
        RebalanceConfig {
            initial_capital: 100_000.0,
            initial_holdings_value: 100_000.0,
            up_position_change: 10_000.0,
            down_position_change: 10_000.0,
            up_threshold_pct: 2.0,
            down_threshold_pct: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Hold,
    Buy,
    Sell,
}

impl TradeAction {
    pub fn label(&self) -> &'static str {
        match self {
            TradeAction::Hold => "hold",
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

/// One row of the simulation ledger. Immutable once appended.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLedgerEntry {
    pub date: NaiveDate,
    pub prior_index_change_pct: f64,
    pub nav: f64,
    pub capital: f64,
    pub holdings_shares: f64,
    pub total_assets: f64,
    pub action: TradeAction,
}

/// Final snapshot of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub initial_holdings_value: f64,
    pub final_capital: f64,
    pub final_holdings_shares: f64,
    pub final_nav: f64,
    pub final_holdings_value: f64,
    pub total_assets: f64,
    pub return_rate_pct: f64,
    pub up_position_changes: u32,
    pub down_position_changes: u32,
    pub max_drawdown_pct: f64,
    pub peak_holdings: f64,
    pub trading_days: usize,
    pub skipped_days: usize,
    pub daily_ledger: Vec<DailyLedgerEntry>,
}

/// Mutable walk state, local to one simulation call.
struct PositionState {
    capital: f64,
    holdings_shares: f64,
    peak_total_assets: f64,
    max_drawdown: f64,
    peak_holdings: f64,
    up_count: u32,
    down_count: u32,
}

/// Run the simulation. Shares are unrounded fractional quantities; rounding
/// is a presentation concern.
pub fn run_rebalance(
    index_changes: &TimeSeries,
    fund_navs: &TimeSeries,
    config: &RebalanceConfig,
) -> Result<BacktestResult, FundwatchError> {
    let dates = align(index_changes, fund_navs)?;

    let first_date = dates[0];
    let first_nav = fund_navs
        .get(first_date)
        .ok_or(FundwatchError::NoCommonDates)?;
    check_nav(first_date, first_nav)?;

    let initial_total = config.initial_capital + config.initial_holdings_value;
    let mut state = PositionState {
        capital: config.initial_capital,
        holdings_shares: config.initial_holdings_value / first_nav,
        peak_total_assets: initial_total,
        max_drawdown: 0.0,
        peak_holdings: config.initial_holdings_value / first_nav,
        up_count: 0,
        down_count: 0,
    };

    let mut ledger: Vec<DailyLedgerEntry> = Vec::with_capacity(dates.len().saturating_sub(1));
    let mut skipped_days = 0usize;
    let mut final_nav = first_nav;

    for window in dates.windows(2) {
        let prior_date = window[0];
        let current_date = window[1];

        // A date that survived alignment should resolve in both series; if a
        // lookup still fails the day is a data-quality gap, not a fatal error.
        let (Some(prior_change), Some(nav)) =
            (index_changes.get(prior_date), fund_navs.get(current_date))
        else {
            skipped_days += 1;
            continue;
        };
        check_nav(current_date, nav)?;

        let action = if prior_change > config.up_threshold_pct {
            let sell_shares = (config.down_position_change / nav).min(state.holdings_shares);
            if sell_shares > 0.0 {
                state.holdings_shares -= sell_shares;
                state.capital += sell_shares * nav;
                state.down_count += 1;
                TradeAction::Sell
            } else {
                TradeAction::Hold
            }
        } else if prior_change < -config.down_threshold_pct {
            let purchase_amount = config.up_position_change.min(state.capital);
            if purchase_amount > 0.0 {
                state.holdings_shares += purchase_amount / nav;
                state.capital -= purchase_amount;
                state.up_count += 1;
                TradeAction::Buy
            } else {
                TradeAction::Hold
            }
        } else {
            TradeAction::Hold
        };

        let total_assets = state.capital + state.holdings_shares * nav;
        if total_assets > state.peak_total_assets {
            state.peak_total_assets = total_assets;
        }
        let drawdown = (state.peak_total_assets - total_assets) / state.peak_total_assets;
        if drawdown > state.max_drawdown {
            state.max_drawdown = drawdown;
        }
        if state.holdings_shares > state.peak_holdings {
            state.peak_holdings = state.holdings_shares;
        }

        final_nav = nav;
        ledger.push(DailyLedgerEntry {
            date: current_date,
            prior_index_change_pct: prior_change,
            nav,
            capital: state.capital,
            holdings_shares: state.holdings_shares,
            total_assets,
            action,
        });
    }

    let final_holdings_value = state.holdings_shares * final_nav;
    let total_assets = state.capital + final_holdings_value;

    Ok(BacktestResult {
        initial_capital: config.initial_capital,
        initial_holdings_value: config.initial_holdings_value,
        final_capital: state.capital,
        final_holdings_shares: state.holdings_shares,
        final_nav,
        final_holdings_value,
        total_assets,
        return_rate_pct: (total_assets / initial_total - 1.0) * 100.0,
        up_position_changes: state.up_count,
        down_position_changes: state.down_count,
        max_drawdown_pct: state.max_drawdown * 100.0,
        peak_holdings: state.peak_holdings,
        trading_days: dates.len(),
        skipped_days,
        daily_ledger: ledger,
    })
}

fn check_nav(date: NaiveDate, nav: f64) -> Result<(), FundwatchError> {
    if nav <= 0.0 {
        return Err(FundwatchError::NonPositiveNav { date, nav });
    }
    Ok(())
}
