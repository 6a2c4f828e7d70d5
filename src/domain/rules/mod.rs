//! Anomaly rules over a fund's NAV history.
//!
//! Three independent rules, each a stateless-per-call scanner that emits zero
//! or more [`AlertEvent`]s:
//!
//! - Rule A ([`trend_run`]): a run of 4+ consecutive same-signed daily returns.
//! - Rule B ([`single_day`]): a single day moving 5%+ in either direction.
//! - Rule C ([`rolling_window`]): a trailing 2- or 3-day window summing to 5%+.
//!
//! Rules do not deduplicate against each other; one day can trigger several.

pub mod rolling_window;
pub mod single_day;
pub mod trend_run;

use chrono::NaiveDate;

use super::error::FundwatchError;
use super::nav::{validate_ascending, FundIdentity, NavRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// What fired, with the rule-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleTrigger {
    TrendRun {
        direction: Direction,
        consecutive_days: u32,
        cumulative_return: f64,
    },
    SingleDayMove {
        daily_return: f64,
    },
    RollingWindowMove {
        window_len: usize,
        cumulative_return: f64,
    },
}

impl RuleTrigger {
    pub fn rule_code(&self) -> &'static str {
        match self {
            RuleTrigger::TrendRun { .. } => "A",
            RuleTrigger::SingleDayMove { .. } => "B",
            RuleTrigger::RollingWindowMove { .. } => "C",
        }
    }

    pub fn description(&self) -> String {
        match self {
            RuleTrigger::TrendRun {
                direction,
                consecutive_days,
                ..
            } => format!("{consecutive_days} consecutive {} days", direction.label()),
            RuleTrigger::SingleDayMove { daily_return } => {
                format!("single-day move of {daily_return:.2}%")
            }
            RuleTrigger::RollingWindowMove {
                window_len,
                cumulative_return,
            } => format!("{window_len}-day cumulative move of {cumulative_return:.2}%"),
        }
    }
}

/// One alert. Immutable value object; the caller owns delivery and any
/// cross-run deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub fund: FundIdentity,
    pub trigger: RuleTrigger,
    pub nav_date: NaiveDate,
    pub unit_nav: f64,
}

/// Rule thresholds. Defaults mirror the production rule set.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub trend_run_min_days: u32,
    pub single_day_threshold_pct: f64,
    pub rolling_window_threshold_pct: f64,
    pub rolling_windows: Vec<usize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            trend_run_min_days: 4,
            single_day_threshold_pct: 5.0,
            rolling_window_threshold_pct: 5.0,
            rolling_windows: vec![2, 3],
        }
    }
}

/// Run all three rules over one fund's history, in rule order, and
/// concatenate the events. Rejects input that is not strictly ascending by
/// date before any rule scans it.
pub fn scan_fund(
    records: &[NavRecord],
    fund: &FundIdentity,
    config: &MonitorConfig,
) -> Result<Vec<AlertEvent>, FundwatchError> {
    validate_ascending(records)?;

    let mut events = trend_run::detect(records, fund, config.trend_run_min_days);
    events.extend(single_day::detect(
        records,
        fund,
        config.single_day_threshold_pct,
    ));
    events.extend(rolling_window::detect(
        records,
        fund,
        &config.rolling_windows,
        config.rolling_window_threshold_pct,
    ));
    Ok(events)
}
