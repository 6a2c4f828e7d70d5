//! Configuration validation.
//!
//! Every field is checked up front so a simulation or scan never starts on a
//! half-valid config.

use crate::domain::error::FundwatchError;
use crate::ports::config_port::ConfigPort;

pub fn validate_rebalance_config(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    validate_initial_position(config)?;
    validate_position_changes(config)?;
    validate_thresholds(config)?;
    Ok(())
}

pub fn validate_monitor_config(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    validate_trend_run_min_days(config)?;
    validate_monitor_thresholds(config)?;
    validate_rolling_windows(config)?;
    Ok(())
}

fn validate_initial_position(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    let capital = config.get_double("rebalance", "initial_capital", 0.0);
    if capital < 0.0 {
        return Err(invalid(
            "rebalance",
            "initial_capital",
            "initial_capital must be non-negative",
        ));
    }
    let holdings = config.get_double("rebalance", "initial_holdings", 0.0);
    if holdings < 0.0 {
        return Err(invalid(
            "rebalance",
            "initial_holdings",
            "initial_holdings must be non-negative",
        ));
    }
    // return rate divides by the combined starting position
    if capital + holdings <= 0.0 {
        return Err(invalid(
            "rebalance",
            "initial_capital",
            "initial_capital + initial_holdings must be positive",
        ));
    }
    Ok(())
}

fn validate_position_changes(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    for key in ["up_position_change", "down_position_change"] {
        let value = config.get_double("rebalance", key, 0.0);
        if value < 0.0 {
            return Err(invalid(
                "rebalance",
                key,
                &format!("{key} must be non-negative"),
            ));
        }
    }
    Ok(())
}

fn validate_thresholds(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    for key in ["up_threshold_pct", "down_threshold_pct"] {
        let value = config.get_double("rebalance", key, 0.0);
        if value < 0.0 {
            return Err(invalid(
                "rebalance",
                key,
                &format!("{key} must be non-negative"),
            ));
        }
    }
    Ok(())
}

fn validate_trend_run_min_days(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    let value = config.get_int("monitor", "trend_run_min_days", 4);
    if value < 1 {
        return Err(invalid(
            "monitor",
            "trend_run_min_days",
            "trend_run_min_days must be at least 1",
        ));
    }
    Ok(())
}

fn validate_monitor_thresholds(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    for key in ["single_day_threshold_pct", "rolling_window_threshold_pct"] {
        let value = config.get_double("monitor", key, 5.0);
        if value <= 0.0 {
            return Err(invalid("monitor", key, &format!("{key} must be positive")));
        }
    }
    Ok(())
}

fn validate_rolling_windows(config: &dyn ConfigPort) -> Result<(), FundwatchError> {
    match config.get_string("monitor", "rolling_windows") {
        None => Ok(()),
        Some(raw) => parse_rolling_windows(&raw).map(|_| ()),
    }
}

/// Parse a comma-separated window list such as `2,3`. Each length must be a
/// positive integer.
pub fn parse_rolling_windows(raw: &str) -> Result<Vec<usize>, FundwatchError> {
    let mut windows = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let window: usize = part.parse().map_err(|_| {
            invalid(
                "monitor",
                "rolling_windows",
                &format!("'{part}' is not a valid window length"),
            )
        })?;
        if window == 0 {
            return Err(invalid(
                "monitor",
                "rolling_windows",
                "window lengths must be at least 1",
            ));
        }
        windows.push(window);
    }
    if windows.is_empty() {
        return Err(invalid(
            "monitor",
            "rolling_windows",
            "at least one window length is required",
        ));
    }
    Ok(windows)
}

fn invalid(section: &str, key: &str, reason: &str) -> FundwatchError {
    FundwatchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
