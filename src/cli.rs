//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::console_alert_adapter::ConsoleAlertAdapter;
use crate::adapters::csv_adapter::CsvDataPort;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::backtest::{run_rebalance, RebalanceConfig};
use crate::domain::config_validation::{
    parse_rolling_windows, validate_monitor_config, validate_rebalance_config,
};
use crate::domain::error::FundwatchError;
use crate::domain::nav::FundIdentity;
use crate::domain::rules::{scan_fund, AlertEvent, MonitorConfig};
use crate::ports::alert_port::AlertPort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "fundwatch", about = "Fund valuation monitor and rebalance backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest the threshold rebalance strategy for one fund
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Fund code (reads fund_<code>.csv)
        #[arg(long)]
        fund: String,
        /// Index code (reads index_<code>.csv)
        #[arg(long)]
        index: String,
        /// Override the data directory from the config file
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write the daily ledger to this CSV file
        #[arg(short, long)]
        ledger: Option<PathBuf>,
    },
    /// Scan fund NAV histories with the anomaly rules
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        /// Fund codes to scan; defaults to every fund in the data directory
        #[arg(long)]
        fund: Vec<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data coverage for the funds in the data directory
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            fund,
            index,
            data_dir,
            ledger,
        } => run_backtest(&config, &fund, &index, data_dir, ledger.as_deref()),
        Command::Scan {
            config,
            fund,
            data_dir,
        } => run_scan(&config, &fund, data_dir),
        Command::Validate { config } => run_validate(&config),
        Command::Info { config, data_dir } => run_info(&config, data_dir),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = FundwatchError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Rebalance parameters from the `[rebalance]` section, with the legacy
/// strategy's values as defaults.
pub fn build_rebalance_config(config: &dyn ConfigPort) -> RebalanceConfig {
    let defaults = RebalanceConfig::default();
    RebalanceConfig {
        initial_capital: config.get_double("rebalance", "initial_capital", defaults.initial_capital),
        initial_holdings_value: config.get_double(
            "rebalance",
            "initial_holdings",
            defaults.initial_holdings_value,
        ),
        up_position_change: config.get_double(
            "rebalance",
            "up_position_change",
            defaults.up_position_change,
        ),
        down_position_change: config.get_double(
            "rebalance",
            "down_position_change",
            defaults.down_position_change,
        ),
        up_threshold_pct: config.get_double("rebalance", "up_threshold_pct", defaults.up_threshold_pct),
        down_threshold_pct: config.get_double(
            "rebalance",
            "down_threshold_pct",
            defaults.down_threshold_pct,
        ),
    }
}

/// Rule thresholds from the `[monitor]` section.
pub fn build_monitor_config(config: &dyn ConfigPort) -> Result<MonitorConfig, FundwatchError> {
    let defaults = MonitorConfig::default();
    let rolling_windows = match config.get_string("monitor", "rolling_windows") {
        Some(raw) => parse_rolling_windows(&raw)?,
        None => defaults.rolling_windows,
    };
    Ok(MonitorConfig {
        trend_run_min_days: config.get_int(
            "monitor",
            "trend_run_min_days",
            defaults.trend_run_min_days as i64,
        ) as u32,
        single_day_threshold_pct: config.get_double(
            "monitor",
            "single_day_threshold_pct",
            defaults.single_day_threshold_pct,
        ),
        rolling_window_threshold_pct: config.get_double(
            "monitor",
            "rolling_window_threshold_pct",
            defaults.rolling_window_threshold_pct,
        ),
        rolling_windows,
    })
}

/// Data directory: CLI override first, then `[data] path`.
pub fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, FundwatchError> {
    if let Some(dir) = override_dir {
        return Ok(dir);
    }
    config
        .get_string("data", "path")
        .map(PathBuf::from)
        .ok_or(FundwatchError::ConfigMissing {
            section: "data".to_string(),
            key: "path".to_string(),
        })
}

/// Display name for a fund: the `[funds]` section maps codes to names; an
/// unmapped code is its own name.
pub fn resolve_fund_identity(code: &str, config: &dyn ConfigPort) -> FundIdentity {
    FundIdentity {
        code: code.to_string(),
        name: config
            .get_string("funds", code)
            .unwrap_or_else(|| code.to_string()),
    }
}

fn run_backtest(
    config_path: &PathBuf,
    fund_code: &str,
    index_code: &str,
    data_dir: Option<PathBuf>,
    ledger_path: Option<&std::path::Path>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_rebalance_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let rebalance_config = build_rebalance_config(&adapter);

    let data_port = match build_data_port(data_dir, &adapter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    eprintln!("Fetching index {} and fund {}", index_code, fund_code);
    let result = data_port
        .fetch_index_changes(index_code)
        .and_then(|index_changes| {
            let navs = data_port.fetch_fund_navs(fund_code)?;
            eprintln!(
                "Loaded {} index days, {} fund days",
                index_changes.len(),
                navs.len()
            );
            run_rebalance(&index_changes, &navs.nav_series(), &rebalance_config)
        });

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Simulated {} trading days ({} skipped)",
        result.trading_days, result.skipped_days
    );
    if let Err(e) = TextReportAdapter::new().write(&result, ledger_path) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    ExitCode::SUCCESS
}

fn run_scan(config_path: &PathBuf, fund_codes: &[String], data_dir: Option<PathBuf>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_monitor_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let monitor_config = match build_monitor_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = match build_data_port(data_dir, &adapter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let codes: Vec<String> = if fund_codes.is_empty() {
        match data_port.list_funds() {
            Ok(codes) => codes,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        }
    } else {
        fund_codes.to_vec()
    };

    if codes.is_empty() {
        eprintln!("error: no funds to scan");
        return ExitCode::from(3);
    }
    eprintln!("Scanning {} funds", codes.len());

    let outcome = scan_funds(&data_port, &codes, &adapter, &monitor_config);
    for (code, err) in &outcome.failures {
        eprintln!("{}: error: {}", code, err);
    }

    if let Err(e) = ConsoleAlertAdapter::new().deliver(&outcome.events) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!(
        "Scan complete: {} alerts across {} funds ({} failed)",
        outcome.events.len(),
        codes.len() - outcome.failures.len(),
        outcome.failures.len()
    );

    if outcome.failures.len() == codes.len() {
        return ExitCode::from(3);
    }
    ExitCode::SUCCESS
}

#[derive(Debug)]
pub struct BatchScanOutcome {
    pub events: Vec<AlertEvent>,
    pub failures: Vec<(String, FundwatchError)>,
}

/// Scan a batch of funds. One fund failing must not abort the rest, so
/// failures are collected alongside the events rather than returned early.
pub fn scan_funds(
    data_port: &dyn DataPort,
    codes: &[String],
    config: &dyn ConfigPort,
    monitor: &MonitorConfig,
) -> BatchScanOutcome {
    let mut events = Vec::new();
    let mut failures = Vec::new();

    for code in codes {
        let fund = resolve_fund_identity(code, config);
        let scanned = data_port
            .fetch_fund_navs(code)
            .and_then(|navs| scan_fund(navs.records(), &fund, monitor));
        match scanned {
            Ok(mut fund_events) => events.append(&mut fund_events),
            Err(e) => failures.push((code.clone(), e)),
        }
    }

    BatchScanOutcome { events, failures }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_rebalance_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    if let Err(e) = validate_monitor_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    println!("{}: ok", config_path.display());
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, data_dir: Option<PathBuf>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let data_port = match build_data_port(data_dir, &adapter) {
        Ok(p) => p,
        Err(code) => return code,
    };

    let codes = match data_port.list_funds() {
        Ok(codes) => codes,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for code in &codes {
        match data_port.fetch_fund_navs(code) {
            Ok(series) => match (series.first(), series.last()) {
                (Some(first), Some(last)) => println!(
                    "{}: {} records, {} to {}",
                    code,
                    series.len(),
                    first.date,
                    last.date
                ),
                _ => println!("{}: no records", code),
            },
            Err(e) => eprintln!("{}: error: {}", code, e),
        }
    }
    ExitCode::SUCCESS
}

fn build_data_port(
    data_dir: Option<PathBuf>,
    config: &dyn ConfigPort,
) -> Result<CsvDataPort, ExitCode> {
    match resolve_data_dir(data_dir, config) {
        Ok(dir) => Ok(CsvDataPort::new(dir)),
        Err(e) => {
            eprintln!("error: {e}");
            Err((&e).into())
        }
    }
}
