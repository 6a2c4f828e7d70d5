//! CSV file data adapter.
//!
//! Fund NAV files: `date,unit_nav[,daily_return]` — an empty or absent third
//! column is a missing return, which is distinct from a 0.0 return.
//! Index files: `date,change_pct`. Dates are `YYYY-MM-DD`; both file kinds
//! carry a header row. Duplicate dates resolve last-wins in the series
//! constructors.

use crate::domain::error::FundwatchError;
use crate::domain::nav::{NavRecord, NavSeries};
use crate::domain::timeseries::{Observation, TimeSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvDataPort {
    base_path: PathBuf,
}

impl CsvDataPort {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn fund_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("fund_{}.csv", code))
    }

    fn index_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("index_{}.csv", code))
    }
}

impl DataPort for CsvDataPort {
    fn fetch_fund_navs(&self, code: &str) -> Result<NavSeries, FundwatchError> {
        let path = self.fund_path(code);
        let content = read_file(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut records = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            let date = parse_date(field(&record, 0, "date")?)?;
            let unit_nav: f64 =
                field(&record, 1, "unit_nav")?
                    .parse()
                    .map_err(|e| FundwatchError::Data {
                        reason: format!("invalid unit_nav on {}: {}", date, e),
                    })?;

            let daily_return = match record.get(2) {
                None => None,
                Some(s) if s.trim().is_empty() => None,
                Some(s) => Some(s.trim().parse().map_err(|e| FundwatchError::Data {
                    reason: format!("invalid daily_return on {}: {}", date, e),
                })?),
            };

            records.push(NavRecord {
                date,
                unit_nav,
                daily_return,
            });
        }

        Ok(NavSeries::from_records(records))
    }

    fn fetch_index_changes(&self, code: &str) -> Result<TimeSeries, FundwatchError> {
        let path = self.index_path(code);
        let content = read_file(&path)?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            let date = parse_date(field(&record, 0, "date")?)?;
            let value: f64 =
                field(&record, 1, "change_pct")?
                    .parse()
                    .map_err(|e| FundwatchError::Data {
                        reason: format!("invalid change_pct on {}: {}", date, e),
                    })?;
            observations.push(Observation { date, value });
        }

        Ok(TimeSeries::from_observations(observations))
    }

    fn list_funds(&self) -> Result<Vec<String>, FundwatchError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| FundwatchError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut codes = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FundwatchError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(code) = name_str
                .strip_prefix("fund_")
                .and_then(|s| s.strip_suffix(".csv"))
            {
                codes.push(code.to_string());
            }
        }

        codes.sort();
        Ok(codes)
    }
}

fn read_file(path: &PathBuf) -> Result<String, FundwatchError> {
    fs::read_to_string(path).map_err(|e| FundwatchError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })
}

fn csv_error(e: csv::Error) -> FundwatchError {
    FundwatchError::Data {
        reason: format!("CSV parse error: {}", e),
    }
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, FundwatchError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| FundwatchError::Data {
            reason: format!("missing {} column", name),
        })
}

fn parse_date(s: &str) -> Result<NaiveDate, FundwatchError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| FundwatchError::Data {
        reason: format!("invalid date '{}': {}", s, e),
    })
}
