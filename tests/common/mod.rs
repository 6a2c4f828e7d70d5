#![allow(dead_code)]

use chrono::NaiveDate;
use fundwatch::domain::error::FundwatchError;
use fundwatch::domain::nav::{FundIdentity, NavRecord, NavSeries};
use fundwatch::domain::timeseries::{Observation, TimeSeries};
use fundwatch::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub funds: HashMap<String, NavSeries>,
    pub indexes: HashMap<String, TimeSeries>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            funds: HashMap::new(),
            indexes: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_fund(mut self, code: &str, series: NavSeries) -> Self {
        self.funds.insert(code.to_string(), series);
        self
    }

    pub fn with_index(mut self, code: &str, series: TimeSeries) -> Self {
        self.indexes.insert(code.to_string(), series);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_fund_navs(&self, code: &str) -> Result<NavSeries, FundwatchError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(FundwatchError::Data {
                reason: reason.clone(),
            });
        }
        self.funds
            .get(code)
            .cloned()
            .ok_or_else(|| FundwatchError::Data {
                reason: format!("no fund data for {code}"),
            })
    }

    fn fetch_index_changes(&self, code: &str) -> Result<TimeSeries, FundwatchError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(FundwatchError::Data {
                reason: reason.clone(),
            });
        }
        self.indexes
            .get(code)
            .cloned()
            .ok_or_else(|| FundwatchError::Data {
                reason: format!("no index data for {code}"),
            })
    }

    fn list_funds(&self) -> Result<Vec<String>, FundwatchError> {
        let mut codes: Vec<String> = self.funds.keys().cloned().collect();
        codes.extend(self.errors.keys().cloned());
        codes.sort();
        codes.dedup();
        Ok(codes)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// January 2024 dates, one per input value, starting on the 1st.
pub fn index_series(changes: &[f64]) -> TimeSeries {
    TimeSeries::from_observations(
        changes
            .iter()
            .enumerate()
            .map(|(i, &value)| Observation {
                date: date(2024, 1, 1 + i as u32),
                value,
            })
            .collect(),
    )
}

pub fn nav_series(navs: &[f64]) -> TimeSeries {
    index_series(navs)
}

pub fn fund_series(records: &[(f64, Option<f64>)]) -> NavSeries {
    NavSeries::from_records(
        records
            .iter()
            .enumerate()
            .map(|(i, &(unit_nav, daily_return))| NavRecord {
                date: date(2024, 1, 1 + i as u32),
                unit_nav,
                daily_return,
            })
            .collect(),
    )
}

pub fn sample_fund() -> FundIdentity {
    FundIdentity {
        code: "007301".into(),
        name: "Test Growth Fund".into(),
    }
}
