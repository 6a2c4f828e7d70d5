//! Fund NAV records and series.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::FundwatchError;
use super::timeseries::{Observation, TimeSeries};

/// One fund valuation row. `daily_return` is a signed percent and is an
/// explicit option: a missing return and a return of exactly zero carry
/// different rule semantics (zero breaks a trend run, missing skips a
/// rolling-window evaluation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavRecord {
    pub date: NaiveDate,
    pub unit_nav: f64,
    pub daily_return: Option<f64>,
}

/// Which fund a series or alert belongs to. The core takes identity as an
/// explicit argument; it holds no code-to-name table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundIdentity {
    pub code: String,
    pub name: String,
}

/// Ordered NAV history for one fund, unique ascending dates by construction
/// (same last-value-wins policy as [`TimeSeries`]).
#[derive(Debug, Clone, PartialEq)]
pub struct NavSeries {
    records: Vec<NavRecord>,
}

impl NavSeries {
    pub fn from_records(records: Vec<NavRecord>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, NavRecord> = BTreeMap::new();
        for record in records {
            by_date.insert(record.date, record);
        }
        Self {
            records: by_date.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[NavRecord] {
        &self.records
    }

    pub fn first(&self) -> Option<&NavRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&NavRecord> {
        self.records.last()
    }

    /// NAV values as a plain [`TimeSeries`], for alignment with an index
    /// change series in the simulator.
    pub fn nav_series(&self) -> TimeSeries {
        TimeSeries::from_observations(
            self.records
                .iter()
                .map(|r| Observation {
                    date: r.date,
                    value: r.unit_nav,
                })
                .collect(),
        )
    }
}

/// Detector precondition: reject a record slice that is not strictly
/// ascending by date before scanning, rather than silently misclassifying
/// runs. `NavSeries` construction guarantees this; raw slices may not.
pub fn validate_ascending(records: &[NavRecord]) -> Result<(), FundwatchError> {
    for pair in records.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(FundwatchError::OrderingViolation {
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }
    Ok(())
}
