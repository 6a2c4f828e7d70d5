//! Date alignment of two time series.

use chrono::NaiveDate;

use super::error::FundwatchError;
use super::timeseries::TimeSeries;

/// Intersect two series by date, ascending. A simulation must not proceed on
/// an empty intersection, so that case is an error rather than an empty list.
pub fn align(a: &TimeSeries, b: &TimeSeries) -> Result<Vec<NaiveDate>, FundwatchError> {
    let common: Vec<NaiveDate> = a.dates().filter(|&date| b.contains(date)).collect();
    if common.is_empty() {
        return Err(FundwatchError::NoCommonDates);
    }
    Ok(common)
}
