//! Data access port trait.
//!
//! The domain never fetches anything itself; already-parsed series come in
//! through this seam.

use crate::domain::error::FundwatchError;
use crate::domain::nav::NavSeries;
use crate::domain::timeseries::TimeSeries;

pub trait DataPort {
    /// Full NAV history for a fund, deduplicated and ascending.
    fn fetch_fund_navs(&self, code: &str) -> Result<NavSeries, FundwatchError>;

    /// Daily percent-change history for a reference index.
    fn fetch_index_changes(&self, code: &str) -> Result<TimeSeries, FundwatchError>;

    /// Fund codes this source knows about.
    fn list_funds(&self) -> Result<Vec<String>, FundwatchError>;
}
