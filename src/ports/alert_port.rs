//! Alert delivery port trait.

use crate::domain::error::FundwatchError;
use crate::domain::rules::AlertEvent;

/// Port for delivering a batch of alerts (console, email, IM, ...). The core
/// emits events; routing and deduplication across runs live behind this seam.
pub trait AlertPort {
    fn deliver(&self, events: &[AlertEvent]) -> Result<(), FundwatchError>;
}
