//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for fundwatch.
#[derive(Debug, thiserror::Error)]
pub enum FundwatchError {
    #[error("no common trading dates between the index series and the fund series")]
    NoCommonDates,

    #[error("non-positive NAV {nav} on {date}: cannot size holdings")]
    NonPositiveNav { date: NaiveDate, nav: f64 },

    #[error("series is not strictly ascending by date: {prev} is followed by {next}")]
    OrderingViolation { prev: NaiveDate, next: NaiveDate },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&FundwatchError> for std::process::ExitCode {
    fn from(err: &FundwatchError) -> Self {
        let code: u8 = match err {
            FundwatchError::Io(_) => 1,
            FundwatchError::ConfigParse { .. }
            | FundwatchError::ConfigMissing { .. }
            | FundwatchError::ConfigInvalid { .. } => 2,
            FundwatchError::Data { .. } => 3,
            FundwatchError::NoCommonDates
            | FundwatchError::NonPositiveNav { .. }
            | FundwatchError::OrderingViolation { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_no_common_dates() {
        let err = FundwatchError::NoCommonDates;
        assert!(err.to_string().contains("no common trading dates"));
    }

    #[test]
    fn display_non_positive_nav() {
        let err = FundwatchError::NonPositiveNav {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            nav: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("2024-01-15"));
        assert!(msg.contains("non-positive NAV"));
    }

    #[test]
    fn display_ordering_violation() {
        let err = FundwatchError::OrderingViolation {
            prev: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            next: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        };
        assert!(err.to_string().contains("not strictly ascending"));
    }

    #[test]
    fn exit_codes() {
        use std::process::ExitCode;
        let _io: ExitCode = (&FundwatchError::Io(std::io::Error::other("x"))).into();
        let _cfg: ExitCode = (&FundwatchError::ConfigMissing {
            section: "rebalance".into(),
            key: "initial_capital".into(),
        })
            .into();
        let _input: ExitCode = (&FundwatchError::NoCommonDates).into();
    }
}
