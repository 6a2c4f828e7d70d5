//! Rule B: single-day moves at or beyond the threshold.

use crate::domain::nav::{FundIdentity, NavRecord};

use super::{AlertEvent, RuleTrigger};

/// Pure filter: every day whose |daily return| meets `threshold_pct` emits
/// one alert. Days without a return are ignored.
pub fn detect(records: &[NavRecord], fund: &FundIdentity, threshold_pct: f64) -> Vec<AlertEvent> {
    records
        .iter()
        .filter_map(|record| {
            let daily_return = record.daily_return?;
            if daily_return.abs() < threshold_pct {
                return None;
            }
            Some(AlertEvent {
                fund: fund.clone(),
                trigger: RuleTrigger::SingleDayMove { daily_return },
                nav_date: record.date,
                unit_nav: record.unit_nav,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fund() -> FundIdentity {
        FundIdentity {
            code: "007301".into(),
            name: "Test Growth Fund".into(),
        }
    }

    fn record(d: u32, ret: Option<f64>) -> NavRecord {
        NavRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
            unit_nav: 1.0,
            daily_return: ret,
        }
    }

    #[test]
    fn large_drop_alerts() {
        let records = vec![record(15, Some(0.3)), record(16, Some(-6.2))];
        let events = detect(&records, &fund(), 5.0);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].nav_date, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
        let RuleTrigger::SingleDayMove { daily_return } = events[0].trigger else {
            panic!("expected a single-day trigger");
        };
        assert!((daily_return - (-6.2)).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_is_inclusive() {
        let records = vec![record(15, Some(5.0)), record(16, Some(4.999))];
        let events = detect(&records, &fund(), 5.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].nav_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn each_qualifying_day_alerts_independently() {
        let records = vec![
            record(15, Some(6.0)),
            record(16, Some(-7.0)),
            record(17, Some(1.0)),
        ];
        assert_eq!(detect(&records, &fund(), 5.0).len(), 2);
    }

    #[test]
    fn missing_returns_are_ignored() {
        let records = vec![record(15, None), record(16, None)];
        assert!(detect(&records, &fund(), 5.0).is_empty());
    }
}
