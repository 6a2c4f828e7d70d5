//! Rule C: trailing-window cumulative moves.
//!
//! Each configured window length is evaluated independently for every day
//! with enough history. A window with any missing daily return is skipped
//! silently; overlapping alerts across lengths and days are intentional.

use crate::domain::nav::{FundIdentity, NavRecord};

use super::{AlertEvent, RuleTrigger};

pub fn detect(
    records: &[NavRecord],
    fund: &FundIdentity,
    windows: &[usize],
    threshold_pct: f64,
) -> Vec<AlertEvent> {
    let mut events = Vec::new();

    for &window_len in windows {
        if window_len == 0 {
            continue;
        }
        for window in records.windows(window_len) {
            let Some(sum) = window_sum(window) else {
                continue;
            };
            if sum.abs() < threshold_pct {
                continue;
            }
            // window ends at its last record
            let last = &window[window_len - 1];
            events.push(AlertEvent {
                fund: fund.clone(),
                trigger: RuleTrigger::RollingWindowMove {
                    window_len,
                    cumulative_return: sum,
                },
                nav_date: last.date,
                unit_nav: last.unit_nav,
            });
        }
    }

    events
}

/// Sum of the window's daily returns, or None when any day lacks one.
fn window_sum(window: &[NavRecord]) -> Option<f64> {
    window
        .iter()
        .map(|record| record.daily_return)
        .sum::<Option<f64>>()
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

    fn records(returns: &[Option<f64>]) -> Vec<NavRecord> {
        returns
            .iter()
            .enumerate()
            .map(|(i, &ret)| NavRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                unit_nav: 1.0,
                daily_return: ret,
            })
            .collect()
    }

    #[test]
    fn two_day_window_sums_to_threshold() {
        let records = records(&[Some(3.0), Some(2.5)]);
        let events = detect(&records, &fund(), &[2], 5.0);

        assert_eq!(events.len(), 1);
        let RuleTrigger::RollingWindowMove {
            window_len,
            cumulative_return,
        } = events[0].trigger
        else {
            panic!("expected a rolling-window trigger");
        };
        assert_eq!(window_len, 2);
        assert!((cumulative_return - 5.5).abs() < 1e-9);
        assert_eq!(events[0].nav_date, records[1].date);
    }

    #[test]
    fn negative_sums_count_by_magnitude() {
        let records = records(&[Some(-3.0), Some(-2.0), Some(-1.0)]);
        let events = detect(&records, &fund(), &[3], 5.0);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].trigger,
            RuleTrigger::RollingWindowMove { window_len: 3, .. }
        ));
    }

    #[test]
    fn below_threshold_is_quiet() {
        let records = records(&[Some(2.0), Some(2.0)]);
        assert!(detect(&records, &fund(), &[2], 5.0).is_empty());
    }

    #[test]
    fn missing_return_skips_only_affected_windows() {
        // window [d2,d3] has a gap; window [d3,d4] does not
        let records = records(&[Some(3.0), None, Some(3.0), Some(2.5)]);
        let events = detect(&records, &fund(), &[2], 5.0);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].nav_date, records[3].date);
    }

    #[test]
    fn window_lengths_evaluate_independently() {
        // day 3 qualifies for both the 2-day and the 3-day window
        let records = records(&[Some(1.0), Some(2.5), Some(3.0)]);
        let events = detect(&records, &fund(), &[2, 3], 5.0);

        assert_eq!(events.len(), 2);
        let lens: Vec<usize> = events
            .iter()
            .map(|e| match e.trigger {
                RuleTrigger::RollingWindowMove { window_len, .. } => window_len,
                _ => panic!("expected rolling-window triggers"),
            })
            .collect();
        assert_eq!(lens, vec![2, 3]);
    }

    #[test]
    fn every_qualifying_day_alerts() {
        let records = records(&[Some(3.0), Some(3.0), Some(3.0)]);
        let events = detect(&records, &fund(), &[2], 5.0);
        // windows ending on day 2 and day 3 both qualify
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn short_history_is_quiet() {
        let records = records(&[Some(9.0)]);
        assert!(detect(&records, &fund(), &[2, 3], 5.0).is_empty());
    }

    #[test]
    fn zero_window_length_is_ignored() {
        let records = records(&[Some(9.0), Some(9.0)]);
        assert!(detect(&records, &fund(), &[0], 5.0).is_empty());
    }
}
