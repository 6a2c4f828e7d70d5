//! Rule A: sustained same-direction runs.
//!
//! A run is a maximal stretch of consecutive same-signed non-zero daily
//! returns. A missing or exactly-zero return breaks the run without alerting;
//! a sign flip or the end of the series closes it, alerting if it lasted at
//! least `min_days`. One alert per qualifying run, referencing its last day.

use crate::domain::nav::{FundIdentity, NavRecord};

use super::{AlertEvent, Direction, RuleTrigger};

struct Run {
    direction: Direction,
    consecutive_days: u32,
    cumulative_return: f64,
    last: NavRecord,
}

impl Run {
    fn start(direction: Direction, daily_return: f64, record: NavRecord) -> Self {
        Run {
            direction,
            consecutive_days: 1,
            cumulative_return: daily_return,
            last: record,
        }
    }

    fn into_alert(self, fund: &FundIdentity, min_days: u32) -> Option<AlertEvent> {
        if self.consecutive_days < min_days {
            return None;
        }
        Some(AlertEvent {
            fund: fund.clone(),
            trigger: RuleTrigger::TrendRun {
                direction: self.direction,
                consecutive_days: self.consecutive_days,
                cumulative_return: self.cumulative_return,
            },
            nav_date: self.last.date,
            unit_nav: self.last.unit_nav,
        })
    }
}

pub fn detect(records: &[NavRecord], fund: &FundIdentity, min_days: u32) -> Vec<AlertEvent> {
    let mut events = Vec::new();
    let mut run: Option<Run> = None;

    for &record in records {
        let daily_return = match record.daily_return {
            Some(r) if r != 0.0 => r,
            // run broken; a break alone never alerts
            _ => {
                run = None;
                continue;
            }
        };

        let direction = if daily_return > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        };

        run = Some(match run {
            None => Run::start(direction, daily_return, record),
            Some(mut live) if live.direction == direction => {
                live.consecutive_days += 1;
                live.cumulative_return += daily_return;
                live.last = record;
                live
            }
            Some(ended) => {
                events.extend(ended.into_alert(fund, min_days));
                Run::start(direction, daily_return, record)
            }
        });
    }

    if let Some(live) = run {
        events.extend(live.into_alert(fund, min_days));
    }

    events
}
