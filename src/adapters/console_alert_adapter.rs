//! Console alert adapter: renders alerts as plain-text blocks on stdout.

use crate::domain::error::FundwatchError;
use crate::domain::rules::{AlertEvent, RuleTrigger};
use crate::ports::alert_port::AlertPort;

pub struct ConsoleAlertAdapter;

impl ConsoleAlertAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleAlertAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertPort for ConsoleAlertAdapter {
    fn deliver(&self, events: &[AlertEvent]) -> Result<(), FundwatchError> {
        for event in events {
            print!("{}", render(event));
        }
        Ok(())
    }
}

/// One alert as a text block: rule line, fund identity, rule payload, then
/// the referenced valuation.
pub fn render(event: &AlertEvent) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "[rule {}] {}\n",
        event.trigger.rule_code(),
        event.trigger.description()
    ));
    out.push_str(&format!("  fund:              {} ({})\n", event.fund.name, event.fund.code));

    match &event.trigger {
        RuleTrigger::TrendRun {
            direction,
            consecutive_days,
            cumulative_return,
        } => {
            out.push_str(&format!("  direction:         {}\n", direction.label()));
            out.push_str(&format!("  consecutive days:  {}\n", consecutive_days));
            out.push_str(&format!("  cumulative return: {:.2}%\n", cumulative_return));
        }
        RuleTrigger::SingleDayMove { daily_return } => {
            out.push_str(&format!("  daily return:      {:.2}%\n", daily_return));
        }
        RuleTrigger::RollingWindowMove {
            window_len,
            cumulative_return,
        } => {
            out.push_str(&format!("  window length:     {} days\n", window_len));
            out.push_str(&format!("  cumulative return: {:.2}%\n", cumulative_return));
        }
    }

    out.push_str(&format!("  nav date:          {}\n", event.nav_date));
    out.push_str(&format!("  unit nav:          {:.4}\n\n", event.unit_nav));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::nav::FundIdentity;
    use crate::domain::rules::Direction;
    use chrono::NaiveDate;

    fn event(trigger: RuleTrigger) -> AlertEvent {
        AlertEvent {
            fund: FundIdentity {
                code: "007301".into(),
                name: "Test Growth Fund".into(),
            },
            trigger,
            nav_date: NaiveDate::from_ymd_opt(2024, 1, 17).unwrap(),
            unit_nav: 0.9612,
        }
    }

    #[test]
    fn renders_trend_run() {
        let text = render(&event(RuleTrigger::TrendRun {
            direction: Direction::Down,
            consecutive_days: 5,
            cumulative_return: -4.37,
        }));
        assert!(text.starts_with("[rule A]"));
        assert!(text.contains("Test Growth Fund (007301)"));
        assert!(text.contains("direction:         down"));
        assert!(text.contains("consecutive days:  5"));
        assert!(text.contains("-4.37%"));
        assert!(text.contains("2024-01-17"));
        assert!(text.contains("0.9612"));
    }

    #[test]
    fn renders_single_day_move() {
        let text = render(&event(RuleTrigger::SingleDayMove { daily_return: -6.2 }));
        assert!(text.starts_with("[rule B]"));
        assert!(text.contains("daily return:      -6.20%"));
    }

    #[test]
    fn renders_rolling_window_move() {
        let text = render(&event(RuleTrigger::RollingWindowMove {
            window_len: 2,
            cumulative_return: 5.5,
        }));
        assert!(text.starts_with("[rule C]"));
        assert!(text.contains("window length:     2 days"));
        assert!(text.contains("5.50%"));
    }

    #[test]
    fn deliver_handles_empty_batch() {
        let adapter = ConsoleAlertAdapter::new();
        assert!(adapter.deliver(&[]).is_ok());
    }
}
