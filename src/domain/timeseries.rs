//! Ordered, date-keyed time series.
//!
//! Every series in fundwatch is strictly ascending by date with unique dates.
//! Sources that deliver duplicates get last-value-wins dedup at construction,
//! so downstream code never has to reason about repeated dates.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// A single dated value. Whether the value is a NAV or a percent change is
/// fixed by the series it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered sequence of observations, unique dates, ascending by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
    date_index: HashMap<NaiveDate, usize>,
}

impl TimeSeries {
    /// Build a series from observations in any order. If two observations
    /// share a date, the later one in input order wins.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for obs in observations {
            by_date.insert(obs.date, obs.value);
        }

        let observations: Vec<Observation> = by_date
            .into_iter()
            .map(|(date, value)| Observation { date, value })
            .collect();
        let date_index = observations
            .iter()
            .enumerate()
            .map(|(i, obs)| (obs.date, i))
            .collect();

        Self {
            observations,
            date_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.date_index.get(&date).map(|&i| self.observations[i].value)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.date_index.contains_key(&date)
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.observations.iter().map(|obs| obs.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(d: u32, value: f64) -> Observation {
        Observation {
            date: date(2024, 1, d),
            value,
        }
    }

    #[test]
    fn construction_sorts_by_date() {
        let series = TimeSeries::from_observations(vec![obs(17, 3.0), obs(15, 1.0), obs(16, 2.0)]);
        let dates: Vec<NaiveDate> = series.dates().collect();
        assert_eq!(dates, vec![date(2024, 1, 15), date(2024, 1, 16), date(2024, 1, 17)]);
    }

    #[test]
    fn duplicate_dates_last_value_wins() {
        let series = TimeSeries::from_observations(vec![obs(15, 1.0), obs(16, 2.0), obs(15, 9.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get(date(2024, 1, 15)), Some(9.0));
    }

    #[test]
    fn get_missing_date() {
        let series = TimeSeries::from_observations(vec![obs(15, 1.0)]);
        assert_eq!(series.get(date(2024, 1, 16)), None);
        assert!(!series.contains(date(2024, 1, 16)));
    }

    #[test]
    fn first_and_last() {
        let series = TimeSeries::from_observations(vec![obs(16, 2.0), obs(15, 1.0)]);
        assert_eq!(series.first().unwrap().date, date(2024, 1, 15));
        assert_eq!(series.last().unwrap().date, date(2024, 1, 16));
    }

    #[test]
    fn empty_series() {
        let series = TimeSeries::from_observations(vec![]);
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert!(series.first().is_none());
        assert!(series.last().is_none());
    }
}
