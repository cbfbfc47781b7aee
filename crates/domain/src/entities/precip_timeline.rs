//! Precipitation timeline entity
//!
//! An ordered day/hour precipitation series as returned by the timeline
//! endpoint, together with the four rolling-window aggregations derived
//! from it. The timeline is immutable once built and replaced wholesale
//! on each successful poll.

use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// One hour of the precipitation series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipHour {
    /// Hour timestamp (provider-local, timezone-naive)
    pub timestamp: NaiveDateTime,
    /// Precipitation amount in mm; `None` when the provider omits it
    pub precip: Option<f64>,
}

/// One day of the precipitation series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipDay {
    /// Calendar date of this entry
    pub date: NaiveDate,
    /// Daily precipitation total in mm; `None` when the provider omits it
    pub precip: Option<f64>,
    /// Hourly breakdown, in chronological order
    pub hours: Vec<PrecipHour>,
}

/// Ordered day/hour precipitation series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecipTimeline {
    /// Days in chronological order
    pub days: Vec<PrecipDay>,
}

impl PrecipTimeline {
    /// Create a timeline from a day sequence
    #[must_use]
    pub fn new(days: Vec<PrecipDay>) -> Self {
        Self { days }
    }

    /// Whether the timeline holds no days at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum hourly precipitation over `[now - hours, now)`
    ///
    /// Hours exactly at `now - hours` are included; hours exactly at `now`
    /// are not. Missing amounts count as zero. Returns the total in mm,
    /// rounded to 2 decimal places; an empty timeline yields `0.0`.
    #[must_use]
    pub fn trailing_hours(&self, now: NaiveDateTime, hours: i64) -> f64 {
        let cutoff = now - TimeDelta::hours(hours);
        self.sum_hours(|ts| cutoff <= ts && ts < now)
    }

    /// Sum hourly precipitation over `[now, now + hours)`
    ///
    /// Hours exactly at `now` are included; hours exactly at `now + hours`
    /// are not.
    #[must_use]
    pub fn leading_hours(&self, now: NaiveDateTime, hours: i64) -> f64 {
        let cutoff = now + TimeDelta::hours(hours);
        self.sum_hours(|ts| now <= ts && ts < cutoff)
    }

    /// Sum daily precipitation over the open interval `(today - days, today)`
    ///
    /// Both endpoints are excluded: neither `today` itself nor the day
    /// exactly `days` ago contributes.
    #[must_use]
    pub fn trailing_days(&self, today: NaiveDate, days: u64) -> f64 {
        let cutoff = today - Days::new(days);
        self.sum_days(|date| cutoff < date && date < today)
    }

    /// Sum daily precipitation over the half-open interval `(today, today + days]`
    ///
    /// `today` is excluded, the day exactly `days` ahead is included. The
    /// endpoint asymmetry with [`Self::trailing_days`] is deliberate and
    /// matches the upstream series semantics.
    #[must_use]
    pub fn leading_days(&self, today: NaiveDate, days: u64) -> f64 {
        let cutoff = today + Days::new(days);
        self.sum_days(|date| today < date && date <= cutoff)
    }

    fn sum_hours(&self, in_window: impl Fn(NaiveDateTime) -> bool) -> f64 {
        let total = self
            .days
            .iter()
            .flat_map(|day| day.hours.iter())
            .filter(|hour| in_window(hour.timestamp))
            .map(|hour| hour.precip.unwrap_or(0.0))
            .sum();
        round2(total)
    }

    fn sum_days(&self, in_window: impl Fn(NaiveDate) -> bool) -> f64 {
        let total = self
            .days
            .iter()
            .filter(|day| in_window(day.date))
            .map(|day| day.precip.unwrap_or(0.0))
            .sum();
        round2(total)
    }
}

/// Round a total to 2 decimal places
fn round2(total: f64) -> f64 {
    (total * 100.0).round() / 100.0
}
