//! Precipitation view
//!
//! Read-only accessors over the latest precipitation timeline snapshot.
//! Each total is recomputed on read from the current timeline and the
//! injected clock; nothing is persisted. Totals are unavailable until the
//! first successful poll has populated the timeline.

use std::sync::Arc;

use domain::PrecipTimeline;

use crate::ports::{Clock, SnapshotSource};

/// Rolling window length in hours for the hourly aggregates
pub const WINDOW_HOURS: i64 = 24;
/// Rolling window length in days for the daily aggregates
pub const WINDOW_DAYS: u64 = 7;

/// The four rolling rainfall totals in mm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainfallTotals {
    /// Rainfall over the trailing 24 hours
    pub last_24h: f64,
    /// Rainfall over the trailing 7 days
    pub last_7d: f64,
    /// Forecast rainfall over the leading 24 hours
    pub next_24h: f64,
    /// Forecast rainfall over the leading 7 days
    pub next_7d: f64,
}

/// Read-only view over the precipitation poller's snapshot
pub struct PrecipitationView {
    source: Arc<dyn SnapshotSource<PrecipTimeline>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PrecipitationView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecipitationView")
            .field("available", &self.available())
            .finish_non_exhaustive()
    }
}

impl PrecipitationView {
    /// Create a view over a timeline source
    pub fn new(source: Arc<dyn SnapshotSource<PrecipTimeline>>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock }
    }

    /// Whether totals can be served
    ///
    /// Requires at least one successful poll and that the last poll did
    /// not fail.
    #[must_use]
    pub fn available(&self) -> bool {
        self.source.latest().is_some() && self.source.last_poll_succeeded()
    }

    /// Rainfall over the trailing 24 hours, in mm
    #[must_use]
    pub fn rainfall_last_24h(&self) -> Option<f64> {
        self.timeline()
            .map(|t| t.trailing_hours(self.clock.now_utc().naive_utc(), WINDOW_HOURS))
    }

    /// Rainfall over the trailing 7 days, in mm
    #[must_use]
    pub fn rainfall_last_7d(&self) -> Option<f64> {
        self.timeline()
            .map(|t| t.trailing_days(self.clock.now_utc().date_naive(), WINDOW_DAYS))
    }

    /// Forecast rainfall over the leading 24 hours, in mm
    #[must_use]
    pub fn rainfall_next_24h(&self) -> Option<f64> {
        self.timeline()
            .map(|t| t.leading_hours(self.clock.now_utc().naive_utc(), WINDOW_HOURS))
    }

    /// Forecast rainfall over the leading 7 days, in mm
    #[must_use]
    pub fn rainfall_next_7d(&self) -> Option<f64> {
        self.timeline()
            .map(|t| t.leading_days(self.clock.now_utc().date_naive(), WINDOW_DAYS))
    }

    /// All four totals computed against one clock reading
    ///
    /// Reads the snapshot pointer once, so the four totals always come
    /// from the same timeline.
    #[must_use]
    pub fn totals(&self) -> Option<RainfallTotals> {
        let timeline = self.timeline()?;
        let now = self.clock.now_utc();
        let naive_now = now.naive_utc();
        let today = now.date_naive();

        Some(RainfallTotals {
            last_24h: timeline.trailing_hours(naive_now, WINDOW_HOURS),
            last_7d: timeline.trailing_days(today, WINDOW_DAYS),
            next_24h: timeline.leading_hours(naive_now, WINDOW_HOURS),
            next_7d: timeline.leading_days(today, WINDOW_DAYS),
        })
    }

    fn timeline(&self) -> Option<Arc<PrecipTimeline>> {
        if self.available() {
            self.source.latest()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use domain::{PrecipDay, PrecipHour};
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::ports::FixedClock;

    struct StubSource {
        timeline: Option<Arc<PrecipTimeline>>,
        success: AtomicBool,
    }

    impl StubSource {
        fn with_timeline(timeline: PrecipTimeline) -> Arc<Self> {
            Arc::new(Self {
                timeline: Some(Arc::new(timeline)),
                success: AtomicBool::new(true),
            })
        }

        fn empty() -> Arc<Self> {
            Arc::new(Self {
                timeline: None,
                success: AtomicBool::new(false),
            })
        }
    }

    impl SnapshotSource<PrecipTimeline> for StubSource {
        fn latest(&self) -> Option<Arc<PrecipTimeline>> {
            self.timeline.clone()
        }

        fn last_poll_succeeded(&self) -> bool {
            self.success.load(Ordering::Relaxed)
        }
    }

    fn sample_timeline() -> PrecipTimeline {
        PrecipTimeline::new(vec![PrecipDay {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            precip: Some(5.0),
            hours: vec![
                PrecipHour {
                    timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .and_hms_opt(10, 0, 0)
                        .unwrap(),
                    precip: Some(2.0),
                },
                PrecipHour {
                    timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                        .unwrap()
                        .and_hms_opt(14, 0, 0)
                        .unwrap(),
                    precip: Some(3.0),
                },
            ],
        }])
    }

    fn clock_at(y: i32, m: u32, d: u32, h: u32) -> Arc<FixedClock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()))
    }

    #[test]
    fn unavailable_before_first_successful_poll() {
        let view = PrecipitationView::new(StubSource::empty(), clock_at(2024, 1, 1, 15));

        assert!(!view.available());
        assert!(view.rainfall_last_24h().is_none());
        assert!(view.rainfall_last_7d().is_none());
        assert!(view.rainfall_next_24h().is_none());
        assert!(view.rainfall_next_7d().is_none());
        assert!(view.totals().is_none());
    }

    #[test]
    fn trailing_24h_from_sample_timeline() {
        let view = PrecipitationView::new(
            StubSource::with_timeline(sample_timeline()),
            clock_at(2024, 1, 1, 15),
        );

        assert!(view.available());
        let total = view.rainfall_last_24h().unwrap();
        assert!((total - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn trailing_7d_counts_strictly_interior_days() {
        let view = PrecipitationView::new(
            StubSource::with_timeline(sample_timeline()),
            clock_at(2024, 1, 2, 9),
        );

        let total = view.rainfall_last_7d().unwrap();
        assert!((total - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn leading_windows_from_sample_timeline() {
        // At 09:00 both hours are still ahead.
        let view = PrecipitationView::new(
            StubSource::with_timeline(sample_timeline()),
            clock_at(2024, 1, 1, 9),
        );

        let next_24h = view.rainfall_next_24h().unwrap();
        assert!((next_24h - 5.0).abs() < f64::EPSILON);

        // The single day is today, so the strictly-future daily window is empty.
        let next_7d = view.rainfall_next_7d().unwrap();
        assert!(next_7d.abs() < f64::EPSILON);
    }

    #[test]
    fn totals_come_from_a_single_snapshot_read() {
        let view = PrecipitationView::new(
            StubSource::with_timeline(sample_timeline()),
            clock_at(2024, 1, 1, 15),
        );

        let totals = view.totals().unwrap();
        assert!((totals.last_24h - 5.0).abs() < f64::EPSILON);
        assert!(totals.next_24h.abs() < f64::EPSILON);
    }

    #[test]
    fn failed_last_poll_marks_view_unavailable() {
        let source = StubSource::with_timeline(sample_timeline());
        source.success.store(false, Ordering::Relaxed);
        let view = PrecipitationView::new(source, clock_at(2024, 1, 1, 15));

        assert!(!view.available());
        assert!(view.rainfall_last_24h().is_none());
    }
}
