//! Weather view
//!
//! Read-only accessors over the latest weather snapshot. The view never
//! mutates the snapshot; it re-reads the published pointer on each call.

use std::sync::Arc;

use crate::ports::{
    CurrentConditions, DailyForecast, HourlyForecast, SnapshotSource, WeatherSnapshot,
};

/// Read-only view over the weather poller's snapshot
pub struct WeatherView {
    source: Arc<dyn SnapshotSource<WeatherSnapshot>>,
}

impl std::fmt::Debug for WeatherView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherView")
            .field("available", &self.available())
            .finish_non_exhaustive()
    }
}

impl WeatherView {
    /// Create a view over a weather snapshot source
    pub fn new(source: Arc<dyn SnapshotSource<WeatherSnapshot>>) -> Self {
        Self { source }
    }

    /// Whether conditions can be served
    #[must_use]
    pub fn available(&self) -> bool {
        self.source.latest().is_some() && self.source.last_poll_succeeded()
    }

    /// The latest full snapshot, if available
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<WeatherSnapshot>> {
        if self.available() {
            self.source.latest()
        } else {
            None
        }
    }

    /// Current observed conditions
    #[must_use]
    pub fn current(&self) -> Option<CurrentConditions> {
        self.snapshot().map(|s| s.current.clone())
    }

    /// Canonical condition category of the current conditions
    #[must_use]
    pub fn condition(&self) -> Option<String> {
        self.snapshot().map(|s| s.current.condition.clone())
    }

    /// Current temperature in °C
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.snapshot().and_then(|s| s.current.temperature)
    }

    /// Current sea-level pressure in hPa
    #[must_use]
    pub fn pressure(&self) -> Option<f64> {
        self.snapshot().and_then(|s| s.current.pressure)
    }

    /// Current relative humidity in percent
    #[must_use]
    pub fn humidity(&self) -> Option<f64> {
        self.snapshot().and_then(|s| s.current.humidity)
    }

    /// Current wind speed in km/h
    #[must_use]
    pub fn wind_speed(&self) -> Option<f64> {
        self.snapshot().and_then(|s| s.current.wind_speed)
    }

    /// Daily forecast sequence
    #[must_use]
    pub fn daily_forecast(&self) -> Option<Vec<DailyForecast>> {
        self.snapshot().map(|s| s.daily.clone())
    }

    /// Hourly forecast sequence
    #[must_use]
    pub fn hourly_forecast(&self) -> Option<Vec<HourlyForecast>> {
        self.snapshot().map(|s| s.hourly.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubSource {
        snapshot: Option<Arc<WeatherSnapshot>>,
        success: AtomicBool,
    }

    impl SnapshotSource<WeatherSnapshot> for StubSource {
        fn latest(&self) -> Option<Arc<WeatherSnapshot>> {
            self.snapshot.clone()
        }

        fn last_poll_succeeded(&self) -> bool {
            self.success.load(Ordering::Relaxed)
        }
    }

    fn sample_snapshot() -> WeatherSnapshot {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        WeatherSnapshot {
            current: CurrentConditions {
                observed_at: date.and_hms_opt(12, 0, 0).unwrap(),
                temperature: Some(7.2),
                apparent_temperature: Some(5.1),
                humidity: Some(81.0),
                pressure: Some(1012.0),
                wind_speed: Some(14.8),
                wind_bearing: Some(230.0),
                wind_gust_speed: Some(32.0),
                cloud_cover: Some(75.0),
                visibility: Some(10.0),
                uv_index: Some(1.0),
                dew_point: Some(4.0),
                condition: "rainy".to_string(),
                icon: "rain".to_string(),
            },
            daily: vec![DailyForecast {
                date,
                temperature_max: Some(9.0),
                temperature_min: Some(3.0),
                condition: "cloudy".to_string(),
                precipitation: Some(1.2),
                precipitation_probability: Some(60.0),
                humidity: Some(80.0),
                pressure: Some(1010.0),
                wind_speed: Some(20.0),
                wind_bearing: Some(240.0),
                uv_index: Some(1.0),
            }],
            hourly: vec![HourlyForecast {
                timestamp: date.and_hms_opt(13, 0, 0).unwrap(),
                temperature: Some(7.5),
                apparent_temperature: Some(5.4),
                condition: "rainy".to_string(),
                precipitation: Some(0.4),
                precipitation_probability: Some(70.0),
                humidity: Some(82.0),
                wind_speed: Some(15.0),
                wind_bearing: Some(235.0),
                cloud_cover: Some(90.0),
            }],
        }
    }

    fn available_source() -> Arc<StubSource> {
        Arc::new(StubSource {
            snapshot: Some(Arc::new(sample_snapshot())),
            success: AtomicBool::new(true),
        })
    }

    #[test]
    fn unavailable_without_snapshot() {
        let source = Arc::new(StubSource {
            snapshot: None,
            success: AtomicBool::new(false),
        });
        let view = WeatherView::new(source);

        assert!(!view.available());
        assert!(view.current().is_none());
        assert!(view.temperature().is_none());
        assert!(view.daily_forecast().is_none());
    }

    #[test]
    fn accessors_read_the_published_snapshot() {
        let view = WeatherView::new(available_source());

        assert!(view.available());
        assert_eq!(view.condition().as_deref(), Some("rainy"));
        assert!((view.temperature().unwrap() - 7.2).abs() < f64::EPSILON);
        assert!((view.pressure().unwrap() - 1012.0).abs() < f64::EPSILON);
        assert!((view.humidity().unwrap() - 81.0).abs() < f64::EPSILON);
        assert!((view.wind_speed().unwrap() - 14.8).abs() < f64::EPSILON);
        assert_eq!(view.daily_forecast().unwrap().len(), 1);
        assert_eq!(view.hourly_forecast().unwrap().len(), 1);
    }

    #[test]
    fn stale_snapshot_is_hidden_after_failed_poll() {
        let source = available_source();
        source.success.store(false, Ordering::Relaxed);
        let view = WeatherView::new(source);

        assert!(!view.available());
        assert!(view.snapshot().is_none());
    }
}
