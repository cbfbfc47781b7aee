//! Application assembly
//!
//! Wires the Visual Crossing client, the two adapters, and the pollers
//! into a running instance, and hands back views plus a shutdown handle.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use application::{
    Clock, PrecipitationView, SnapshotSource, SystemClock, WeatherSnapshot, WeatherView,
};
use domain::{DomainError, PrecipTimeline};
use integration_visualcrossing::{VisualCrossingClient, VisualCrossingError};

use crate::adapters::{PrecipitationAdapter, WeatherAdapter};
use crate::config::AppConfig;
use crate::poller::{Poller, PollerHandle, PollerStats};

/// Errors raised while assembling or starting the application
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configured coordinates are invalid
    #[error("invalid location: {0}")]
    InvalidLocation(#[from] DomainError),

    /// The HTTP client could not be initialized
    #[error("client error: {0}")]
    Client(#[from] VisualCrossingError),
}

/// A running application instance
///
/// Holds the pollers and their task handles. Dropping the instance (or
/// calling [`shutdown`]) stops the polling loops; the views become
/// permanently stale afterwards.
///
/// [`shutdown`]: Self::shutdown
pub struct App {
    weather_poller: Arc<Poller<WeatherSnapshot>>,
    precipitation_poller: Arc<Poller<PrecipTimeline>>,
    weather_view: WeatherView,
    precipitation_view: PrecipitationView,
    handles: Vec<PollerHandle>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("pollers", &self.stats())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Assemble an instance without starting any polling loops
    ///
    /// # Errors
    ///
    /// Fails if the coordinates are out of range or the HTTP client
    /// cannot be built.
    pub fn build(config: &AppConfig) -> Result<Self, AppError> {
        let location = config.location.geo_location()?;
        let client = Arc::new(VisualCrossingClient::new(config.visualcrossing.clone())?);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let weather_adapter = Arc::new(WeatherAdapter::new(
            Arc::clone(&client),
            location,
            Arc::clone(&clock),
            config.polling.forecast_days,
        ));
        let precipitation_adapter = Arc::new(PrecipitationAdapter::new(
            client,
            location,
            Arc::clone(&clock),
        ));

        let weather_poller = Poller::new("weather", weather_adapter);
        let precipitation_poller = Poller::new("precipitation", precipitation_adapter);

        let weather_source: Arc<dyn SnapshotSource<WeatherSnapshot>> =
            Arc::clone(&weather_poller) as _;
        let precipitation_source: Arc<dyn SnapshotSource<PrecipTimeline>> =
            Arc::clone(&precipitation_poller) as _;

        Ok(Self {
            weather_view: WeatherView::new(weather_source),
            precipitation_view: PrecipitationView::new(precipitation_source, clock),
            weather_poller,
            precipitation_poller,
            handles: Vec::new(),
        })
    }

    /// Assemble an instance and start both polling loops
    ///
    /// The first refresh of each poller runs immediately on the spawned
    /// tasks; views become available once it succeeds.
    ///
    /// # Errors
    ///
    /// Fails if the coordinates are out of range or the HTTP client
    /// cannot be built.
    pub fn start(config: &AppConfig) -> Result<Self, AppError> {
        let mut app = Self::build(config)?;

        let weather_interval = config.polling.weather_interval();
        let precipitation_interval = config.polling.precipitation_interval();
        info!(
            weather_secs = weather_interval.as_secs(),
            precipitation_secs = precipitation_interval.as_secs(),
            "starting pollers"
        );

        app.handles = vec![
            app.weather_poller.spawn(weather_interval),
            app.precipitation_poller.spawn(precipitation_interval),
        ];
        Ok(app)
    }

    /// Refresh both pollers once, without starting any loops
    pub async fn refresh_once(&self) {
        tokio::join!(
            self.weather_poller.refresh(),
            self.precipitation_poller.refresh()
        );
    }

    /// View over the weather snapshot
    #[must_use]
    pub const fn weather(&self) -> &WeatherView {
        &self.weather_view
    }

    /// View over the precipitation timeline
    #[must_use]
    pub const fn precipitation(&self) -> &PrecipitationView {
        &self.precipitation_view
    }

    /// Counters for both pollers
    #[must_use]
    pub fn stats(&self) -> Vec<PollerStats> {
        vec![
            self.weather_poller.stats(),
            self.precipitation_poller.stats(),
        ]
    }

    /// Stop the polling loops
    pub fn shutdown(mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("pollers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LocationConfig, PollingConfig};
    use crate::telemetry::TelemetryConfig;
    use integration_visualcrossing::VisualCrossingConfig;
    use secrecy::SecretString;

    fn sample_config(latitude: f64) -> AppConfig {
        AppConfig {
            location: LocationConfig {
                latitude,
                longitude: -0.12,
                name: None,
            },
            visualcrossing: VisualCrossingConfig::new(SecretString::from("test-key")),
            polling: PollingConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }

    #[test]
    fn build_wires_views_and_pollers() {
        let app = App::build(&sample_config(51.5)).unwrap();

        // Nothing polled yet, so both views are unavailable.
        assert!(!app.weather().available());
        assert!(!app.precipitation().available());

        let stats = app.stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "weather");
        assert_eq!(stats[1].name, "precipitation");
    }

    #[test]
    fn build_rejects_invalid_coordinates() {
        let result = App::build(&sample_config(91.0));
        assert!(matches!(result, Err(AppError::InvalidLocation(_))));
    }
}
