//! Application configuration
//!
//! Loaded from an optional `config.toml` with `CROSSINGWATCH_*`
//! environment variable overrides. The Visual Crossing section reuses
//! the integration crate's config struct so the API key stays wrapped
//! in a `SecretString` from deserialization onward.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use domain::{DomainError, GeoLocation};
use integration_visualcrossing::VisualCrossingConfig;

use crate::telemetry::TelemetryConfig;

/// Lower bound of the randomized weather poll interval (31 minutes)
const WEATHER_INTERVAL_MIN_SECS: u64 = 31 * 60;
/// Upper bound of the randomized weather poll interval (32 minutes)
const WEATHER_INTERVAL_MAX_SECS: u64 = 32 * 60;

/// The observed location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Optional display name
    #[serde(default)]
    pub name: Option<String>,
}

impl LocationConfig {
    /// Validate the coordinates into a [`GeoLocation`]
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is out of range.
    pub fn geo_location(&self) -> Result<GeoLocation, DomainError> {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

/// Poll intervals and forecast horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Weather poll interval in seconds
    ///
    /// Unset picks a random interval between 31 and 32 minutes at
    /// startup, spreading request times across installs.
    #[serde(default)]
    pub weather_interval_secs: Option<u64>,

    /// Precipitation poll interval in seconds (default: 3600)
    #[serde(default = "default_precipitation_interval")]
    pub precipitation_interval_secs: u64,

    /// Forecast horizon in days (default: 7)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u64,
}

const fn default_precipitation_interval() -> u64 {
    3600
}

const fn default_forecast_days() -> u64 {
    7
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            weather_interval_secs: None,
            precipitation_interval_secs: default_precipitation_interval(),
            forecast_days: default_forecast_days(),
        }
    }
}

impl PollingConfig {
    /// Effective weather poll interval
    #[must_use]
    pub fn weather_interval(&self) -> Duration {
        self.weather_interval_secs.map_or_else(
            || {
                let secs =
                    rand::rng().random_range(WEATHER_INTERVAL_MIN_SECS..WEATHER_INTERVAL_MAX_SECS);
                Duration::from_secs(secs)
            },
            Duration::from_secs,
        )
    }

    /// Effective precipitation poll interval
    #[must_use]
    pub const fn precipitation_interval(&self) -> Duration {
        Duration::from_secs(self.precipitation_interval_secs)
    }
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Observed location
    pub location: LocationConfig,

    /// Visual Crossing service settings
    pub visualcrossing: VisualCrossingConfig,

    /// Poll intervals
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// Environment variables use the `CROSSINGWATCH` prefix with `_` as
    /// the section separator, e.g. `CROSSINGWATCH_LOCATION_LATITUDE`.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::builder(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file path plus environment
    pub fn from_path(path: &Path) -> Result<Self, config::ConfigError> {
        Self::builder(config::File::from(path).required(true))
    }

    fn builder(
        file: config::File<config::FileSourceFile, config::FileFormat>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("CROSSINGWATCH")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    const SAMPLE: &str = r#"
[location]
latitude = 51.5
longitude = -0.12
name = "London"

[visualcrossing]
api_key = "test-key"

[polling]
precipitation_interval_secs = 1800
"#;

    #[test]
    fn loads_from_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = AppConfig::from_path(&path).unwrap();

        assert!((config.location.latitude - 51.5).abs() < f64::EPSILON);
        assert_eq!(config.location.name.as_deref(), Some("London"));
        assert_eq!(config.visualcrossing.api_key.expose_secret(), "test-key");
        assert_eq!(
            config.visualcrossing.base_url,
            "https://weather.visualcrossing.com"
        );
        assert_eq!(config.polling.precipitation_interval_secs, 1800);
        assert_eq!(config.polling.forecast_days, 7);
        assert_eq!(config.telemetry.log_filter, "info");
    }

    #[test]
    fn location_validates_coordinates() {
        let valid = LocationConfig {
            latitude: 51.5,
            longitude: -0.12,
            name: None,
        };
        assert!(valid.geo_location().is_ok());

        let invalid = LocationConfig {
            latitude: 91.0,
            longitude: 0.0,
            name: None,
        };
        assert!(invalid.geo_location().is_err());
    }

    #[test]
    fn unset_weather_interval_is_randomized_within_bounds() {
        let polling = PollingConfig::default();
        for _ in 0..16 {
            let interval = polling.weather_interval().as_secs();
            assert!((WEATHER_INTERVAL_MIN_SECS..WEATHER_INTERVAL_MAX_SECS).contains(&interval));
        }
    }

    #[test]
    fn explicit_weather_interval_is_used_verbatim() {
        let polling = PollingConfig {
            weather_interval_secs: Some(600),
            ..Default::default()
        };
        assert_eq!(polling.weather_interval(), Duration::from_secs(600));
    }

    #[test]
    fn precipitation_interval_defaults_to_an_hour() {
        let polling = PollingConfig::default();
        assert_eq!(polling.precipitation_interval(), Duration::from_secs(3600));
    }
}
