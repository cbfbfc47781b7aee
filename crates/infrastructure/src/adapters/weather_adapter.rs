//! Weather adapter - fetches full forecasts through the Visual Crossing client
//!
//! Implements the weather side of the snapshot-fetch port. Each fetch
//! requests today through today plus the configured forecast horizon and
//! maps the provider payload into a [`WeatherSnapshot`], canonicalizing
//! condition strings along the way.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Days;
use tracing::{debug, instrument};

use application::{
    Clock, CurrentConditions, DailyForecast, HourlyForecast, PollError, SnapshotFetch,
    WeatherSnapshot,
};
use domain::{GeoLocation, canonical_condition};
use integration_visualcrossing::{
    Conditions, Day, Forecast, Hour, VisualCrossingClient, VisualCrossingError,
};

/// Fetches weather snapshots for a fixed location
pub struct WeatherAdapter {
    client: Arc<VisualCrossingClient>,
    location: GeoLocation,
    clock: Arc<dyn Clock>,
    forecast_days: u64,
}

impl std::fmt::Debug for WeatherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("location", &self.location)
            .field("forecast_days", &self.forecast_days)
            .finish_non_exhaustive()
    }
}

impl WeatherAdapter {
    /// Create an adapter for one location
    pub fn new(
        client: Arc<VisualCrossingClient>,
        location: GeoLocation,
        clock: Arc<dyn Clock>,
        forecast_days: u64,
    ) -> Self {
        Self {
            client,
            location,
            clock,
            forecast_days,
        }
    }

    /// Classify a client error for the poll loop
    ///
    /// A rejected key and upstream server faults are transient setup or
    /// provider problems: the poller retries them silently. Everything
    /// else is a failed update.
    fn map_error(err: VisualCrossingError) -> PollError {
        match err {
            VisualCrossingError::Unauthorized | VisualCrossingError::ServerError(_) => {
                PollError::NotReady(err.to_string())
            }
            other => PollError::UpdateFailed(other.to_string()),
        }
    }

    fn build_snapshot(forecast: Forecast) -> Result<WeatherSnapshot, PollError> {
        let current = forecast.current.ok_or_else(|| {
            PollError::UpdateFailed("response carried no current conditions".to_string())
        })?;

        let hourly = forecast
            .days
            .iter()
            .flat_map(|day| day.hours.iter())
            .map(Self::map_hour)
            .collect();

        Ok(WeatherSnapshot {
            current: Self::map_current(current),
            daily: forecast.days.iter().map(Self::map_day).collect(),
            hourly,
        })
    }

    fn map_current(current: Conditions) -> CurrentConditions {
        let icon = current.icon.unwrap_or_default();
        CurrentConditions {
            observed_at: current.observed_at,
            temperature: current.temperature,
            apparent_temperature: current.apparent_temperature,
            humidity: current.humidity,
            pressure: current.pressure,
            wind_speed: current.wind_speed,
            wind_bearing: current.wind_bearing,
            wind_gust_speed: current.wind_gust,
            cloud_cover: current.cloud_cover,
            visibility: current.visibility,
            uv_index: current.uv_index,
            dew_point: current.dew_point,
            condition: canonical_condition(&icon).to_string(),
            icon,
        }
    }

    fn map_day(day: &Day) -> DailyForecast {
        DailyForecast {
            date: day.date,
            temperature_max: day.temperature_max,
            temperature_min: day.temperature_min,
            condition: canonical_condition(day.icon.as_deref().unwrap_or_default()).to_string(),
            precipitation: day.precip,
            precipitation_probability: day.precip_probability,
            humidity: day.humidity,
            pressure: day.pressure,
            wind_speed: day.wind_speed,
            wind_bearing: day.wind_bearing,
            uv_index: day.uv_index,
        }
    }

    fn map_hour(hour: &Hour) -> HourlyForecast {
        HourlyForecast {
            timestamp: hour.timestamp,
            temperature: hour.temperature,
            apparent_temperature: hour.apparent_temperature,
            condition: canonical_condition(hour.icon.as_deref().unwrap_or_default()).to_string(),
            precipitation: hour.precip,
            precipitation_probability: hour.precip_probability,
            humidity: hour.humidity,
            wind_speed: hour.wind_speed,
            wind_bearing: hour.wind_bearing,
            cloud_cover: hour.cloud_cover,
        }
    }
}

#[async_trait]
impl SnapshotFetch<WeatherSnapshot> for WeatherAdapter {
    #[instrument(skip(self), fields(location = %self.location))]
    async fn fetch(&self) -> Result<WeatherSnapshot, PollError> {
        let today = self.clock.now_utc().date_naive();
        let end = today + Days::new(self.forecast_days);

        let forecast = self
            .client
            .fetch_forecast(
                self.location.latitude(),
                self.location.longitude(),
                today,
                end,
            )
            .await
            .map_err(Self::map_error)?;

        debug!(days = forecast.days.len(), "retrieved forecast");
        Self::build_snapshot(forecast)
    }
}
