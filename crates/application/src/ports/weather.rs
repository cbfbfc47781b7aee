//! Weather snapshot types
//!
//! The complete replaceable result of one successful weather poll:
//! current conditions plus the daily and hourly forecast sequences.
//! Replaced wholesale on success; the stale value is retained on failure.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Current observed conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Observation timestamp (provider-local, timezone-naive)
    pub observed_at: NaiveDateTime,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Feels-like temperature in °C
    pub apparent_temperature: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Sea-level pressure in hPa
    pub pressure: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_bearing: Option<f64>,
    /// Wind gust speed in km/h
    pub wind_gust_speed: Option<f64>,
    /// Cloud cover in percent
    pub cloud_cover: Option<f64>,
    /// Visibility in km
    pub visibility: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
    /// Dew point in °C
    pub dew_point: Option<f64>,
    /// Canonical condition category (unmapped provider strings pass through)
    pub condition: String,
    /// Raw provider icon string
    pub icon: String,
}

/// Forecast for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Forecast date
    pub date: NaiveDate,
    /// Maximum temperature in °C
    pub temperature_max: Option<f64>,
    /// Minimum temperature in °C
    pub temperature_min: Option<f64>,
    /// Canonical condition category
    pub condition: String,
    /// Expected precipitation in mm
    pub precipitation: Option<f64>,
    /// Precipitation probability in percent
    pub precipitation_probability: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Sea-level pressure in hPa
    pub pressure: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_bearing: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
}

/// Forecast for one hour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Forecast timestamp (provider-local, timezone-naive)
    pub timestamp: NaiveDateTime,
    /// Temperature in °C
    pub temperature: Option<f64>,
    /// Feels-like temperature in °C
    pub apparent_temperature: Option<f64>,
    /// Canonical condition category
    pub condition: String,
    /// Expected precipitation in mm
    pub precipitation: Option<f64>,
    /// Precipitation probability in percent
    pub precipitation_probability: Option<f64>,
    /// Relative humidity in percent
    pub humidity: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed: Option<f64>,
    /// Wind direction in degrees
    pub wind_bearing: Option<f64>,
    /// Cloud cover in percent
    pub cloud_cover: Option<f64>,
}

/// The complete result of one successful weather poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current observed conditions
    pub current: CurrentConditions,
    /// Daily forecast sequence, in chronological order
    pub daily: Vec<DailyForecast>,
    /// Hourly forecast sequence, in chronological order
    pub hourly: Vec<HourlyForecast>,
}
