//! Visual Crossing data models
//!
//! Raw serde mirrors of the Timeline API JSON plus the parsed types the
//! client hands out. The same raw shape serves both the full forecast
//! call and the element-restricted precipitation call; fields absent from
//! a response deserialize as `None`/empty.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// Parsed current conditions block
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    /// Observation timestamp (provider-local, timezone-naive)
    pub observed_at: NaiveDateTime,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub wind_gust: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub dew_point: Option<f64>,
    pub precip: Option<f64>,
    /// Condition text, e.g. "Rain, Partially cloudy"
    pub conditions: Option<String>,
    /// Icon string, e.g. "rain"
    pub icon: Option<String>,
}

/// Parsed forecast hour
#[derive(Debug, Clone, PartialEq)]
pub struct Hour {
    /// Hour timestamp (provider-local, timezone-naive)
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub precip: Option<f64>,
    pub precip_probability: Option<f64>,
    pub icon: Option<String>,
}

/// Parsed forecast day
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub uv_index: Option<f64>,
    pub precip: Option<f64>,
    pub precip_probability: Option<f64>,
    pub icon: Option<String>,
    /// Hourly breakdown, chronological
    pub hours: Vec<Hour>,
}

/// Parsed full forecast payload
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: Option<String>,
    pub current: Option<Conditions>,
    pub days: Vec<Day>,
}

/// One hour of the precipitation-only series
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipSeriesHour {
    pub timestamp: NaiveDateTime,
    pub precip: Option<f64>,
}

/// One day of the precipitation-only series
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipSeriesDay {
    pub date: NaiveDate,
    pub precip: Option<f64>,
    pub hours: Vec<PrecipSeriesHour>,
}

/// Parsed precipitation-only payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrecipSeries {
    pub days: Vec<PrecipSeriesDay>,
}

/// Raw timeline response as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTimelineResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub days: Vec<RawDay>,
    #[serde(default, rename = "currentConditions")]
    pub current_conditions: Option<RawConditions>,
}

/// Raw current-conditions block
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawConditions {
    pub datetime: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feelslike: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub winddir: Option<f64>,
    #[serde(default)]
    pub windgust: Option<f64>,
    #[serde(default)]
    pub cloudcover: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub uvindex: Option<f64>,
    #[serde(default)]
    pub dew: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Raw day entry
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDay {
    pub datetime: String,
    #[serde(default)]
    pub tempmax: Option<f64>,
    #[serde(default)]
    pub tempmin: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub winddir: Option<f64>,
    #[serde(default)]
    pub uvindex: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub precipprob: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub hours: Vec<RawHour>,
}

/// Raw hour entry
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawHour {
    pub datetime: String,
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feelslike: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub winddir: Option<f64>,
    #[serde(default)]
    pub cloudcover: Option<f64>,
    #[serde(default)]
    pub precip: Option<f64>,
    #[serde(default)]
    pub precipprob: Option<f64>,
    #[serde(default)]
    pub icon: Option<String>,
}
