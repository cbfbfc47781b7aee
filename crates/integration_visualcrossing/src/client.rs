//! Visual Crossing Timeline API client
//!
//! HTTP client for the Timeline endpoint. One client serves both the
//! full forecast request and the element-restricted precipitation
//! request; they differ only in query parameters.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{
    Conditions, Day, Forecast, Hour, PrecipSeries, PrecipSeriesDay, PrecipSeriesHour, RawConditions,
    RawDay, RawHour, RawTimelineResponse,
};

/// Timeline endpoint path under the base URL
const TIMELINE_PATH: &str = "/VisualCrossingWebServices/rest/services/timeline";

/// Visual Crossing client errors
#[derive(Debug, Error)]
pub enum VisualCrossingError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// API key was rejected (HTTP 401/403)
    #[error("Unauthorized: API key rejected")]
    Unauthorized,

    /// The request itself was invalid (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limit or query cost limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server-side failure (HTTP 5xx)
    #[error("Server error: HTTP {0}")]
    ServerError(u16),

    /// Any other failed request
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response payload
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Visual Crossing service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VisualCrossingConfig {
    /// API base URL (default: <https://weather.visualcrossing.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeline API key
    pub api_key: SecretString,

    /// Connection timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Unit group for the response values (default: "uk")
    #[serde(default = "default_unit_group")]
    pub unit_group: String,
}

fn default_base_url() -> String {
    "https://weather.visualcrossing.com".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_unit_group() -> String {
    "uk".to_string()
}

impl VisualCrossingConfig {
    /// Create a configuration with defaults for everything but the key
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: default_base_url(),
            api_key,
            timeout_secs: default_timeout(),
            unit_group: default_unit_group(),
        }
    }
}

/// Visual Crossing Timeline HTTP client
#[derive(Debug)]
pub struct VisualCrossingClient {
    client: Client,
    config: VisualCrossingConfig,
}

impl VisualCrossingClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: VisualCrossingConfig) -> Result<Self, VisualCrossingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VisualCrossingError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch current conditions plus daily and hourly forecast
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the key is rejected, or
    /// the payload cannot be parsed.
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    pub async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Forecast, VisualCrossingError> {
        let url = self.timeline_url(latitude, longitude, start, end);
        debug!(%start, %end, "fetching forecast");

        let raw = self
            .get_timeline(&url, &[("include", "days,hours,current")])
            .await?;

        parse_forecast(raw)
    }

    /// Fetch the precipitation-only series for a date window
    ///
    /// Requests observation data alongside the forecast so past days in
    /// the window carry measured values, and restricts the payload to
    /// the datetime and precip elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the key is rejected, or
    /// the payload cannot be parsed.
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    pub async fn fetch_precipitation(
        &self,
        latitude: f64,
        longitude: f64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PrecipSeries, VisualCrossingError> {
        let url = self.timeline_url(latitude, longitude, start, end);
        debug!(%start, %end, "fetching precipitation series");

        let raw = self
            .get_timeline(
                &url,
                &[("include", "hours,obs"), ("elements", "datetime,precip")],
            )
            .await?;

        parse_precip_series(raw)
    }

    fn timeline_url(&self, latitude: f64, longitude: f64, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}{TIMELINE_PATH}/{latitude},{longitude}/{start}/{end}",
            self.config.base_url
        )
    }

    async fn get_timeline(
        &self,
        url: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<RawTimelineResponse, VisualCrossingError> {
        let response = self
            .client
            .get(url)
            .query(&[
                ("unitGroup", self.config.unit_group.as_str()),
                ("key", self.config.api_key.expose_secret()),
            ])
            .query(extra_query)
            .send()
            .await
            .map_err(|e| VisualCrossingError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(VisualCrossingError::Unauthorized);
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            return Err(VisualCrossingError::BadRequest(body));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(VisualCrossingError::RateLimited);
        }
        if status.is_server_error() {
            return Err(VisualCrossingError::ServerError(status.as_u16()));
        }
        if !status.is_success() {
            return Err(VisualCrossingError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| VisualCrossingError::ParseError(e.to_string()))
    }
}

fn parse_forecast(raw: RawTimelineResponse) -> Result<Forecast, VisualCrossingError> {
    let days = raw
        .days
        .into_iter()
        .map(parse_day)
        .collect::<Result<Vec<_>, _>>()?;

    // currentConditions carries a time-of-day only; anchor it to the
    // first returned day, which is the day the observation belongs to.
    let anchor = days.first().map(|d| d.date);
    let current = raw
        .current_conditions
        .map(|c| parse_conditions(c, anchor))
        .transpose()?;

    Ok(Forecast {
        latitude: raw.latitude,
        longitude: raw.longitude,
        timezone: raw.timezone,
        current,
        days,
    })
}

fn parse_precip_series(raw: RawTimelineResponse) -> Result<PrecipSeries, VisualCrossingError> {
    let days = raw
        .days
        .into_iter()
        .map(|day| {
            let date = parse_date(&day.datetime)?;
            let hours = day
                .hours
                .into_iter()
                .map(|hour| {
                    Ok(PrecipSeriesHour {
                        timestamp: parse_timestamp(&hour.datetime, Some(date))?,
                        precip: hour.precip,
                    })
                })
                .collect::<Result<Vec<_>, VisualCrossingError>>()?;

            Ok(PrecipSeriesDay {
                date,
                precip: day.precip,
                hours,
            })
        })
        .collect::<Result<Vec<_>, VisualCrossingError>>()?;

    Ok(PrecipSeries { days })
}

fn parse_conditions(
    raw: RawConditions,
    anchor: Option<NaiveDate>,
) -> Result<Conditions, VisualCrossingError> {
    Ok(Conditions {
        observed_at: parse_timestamp(&raw.datetime, anchor)?,
        temperature: raw.temp,
        apparent_temperature: raw.feelslike,
        humidity: raw.humidity,
        pressure: raw.pressure,
        wind_speed: raw.windspeed,
        wind_bearing: raw.winddir,
        wind_gust: raw.windgust,
        cloud_cover: raw.cloudcover,
        visibility: raw.visibility,
        uv_index: raw.uvindex,
        dew_point: raw.dew,
        precip: raw.precip,
        conditions: raw.conditions,
        icon: raw.icon,
    })
}

fn parse_day(raw: RawDay) -> Result<Day, VisualCrossingError> {
    let date = parse_date(&raw.datetime)?;
    let hours = raw
        .hours
        .into_iter()
        .map(|h| parse_hour(h, date))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Day {
        date,
        temperature_max: raw.tempmax,
        temperature_min: raw.tempmin,
        humidity: raw.humidity,
        pressure: raw.pressure,
        wind_speed: raw.windspeed,
        wind_bearing: raw.winddir,
        uv_index: raw.uvindex,
        precip: raw.precip,
        precip_probability: raw.precipprob,
        icon: raw.icon,
        hours,
    })
}

fn parse_hour(raw: RawHour, day: NaiveDate) -> Result<Hour, VisualCrossingError> {
    Ok(Hour {
        timestamp: parse_timestamp(&raw.datetime, Some(day))?,
        temperature: raw.temp,
        apparent_temperature: raw.feelslike,
        humidity: raw.humidity,
        wind_speed: raw.windspeed,
        wind_bearing: raw.winddir,
        cloud_cover: raw.cloudcover,
        precip: raw.precip,
        precip_probability: raw.precipprob,
        icon: raw.icon,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate, VisualCrossingError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| VisualCrossingError::ParseError(format!("Invalid date {s:?}: {e}")))
}

/// Parse a timeline timestamp
///
/// Day and current-conditions entries carry a time-of-day only
/// ("15:00:00"), which is combined with the owning day's date. Full
/// datetimes are accepted as well.
fn parse_timestamp(s: &str, day: Option<NaiveDate>) -> Result<NaiveDateTime, VisualCrossingError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }

    if let Some(date) = day {
        if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M:%S") {
            return Ok(date.and_time(time));
        }
        if let Ok(time) = NaiveTime::parse_from_str(s, "%H:%M") {
            return Ok(date.and_time(time));
        }
    }

    Err(VisualCrossingError::ParseError(format!(
        "Invalid timestamp format: {s:?}"
    )))
}
