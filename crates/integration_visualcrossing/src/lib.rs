//! Visual Crossing weather integration
//!
//! Client for the Visual Crossing Timeline API
//! (<https://www.visualcrossing.com/resources/documentation/weather-api/timeline-weather-api/>).
//! Provides the full current-conditions/forecast payload and a restricted
//! precipitation-only series for a fixed date window.

pub mod client;
mod models;

pub use client::{VisualCrossingClient, VisualCrossingConfig, VisualCrossingError};
pub use models::{
    Conditions, Day, Forecast, Hour, PrecipSeries, PrecipSeriesDay, PrecipSeriesHour,
};
