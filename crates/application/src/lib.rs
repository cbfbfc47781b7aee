//! Application layer for CrossingWatch
//!
//! Defines the ports each poller fetches through, the snapshot read-side
//! contract, the poll error taxonomy, and the read-only view services
//! consumers use to observe the latest snapshots.

pub mod error;
pub mod ports;
pub mod services;

pub use error::PollError;
pub use ports::{
    Clock, CurrentConditions, DailyForecast, FixedClock, HourlyForecast, SnapshotFetch,
    SnapshotSource, SystemClock, WeatherSnapshot,
};
pub use services::{PrecipitationView, RainfallTotals, WeatherView};
