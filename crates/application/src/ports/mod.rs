//! Application ports
//!
//! Interfaces between the view services and the runtime that feeds them.

mod clock;
mod snapshot;
mod weather;

pub use clock::{Clock, FixedClock, SystemClock};
pub use snapshot::{SnapshotFetch, SnapshotSource};
pub use weather::{CurrentConditions, DailyForecast, HourlyForecast, WeatherSnapshot};
