//! Application services - read-only views over poller snapshots

mod precipitation_view;
mod weather_view;

pub use precipitation_view::{PrecipitationView, RainfallTotals};
pub use weather_view::WeatherView;
