//! Adapters wiring the application ports to the Visual Crossing client

mod precipitation_adapter;
mod weather_adapter;

pub use precipitation_adapter::PrecipitationAdapter;
pub use weather_adapter::WeatherAdapter;
