//! Infrastructure layer
//!
//! Concrete wiring for the application ports: the Visual Crossing
//! adapters, the background pollers with their atomically swapped
//! snapshots, configuration loading, and logging setup.

pub mod adapters;
pub mod app;
pub mod config;
pub mod poller;
pub mod telemetry;

pub use adapters::{PrecipitationAdapter, WeatherAdapter};
pub use app::{App, AppError};
pub use config::{AppConfig, LocationConfig, PollingConfig};
pub use poller::{Poller, PollerHandle, PollerStats};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
