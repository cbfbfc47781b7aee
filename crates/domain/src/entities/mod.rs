//! Domain entities

mod precip_timeline;

pub use precip_timeline::{PrecipDay, PrecipHour, PrecipTimeline};
