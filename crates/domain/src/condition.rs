//! Condition mapping
//!
//! Maps Visual Crossing icon/condition strings to the small set of
//! canonical condition categories used by consumers. The mapping is
//! many-to-one and stateless; strings without a mapping pass through
//! unchanged.

/// Map a Visual Crossing condition string to its canonical category
///
/// Unrecognized strings are returned as-is.
#[must_use]
pub fn canonical_condition(raw: &str) -> &str {
    match raw {
        "clear-day" => "sunny",
        "clear-night" => "clear-night",
        "cloudy" => "cloudy",
        "fog" => "fog",
        "hail" => "hail",
        "partly-cloudy-day" | "partly-cloudy-night" => "partlycloudy",
        "rain" | "showers-day" | "showers-night" => "rainy",
        "rain-snow" | "rain-snow-showers-day" | "rain-snow-showers-night" | "sleet" => {
            "snowy-rainy"
        },
        "snow" | "snow-showers-day" | "snow-showers-night" => "snowy",
        "thunder" => "lightning",
        "thunder-rain" | "thunder-showers-day" | "thunder-showers-night" => "lightning-rainy",
        "wind" => "windy",
        other => other,
    }
}
