//! Precipitation adapter - fetches the rolling rainfall series
//!
//! Implements the precipitation side of the snapshot-fetch port. Each
//! fetch requests yesterday through seven days ahead so every rolling
//! aggregate window is fully covered, and converts the provider series
//! into the domain timeline.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use tracing::{debug, instrument};

use application::{Clock, PollError, SnapshotFetch};
use domain::{GeoLocation, PrecipDay, PrecipHour, PrecipTimeline};
use integration_visualcrossing::{PrecipSeries, VisualCrossingClient};

/// Days of history requested before today
const PAST_DAYS: u64 = 1;
/// Days of forecast requested after today
const FUTURE_DAYS: u64 = 7;

/// Fetches precipitation timelines for a fixed location
pub struct PrecipitationAdapter {
    client: Arc<VisualCrossingClient>,
    location: GeoLocation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PrecipitationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrecipitationAdapter")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl PrecipitationAdapter {
    /// Create an adapter for one location
    pub fn new(
        client: Arc<VisualCrossingClient>,
        location: GeoLocation,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            location,
            clock,
        }
    }

    /// Requested date window around `today`, both ends inclusive
    fn window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today - Days::new(PAST_DAYS), today + Days::new(FUTURE_DAYS))
    }

    fn to_timeline(series: PrecipSeries) -> PrecipTimeline {
        PrecipTimeline::new(
            series
                .days
                .into_iter()
                .map(|day| PrecipDay {
                    date: day.date,
                    precip: day.precip,
                    hours: day
                        .hours
                        .into_iter()
                        .map(|hour| PrecipHour {
                            timestamp: hour.timestamp,
                            precip: hour.precip,
                        })
                        .collect(),
                })
                .collect(),
        )
    }
}

#[async_trait]
impl SnapshotFetch<PrecipTimeline> for PrecipitationAdapter {
    /// Fetch the current timeline
    ///
    /// Unlike the weather fetch, every failure here is a failed update:
    /// the rainfall totals go stale the moment a poll is missed, so none
    /// of the error classes are retried silently.
    #[instrument(skip(self), fields(location = %self.location))]
    async fn fetch(&self) -> Result<PrecipTimeline, PollError> {
        let today = self.clock.now_utc().date_naive();
        let (start, end) = Self::window(today);

        let series = self
            .client
            .fetch_precipitation(
                self.location.latitude(),
                self.location.longitude(),
                start,
                end,
            )
            .await
            .map_err(|e| PollError::UpdateFailed(e.to_string()))?;

        debug!(days = series.days.len(), "retrieved precipitation series");
        Ok(Self::to_timeline(series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use integration_visualcrossing::{PrecipSeriesDay, PrecipSeriesHour};

    #[test]
    fn window_spans_yesterday_through_next_week() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let (start, end) = PrecipitationAdapter::window(today);

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
    }

    #[test]
    fn window_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (start, end) = PrecipitationAdapter::window(today);

        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 3, 8).unwrap());
    }

    #[test]
    fn series_converts_to_timeline_preserving_nulls() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = PrecipSeries {
            days: vec![PrecipSeriesDay {
                date,
                precip: Some(5.0),
                hours: vec![
                    PrecipSeriesHour {
                        timestamp: date.and_hms_opt(10, 0, 0).unwrap(),
                        precip: Some(2.0),
                    },
                    PrecipSeriesHour {
                        timestamp: date.and_hms_opt(11, 0, 0).unwrap(),
                        precip: None,
                    },
                ],
            }],
        };

        let timeline = PrecipitationAdapter::to_timeline(series);
        assert_eq!(timeline.days.len(), 1);
        assert_eq!(timeline.days[0].precip, Some(5.0));
        assert_eq!(timeline.days[0].hours[0].precip, Some(2.0));
        assert!(timeline.days[0].hours[1].precip.is_none());
    }

    #[test]
    fn empty_series_converts_to_empty_timeline() {
        let timeline = PrecipitationAdapter::to_timeline(PrecipSeries::default());
        assert!(timeline.is_empty());
    }
}
