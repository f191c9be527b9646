//! Near-term trend: the first few forecast samples, unaggregated.

use crate::local_time::{clock_label, TimeZonePolicy};
use crate::types::{ForecastSeries, HourlyPoint, UnitSystem};

/// Eight 3-hour samples, roughly the next 24 hours
pub const DEFAULT_HOURLY_WINDOW: usize = 8;

/// First `min(window, len)` samples as chart points. Temperatures are
/// converted into `unit` but never rounded or averaged.
pub fn hourly_window(
    series: &ForecastSeries,
    window: usize,
    policy: TimeZonePolicy,
    unit: UnitSystem,
) -> Vec<HourlyPoint> {
    let offset = series.utc_offset_seconds();

    series
        .samples()
        .iter()
        .take(window)
        .map(|sample| HourlyPoint {
            timestamp: sample.timestamp,
            label: policy
                .localize(sample.timestamp, offset)
                .map(|local| clock_label(&local))
                .unwrap_or_default(),
            temperature: unit.display_temperature(sample.temperature_c),
        })
        .collect()
}
