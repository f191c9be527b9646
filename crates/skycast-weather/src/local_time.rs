//! Local-time resolution for forecast timestamps.
//!
//! OpenWeatherMap reports sample times as UTC epoch seconds together with the
//! location's UTC offset. Which offset decides a sample's calendar day is a
//! caller choice, not something the pipeline assumes.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// How a UTC timestamp is mapped onto a local calendar/clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeZonePolicy {
    /// Use the raw UTC timestamp
    Utc,
    /// Shift by the offset reported with the forecast location
    #[default]
    LocationOffset,
    /// Shift by a fixed number of seconds east of UTC
    Fixed(i32),
}

impl TimeZonePolicy {
    /// Effective offset, given the offset reported by the data source.
    /// Out-of-range offsets fall back to UTC.
    pub fn offset(&self, location_offset_seconds: i32) -> FixedOffset {
        let seconds = match self {
            Self::Utc => 0,
            Self::LocationOffset => location_offset_seconds,
            Self::Fixed(seconds) => *seconds,
        };
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }

    pub fn localize(
        &self,
        timestamp: i64,
        location_offset_seconds: i32,
    ) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;
        Some(utc.with_timezone(&self.offset(location_offset_seconds)))
    }

    pub fn local_date(&self, timestamp: i64, location_offset_seconds: i32) -> Option<NaiveDate> {
        self.localize(timestamp, location_offset_seconds)
            .map(|dt| dt.date_naive())
    }
}

/// "Mon, Jan 5"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// "15:00"
pub fn clock_label(local: &DateTime<FixedOffset>) -> String {
    local.format("%H:%M").to_string()
}
