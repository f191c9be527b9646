//! Display-ready projection of a [`WeatherReport`] and the presenter seam.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::summarize_days;
use crate::hourly::{hourly_window, DEFAULT_HOURLY_WINDOW};
use crate::local_time::{clock_label, TimeZonePolicy};
use crate::types::{Backdrop, DaySummary, HourlyPoint, UnitSystem, WeatherReport};

/// Renders dashboards and transient notices.
pub trait Presenter {
    fn set_loading(&mut self, loading: bool);

    fn render(&mut self, view: &DashboardView);

    fn notice(&mut self, message: &str);
}

/// Parameters that shape a view without changing the underlying data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub unit: UnitSystem,
    pub policy: TimeZonePolicy,
    pub hourly_window: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            unit: UnitSystem::Metric,
            policy: TimeZonePolicy::LocationOffset,
            hourly_window: DEFAULT_HOURLY_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    /// "London, GB"
    pub location: String,
    pub description: String,
    pub icon_url: String,
    pub backdrop: Backdrop,
    /// Whole degrees, display unit
    pub temperature: i32,
    pub feels_like: i32,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub pressure_hpa: u32,
    pub cloud_cover_pct: u8,
    /// Location-local "HH:MM"
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub unit: UnitSystem,
    pub current: CurrentView,
    pub days: Vec<DaySummary>,
    pub hourly: Vec<HourlyPoint>,
    pub fetched_at: DateTime<Utc>,
}

impl DashboardView {
    pub fn build(report: &WeatherReport, options: &ViewOptions) -> Self {
        let unit = options.unit;
        let current = &report.current;
        // Sunrise/sunset are always shown in the location's own clock
        let clock = |ts: i64| {
            TimeZonePolicy::LocationOffset
                .localize(ts, current.utc_offset_seconds)
                .map(|local| clock_label(&local))
                .unwrap_or_else(|| "--:--".to_string())
        };

        Self {
            unit,
            current: CurrentView {
                location: current.display_name(),
                description: current.condition.display_description(),
                icon_url: current.condition.icon_url(),
                backdrop: current.condition.backdrop(),
                temperature: unit.whole_degrees(current.temperature_c),
                feels_like: unit.whole_degrees(current.feels_like_c),
                humidity_pct: current.humidity_pct,
                wind_speed: unit.display_wind(current.wind_speed_mps),
                pressure_hpa: current.pressure_hpa,
                cloud_cover_pct: current.cloud_cover_pct,
                sunrise: clock(current.sunrise),
                sunset: clock(current.sunset),
            },
            days: summarize_days(&report.series, options.policy, unit),
            hourly: hourly_window(&report.series, options.hourly_window, options.policy, unit),
            fetched_at: report.fetched_at,
        }
    }
}
