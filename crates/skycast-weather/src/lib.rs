//! Weather data for Skycast
//!
//! Fetches current conditions and the 3-hour forecast from OpenWeatherMap,
//! folds the forecast into per-day summaries and a short hourly window, and
//! projects everything into a display-ready dashboard in the chosen units.

pub mod aggregate;
pub mod cache;
pub mod hourly;
pub mod local_time;
pub mod location;
pub mod provider;
pub mod query;
pub mod service;
pub mod types;
pub mod units;
pub mod view;

pub use aggregate::{summarize_days, MAX_FORECAST_DAYS};
pub use cache::WeatherCache;
pub use hourly::{hourly_window, DEFAULT_HOURLY_WINDOW};
pub use local_time::TimeZonePolicy;
pub use location::{resolve_start_query, ConfiguredLocation, LocationSource};
pub use provider::{WeatherGateway, WeatherProvider, DEFAULT_BASE_URL};
pub use service::WeatherService;
pub use types::*;
pub use view::{CurrentView, DashboardView, Presenter, ViewOptions};
