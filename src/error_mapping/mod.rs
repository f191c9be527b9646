//! Maps crate-level errors to skycast_core::AppError for consistent user-facing messages.
//! Each source crate has its own module to keep mappings small and readable.

mod startup;
mod store;
mod weather;

pub use startup::map_startup_error;
pub use store::map_store_error;
pub use weather::{map_location_error, map_weather_error};
