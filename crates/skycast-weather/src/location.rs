//! Device position lookup with a bounded wait and a default-city fallback.

use async_trait::async_trait;
use std::time::Duration;

use crate::types::{Coordinates, LocationError, LocationQuery};

/// Something that can report where the user is.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from configuration; absent coordinates behave like a
/// denied permission prompt.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocation {
    coordinates: Option<Coordinates>,
}

impl ConfiguredLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for ConfiguredLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        self.coordinates.ok_or(LocationError::PermissionDenied)
    }
}

/// Wait at most `timeout` for a position.
pub async fn locate_within(
    source: &dyn LocationSource,
    timeout: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(timeout, source.locate()).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout),
    }
}

/// Query for the user's position, or `default_city` when the position is
/// denied, unavailable or too slow. Never fails.
pub async fn resolve_start_query(
    source: &dyn LocationSource,
    timeout: Duration,
    default_city: &str,
) -> LocationQuery {
    match locate_within(source, timeout).await {
        Ok(coordinates) => {
            tracing::info!(
                "Got location: {}, {}",
                coordinates.latitude,
                coordinates.longitude
            );
            LocationQuery::Coordinates(coordinates)
        }
        Err(e) => {
            tracing::warn!("Location unavailable ({}), falling back to {}", e, default_city);
            LocationQuery::City(default_city.to_string())
        }
    }
}
