//! Last fully successful report, kept so the dashboard can be re-derived
//! (e.g. after a unit toggle) without another round-trip.

use crate::types::WeatherReport;

#[derive(Debug, Default)]
pub struct WeatherCache {
    data: Option<WeatherReport>,
    generation: u64,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `report` unless a newer generation is already cached.
    /// Returns whether the report was stored.
    pub fn update(&mut self, generation: u64, report: WeatherReport) -> bool {
        if self.data.is_some() && generation < self.generation {
            tracing::debug!(
                generation,
                cached = self.generation,
                "Discarding stale weather report"
            );
            return false;
        }
        self.data = Some(report);
        self.generation = generation;
        true
    }

    pub fn get(&self) -> Option<&WeatherReport> {
        self.data.as_ref()
    }
}
