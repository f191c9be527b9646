//! Query orchestration: one lookup resolves current conditions, then the
//! forecast for the coordinates those conditions report. The cache only
//! ever holds a complete report from the most recent query.

use chrono::Utc;
use parking_lot::Mutex;

use crate::cache::WeatherCache;
use crate::provider::WeatherGateway;
use crate::query::{QueryTicket, QueryTracker};
use crate::types::{LocationQuery, WeatherError, WeatherReport};
use crate::view::{DashboardView, ViewOptions};

/// Lookup entry point shared by every caller.
///
/// `search` takes `&self`, so several lookups may be in flight on one
/// service at once; only the most recently started one can reach the cache.
/// The CLI starts a single lookup per run and never overlaps them.
pub struct WeatherService<G> {
    gateway: G,
    tracker: QueryTracker,
    cache: Mutex<WeatherCache>,
}

impl<G: WeatherGateway> WeatherService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tracker: QueryTracker::new(),
            cache: Mutex::new(WeatherCache::new()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Run a lookup. On success the report replaces the cached one; on any
    /// failure the cache is left exactly as it was. A query overtaken by a
    /// newer one resolves to [`WeatherError::Superseded`].
    pub async fn search(&self, query: LocationQuery) -> Result<WeatherReport, WeatherError> {
        let ticket = self.tracker.begin();
        tracing::info!(generation = ticket.generation(), "Fetching weather for {}", query);

        let report = tokio::select! {
            _ = ticket.token().cancelled() => Err(WeatherError::Superseded),
            result = self.fetch_report(&query) => result,
        }?;

        self.commit(&ticket, report)
    }

    async fn fetch_report(&self, query: &LocationQuery) -> Result<WeatherReport, WeatherError> {
        let current = self.gateway.current_conditions(query).await?;
        let series = self.gateway.forecast_series(current.coordinates).await?;
        Ok(WeatherReport {
            current,
            series,
            fetched_at: Utc::now(),
        })
    }

    fn commit(
        &self,
        ticket: &QueryTicket,
        report: WeatherReport,
    ) -> Result<WeatherReport, WeatherError> {
        if !self.tracker.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "Dropping superseded result");
            return Err(WeatherError::Superseded);
        }
        let mut cache = self.cache.lock();
        if !cache.update(ticket.generation(), report.clone()) {
            return Err(WeatherError::Superseded);
        }
        tracing::info!(
            "Weather updated for {} ({} forecast samples)",
            report.current.display_name(),
            report.series.len()
        );
        Ok(report)
    }

    /// Most recent complete report, if any.
    pub fn last_report(&self) -> Option<WeatherReport> {
        self.cache.lock().get().cloned()
    }

    /// Derive a dashboard from the cached report without a network call.
    pub fn view(&self, options: &ViewOptions) -> Option<DashboardView> {
        self.cache
            .lock()
            .get()
            .map(|report| DashboardView::build(report, options))
    }
}
