//! Dashboard controller.
//!
//! Owns the application state for one session: the weather service with its
//! cached report, the persisted preferences and the presenter. Every user
//! action goes through here, and every failure ends as a notice rather than
//! an error return.

use std::time::Duration;

use skycast_store::{AddOutcome, Preferences, StoreError, Theme};
use skycast_weather::location::locate_within;
use skycast_weather::{
    LocationQuery, LocationSource, Presenter, TimeZonePolicy, ViewOptions, WeatherError,
    WeatherGateway, WeatherService,
};

use crate::error_mapping::{map_location_error, map_store_error, map_weather_error};

const SUGGESTION_LIMIT: usize = 5;

/// Settings that come from configuration rather than user preferences
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub default_city: String,
    pub policy: TimeZonePolicy,
    pub hourly_window: usize,
    pub geolocation_timeout: Duration,
}

pub struct Dashboard<G, P> {
    service: WeatherService<G>,
    prefs: Preferences,
    presenter: P,
    location: Box<dyn LocationSource>,
    settings: DashboardSettings,
}

impl<G: WeatherGateway, P: Presenter> Dashboard<G, P> {
    pub fn new(
        service: WeatherService<G>,
        prefs: Preferences,
        presenter: P,
        location: Box<dyn LocationSource>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            service,
            prefs,
            presenter,
            location,
            settings,
        }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    #[cfg(test)]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    fn view_options(&self) -> ViewOptions {
        ViewOptions {
            unit: self.prefs.unit(),
            policy: self.settings.policy,
            hourly_window: self.settings.hourly_window,
        }
    }

    /// First screen: the last city if one was saved, otherwise the device
    /// position with the default city as fallback.
    pub async fn start(&mut self) {
        match self.prefs.last_city_query().map(str::to_string) {
            Some(city) => self.search_city(&city).await,
            None => self.show_start_location().await,
        }
    }

    async fn show_start_location(&mut self) {
        let query = skycast_weather::resolve_start_query(
            self.location.as_ref(),
            self.settings.geolocation_timeout,
            &self.settings.default_city,
        )
        .await;
        self.run_query(query).await;
    }

    pub async fn search_city(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            self.presenter.notice("Type a city name.");
            return;
        }
        self.run_query(LocationQuery::City(city.to_string())).await;
    }

    /// Look up the device position. A denied or slow position lookup is
    /// reported, then the default city is shown instead.
    pub async fn use_my_location(&mut self) {
        self.presenter.set_loading(true);
        let timeout = self.settings.geolocation_timeout;
        match locate_within(self.location.as_ref(), timeout).await {
            Ok(coordinates) => {
                self.run_query(LocationQuery::Coordinates(coordinates)).await;
            }
            Err(e) => {
                tracing::warn!("Location lookup failed: {}", e);
                let app_err = map_location_error(e);
                self.presenter.notice(app_err.user_message());
                if app_err.triggers_fallback() {
                    let city = self.settings.default_city.clone();
                    self.run_query(LocationQuery::City(city)).await;
                } else {
                    self.presenter.set_loading(false);
                }
            }
        }
    }

    async fn run_query(&mut self, query: LocationQuery) {
        self.presenter.set_loading(true);
        let result = self.service.search(query.clone()).await;
        self.presenter.set_loading(false);

        match result {
            Ok(report) => {
                if let Err(e) = self.prefs.record_last_city(&report.current.last_city_key()) {
                    self.report_store_error(e);
                }
                self.render_cached();
            }
            Err(e) if e.is_superseded() => {
                tracing::debug!("Result for {} superseded", query);
            }
            Err(e) => self.report_weather_error(&query, e),
        }
    }

    fn render_cached(&mut self) -> bool {
        match self.service.view(&self.view_options()) {
            Some(view) => {
                self.presenter.render(&view);
                true
            }
            None => false,
        }
    }

    /// Flip units. Re-derives the current dashboard from the cached report;
    /// with nothing cached, the last city is fetched again.
    pub async fn toggle_unit(&mut self) {
        if let Err(e) = self.prefs.toggle_unit() {
            self.report_store_error(e);
        }
        tracing::info!("Unit set to {}", self.prefs.unit().as_str());

        if self.render_cached() {
            return;
        }
        match self.prefs.last_city_query().map(str::to_string) {
            Some(city) => self.search_city(&city).await,
            None => self
                .presenter
                .notice("Unit changed. Search a city to update values."),
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        if let Err(e) = self.prefs.toggle_theme() {
            self.report_store_error(e);
        }
        let theme = self.prefs.theme();
        tracing::info!("Theme set to {}", theme.as_str());
        theme
    }

    pub fn add_favorite(&mut self, city: &str) {
        let city = city.trim().to_string();
        match self.prefs.add_favorite(&city) {
            Ok(AddOutcome::Added) => {
                self.presenter
                    .notice(&format!("Added {} to favorites.", city));
            }
            Ok(AddOutcome::Duplicate) => {
                self.presenter
                    .notice(&format!("{} is already a favorite.", city));
            }
            Ok(AddOutcome::Blank) => self.presenter.notice("Type a city name."),
            Err(e) => self.report_store_error(e),
        }
    }

    pub fn remove_favorite(&mut self, city: &str) {
        match self.prefs.remove_favorite(city) {
            Ok(true) => self
                .presenter
                .notice(&format!("Removed {} from favorites.", city.trim())),
            Ok(false) => self
                .presenter
                .notice(&format!("{} is not a favorite.", city.trim())),
            Err(e) => self.report_store_error(e),
        }
    }

    /// Autocomplete over favorites and the last searched city.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let candidates = self
            .prefs
            .favorites()
            .iter()
            .chain(self.prefs.last_city_query());
        skycast_store::suggest(input, candidates, SUGGESTION_LIMIT)
    }

    fn report_weather_error(&mut self, query: &LocationQuery, e: WeatherError) {
        tracing::error!("Weather query for {} failed: {}", query, e);
        let app_err = map_weather_error(e);
        self.presenter.notice(app_err.user_message());
    }

    fn report_store_error(&mut self, e: StoreError) {
        tracing::warn!("Preference store error: {}", e);
        let app_err = map_store_error(e);
        self.presenter.notice(app_err.user_message());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use async_trait::async_trait;
    use skycast_store::{MemoryPreferenceStore, PreferenceStore};
    use skycast_weather::{
        Condition, ConfiguredLocation, Coordinates, CurrentConditions, DashboardView,
        ForecastSample, ForecastSeries, LocationError, UnitSystem,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    const START: i64 = 1_710_115_200;

    #[derive(Default)]
    struct FakeGateway {
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl WeatherGateway for FakeGateway {
        async fn current_conditions(
            &self,
            query: &LocationQuery,
        ) -> Result<CurrentConditions, WeatherError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let (name, coordinates) = match query {
                LocationQuery::City(name) if name == "Atlantis" => {
                    return Err(WeatherError::NotFound(name.clone()))
                }
                LocationQuery::City(name) if name == "Keyless" => {
                    return Err(WeatherError::MissingCredential)
                }
                LocationQuery::City(name) => (name.clone(), Coordinates::new(10.0, 20.0)),
                LocationQuery::Coordinates(c) => ("Here".to_string(), *c),
            };
            Ok(CurrentConditions {
                name,
                country: "ZZ".into(),
                coordinates,
                temperature_c: 20.0,
                feels_like_c: 18.0,
                humidity_pct: 60,
                wind_speed_mps: 3.0,
                pressure_hpa: 1010,
                cloud_cover_pct: 40,
                sunrise: START + 6 * 3600,
                sunset: START + 18 * 3600,
                utc_offset_seconds: 0,
                condition: Condition::new("Clouds", "scattered clouds", "03d"),
            })
        }

        async fn forecast_series(
            &self,
            _coordinates: Coordinates,
        ) -> Result<ForecastSeries, WeatherError> {
            let samples = (0..40)
                .map(|i| ForecastSample {
                    timestamp: START + i * 3 * 3600,
                    temperature_c: 10.0,
                    condition: Condition::new("Clear", "clear sky", "01d"),
                })
                .collect();
            ForecastSeries::new(samples, 0)
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        views: Vec<DashboardView>,
        notices: Vec<String>,
        loading: bool,
    }

    impl Presenter for RecordingPresenter {
        fn set_loading(&mut self, loading: bool) {
            self.loading = loading;
        }

        fn render(&mut self, view: &DashboardView) {
            self.views.push(view.clone());
        }

        fn notice(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    struct DeniedLocation;

    #[async_trait]
    impl LocationSource for DeniedLocation {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    fn settings() -> DashboardSettings {
        DashboardSettings {
            default_city: "London".into(),
            policy: TimeZonePolicy::LocationOffset,
            hourly_window: 8,
            geolocation_timeout: Duration::from_secs(10),
        }
    }

    fn dashboard_with(
        store: MemoryPreferenceStore,
        location: Box<dyn LocationSource>,
    ) -> Dashboard<FakeGateway, RecordingPresenter> {
        Dashboard::new(
            WeatherService::new(FakeGateway::default()),
            Preferences::load(Box::new(store)),
            RecordingPresenter::default(),
            location,
            settings(),
        )
    }

    fn dashboard() -> Dashboard<FakeGateway, RecordingPresenter> {
        dashboard_with(MemoryPreferenceStore::new(), Box::new(DeniedLocation))
    }

    #[tokio::test]
    async fn test_search_renders_and_records_last_city() {
        let mut dash = dashboard();
        dash.search_city("  Lima ").await;

        let presenter = dash.presenter();
        assert_eq!(presenter.views.len(), 1);
        assert!(!presenter.loading);
        assert_eq!(presenter.views[0].current.location, "Lima, ZZ");
        assert_eq!(presenter.views[0].days.len(), 5);
        assert_eq!(dash.preferences().last_city(), Some("Lima,ZZ"));
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected() {
        let mut dash = dashboard();
        dash.search_city("   ").await;
        assert!(dash.presenter().views.is_empty());
        assert_eq!(dash.presenter().notices, vec!["Type a city name."]);
    }

    #[tokio::test]
    async fn test_failed_search_keeps_last_good_state() {
        let mut dash = dashboard();
        dash.search_city("Lima").await;
        dash.search_city("Atlantis").await;

        assert_eq!(dash.presenter().views.len(), 1);
        assert_eq!(
            dash.presenter().notices,
            vec!["City not found. Check the name and try again."]
        );
        assert_eq!(dash.preferences().last_city(), Some("Lima,ZZ"));
    }

    #[tokio::test]
    async fn test_missing_credential_notice() {
        let mut dash = dashboard();
        dash.search_city("Keyless").await;
        assert!(dash.presenter().notices[0].contains("API key"));
    }

    #[tokio::test]
    async fn test_unit_toggle_rerenders_from_cache() {
        let mut dash = dashboard();
        dash.search_city("Lima").await;
        dash.toggle_unit().await;

        let views = &dash.presenter().views;
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].unit, UnitSystem::Imperial);
        assert_eq!(views[1].current.temperature, 68);
        assert_eq!(views[1].days[0].avg_temp, 50);
        assert_eq!(dash.service.gateway().lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unit_toggle_without_cache_refetches_last_city() {
        let store = MemoryPreferenceStore::new();
        store.set("weather_last_city", "Quito,EC").unwrap();
        let mut dash = dashboard_with(store, Box::new(DeniedLocation));

        dash.toggle_unit().await;
        assert_eq!(dash.presenter().views.len(), 1);
        assert_eq!(dash.presenter().views[0].current.location, "Quito, ZZ");
        assert_eq!(dash.presenter().views[0].unit, UnitSystem::Imperial);
    }

    #[tokio::test]
    async fn test_unit_toggle_with_nothing_to_show() {
        let mut dash = dashboard();
        dash.toggle_unit().await;
        assert_eq!(
            dash.presenter().notices,
            vec!["Unit changed. Search a city to update values."]
        );
        assert_eq!(dash.preferences().unit(), UnitSystem::Imperial);
    }

    #[tokio::test]
    async fn test_start_prefers_last_city() {
        let store = MemoryPreferenceStore::new();
        store.set("weather_last_city", "Oslo,NO").unwrap();
        let mut dash = dashboard_with(store, Box::new(DeniedLocation));
        dash.start().await;
        assert_eq!(dash.presenter().views[0].current.location, "Oslo, ZZ");
    }

    #[tokio::test]
    async fn test_start_uses_position_then_default_city() {
        let located = ConfiguredLocation::new(Some(Coordinates::new(1.5, 2.5)));
        let mut dash = dashboard_with(MemoryPreferenceStore::new(), Box::new(located));
        dash.start().await;
        assert_eq!(dash.presenter().views[0].current.location, "Here, ZZ");

        let mut dash = dashboard();
        dash.start().await;
        assert_eq!(dash.presenter().views[0].current.location, "London, ZZ");
        assert!(dash.presenter().notices.is_empty());
    }

    #[tokio::test]
    async fn test_denied_location_notices_and_falls_back() {
        let mut dash = dashboard();
        dash.use_my_location().await;
        assert_eq!(
            dash.presenter().notices,
            vec!["Location permission denied or unavailable."]
        );
        assert_eq!(dash.presenter().views[0].current.location, "London, ZZ");
    }

    #[tokio::test]
    async fn test_favorites_and_suggestions() {
        let mut dash = dashboard();
        dash.add_favorite("Lisbon");
        dash.add_favorite("Lima");
        dash.add_favorite("lisbon");
        dash.add_favorite(" ");
        assert_eq!(dash.preferences().favorites().as_slice(), &["Lima", "Lisbon"]);
        assert_eq!(
            dash.presenter().notices,
            vec![
                "Added Lisbon to favorites.",
                "Added Lima to favorites.",
                "lisbon is already a favorite.",
                "Type a city name.",
            ]
        );

        dash.search_city("Liverpool").await;
        assert_eq!(dash.suggest("li"), vec!["Lima", "Lisbon", "Liverpool"]);
        assert_eq!(dash.suggest("bon"), vec!["Lisbon"]);

        dash.remove_favorite("LIMA");
        assert_eq!(dash.preferences().favorites().as_slice(), &["Lisbon"]);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut dash = dashboard();
        assert_eq!(dash.toggle_theme(), Theme::Dark);
        assert_eq!(dash.preferences().theme(), Theme::Dark);
    }
}
