//! OpenWeatherMap gateway: current conditions and the 5-day/3-hour forecast.
//!
//! Responses are decoded into private wire structs and then validated into
//! domain types, so a missing field surfaces as `MalformedResponse` here
//! rather than deeper in the pipeline.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::types::{
    Condition, Coordinates, CurrentConditions, ForecastSample, ForecastSeries, LocationQuery,
    WeatherError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Skycast/0.1.0";
/// Always fetch metric; display conversion happens locally.
const FETCH_UNITS: &str = "metric";

/// Source of raw weather data.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Current conditions for a city name or a coordinate pair.
    async fn current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, WeatherError>;

    /// Forecast samples for the given coordinates.
    async fn forecast_series(&self, coordinates: Coordinates)
        -> Result<ForecastSeries, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl WeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Whether the key looks usable (not empty, not a template placeholder)
    pub fn has_credential(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && !key.starts_with("YOUR_") && !key.starts_with('<')
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        subject: &str,
    ) -> Result<T, WeatherError> {
        if !self.has_credential() {
            return Err(WeatherError::MissingCredential);
        }

        params.push(("appid", self.api_key.clone()));
        params.push(("units", FETCH_UNITS.to_string()));

        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(&params).send().await?;

        Self::handle_response(response, subject).await
    }

    /// Map status codes to typed errors and decode the body.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        subject: &str,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| WeatherError::MalformedResponse(format!("JSON parse error: {}", e)))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(WeatherError::Unauthorized)
        } else if status == StatusCode::NOT_FOUND {
            Err(WeatherError::NotFound(subject.to_string()))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(WeatherError::Http {
                status: status.as_u16(),
                message: api_message(&text),
            })
        }
    }
}

#[async_trait]
impl WeatherGateway for WeatherProvider {
    #[instrument(skip(self), level = "info")]
    async fn current_conditions(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, WeatherError> {
        let params = match query {
            LocationQuery::City(name) => vec![("q", name.trim().to_string())],
            LocationQuery::Coordinates(c) => coordinate_params(*c),
        };

        let raw: OwmCurrent = self.get_json("weather", params, &query.to_string()).await?;
        let current = raw.into_domain()?;
        tracing::debug!(location = %current.display_name(), "Current conditions received");
        Ok(current)
    }

    #[instrument(skip(self), level = "info")]
    async fn forecast_series(
        &self,
        coordinates: Coordinates,
    ) -> Result<ForecastSeries, WeatherError> {
        let subject = LocationQuery::Coordinates(coordinates).to_string();
        let raw: OwmForecast = self
            .get_json("forecast", coordinate_params(coordinates), &subject)
            .await?;
        let series = raw.into_domain()?;
        tracing::debug!(samples = series.len(), "Forecast series received");
        Ok(series)
    }
}

fn coordinate_params(c: Coordinates) -> Vec<(&'static str, String)> {
    vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
}

/// Prefer the API's own `message` field over the raw body
fn api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiMessage {
        message: String,
    }

    serde_json::from_str::<ApiMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

fn malformed(what: &str) -> WeatherError {
    WeatherError::MalformedResponse(format!("missing {}", what))
}

fn percent(value: Option<f64>) -> u8 {
    value.unwrap_or(0.0).round().clamp(0.0, 100.0) as u8
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    main: Option<String>,
    description: Option<String>,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwmCurrent {
    name: Option<String>,
    coord: Option<OwmCoord>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
    main: Option<OwmMain>,
    wind: Option<OwmWind>,
    clouds: Option<OwmClouds>,
    sys: Option<OwmSys>,
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastEntry {
    dt: Option<i64>,
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmCity {
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmForecast {
    list: Option<Vec<OwmForecastEntry>>,
    city: Option<OwmCity>,
}

fn first_condition(weather: Vec<OwmCondition>) -> Result<Condition, WeatherError> {
    let first = weather
        .into_iter()
        .next()
        .ok_or_else(|| malformed("weather[0]"))?;
    let code = first.main.ok_or_else(|| malformed("weather[0].main"))?;
    let description = first.description.unwrap_or_else(|| code.to_lowercase());
    Ok(Condition {
        code,
        description,
        icon: first.icon.unwrap_or_default(),
    })
}

impl OwmCurrent {
    fn into_domain(self) -> Result<CurrentConditions, WeatherError> {
        let coord = self.coord.ok_or_else(|| malformed("coord"))?;
        let main = self.main.ok_or_else(|| malformed("main"))?;
        let temperature_c = main.temp.ok_or_else(|| malformed("main.temp"))?;
        let condition = first_condition(self.weather)?;
        let sys = self.sys.unwrap_or(OwmSys {
            country: None,
            sunrise: None,
            sunset: None,
        });

        Ok(CurrentConditions {
            name: self.name.unwrap_or_default(),
            country: sys.country.unwrap_or_default(),
            coordinates: Coordinates::new(coord.lat, coord.lon),
            temperature_c,
            feels_like_c: main.feels_like.unwrap_or(temperature_c),
            humidity_pct: percent(main.humidity),
            wind_speed_mps: self.wind.and_then(|w| w.speed).unwrap_or(0.0),
            pressure_hpa: main.pressure.unwrap_or(0.0).round().max(0.0) as u32,
            cloud_cover_pct: percent(self.clouds.and_then(|c| c.all)),
            sunrise: sys.sunrise.unwrap_or(0),
            sunset: sys.sunset.unwrap_or(0),
            utc_offset_seconds: self.timezone.unwrap_or(0),
            condition,
        })
    }
}

impl OwmForecast {
    fn into_domain(self) -> Result<ForecastSeries, WeatherError> {
        let list = self.list.ok_or_else(|| malformed("list"))?;
        let offset = self.city.and_then(|c| c.timezone).unwrap_or(0);

        let samples = list
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let timestamp = entry.dt.ok_or_else(|| malformed(&format!("list[{}].dt", i)))?;
                let temperature_c = entry
                    .main
                    .and_then(|m| m.temp)
                    .ok_or_else(|| malformed(&format!("list[{}].main.temp", i)))?;
                Ok(ForecastSample {
                    timestamp,
                    temperature_c,
                    condition: first_condition(entry.weather)?,
                })
            })
            .collect::<Result<Vec<_>, WeatherError>>()?;

        ForecastSeries::new(samples, offset)
    }
}
