use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Display unit system. Data is always fetched in metric; this only
/// selects how values are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Preference-store spelling (`metric` / `imperial`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }

    /// Parse the preference-store spelling
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Some(Self::Metric),
            "imperial" => Some(Self::Imperial),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
        }
    }

    pub fn speed_label(&self) -> &'static str {
        match self {
            Self::Metric => "m/s",
            Self::Imperial => "mph",
        }
    }
}

/// Background styling derived from a condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backdrop {
    Sunny,
    Rainy,
    Cloudy,
    Snowy,
    Plain,
}

impl Backdrop {
    /// Classify an OpenWeatherMap `main` code ("Clear", "Drizzle", ...)
    pub fn from_code(code: &str) -> Self {
        let code = code.to_lowercase();
        if code.contains("clear") {
            Self::Sunny
        } else if code.contains("rain") || code.contains("drizzle") || code.contains("thunder") {
            Self::Rainy
        } else if code.contains("cloud") {
            Self::Cloudy
        } else if code.contains("snow") {
            Self::Snowy
        } else {
            Self::Plain
        }
    }
}

/// Weather condition as reported by the gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    /// Short category, e.g. "Clear", "Rain", "Clouds"
    pub code: String,
    /// Human-readable description, e.g. "light rain"
    pub description: String,
    /// Icon identifier, e.g. "10d"
    pub icon: String,
}

impl Condition {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }

    /// Description with its first letter upper-cased
    pub fn display_description(&self) -> String {
        let mut chars = self.description.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        }
    }

    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }

    pub fn backdrop(&self) -> Backdrop {
        Backdrop::from_code(&self.code)
    }
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// What the user asked to look up
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::City(name) => write!(f, "{}", name),
            Self::Coordinates(c) => write!(f, "{:.2}, {:.2}", c.latitude, c.longitude),
        }
    }
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Seconds since the UTC epoch
    pub timestamp: i64,
    pub temperature_c: f64,
    pub condition: Condition,
}

/// Timestamp-ordered forecast samples plus the location's UTC offset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    samples: Vec<ForecastSample>,
    utc_offset_seconds: i32,
}

impl ForecastSeries {
    /// Build a series, rejecting samples that go back in time.
    pub fn new(
        samples: Vec<ForecastSample>,
        utc_offset_seconds: i32,
    ) -> Result<Self, WeatherError> {
        if let Some(pair) = samples.windows(2).find(|w| w[1].timestamp < w[0].timestamp) {
            return Err(WeatherError::MalformedResponse(format!(
                "forecast samples out of order: {} after {}",
                pair[1].timestamp, pair[0].timestamp
            )));
        }
        Ok(Self {
            samples,
            utc_offset_seconds,
        })
    }

    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    pub fn utc_offset_seconds(&self) -> i32 {
        self.utc_offset_seconds
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The "now" snapshot for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub cloud_cover_pct: u8,
    pub sunrise: i64,
    pub sunset: i64,
    pub utc_offset_seconds: i32,
    pub condition: Condition,
}

impl CurrentConditions {
    /// "Name, CC" for headings
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }

    /// "Name,CC" as persisted for the last-city preference
    pub fn last_city_key(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{},{}", self.name, self.country)
        }
    }
}

/// One calendar day of the multi-day summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// e.g. "Mon, Jan 5"
    pub label: String,
    /// Mean temperature rounded to a whole degree, display unit
    pub avg_temp: i32,
    /// Unrounded, display unit
    pub min_temp: f64,
    /// Unrounded, display unit
    pub max_temp: f64,
    pub sample_count: usize,
    pub condition: Condition,
}

/// One point of the near-term trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyPoint {
    pub timestamp: i64,
    /// Local time of day, e.g. "15:00"
    pub label: String,
    /// Unrounded, display unit
    pub temperature: f64,
}

/// Current conditions and forecast fetched together for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub series: ForecastSeries,
    pub fetched_at: DateTime<Utc>,
}

/// Location service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("API key is missing or still a placeholder")]
    MissingCredential,
    #[error("Location not found: {0}")]
    NotFound(String),
    #[error("API key rejected")]
    Unauthorized,
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Location error: {0}")]
    Location(#[from] LocationError),
    #[error("Query superseded by a newer one")]
    Superseded,
}

impl WeatherError {
    /// Superseded queries are dropped silently rather than reported
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
