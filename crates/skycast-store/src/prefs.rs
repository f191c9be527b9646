//! Typed user preferences backed by a [`PreferenceStore`].
//!
//! `Preferences` is loaded once at startup and writes every change straight
//! back to the store. Values that cannot be read or parsed fall back to their
//! defaults; they never stop the application from starting.

use serde::{Deserialize, Serialize};
use skycast_weather::UnitSystem;

use crate::backend::{PreferenceStore, StoreError, StoreResult};
use crate::favorites::{AddOutcome, Favorites};

pub const UNIT_KEY: &str = "weather_unit";
pub const THEME_KEY: &str = "weather_theme";
pub const LAST_CITY_KEY: &str = "weather_last_city";
pub const FAVORITES_KEY: &str = "weather_favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub struct Preferences {
    store: Box<dyn PreferenceStore>,
    unit: UnitSystem,
    theme: Theme,
    last_city: Option<String>,
    favorites: Favorites,
}

impl Preferences {
    /// Read every preference from `store`.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let unit = read(store.as_ref(), UNIT_KEY)
            .and_then(|raw| parsed(UNIT_KEY, &raw, UnitSystem::parse))
            .unwrap_or_default();
        let theme = read(store.as_ref(), THEME_KEY)
            .and_then(|raw| parsed(THEME_KEY, &raw, Theme::parse))
            .unwrap_or_default();
        let last_city = read(store.as_ref(), LAST_CITY_KEY).filter(|c| !c.trim().is_empty());
        let favorites = read(store.as_ref(), FAVORITES_KEY)
            .and_then(|raw| {
                parsed(FAVORITES_KEY, &raw, |s| {
                    serde_json::from_str::<Vec<String>>(s).ok()
                })
            })
            .map(Favorites::from_cities)
            .unwrap_or_default();

        tracing::debug!(
            unit = unit.as_str(),
            theme = theme.as_str(),
            favorites = favorites.len(),
            "Preferences loaded"
        );

        Self {
            store,
            unit,
            theme,
            last_city,
            favorites,
        }
    }

    pub fn unit(&self) -> UnitSystem {
        self.unit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Last successfully shown location as `"Name,CC"`.
    pub fn last_city(&self) -> Option<&str> {
        self.last_city.as_deref()
    }

    /// City part of [`last_city`](Self::last_city), suitable for a new search.
    pub fn last_city_query(&self) -> Option<&str> {
        self.last_city
            .as_deref()
            .and_then(|c| c.split(',').next())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Flip metric/imperial. The new value is kept for this session even if
    /// it cannot be persisted.
    pub fn toggle_unit(&mut self) -> StoreResult<UnitSystem> {
        self.unit = self.unit.toggled();
        self.store.set(UNIT_KEY, self.unit.as_str())?;
        Ok(self.unit)
    }

    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn record_last_city(&mut self, key: &str) -> StoreResult<()> {
        self.last_city = Some(key.to_string());
        self.store.set(LAST_CITY_KEY, key)
    }

    pub fn add_favorite(&mut self, city: &str) -> StoreResult<AddOutcome> {
        let outcome = self.favorites.add(city);
        if outcome == AddOutcome::Added {
            self.persist_favorites()?;
        }
        Ok(outcome)
    }

    pub fn remove_favorite(&mut self, city: &str) -> StoreResult<bool> {
        let removed = self.favorites.remove(city);
        if removed {
            self.persist_favorites()?;
        }
        Ok(removed)
    }

    fn persist_favorites(&self) -> StoreResult<()> {
        let encoded =
            serde_json::to_string(&self.favorites).map_err(|source| StoreError::Encode {
                key: FAVORITES_KEY.to_string(),
                source,
            })?;
        self.store.set(FAVORITES_KEY, &encoded)
    }
}

fn read(store: &dyn PreferenceStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to read preference {}: {}", key, e);
            None
        }
    }
}

fn parsed<T>(key: &str, raw: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    let value = parse(raw);
    if value.is_none() {
        tracing::warn!("Ignoring unrecognized value for {}: {:?}", key, raw);
    }
    value
}
