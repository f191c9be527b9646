//! Bounded, most-recent-first list of favorite cities.

use serde::{Deserialize, Serialize};

use crate::suggest::fold_case;

pub const FAVORITES_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Already present (compared case-insensitively); list unchanged.
    Duplicate,
    /// Empty after trimming; list unchanged.
    Blank,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    cities: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted entries, repairing anything a hand-edited store
    /// might contain: blanks, duplicates, overflow.
    pub fn from_cities<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut favorites = Self::new();
        for city in cities {
            let city = city.as_ref().trim();
            if city.is_empty() || favorites.contains(city) {
                continue;
            }
            if favorites.cities.len() == FAVORITES_CAPACITY {
                break;
            }
            favorites.cities.push(city.to_string());
        }
        favorites
    }

    /// Put `city` at the front, evicting the oldest entry when full.
    pub fn add(&mut self, city: &str) -> AddOutcome {
        let city = city.trim();
        if city.is_empty() {
            return AddOutcome::Blank;
        }
        if self.contains(city) {
            return AddOutcome::Duplicate;
        }
        self.cities.insert(0, city.to_string());
        self.cities.truncate(FAVORITES_CAPACITY);
        AddOutcome::Added
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, city: &str) -> bool {
        let before = self.cities.len();
        let city = fold_case(city);
        self.cities.retain(|c| fold_case(c) != city);
        self.cities.len() != before
    }

    pub fn contains(&self, city: &str) -> bool {
        let city = fold_case(city);
        self.cities.iter().any(|c| fold_case(c) == city)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
