//! Persistent user preferences for Skycast: unit, theme, last city and
//! favorites, plus city-name autocomplete.

pub mod backend;
pub mod favorites;
pub mod prefs;
pub mod sqlite;
pub mod suggest;

pub use backend::{MemoryPreferenceStore, PreferenceStore, StoreError, StoreResult};
pub use favorites::{AddOutcome, Favorites, FAVORITES_CAPACITY};
pub use prefs::{Preferences, Theme};
pub use sqlite::SqlitePreferenceStore;
pub use suggest::suggest;
