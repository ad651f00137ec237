//! Persisted display preferences.

use std::sync::Arc;

use crate::storage::KvStore;

/// Storage key for the persisted theme mode.
pub const THEME_KEY: &str = "theme_mode";

/// Theme mode for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme; the client starts here.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// Returns the persisted string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Parses a persisted value; anything unrecognized falls back to
    /// light.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Self::Dark,
            _ => Self::Light,
        }
    }
}

/// Loads and stores the theme preference.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: Arc<S>,
}

impl<S: KvStore> ThemePreference<S> {
    /// Creates a preference view over a shared store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the stored mode, defaulting to light.
    #[must_use]
    pub fn load(&self) -> ThemeMode {
        self.store
            .get(THEME_KEY)
            .map_or_else(ThemeMode::default, |value| ThemeMode::from_stored(&value))
    }

    /// Persists a mode.
    pub fn save(&self, mode: ThemeMode) {
        self.store.set(THEME_KEY, mode.as_str());
    }

    /// Flips the stored mode and returns the new value.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.load().toggled();
        self.save(next);
        next
    }
}
