use std::sync::Arc;

use cms_kernel::settings::Theme;

use crate::{KeyValueStore, StoreError};

pub const THEME_KEY: &str = "theme";

/// Persisted light/dark preference.
pub struct ThemePreference {
    store: Arc<dyn KeyValueStore>,
    current: Theme,
}

impl ThemePreference {
    /// Read the persisted theme, falling back to `default` when nothing
    /// (or something unrecognised) is stored.
    pub fn load(store: Arc<dyn KeyValueStore>, default: Theme) -> Result<Self, StoreError> {
        let current = match store.get(THEME_KEY)? {
            Some(saved) => saved.parse().unwrap_or_else(|_| {
                tracing::warn!(saved = %saved, "ignoring unrecognised theme preference");
                default
            }),
            None => default,
        };
        Ok(Self { store, current })
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn set(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<Theme, StoreError> {
        let next = self.current.toggled();
        self.set(next)?;
        Ok(next)
    }
}
