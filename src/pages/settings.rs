use cms_kernel::settings::{Environment, Settings, Theme};
use cms_store::{StoreError, ThemePreference};
use serde::Serialize;

/// What the settings page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsView {
    pub theme: Theme,
    pub api_base_url: String,
    pub environment: Environment,
}

/// Theme controls and read-only connection details.
pub struct SettingsPage<'a> {
    theme: &'a mut ThemePreference,
    settings: &'a Settings,
}

impl<'a> SettingsPage<'a> {
    pub fn new(theme: &'a mut ThemePreference, settings: &'a Settings) -> Self {
        Self { theme, settings }
    }

    pub fn view(&self) -> SettingsView {
        SettingsView {
            theme: self.theme.current(),
            api_base_url: self.settings.api.base_url.clone(),
            environment: self.settings.environment.clone(),
        }
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        self.theme.toggle()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.theme.set(theme)
    }
}
