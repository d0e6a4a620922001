use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "CMS_ENV";
const CONFIG_DIR_ENV: &str = "CMS_CONFIG_DIR";

/// Deployment environment the console is running against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// and `CMS_<SECTION>__<KEY>` variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("CMS")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "ApiSettings::default_base_url")]
    pub base_url: String,
    /// No timeout unless configured.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default = "ApiSettings::default_page_size")]
    pub page_size: u32,
}

impl ApiSettings {
    fn default_base_url() -> String {
        "http://127.0.0.1:8000".to_string()
    }

    fn default_page_size() -> u32 {
        100
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: None,
            page_size: Self::default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "StorageSettings::default_path")]
    pub path: PathBuf,
}

impl StorageSettings {
    fn default_path() -> PathBuf {
        PathBuf::from(".cms/state.json")
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    /// Theme used when nothing has been persisted yet.
    #[serde(default)]
    pub default_theme: Theme,
    #[serde(default = "UiSettings::default_focus_delay_ms")]
    pub focus_delay_ms: u64,
    #[serde(default = "UiSettings::default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

impl UiSettings {
    fn default_focus_delay_ms() -> u64 {
        50
    }

    fn default_notice_ttl_ms() -> u64 {
        3000
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_theme: Theme::Light,
            focus_delay_ms: Self::default_focus_delay_ms(),
            notice_ttl_ms: Self::default_notice_ttl_ms(),
        }
    }
}

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(anyhow!("unknown theme '{}'; expected light/dark", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_api_has_no_timeout() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(settings.api.timeout_ms, None);
        assert_eq!(settings.api.page_size, 100);
    }

    #[test]
    fn default_ui_timings() {
        let ui = UiSettings::default();
        assert_eq!(ui.focus_delay_ms, 50);
        assert_eq!(ui.notice_ttl_ms, 3000);
        assert_eq!(ui.default_theme, Theme::Light);
    }

    #[test]
    fn theme_round_trips_through_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
