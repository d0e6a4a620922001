//! Logging bootstrap.
//!
//! Logs always go to stderr so command output on stdout stays parseable.

use anyhow::Context;
use cms_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` wins over `telemetry.filter`.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = resolve_filter(settings)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(format = ?settings.log_format, "telemetry initialised");
    }
    Ok(())
}

fn resolve_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter)
            .with_context(|| format!("invalid telemetry.filter '{}'", settings.filter)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_filter_is_validated() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Json,
            filter: "cms_http=debug,warn".into(),
        };
        assert!(resolve_filter(&settings).is_ok());
    }

    #[test]
    fn init_twice_is_harmless() {
        let settings = TelemetrySettings::default();
        init(&settings).unwrap();
        init(&settings).unwrap();
    }
}
