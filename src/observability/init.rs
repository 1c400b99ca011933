//! Subscriber setup: `tracing` macros → OpenTelemetry → OTLP JSON file.

use super::tracer::{self, SCOPE_NAME};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use std::path::{Path, PathBuf};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace export inside the data directory.
pub const TRACE_FILE_NAME: &str = "character-finder-otlp.json";

/// Where traces for `data_dir` are written.
#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE_NAME)
}

/// Installs the global subscriber and returns the trace file path.
///
/// The filter comes from `RUST_LOG` if set, else `config.trace_level`, else
/// `info`. Returns `None` without installing anything when the data
/// directory cannot be created, and when a global subscriber already exists;
/// tracing is optional and never stops the application.
///
/// # Example
///
/// ```rust,no_run
/// use character_finder::observability::init_tracing;
/// use character_finder::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// if let Some(path) = init_tracing(&config) {
///     tracing::debug!(path = %path.display(), "tracing is now active");
/// }
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = config.resolved_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SCOPE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let path = trace_file(&data_dir);
    let provider = tracer::file_tracer_provider(path.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE_NAME));

    tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .ok()?;

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_file_lives_in_data_dir() {
        let path = trace_file(Path::new("/var/lib/finder"));
        assert_eq!(path, PathBuf::from("/var/lib/finder/character-finder-otlp.json"));
    }
}
