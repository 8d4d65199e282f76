//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber with OpenTelemetry integration,
//! setting up the complete observability pipeline from `tracing` macros to file
//! export.

use super::{tracer, SERVICE_NAME, TRACE_FILE_NAME};
use crate::infrastructure::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `trace_level` is unset or not a valid directive.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters spans based on configured trace level
/// 2. Exports spans to OpenTelemetry
/// 3. Serializes spans to OTLP JSON format
/// 4. Writes to rotating file with backups
///
/// # Parameters
///
/// * `config` - Plugin configuration containing `trace_level` and `data_dir`
///
/// # File Location
///
/// Traces are written to `bookhunt-otlp.json` inside the configured data
/// directory, `~/.local/share/zellij/bookhunt` by default.
///
/// # Initialization Behavior
///
/// - Creates data directory if it doesn't exist
/// - Silently skips tracing if directory creation fails (observability is optional)
/// - Idempotent: Safe to call multiple times (only first call takes effect)
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = get_data_dir(config.data_dir.as_deref());
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer);

    if subscriber.try_init().is_ok() {
        tracing::info!(
            level,
            data_dir = %data_dir.display(),
            version = env!("CARGO_PKG_VERSION"),
            "tracing initialized"
        );
    }
}
