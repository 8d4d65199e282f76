//! OpenTelemetry-based observability with file-based trace export.
//!
//! This module provides distributed tracing infrastructure for the plugin,
//! using OpenTelemetry OTLP format with file-based exporting. Traces are
//! written to JSON files for offline analysis and debugging.
//!
//! # Architecture
//!
//! The observability layer implements a custom file-based OTLP exporter:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON Files
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `<data_dir>/bookhunt-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **OTLP Format**: Standard OpenTelemetry Protocol JSON format
//! - **Request Correlation**: [`TraceContext`] rides along with web requests
//!   so response handling joins the trace of the span that asked
//!
//! # Configuration
//!
//! Trace level is controlled via the `trace_level` config option (an
//! `EnvFilter` directive), defaulting to `"info"`.
//!
//! # Usage
//!
//! Initialize tracing early in plugin lifecycle:
//!
//! ```rust,no_run
//! use bookhunt::observability::init_tracing;
//! use bookhunt::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - `init`: Tracing initialization and subscriber setup
//! - `tracer`: Custom OpenTelemetry tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer with size-based rotation
//! - `context`: Trace context carried across host round trips

mod context;
mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use context::TraceContext;
pub use init::init_tracing;

/// Service and instrumentation scope name reported with every span.
pub const SERVICE_NAME: &str = "bookhunt";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookhunt-otlp.json";
