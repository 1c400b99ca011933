//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → JSON lines
//! ```
//!
//! Spans land in `<data_dir>/character-finder-otlp.json`, one OTLP
//! `resourceSpans` document per line. The file rotates at 10 MB and keeps
//! three numbered backups.
//!
//! The filter is `RUST_LOG` if set, else the `trace_level` setting, else
//! `info`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider and span exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, trace_file, TRACE_FILE_NAME};
