//! Observability infrastructure for diagnostics tooling
//!
//! Provides:
//! - Tracing subscriber setup (text or JSON, filtered through `RUST_LOG`)
//! - Structured event logging for diagnostics documents

use crate::diagnostics::DiagnosticsSummary;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl LogFormat {
    /// Parse a configured format name, falling back to text
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install the global tracing subscriber writing to stderr
///
/// `RUST_LOG` wins over `default_level` when set. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_tracing(format: LogFormat, default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        warn!("Tracing subscriber already installed, keeping existing one");
    }
}

/// Structured logger for diagnostics document events
///
/// Every event carries the document source (a path, or `-` for stdin).
#[derive(Clone)]
pub struct DiagnosticsLogger {
    source: String,
}

impl DiagnosticsLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Log a successfully parsed document
    pub fn log_document_loaded(&self, summary: &DiagnosticsSummary) {
        info!(
            event = "document_loaded",
            source = %self.source,
            containers = summary.container_count,
            recent_failed = summary.failed_container_count,
            final_status = ?summary.final_status,
            "Loaded application diagnostics"
        );

        if summary.final_status.is_some_and(|s| s.is_unsuccessful()) {
            warn!(
                event = "application_unsuccessful",
                source = %self.source,
                final_status = ?summary.final_status,
                exit_reason = ?summary.exit_reason,
                final_message = ?summary.final_message,
                "Application did not finish successfully"
            );
        }
    }

    /// Log a document that failed to parse
    pub fn log_document_rejected(&self, error: &dyn std::error::Error) {
        warn!(
            event = "document_rejected",
            source = %self.source,
            error = %error,
            "Rejected application diagnostics document"
        );
    }

    /// Log a lookup for a container the document does not describe
    pub fn log_container_missing(&self, container_id: &str) {
        warn!(
            event = "container_missing",
            source = %self.source,
            container_id = %container_id,
            "Container not present in diagnostics"
        );
    }

    /// Log a document written back out
    pub fn log_document_written(&self, destination: &str, bytes: usize) {
        info!(
            event = "document_written",
            source = %self.source,
            destination = %destination,
            bytes = bytes,
            "Wrote application diagnostics document"
        );
    }
}
