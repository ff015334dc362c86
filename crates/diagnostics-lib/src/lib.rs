//! Diagnostics library for cluster-managed applications
//!
//! This crate provides:
//! - Container records and terminal status types
//! - The application diagnostics aggregate and its JSON document form
//! - Logging setup and structured events for diagnostics tooling

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod observability;

pub use diagnostics::{ApplicationDiagnostics, DiagnosticsSummary};
pub use error::{DiagnosticsError, Result};
pub use models::*;
pub use observability::{DiagnosticsLogger, LogFormat};
