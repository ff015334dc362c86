//! Application diagnostics aggregate
//!
//! Collects per-container information, the set of recently failed
//! containers and the terminal outcome of the application into a single
//! value that can be shipped as an indented JSON document and read back.

use crate::error::{DiagnosticsError, Result};
use crate::models::{ContainerInformation, ExitReason, FinalApplicationStatus};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error};


/// Diagnostic state of one application
///
/// Containers are kept in an identifier-ordered set, which is what gets
/// serialized, plus an identifier index that is rebuilt on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "DiagnosticsDocument")]
pub struct ApplicationDiagnostics {
    #[serde(skip)]
    containers_by_id: HashMap<String, ContainerInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_status: Option<FinalApplicationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit_reason: Option<ExitReason>,
    containers: BTreeSet<ContainerInformation>,
    recent_failed_containers: BTreeSet<String>,
}

/// Wire shape accepted on read
///
/// Collections may be missing or null, and null failed-container entries
/// are dropped.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiagnosticsDocument {
    #[serde(default)]
    final_status: Option<FinalApplicationStatus>,
    #[serde(default)]
    final_message: Option<String>,
    #[serde(default)]
    exit_reason: Option<ExitReason>,
    #[serde(default)]
    containers: Option<Vec<ContainerInformation>>,
    #[serde(default)]
    recent_failed_containers: Option<Vec<Option<String>>>,
}

impl From<DiagnosticsDocument> for ApplicationDiagnostics {
    fn from(document: DiagnosticsDocument) -> Self {
        let mut diagnostics = ApplicationDiagnostics {
            final_status: document.final_status,
            final_message: document.final_message,
            exit_reason: document.exit_reason,
            ..Default::default()
        };

        // Goes through the upsert path so the index matches the set.
        for container in document.containers.unwrap_or_default() {
            diagnostics.add_container(Some(container));
        }

        diagnostics.recent_failed_containers = document
            .recent_failed_containers
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect();

        diagnostics
    }
}

/// Condensed view of an aggregate for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsSummary {
    pub final_status: Option<FinalApplicationStatus>,
    pub final_message: Option<String>,
    pub exit_reason: Option<ExitReason>,
    pub container_count: usize,
    pub failed_container_count: usize,
    /// Failed identifiers that also have a container record
    pub failed_with_records: usize,
}

impl ApplicationDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All container records, ordered by identifier
    pub fn containers(&self) -> &BTreeSet<ContainerInformation> {
        &self.containers
    }

    /// Look up a container record by identifier
    pub fn container(&self, container_id: &str) -> Option<&ContainerInformation> {
        self.containers_by_id.get(container_id)
    }

    /// Insert or replace a container record
    ///
    /// A record whose identifier is already known replaces the previous
    /// one. `None` is ignored.
    pub fn add_container(&mut self, container: Option<ContainerInformation>) {
        let Some(container) = container else {
            return;
        };

        self.containers_by_id
            .insert(container.container_id.clone(), container.clone());
        self.containers.replace(container);
    }

    pub fn recent_failed_containers(&self) -> &BTreeSet<String> {
        &self.recent_failed_containers
    }

    /// Replace the failed-container set; `None` leaves it untouched
    pub fn set_recent_failed_containers(&mut self, container_ids: Option<Vec<String>>) {
        if let Some(container_ids) = container_ids {
            self.recent_failed_containers = container_ids.into_iter().collect();
        }
    }

    pub fn add_recent_failed_container(&mut self, container_id: Option<String>) {
        let Some(container_id) = container_id else {
            return;
        };
        self.recent_failed_containers.insert(container_id);
    }

    pub fn final_status(&self) -> Option<FinalApplicationStatus> {
        self.final_status
    }

    pub fn set_final_status(&mut self, status: Option<FinalApplicationStatus>) {
        self.final_status = status;
    }

    pub fn final_message(&self) -> Option<&str> {
        self.final_message.as_deref()
    }

    pub fn set_final_message(&mut self, message: Option<String>) {
        self.final_message = message;
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub fn set_exit_reason(&mut self, reason: Option<ExitReason>) {
        self.exit_reason = reason;
    }

    /// True once a final status has been recorded
    pub fn is_finalized(&self) -> bool {
        self.final_status.is_some()
    }

    /// Records of recently failed containers, skipping ids without a record
    pub fn failed_container_records(&self) -> impl Iterator<Item = &ContainerInformation> {
        self.recent_failed_containers
            .iter()
            .filter_map(|id| self.containers_by_id.get(id))
    }

    pub fn summary(&self) -> DiagnosticsSummary {
        DiagnosticsSummary {
            final_status: self.final_status,
            final_message: self.final_message.clone(),
            exit_reason: self.exit_reason,
            container_count: self.containers.len(),
            failed_container_count: self.recent_failed_containers.len(),
            failed_with_records: self.failed_container_records().count(),
        }
    }

    /// Serialize to an indented JSON document
    pub fn to_document(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(DiagnosticsError::Serialization)
    }

    /// Parse a JSON document produced by [`ApplicationDiagnostics::to_document`]
    ///
    /// Unknown fields are ignored and a repeated key keeps its last value.
    /// On failure the offending document is logged before the error is
    /// returned.
    pub fn from_document(document: &str) -> Result<Self> {
        // Going through `Value` collapses repeated keys instead of failing
        // with a duplicate field error.
        serde_json::from_str::<serde_json::Value>(document)
            .and_then(serde_json::from_value)
            .map_err(|e| {
                error!(
                    error = %e,
                    document = %document,
                    "Failed to parse application diagnostics document"
                );
                DiagnosticsError::Parse(e)
            })
    }
}

impl FromStr for ApplicationDiagnostics {
    type Err = DiagnosticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_document(s)
    }
}

/// Best-effort rendering: the JSON document, or the debug form if encoding
/// fails.
///
/// With the current field types (string keys, plain enums and strings)
/// encoding cannot fail, so the fallback branch is only reached if a future
/// field becomes unencodable.
impl fmt::Display for ApplicationDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_document() {
            Ok(document) => f.write_str(&document),
            Err(e) => {
                debug!(error = %e, "Failed to convert application diagnostics to JSON");
                write!(f, "{:?}", self)
            }
        }
    }
}
