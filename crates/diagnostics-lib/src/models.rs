//! Core data models for application diagnostics

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Terminal status of the monitored application as reported by the
/// resource manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalApplicationStatus {
    /// Not yet decided
    Undefined,
    Succeeded,
    Failed,
    Killed,
}

impl FinalApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalApplicationStatus::Undefined => "UNDEFINED",
            FinalApplicationStatus::Succeeded => "SUCCEEDED",
            FinalApplicationStatus::Failed => "FAILED",
            FinalApplicationStatus::Killed => "KILLED",
        }
    }

    /// Returns true for outcomes an operator should look into
    pub fn is_unsuccessful(&self) -> bool {
        matches!(
            self,
            FinalApplicationStatus::Failed | FinalApplicationStatus::Killed
        )
    }
}

impl fmt::Display for FinalApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the application exited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    /// A child process of the application master failed
    ChildProcessFailed,
    /// Too many container failures
    ContainerLimitExceeded,
    /// The application reported an error
    AppError,
    /// The application finished on its own
    AppFinished,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::ChildProcessFailed => "CHILD_PROCESS_FAILED",
            ExitReason::ContainerLimitExceeded => "CONTAINER_LIMIT_EXCEEDED",
            ExitReason::AppError => "APP_ERROR",
            ExitReason::AppFinished => "APP_FINISHED",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime information about a single container of the application
///
/// Equality, ordering and hashing only look at `container_id`: two records
/// describe the same container when their identifiers match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInformation {
    pub container_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<bool>,
    /// Resource manager state code, not interpreted here
    #[serde(default)]
    pub state: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
    /// Milliseconds since the epoch, 0 when unknown
    #[serde(default)]
    pub create_time: i64,
    /// Milliseconds since the epoch, 0 when unknown
    #[serde(default)]
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_link: Option<String>,
}

impl ContainerInformation {
    /// Create a record carrying only an identifier
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            component: None,
            app_version: None,
            released: None,
            state: 0,
            exit_code: None,
            diagnostics: None,
            create_time: 0,
            start_time: 0,
            output: None,
            host: None,
            host_url: None,
            placement: None,
            log_link: None,
        }
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_state(mut self, state: i32) -> Self {
        self.state = state;
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: impl Into<String>) -> Self {
        self.diagnostics = Some(diagnostics.into());
        self
    }

    pub fn with_times(mut self, create_time: i64, start_time: i64) -> Self {
        self.create_time = create_time;
        self.start_time = start_time;
        self
    }

    pub fn with_log_link(mut self, log_link: impl Into<String>) -> Self {
        self.log_link = Some(log_link.into());
        self
    }

    /// Creation time, if the resource manager reported one
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.create_time)
    }

    /// Start time, if the container has started
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        millis_to_datetime(self.start_time)
    }
}

fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

impl PartialEq for ContainerInformation {
    fn eq(&self, other: &Self) -> bool {
        self.container_id == other.container_id
    }
}

impl Eq for ContainerInformation {}

impl Hash for ContainerInformation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container_id.hash(state);
    }
}

impl PartialOrd for ContainerInformation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContainerInformation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.container_id.cmp(&other.container_id)
    }
}
