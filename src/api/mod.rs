//! Typed wrappers for the parts of the [Google Cloud Logging v2 API](https://cloud.google.com/logging/docs/reference/v2/rest)
//! this library touches. These structs carry no behavior beyond (de)serialization;
//! the shipping of requests is left to the caller (see [`service`](crate::service)).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{Display, EnumString};

pub mod entry;
pub mod exclusion;
pub mod metric;
pub mod sink;

pub use entry::{
    DeleteLogRequest, HttpRequest, ListLogEntriesRequest, ListLogEntriesResponse, ListLogsRequest,
    ListLogsResponse, LogEntry, LogEntryOperation, LogEntrySourceLocation, WriteLogEntriesRequest,
    WriteLogEntriesResponse,
};
pub use exclusion::{
    CreateExclusionRequest, DeleteExclusionRequest, GetExclusionRequest, ListExclusionsRequest,
    ListExclusionsResponse, LogExclusion, UpdateExclusionRequest,
};
pub use metric::{
    CreateLogMetricRequest, DeleteLogMetricRequest, GetLogMetricRequest, ListLogMetricsRequest,
    ListLogMetricsResponse, LogMetric, UpdateLogMetricRequest,
};
pub use sink::{
    CreateSinkRequest, DeleteSinkRequest, GetSinkRequest, ListSinksRequest, ListSinksResponse,
    LogSink, UpdateSinkRequest,
};

/// The monitored resource a log entry originates from, for example a
/// `k8s_container` or `gce_instance`.
///
/// See [MonitoredResource](https://cloud.google.com/logging/docs/reference/v2/rest/v2/MonitoredResource).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MonitoredResource {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

/// Log entry severity levels as defined by
/// [LogSeverity](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry#logseverity).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LogSeverity {
    #[default]
    Default,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}
