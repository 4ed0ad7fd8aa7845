//! The [LogEntry](https://cloud.google.com/logging/docs/reference/v2/rest/v2/LogEntry)
//! type and the request/response wrappers of the
//! [entries](https://cloud.google.com/logging/docs/reference/v2/rest/v2/entries) and
//! [logs](https://cloud.google.com/logging/docs/reference/v2/rest/v2/projects.logs) endpoints.

use crate::api::{LogSeverity, MonitoredResource};
use crate::instrumentation::{
    InstrumentationInfo, DIAGNOSTIC_INFO_KEY, INSTRUMENTATION_SOURCE_KEY,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

/// A single record as accepted by the `entries:write` endpoint.
///
/// All fields are optional; the backend fills in defaults for anything left
/// unset, and [`Log::write`](crate::client::Log::write) stamps the log name and
/// timestamp on outgoing entries that lack them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<MonitoredResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receive_timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<LogSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_request: Option<HttpRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<LogEntryOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_sampled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<LogEntrySourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<HashMap<String, Value>>,
}

impl LogEntry {
    /// Returns the instrumentation records nested in the diagnostic field of
    /// the JSON payload. Absence at any level of the path, or a value that is
    /// not an array, means there is no record. Elements are mapped leniently:
    /// a malformed element becomes an [`InstrumentationInfo`] with empty
    /// fields so that downstream validation can reject it without losing its
    /// position in the list.
    pub fn instrumentation_source(&self) -> Option<Vec<InstrumentationInfo>> {
        let list = self
            .json_payload
            .as_ref()?
            .get(DIAGNOSTIC_INFO_KEY)?
            .get(INSTRUMENTATION_SOURCE_KEY)?
            .as_array()?;
        Some(list.iter().map(InstrumentationInfo::from_value).collect())
    }

    /// Replaces the instrumentation records in the diagnostic field, creating
    /// the nested structure as needed. Sibling keys of an existing diagnostic
    /// object are left untouched.
    pub fn set_instrumentation_source(&mut self, info: Vec<InstrumentationInfo>) {
        let payload = self.json_payload.get_or_insert_with(HashMap::new);
        match payload.get_mut(DIAGNOSTIC_INFO_KEY) {
            Some(Value::Object(diagnostic)) => {
                diagnostic.insert(INSTRUMENTATION_SOURCE_KEY.to_string(), json!(info));
            }
            _ => {
                payload.insert(
                    DIAGNOSTIC_INFO_KEY.to_string(),
                    json!({ INSTRUMENTATION_SOURCE_KEY: info }),
                );
            }
        }
    }
}

/// HTTP request metadata attached to request-scoped log entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    /// Request processing latency in the API duration format, e.g. `"3.5s"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_lookup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_validated_with_origin_server: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_fill_bytes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Information about a long-running operation a log entry is part of.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<bool>,
}

/// Source code location that produced a log entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntrySourceLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// Body of the [entries.write](https://cloud.google.com/logging/docs/reference/v2/rest/v2/entries/write)
/// call. The `log_name`, `resource` and `labels` fields supply defaults for
/// entries that do not carry their own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteLogEntriesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<MonitoredResource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<LogEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

/// Empty on success.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteLogEntriesResponse {}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogEntriesRequest {
    pub resource_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogEntriesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<LogEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsRequest {
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLogsResponse {
    /// Full resource names of the logs under the requested parent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLogRequest {
    pub log_name: String,
}
