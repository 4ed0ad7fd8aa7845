//! Types for the [sinks](https://cloud.google.com/logging/docs/reference/v2/rest/v2/projects.sinks)
//! endpoint. A sink routes matching entries to a destination such as a Cloud
//! Storage bucket, a BigQuery dataset or a Pub/Sub topic.

use crate::api::exclusion::LogExclusion;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSink {
    pub name: String,
    /// The export destination, e.g.
    /// `storage.googleapis.com/my-bucket` or
    /// `bigquery.googleapis.com/projects/my-project/datasets/my-dataset`.
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Exclusions scoped to this sink, applied after its filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<Vec<LogExclusion>>,
    /// Service account the backend writes with; output only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer_identity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_children: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSinkRequest {
    pub parent: String,
    pub sink: Option<LogSink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_writer_identity: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSinkRequest {
    pub sink_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSinksRequest {
    pub parent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSinksResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sinks: Option<Vec<LogSink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSinkRequest {
    pub sink_name: String,
    pub sink: Option<LogSink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_writer_identity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSinkRequest {
    pub sink_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sink_parses_from_api_response() {
        let body = r#"{
            "name": "audit-to-bigquery",
            "destination": "bigquery.googleapis.com/projects/my-project/datasets/audit",
            "filter": "logName:activity",
            "writerIdentity": "serviceAccount:p123-456@gcp-sa-logging.iam.gserviceaccount.com",
            "includeChildren": true
        }"#;
        let sink: LogSink = serde_json::from_str(body).unwrap();
        assert_eq!(sink.name, "audit-to-bigquery");
        assert_eq!(sink.include_children, Some(true));
        assert!(sink.writer_identity.unwrap().starts_with("serviceAccount:"));
    }

    #[test]
    fn create_sink_request_serializes_correctly() {
        let request = CreateSinkRequest {
            parent: "projects/my-project".to_string(),
            sink: Some(LogSink {
                name: "my-sink".to_string(),
                destination: "storage.googleapis.com/my-bucket".to_string(),
                ..Default::default()
            }),
            unique_writer_identity: Some(true),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parent"], "projects/my-project");
        assert_eq!(json["sink"]["destination"], "storage.googleapis.com/my-bucket");
        assert_eq!(json["uniqueWriterIdentity"], true);
    }
}
