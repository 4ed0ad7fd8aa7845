//! The client surface: a [`Builder`] that configures a [`Logging`] client, and
//! the [`Log`] writer it hands out per log id.
//!
//! Write batches are not shipped by this crate. [`Builder::build`] returns a
//! [`std::sync::mpsc::Receiver`] alongside the client; every
//! [`Log::write`] call sends one assembled
//! [`WriteLogEntriesRequest`](crate::api::WriteLogEntriesRequest) to that
//! channel for the consumer to transport, after the batch has passed through
//! the [instrumentation tagger](crate::instrumentation).

use crate::api::entry::{
    DeleteLogRequest, ListLogEntriesRequest, ListLogEntriesResponse, ListLogsRequest,
    ListLogsResponse, LogEntry, WriteLogEntriesRequest,
};
use crate::api::exclusion::{
    CreateExclusionRequest, DeleteExclusionRequest, GetExclusionRequest, ListExclusionsRequest,
    ListExclusionsResponse, LogExclusion, UpdateExclusionRequest,
};
use crate::api::metric::{
    CreateLogMetricRequest, DeleteLogMetricRequest, GetLogMetricRequest, ListLogMetricsRequest,
    ListLogMetricsResponse, LogMetric, UpdateLogMetricRequest,
};
use crate::api::sink::{
    CreateSinkRequest, DeleteSinkRequest, GetSinkRequest, ListSinksRequest, ListSinksResponse,
    LogSink, UpdateSinkRequest,
};
use crate::api::{LogSeverity, MonitoredResource};
use crate::error::Error;
use crate::instrumentation::populate_instrumentation_info;
use crate::service::{
    ConfigService, LoggingService, MetricsService, NullConfigService, NullLoggingService,
    NullMetricsService,
};

use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;

/// Formats a fully qualified log name from a project id and a log id.
/// Already-qualified names pass through untouched; forward slashes in the log
/// id are escaped as required by the API.
pub fn format_log_name(project_id: &str, log_id: &str) -> String {
    if log_id.starts_with("projects/") {
        return log_id.to_string();
    }
    format!("projects/{}/logs/{}", project_id, log_id.replace('/', "%2F"))
}

/// Splits a fully qualified log name into its project id and unescaped log id.
///
/// # Errors
///
/// Returns `Err` if `log_name` is not of the form `projects/<project-id>/logs/<log-id>`.
pub fn parse_log_name(log_name: &str) -> Result<(String, String), Error> {
    let mut parts = log_name.splitn(4, '/');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some("projects"), Some(project), Some("logs"), Some(id))
            if !project.is_empty() && !id.is_empty() =>
        {
            Ok((project.to_string(), id.replace("%2F", "/")))
        }
        _ => Err(Error::InvalidLogName(log_name.to_string())),
    }
}

/// Builder for the [`Logging`] client.
#[derive(Default)]
pub struct Builder {
    project_id: String,
    resource_type: String,
    resource_labels: Option<HashMap<String, String>>,
    default_labels: HashMap<String, String>,
    log: Option<slog::Logger>,
    logging_service: Option<Arc<dyn LoggingService>>,
    config_service: Option<Arc<dyn ConfigService>>,
    metrics_service: Option<Arc<dyn MetricsService>>,
}

impl Builder {
    /// Creates a Builder object.
    ///
    /// # Parameters
    /// - `project_id`: The GCP project entries are written under, e.g. `my-gcp-project`.
    ///
    /// # Example
    ///
    /// ```
    /// use gcloud_logging::client::Builder;
    /// let (logging, _rx) = Builder::new("my-gcp-project").build();
    /// ```
    #[must_use = "The builder must be used"]
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            resource_type: "global".to_string(),
            ..Default::default()
        }
    }

    /// Sets the `type` of the default [MonitoredResource](https://cloud.google.com/logging/docs/reference/v2/rest/v2/MonitoredResource)
    /// attached to write requests. Defaults to `global`.
    #[must_use = "The builder must be used"]
    pub fn with_resource_type(self, resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            ..self
        }
    }

    /// Sets the labels of the default monitored resource.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use gcloud_logging::client::Builder;
    ///
    /// let (logging, _rx) = Builder::new("my-gcp-project")
    ///     .with_resource_type("k8s_container")
    ///     .with_resource_labels(json!({
    ///         "location": "europe-west1-b",
    ///         "cluster_name": "my-gke-cluster",
    ///         "namespace_name": "my-gke-namespace",
    ///     }))
    ///     .unwrap()
    ///     .build();
    /// ```
    ///
    /// # Errors
    ///
    /// Will return `Err` if `labels` does not parse as a string map.
    #[must_use = "The builder must be used"]
    pub fn with_resource_labels(self, labels: Value) -> Result<Self, Error> {
        Ok(Self {
            resource_labels: Some(
                serde_json::from_value(labels).map_err(Error::ResourceLabelsError)?,
            ),
            ..self
        })
    }

    /// Sets labels applied to every write request, in addition to any labels
    /// carried by individual entries.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `labels` does not parse as a string map.
    #[must_use = "The builder must be used"]
    pub fn with_default_labels(self, labels: Value) -> Result<Self, Error> {
        Ok(Self {
            default_labels: serde_json::from_value(labels).map_err(Error::DefaultLabelsError)?,
            ..self
        })
    }

    /// Installs a logger for the client's own diagnostics. Without one the
    /// client stays silent.
    #[must_use = "The builder must be used"]
    pub fn with_logger(self, log: slog::Logger) -> Self {
        Self {
            log: Some(log),
            ..self
        }
    }

    /// Installs the transport for entry listing and log deletion calls.
    #[must_use = "The builder must be used"]
    pub fn with_logging_service(self, service: Arc<dyn LoggingService>) -> Self {
        Self {
            logging_service: Some(service),
            ..self
        }
    }

    /// Installs the transport for sink and exclusion calls.
    #[must_use = "The builder must be used"]
    pub fn with_config_service(self, service: Arc<dyn ConfigService>) -> Self {
        Self {
            config_service: Some(service),
            ..self
        }
    }

    /// Installs the transport for log-based metric calls.
    #[must_use = "The builder must be used"]
    pub fn with_metrics_service(self, service: Arc<dyn MetricsService>) -> Self {
        Self {
            metrics_service: Some(service),
            ..self
        }
    }

    /// Returns the client and the receiving end of the write channel. Every
    /// [`Log::write`] sends one `WriteLogEntriesRequest` to this channel; the
    /// consumer decides how to transport it.
    #[must_use = "The client and receiver must be used to handle logging correctly"]
    pub fn build(self) -> (Logging, Receiver<WriteLogEntriesRequest>) {
        let (sync_tx, sync_rx) = sync_channel::<WriteLogEntriesRequest>(100);
        (
            Logging {
                project_id: self.project_id,
                resource: MonitoredResource {
                    type_: Some(self.resource_type),
                    labels: self.resource_labels,
                },
                default_labels: self.default_labels,
                log: self
                    .log
                    .unwrap_or_else(|| slog::Logger::root(slog::Discard, slog::o!())),
                logging_service: self
                    .logging_service
                    .unwrap_or_else(|| Arc::new(NullLoggingService {})),
                config_service: self
                    .config_service
                    .unwrap_or_else(|| Arc::new(NullConfigService {})),
                metrics_service: self
                    .metrics_service
                    .unwrap_or_else(|| Arc::new(NullMetricsService {})),
                sync_tx,
            },
            sync_rx,
        )
    }
}

/// The client for one GCP project. Hands out [`Log`] writers and wraps the
/// configuration surface of the remote API with resource-name formatting.
#[derive(Debug)]
pub struct Logging {
    project_id: String,
    resource: MonitoredResource,
    default_labels: HashMap<String, String>,
    log: slog::Logger,
    logging_service: Arc<dyn LoggingService>,
    config_service: Arc<dyn ConfigService>,
    metrics_service: Arc<dyn MetricsService>,
    sync_tx: SyncSender<WriteLogEntriesRequest>,
}

impl Logging {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Returns a writer scoped to the given log id (or an already qualified
    /// log name).
    pub fn log(&self, log_id: &str) -> Log {
        Log {
            name: format_log_name(&self.project_id, log_id),
            resource: self.resource.clone(),
            default_labels: self.default_labels.clone(),
            log: self.log.clone(),
            sync_tx: self.sync_tx.clone(),
        }
    }

    fn parent(&self) -> String {
        format!("projects/{}", self.project_id)
    }

    fn sink_name(&self, name: &str) -> String {
        format!("projects/{}/sinks/{}", self.project_id, name)
    }

    fn exclusion_name(&self, name: &str) -> String {
        format!("projects/{}/exclusions/{}", self.project_id, name)
    }

    fn metric_name(&self, name: &str) -> String {
        format!("projects/{}/metrics/{}", self.project_id, name)
    }

    /// Lists entries visible to the project. An empty `resource_names` in the
    /// request is replaced with this client's project.
    pub async fn list_log_entries(
        &self,
        mut request: ListLogEntriesRequest,
    ) -> Result<ListLogEntriesResponse, Error> {
        if request.resource_names.is_empty() {
            request.resource_names = vec![self.parent()];
        }
        self.logging_service.list_log_entries(request).await
    }

    pub async fn list_logs(
        &self,
        page_size: Option<i32>,
        page_token: Option<String>,
    ) -> Result<ListLogsResponse, Error> {
        self.logging_service
            .list_logs(ListLogsRequest {
                parent: self.parent(),
                page_size,
                page_token,
            })
            .await
    }

    /// Deletes all entries of the given log id.
    pub async fn delete_log(&self, log_id: &str) -> Result<(), Error> {
        self.logging_service
            .delete_log(DeleteLogRequest {
                log_name: format_log_name(&self.project_id, log_id),
            })
            .await
    }

    pub async fn create_sink(
        &self,
        sink: LogSink,
        unique_writer_identity: Option<bool>,
    ) -> Result<LogSink, Error> {
        self.config_service
            .create_sink(CreateSinkRequest {
                parent: self.parent(),
                sink: Some(sink),
                unique_writer_identity,
            })
            .await
    }

    pub async fn get_sink(&self, name: &str) -> Result<LogSink, Error> {
        self.config_service
            .get_sink(GetSinkRequest {
                sink_name: self.sink_name(name),
            })
            .await
    }

    pub async fn list_sinks(
        &self,
        page_size: Option<i32>,
        page_token: Option<String>,
    ) -> Result<ListSinksResponse, Error> {
        self.config_service
            .list_sinks(ListSinksRequest {
                parent: self.parent(),
                page_size,
                page_token,
            })
            .await
    }

    /// Replaces the sink named in `sink.name`. `update_mask` limits the change
    /// to the named fields, e.g. `"filter,description"`.
    pub async fn update_sink(
        &self,
        sink: LogSink,
        update_mask: Option<String>,
    ) -> Result<LogSink, Error> {
        self.config_service
            .update_sink(UpdateSinkRequest {
                sink_name: self.sink_name(&sink.name),
                sink: Some(sink),
                unique_writer_identity: None,
                update_mask,
            })
            .await
    }

    pub async fn delete_sink(&self, name: &str) -> Result<(), Error> {
        self.config_service
            .delete_sink(DeleteSinkRequest {
                sink_name: self.sink_name(name),
            })
            .await
    }

    pub async fn create_exclusion(&self, exclusion: LogExclusion) -> Result<LogExclusion, Error> {
        self.config_service
            .create_exclusion(CreateExclusionRequest {
                parent: self.parent(),
                exclusion: Some(exclusion),
            })
            .await
    }

    pub async fn get_exclusion(&self, name: &str) -> Result<LogExclusion, Error> {
        self.config_service
            .get_exclusion(GetExclusionRequest {
                name: self.exclusion_name(name),
            })
            .await
    }

    pub async fn list_exclusions(
        &self,
        page_size: Option<i32>,
        page_token: Option<String>,
    ) -> Result<ListExclusionsResponse, Error> {
        self.config_service
            .list_exclusions(ListExclusionsRequest {
                parent: self.parent(),
                page_size,
                page_token,
            })
            .await
    }

    pub async fn update_exclusion(
        &self,
        exclusion: LogExclusion,
        update_mask: Option<String>,
    ) -> Result<LogExclusion, Error> {
        self.config_service
            .update_exclusion(UpdateExclusionRequest {
                name: self.exclusion_name(&exclusion.name),
                exclusion: Some(exclusion),
                update_mask,
            })
            .await
    }

    pub async fn delete_exclusion(&self, name: &str) -> Result<(), Error> {
        self.config_service
            .delete_exclusion(DeleteExclusionRequest {
                name: self.exclusion_name(name),
            })
            .await
    }

    pub async fn create_log_metric(&self, metric: LogMetric) -> Result<LogMetric, Error> {
        self.metrics_service
            .create_log_metric(CreateLogMetricRequest {
                parent: self.parent(),
                metric: Some(metric),
            })
            .await
    }

    pub async fn get_log_metric(&self, name: &str) -> Result<LogMetric, Error> {
        self.metrics_service
            .get_log_metric(GetLogMetricRequest {
                metric_name: self.metric_name(name),
            })
            .await
    }

    pub async fn list_log_metrics(
        &self,
        page_size: Option<i32>,
        page_token: Option<String>,
    ) -> Result<ListLogMetricsResponse, Error> {
        self.metrics_service
            .list_log_metrics(ListLogMetricsRequest {
                parent: self.parent(),
                page_size,
                page_token,
            })
            .await
    }

    pub async fn update_log_metric(&self, metric: LogMetric) -> Result<LogMetric, Error> {
        self.metrics_service
            .update_log_metric(UpdateLogMetricRequest {
                metric_name: self.metric_name(&metric.name),
                metric: Some(metric),
            })
            .await
    }

    pub async fn delete_log_metric(&self, name: &str) -> Result<(), Error> {
        self.metrics_service
            .delete_log_metric(DeleteLogMetricRequest {
                metric_name: self.metric_name(name),
            })
            .await
    }
}

/// Per-request overrides for [`Log::write`].
#[derive(Clone, Debug, Default)]
pub struct WriteOptions {
    /// Extra request-level labels, merged over the client's default labels.
    pub labels: Option<HashMap<String, String>>,
    /// Overrides the client's default monitored resource for this request.
    pub resource: Option<MonitoredResource>,
    pub partial_success: Option<bool>,
    pub dry_run: Option<bool>,
}

/// A writer scoped to one log name.
#[derive(Debug)]
pub struct Log {
    name: String,
    resource: MonitoredResource,
    default_labels: HashMap<String, String>,
    log: slog::Logger,
    sync_tx: SyncSender<WriteLogEntriesRequest>,
}

impl Log {
    /// The fully qualified name of this log.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds an entry from a payload value: a JSON object becomes the entry's
    /// structured payload, anything else its text payload. No defaults are
    /// applied here; [`Log::write`] stamps them on the way out.
    pub fn entry(&self, payload: Value) -> LogEntry {
        let mut entry = LogEntry::default();
        match payload {
            Value::String(text) => entry.text_payload = Some(text),
            Value::Object(map) => entry.json_payload = Some(map.into_iter().collect()),
            other => entry.text_payload = Some(other.to_string()),
        }
        entry
    }

    /// Assembles a write request from the batch and sends it down the write
    /// channel.
    ///
    /// The batch first passes through the instrumentation tagger, so the
    /// outgoing request may carry one extra diagnostic entry or a merged
    /// diagnostic record. Entries without a log name or timestamp get this
    /// log's name and the current time.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the channel receiver was dropped.
    pub fn write(&self, entries: Vec<LogEntry>, options: &WriteOptions) -> Result<(), Error> {
        let (mut entries, info_added) = populate_instrumentation_info(entries);
        if info_added {
            slog::debug!(
                self.log,
                "attached instrumentation data to write batch for {}",
                self.name
            );
        }
        for entry in entries.iter_mut() {
            if entry.log_name.is_none() {
                entry.log_name = Some(self.name.clone());
            }
            if entry.timestamp.is_none() {
                entry.timestamp = Some(Utc::now());
            }
        }
        let mut labels = self.default_labels.clone();
        if let Some(extra) = &options.labels {
            labels.extend(extra.clone());
        }
        let request = WriteLogEntriesRequest {
            log_name: Some(self.name.clone()),
            resource: Some(options.resource.clone().unwrap_or_else(|| self.resource.clone())),
            labels: if labels.is_empty() { None } else { Some(labels) },
            entries: Some(entries),
            partial_success: options.partial_success,
            dry_run: options.dry_run,
        };
        self.sync_tx
            .send(request)
            .map_err(|_| Error::WriteChannelClosed)
    }

    pub fn debug(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Debug, entry, options)
    }

    pub fn info(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Info, entry, options)
    }

    pub fn notice(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Notice, entry, options)
    }

    pub fn warning(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Warning, entry, options)
    }

    pub fn error(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Error, entry, options)
    }

    pub fn critical(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Critical, entry, options)
    }

    pub fn alert(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Alert, entry, options)
    }

    pub fn emergency(&self, entry: LogEntry, options: &WriteOptions) -> Result<(), Error> {
        self.write_with_severity(LogSeverity::Emergency, entry, options)
    }

    fn write_with_severity(
        &self,
        severity: LogSeverity,
        mut entry: LogEntry,
        options: &WriteOptions,
    ) -> Result<(), Error> {
        entry.severity = Some(severity);
        self.write(vec![entry], options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrumentation::testing::with_cleared_emitted_flag;
    use crate::instrumentation::{InstrumentationInfo, LIBRARY_NAME_PREFIX};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn log_names_format_and_parse_round_trip() {
        let name = format_log_name("my-project", "syslog");
        assert_eq!(name, "projects/my-project/logs/syslog");
        assert_eq!(
            parse_log_name(&name).unwrap(),
            ("my-project".to_string(), "syslog".to_string())
        );
    }

    #[test]
    fn log_names_escape_forward_slashes() {
        let name = format_log_name("my-project", "appengine.googleapis.com/request_log");
        assert_eq!(
            name,
            "projects/my-project/logs/appengine.googleapis.com%2Frequest_log"
        );
        assert_eq!(
            parse_log_name(&name).unwrap().1,
            "appengine.googleapis.com/request_log"
        );
    }

    #[test]
    fn qualified_log_names_pass_through() {
        assert_eq!(
            format_log_name("ignored", "projects/other/logs/syslog"),
            "projects/other/logs/syslog"
        );
    }

    #[test]
    fn bad_log_names_are_rejected() {
        for bad in ["", "projects/p", "projects/p/sinks/s", "projects//logs/l"] {
            assert!(matches!(
                parse_log_name(bad),
                Err(Error::InvalidLogName(_))
            ));
        }
    }

    #[test]
    fn builder_rejects_non_string_label_maps() {
        let result = Builder::new("my-project").with_default_labels(json!({"port": 21}));
        assert!(matches!(result, Err(Error::DefaultLabelsError(_))));
        let result = Builder::new("my-project").with_resource_labels(json!("not a map"));
        assert!(matches!(result, Err(Error::ResourceLabelsError(_))));
    }

    #[test]
    fn entry_maps_payload_values() {
        let (logging, _rx) = Builder::new("my-project").build();
        let log = logging.log("syslog");

        let text = log.entry(json!("plain message"));
        assert_eq!(text.text_payload.as_deref(), Some("plain message"));
        assert_eq!(text.json_payload, None);

        let structured = log.entry(json!({"message": "hi", "code": 7}));
        let payload = structured.json_payload.unwrap();
        assert_eq!(payload.get("message"), Some(&json!("hi")));
        assert_eq!(payload.get("code"), Some(&json!(7)));
    }

    #[test]
    fn first_write_sends_batch_with_diagnostic_entry_and_defaults() {
        with_cleared_emitted_flag(|| {
            let (logging, rx) = Builder::new("my-project")
                .with_resource_type("k8s_container")
                .with_default_labels(json!({"application": "my-app"}))
                .unwrap()
                .build();
            let log = logging.log("syslog");

            let entry = log.entry(json!("hello"));
            log.write(vec![entry], &WriteOptions::default()).unwrap();

            let request = rx.recv().unwrap();
            assert_eq!(
                request.log_name.as_deref(),
                Some("projects/my-project/logs/syslog")
            );
            assert_eq!(
                request.resource.as_ref().unwrap().type_.as_deref(),
                Some("k8s_container")
            );
            assert_eq!(
                request.labels.as_ref().unwrap().get("application"),
                Some(&"my-app".to_string())
            );

            let entries = request.entries.unwrap();
            assert_eq!(entries.len(), 2);
            for entry in &entries {
                assert_eq!(
                    entry.log_name.as_deref(),
                    Some("projects/my-project/logs/syslog")
                );
                assert!(entry.timestamp.is_some());
            }
            // The appended diagnostic entry names this library.
            let infos = entries[1].instrumentation_source().unwrap();
            assert_eq!(infos[0].name, LIBRARY_NAME_PREFIX);
        });
    }

    #[test]
    fn later_writes_carry_no_diagnostic_entry() {
        with_cleared_emitted_flag(|| {
            let (logging, rx) = Builder::new("my-project").build();
            let log = logging.log("syslog");

            log.write(vec![log.entry(json!("first"))], &WriteOptions::default())
                .unwrap();
            log.write(vec![log.entry(json!("second"))], &WriteOptions::default())
                .unwrap();

            assert_eq!(rx.recv().unwrap().entries.unwrap().len(), 2);
            let second = rx.recv().unwrap().entries.unwrap();
            assert_eq!(second.len(), 1);
            assert_eq!(second[0].text_payload.as_deref(), Some("second"));
        });
    }

    #[test]
    fn existing_records_are_merged_rather_than_appended() {
        with_cleared_emitted_flag(|| {
            let (logging, rx) = Builder::new("my-project").build();
            let log = logging.log("syslog");

            let mut entry = log.entry(json!({"message": "from another library"}));
            entry.set_instrumentation_source(vec![InstrumentationInfo {
                name: "rust-slog".to_string(),
                version: "2.7.0".to_string(),
            }]);
            log.write(vec![entry], &WriteOptions::default()).unwrap();

            let entries = rx.recv().unwrap().entries.unwrap();
            assert_eq!(entries.len(), 1);
            let infos = entries[0].instrumentation_source().unwrap();
            assert_eq!(infos.len(), 2);
            assert_eq!(infos[0].name, LIBRARY_NAME_PREFIX);
            assert_eq!(infos[1].name, "rust-slog");
        });
    }

    #[test]
    fn severity_writers_stamp_the_severity() {
        with_cleared_emitted_flag(|| {
            set_flag_emitted();
            let (logging, rx) = Builder::new("my-project").build();
            let log = logging.log("syslog");
            log.warning(log.entry(json!("look out")), &WriteOptions::default())
                .unwrap();
            let entries = rx.recv().unwrap().entries.unwrap();
            assert_eq!(entries[0].severity, Some(LogSeverity::Warning));
        });
    }

    #[test]
    fn write_options_override_resource_and_merge_labels() {
        with_cleared_emitted_flag(|| {
            set_flag_emitted();
            let (logging, rx) = Builder::new("my-project")
                .with_default_labels(json!({"team": "sre", "env": "test"}))
                .unwrap()
                .build();
            let log = logging.log("syslog");

            let options = WriteOptions {
                labels: Some(HashMap::from([("env".to_string(), "prod".to_string())])),
                resource: Some(MonitoredResource {
                    type_: Some("gce_instance".to_string()),
                    labels: None,
                }),
                partial_success: Some(true),
                dry_run: None,
            };
            log.write(vec![log.entry(json!("x"))], &options).unwrap();

            let request = rx.recv().unwrap();
            assert_eq!(
                request.resource.unwrap().type_.as_deref(),
                Some("gce_instance")
            );
            let labels = request.labels.unwrap();
            assert_eq!(labels.get("team"), Some(&"sre".to_string()));
            assert_eq!(labels.get("env"), Some(&"prod".to_string()));
            assert_eq!(request.partial_success, Some(true));
        });
    }

    #[test]
    fn write_fails_when_the_receiver_is_gone() {
        with_cleared_emitted_flag(|| {
            let (logging, rx) = Builder::new("my-project").build();
            let log = logging.log("syslog");
            drop(rx);
            assert!(matches!(
                log.write(vec![log.entry(json!("x"))], &WriteOptions::default()),
                Err(Error::WriteChannelClosed)
            ));
        });
    }

    // Echo services return the formatted resource names so the wrapper
    // formatting can be asserted through the public API.
    #[derive(Debug)]
    struct EchoConfigService {}

    #[async_trait]
    impl ConfigService for EchoConfigService {
        async fn create_sink(&self, request: CreateSinkRequest) -> Result<LogSink, Error> {
            Ok(LogSink {
                name: request.parent,
                ..Default::default()
            })
        }

        async fn get_sink(&self, request: GetSinkRequest) -> Result<LogSink, Error> {
            Ok(LogSink {
                name: request.sink_name,
                ..Default::default()
            })
        }

        async fn list_sinks(&self, request: ListSinksRequest) -> Result<ListSinksResponse, Error> {
            Ok(ListSinksResponse {
                sinks: None,
                next_page_token: Some(request.parent),
            })
        }

        async fn update_sink(&self, request: UpdateSinkRequest) -> Result<LogSink, Error> {
            Ok(LogSink {
                name: request.sink_name,
                ..Default::default()
            })
        }

        async fn delete_sink(&self, _request: DeleteSinkRequest) -> Result<(), Error> {
            Ok(())
        }

        async fn create_exclusion(
            &self,
            request: CreateExclusionRequest,
        ) -> Result<LogExclusion, Error> {
            Ok(LogExclusion {
                name: request.parent,
                ..Default::default()
            })
        }

        async fn get_exclusion(&self, request: GetExclusionRequest) -> Result<LogExclusion, Error> {
            Ok(LogExclusion {
                name: request.name,
                ..Default::default()
            })
        }

        async fn list_exclusions(
            &self,
            request: ListExclusionsRequest,
        ) -> Result<ListExclusionsResponse, Error> {
            Ok(ListExclusionsResponse {
                exclusions: None,
                next_page_token: Some(request.parent),
            })
        }

        async fn update_exclusion(
            &self,
            request: UpdateExclusionRequest,
        ) -> Result<LogExclusion, Error> {
            Ok(LogExclusion {
                name: request.name,
                ..Default::default()
            })
        }

        async fn delete_exclusion(&self, _request: DeleteExclusionRequest) -> Result<(), Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn config_wrappers_format_resource_names() {
        let (logging, _rx) = Builder::new("my-project")
            .with_config_service(Arc::new(EchoConfigService {}))
            .build();

        let created = logging
            .create_sink(
                LogSink {
                    name: "my-sink".to_string(),
                    destination: "storage.googleapis.com/my-bucket".to_string(),
                    ..Default::default()
                },
                Some(true),
            )
            .await
            .unwrap();
        assert_eq!(created.name, "projects/my-project");

        let fetched = logging.get_sink("my-sink").await.unwrap();
        assert_eq!(fetched.name, "projects/my-project/sinks/my-sink");

        let exclusion = logging.get_exclusion("noise").await.unwrap();
        assert_eq!(exclusion.name, "projects/my-project/exclusions/noise");
    }

    #[tokio::test]
    async fn null_services_surface_the_missing_transport() {
        let (logging, _rx) = Builder::new("my-project").build();
        assert!(matches!(
            logging.list_sinks(None, None).await,
            Err(Error::TransportNotConfigured)
        ));
        assert!(matches!(
            logging.delete_log("syslog").await,
            Err(Error::TransportNotConfigured)
        ));
        assert!(matches!(
            logging.get_log_metric("error-count").await,
            Err(Error::TransportNotConfigured)
        ));
    }

    fn set_flag_emitted() {
        crate::instrumentation::set_instrumentation_status(true);
    }
}
