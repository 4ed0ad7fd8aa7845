//! Service seams for the remote API.
//!
//! The library never ships bytes itself: callers provide implementations of
//! these traits backed by whatever transport and authentication they use, and
//! [`client::Builder`](crate::client::Builder) wires them into the client.
//! The `Null*` implementations are installed by default and fail every call,
//! which keeps a write-only client free of transport concerns.

use crate::api::{
    CreateExclusionRequest, CreateLogMetricRequest, CreateSinkRequest, DeleteExclusionRequest,
    DeleteLogMetricRequest, DeleteLogRequest, DeleteSinkRequest, GetExclusionRequest,
    GetLogMetricRequest, GetSinkRequest, ListExclusionsRequest, ListExclusionsResponse,
    ListLogEntriesRequest, ListLogEntriesResponse, ListLogMetricsRequest, ListLogMetricsResponse,
    ListLogsRequest, ListLogsResponse, ListSinksRequest, ListSinksResponse, LogExclusion,
    LogMetric, LogSink, UpdateExclusionRequest, UpdateLogMetricRequest, UpdateSinkRequest,
};
use crate::error::Error;

use async_trait::async_trait;
use std::fmt::Debug;

/// The log-entry side of the remote API: listing and log deletion. Writing
/// does not appear here; write batches are handed off over the channel
/// returned by [`Builder::build`](crate::client::Builder::build).
#[async_trait]
pub trait LoggingService: Send + Sync + Debug {
    async fn list_log_entries(
        &self,
        request: ListLogEntriesRequest,
    ) -> Result<ListLogEntriesResponse, Error>;
    async fn list_logs(&self, request: ListLogsRequest) -> Result<ListLogsResponse, Error>;
    async fn delete_log(&self, request: DeleteLogRequest) -> Result<(), Error>;
}

/// Sink and exclusion configuration calls.
#[async_trait]
pub trait ConfigService: Send + Sync + Debug {
    async fn create_sink(&self, request: CreateSinkRequest) -> Result<LogSink, Error>;
    async fn get_sink(&self, request: GetSinkRequest) -> Result<LogSink, Error>;
    async fn list_sinks(&self, request: ListSinksRequest) -> Result<ListSinksResponse, Error>;
    async fn update_sink(&self, request: UpdateSinkRequest) -> Result<LogSink, Error>;
    async fn delete_sink(&self, request: DeleteSinkRequest) -> Result<(), Error>;
    async fn create_exclusion(
        &self,
        request: CreateExclusionRequest,
    ) -> Result<LogExclusion, Error>;
    async fn get_exclusion(&self, request: GetExclusionRequest) -> Result<LogExclusion, Error>;
    async fn list_exclusions(
        &self,
        request: ListExclusionsRequest,
    ) -> Result<ListExclusionsResponse, Error>;
    async fn update_exclusion(
        &self,
        request: UpdateExclusionRequest,
    ) -> Result<LogExclusion, Error>;
    async fn delete_exclusion(&self, request: DeleteExclusionRequest) -> Result<(), Error>;
}

/// Log-based metric configuration calls.
#[async_trait]
pub trait MetricsService: Send + Sync + Debug {
    async fn create_log_metric(
        &self,
        request: CreateLogMetricRequest,
    ) -> Result<LogMetric, Error>;
    async fn get_log_metric(&self, request: GetLogMetricRequest) -> Result<LogMetric, Error>;
    async fn list_log_metrics(
        &self,
        request: ListLogMetricsRequest,
    ) -> Result<ListLogMetricsResponse, Error>;
    async fn update_log_metric(
        &self,
        request: UpdateLogMetricRequest,
    ) -> Result<LogMetric, Error>;
    async fn delete_log_metric(&self, request: DeleteLogMetricRequest) -> Result<(), Error>;
}

// A LoggingService without a transport behind it.
#[derive(Debug)]
pub struct NullLoggingService {}

#[async_trait]
impl LoggingService for NullLoggingService {
    async fn list_log_entries(
        &self,
        _request: ListLogEntriesRequest,
    ) -> Result<ListLogEntriesResponse, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn list_logs(&self, _request: ListLogsRequest) -> Result<ListLogsResponse, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn delete_log(&self, _request: DeleteLogRequest) -> Result<(), Error> {
        Err(Error::TransportNotConfigured)
    }
}

// A ConfigService without a transport behind it.
#[derive(Debug)]
pub struct NullConfigService {}

#[async_trait]
impl ConfigService for NullConfigService {
    async fn create_sink(&self, _request: CreateSinkRequest) -> Result<LogSink, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn get_sink(&self, _request: GetSinkRequest) -> Result<LogSink, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn list_sinks(&self, _request: ListSinksRequest) -> Result<ListSinksResponse, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn update_sink(&self, _request: UpdateSinkRequest) -> Result<LogSink, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn delete_sink(&self, _request: DeleteSinkRequest) -> Result<(), Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn create_exclusion(
        &self,
        _request: CreateExclusionRequest,
    ) -> Result<LogExclusion, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn get_exclusion(&self, _request: GetExclusionRequest) -> Result<LogExclusion, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn list_exclusions(
        &self,
        _request: ListExclusionsRequest,
    ) -> Result<ListExclusionsResponse, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn update_exclusion(
        &self,
        _request: UpdateExclusionRequest,
    ) -> Result<LogExclusion, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn delete_exclusion(&self, _request: DeleteExclusionRequest) -> Result<(), Error> {
        Err(Error::TransportNotConfigured)
    }
}

// A MetricsService without a transport behind it.
#[derive(Debug)]
pub struct NullMetricsService {}

#[async_trait]
impl MetricsService for NullMetricsService {
    async fn create_log_metric(
        &self,
        _request: CreateLogMetricRequest,
    ) -> Result<LogMetric, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn get_log_metric(&self, _request: GetLogMetricRequest) -> Result<LogMetric, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn list_log_metrics(
        &self,
        _request: ListLogMetricsRequest,
    ) -> Result<ListLogMetricsResponse, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn update_log_metric(
        &self,
        _request: UpdateLogMetricRequest,
    ) -> Result<LogMetric, Error> {
        Err(Error::TransportNotConfigured)
    }

    async fn delete_log_metric(&self, _request: DeleteLogMetricRequest) -> Result<(), Error> {
        Err(Error::TransportNotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_services_fail_every_call() {
        let logging = NullLoggingService {};
        assert!(matches!(
            logging.list_logs(ListLogsRequest::default()).await,
            Err(Error::TransportNotConfigured)
        ));

        let config = NullConfigService {};
        assert!(matches!(
            config.list_sinks(ListSinksRequest::default()).await,
            Err(Error::TransportNotConfigured)
        ));

        let metrics = NullMetricsService {};
        assert!(matches!(
            metrics
                .delete_log_metric(DeleteLogMetricRequest::default())
                .await,
            Err(Error::TransportNotConfigured)
        ));
    }
}
