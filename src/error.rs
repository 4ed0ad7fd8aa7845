use thiserror;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to read the 'default_labels' object from the given JSON value, is it a string map?. Parse error: {0}")]
    DefaultLabelsError(serde_json::Error),
    #[error("Failed to read the 'resource_labels' object from the given JSON value, is it a string map?. Parse error: {0}")]
    ResourceLabelsError(serde_json::Error),
    #[error("invalid log name '{0}', expected 'projects/<project-id>/logs/<log-id>'")]
    InvalidLogName(String),
    #[error("the write channel receiver was dropped, entries can no longer be handed off for shipping")]
    WriteChannelClosed,
    #[error("no transport was configured for this service call")]
    TransportNotConfigured,
}
