//! Error types shared across the service.
//!
//! Tool failures never appear here: the agent loop folds them into the
//! transcript so the model can react to them. This enum covers the faults
//! that abort a request instead (bad configuration, unreachable provider,
//! malformed inbound requests).

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A credential required by this request path is not configured.
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    #[error("Agent '{name}' not found. Available agents: {available:?}")]
    UnknownAgent { name: String, available: Vec<String> },

    #[error("model '{model}' is not supported by {provider} (supported: {supported:?})")]
    UnsupportedModel {
        provider: &'static str,
        model: String,
        supported: &'static [&'static str],
    },

    /// The provider is declared in the catalog but has no invocation path.
    #[error("{0} provider invocation is not implemented yet")]
    ProviderNotImplemented(&'static str),

    #[error("agent request must contain at least one agent")]
    NoAgents,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport or HTTP failure talking to the LLM provider. The activity
    /// runner retries these.
    #[error("LLM provider request failed: {0}")]
    Provider(#[source] reqwest::Error),

    #[error("file staging request failed: {0}")]
    Staging(#[source] reqwest::Error),

    #[error("activity '{activity}' timed out after {timeout:?}")]
    ActivityTimeout {
        activity: &'static str,
        timeout: Duration,
    },

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the activity runner should retry after this failure.
    ///
    /// Configuration faults are permanent: retrying them burns attempts
    /// without any chance of success.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Provider(_) | Error::ActivityTimeout { .. })
    }
}
