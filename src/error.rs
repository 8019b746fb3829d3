use thiserror::Error;

/// Failures of the query → results pipeline.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No usable backend URL has been configured.
    #[error("Hound base URL is not configured")]
    Unconfigured,

    /// Transport-level failure: DNS, connect, timeout.
    #[error("Failed to reach Hound server: {0}")]
    BackendUnreachable(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Hound server returned {status}: {body}")]
    BackendStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("Failed to parse Hound response: {0}")]
    MalformedResponse(#[source] reqwest::Error),

    /// Search results name a repository missing from the repository listing.
    #[error("Search results reference unknown repository `{0}`")]
    UnknownRepository(String),
}

impl SearchError {
    /// `true` when the user needs to fix the configuration before anything can work.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Unconfigured)
    }
}

pub type Result<T, E = SearchError> = std::result::Result<T, E>;
