use reqwest::StatusCode;

/// Failure of a single request attempt, before the retry policy decides what
/// to do with it.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("Retryable status {status} for GET {url}")]
    RetryableStatus { status: StatusCode, url: String },

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AttemptError {
    /// Throttling, gateway errors and network failures are worth another try.
    /// A request that could not even be built is not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RetryableStatus { .. } => true,
            Self::Transport(e) => !e.is_builder(),
        }
    }
}

/// Errors surfaced by the GitHub client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// GitHub answered with a non-retryable, non-2xx status.
    #[error("GitHub API request failed ({status}) for GET {url}")]
    Status {
        status: StatusCode,
        url: String,
        detail: String,
    },

    /// Every attempt the retry policy allowed failed.
    #[error("GitHub API request failed after {attempts} attempts: {source}")]
    RetriesExhausted { attempts: u32, source: AttemptError },

    /// The request failed in a way retrying cannot fix.
    #[error("GitHub API request failed: {0}")]
    Request(#[source] AttemptError),

    /// The body was not valid JSON.
    #[error("Failed to decode GitHub API response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// The body was valid JSON but not the shape the endpoint promises.
    #[error("Unexpected {context} response format: expected {expected}")]
    UnexpectedShape {
        context: String,
        expected: &'static str,
    },
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. }
            | Self::RetriesExhausted {
                source: AttemptError::RetryableStatus { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}
