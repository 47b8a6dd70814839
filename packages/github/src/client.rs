use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, LINK};
use serde_json::{Map, Value};

use crate::error::{ApiError, AttemptError};
use crate::link::{has_next_page, parse_last_page};
use crate::retry::RetryPolicy;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RETRYABLE_STATUSES: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Query string parameters as `(name, value)` pairs.
pub type Query<'a> = [(&'a str, String)];

/// A successful GitHub response: decoded body plus the pagination header.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
    pub link: Option<String>,
}

impl ApiResponse {
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.link.as_deref().is_some_and(has_next_page)
    }

    #[must_use]
    pub fn last_page(&self) -> Option<u64> {
        self.link.as_deref().and_then(parse_last_page)
    }

    /// # Errors
    ///
    /// * If the body is not a JSON array
    pub fn into_array(self, context: &str) -> Result<Vec<Value>, ApiError> {
        match self.body {
            Value::Array(items) => Ok(items),
            _ => Err(ApiError::UnexpectedShape {
                context: context.to_string(),
                expected: "array",
            }),
        }
    }

    /// # Errors
    ///
    /// * If the body is not a JSON object
    pub fn into_object(self, context: &str) -> Result<Map<String, Value>, ApiError> {
        match self.body {
            Value::Object(map) => Ok(map),
            _ => Err(ApiError::UnexpectedShape {
                context: context.to_string(),
                expected: "object",
            }),
        }
    }
}

/// Read-only GitHub REST client.
///
/// Every request is retried according to the configured [`RetryPolicy`] and
/// issued strictly one at a time by the caller.
pub struct GitHubClient {
    http_client: reqwest::Client,
    auth_token: Option<String>,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl GitHubClient {
    /// Create a new client without authentication.
    ///
    /// # Errors
    ///
    /// * If the `reqwest::Client` fails to build
    pub fn new() -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent("repopulse")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http_client,
            auth_token: None,
            base_url: GITHUB_API_BASE.to_string(),
            retry_policy: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub const fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// `GET {base_url}{path}` with retries.
    ///
    /// Statuses 429, 500, 502, 503 and 504 and transport failures are retried;
    /// any other non-2xx status fails straight away. The body is downloaded as
    /// part of each attempt, so a connection that drops mid-body is retried too.
    ///
    /// # Errors
    ///
    /// * If GitHub returns a non-retryable error status
    /// * If every attempt allowed by the retry policy fails
    /// * If the body is not JSON
    pub async fn fetch(&self, path: &str, query: &Query<'_>) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url} params={query:?}");

        let raw = self
            .retry_policy
            .run(|attempt| self.send_once(&url, query, attempt), AttemptError::is_retryable)
            .await
            .map_err(|source| {
                if source.is_retryable() {
                    ApiError::RetriesExhausted {
                        attempts: self.retry_policy.max_attempts(),
                        source,
                    }
                } else {
                    ApiError::Request(source)
                }
            })?;

        if !raw.status.is_success() {
            let detail = String::from_utf8_lossy(&raw.body).into_owned();
            log::error!("GitHub API error: GET {url} -> {}: {detail}", raw.status);
            return Err(ApiError::Status {
                status: raw.status,
                url,
                detail,
            });
        }

        let body: Value =
            serde_json::from_slice(&raw.body).map_err(|source| ApiError::Decode {
                url: url.clone(),
                source,
            })?;

        Ok(ApiResponse {
            status: raw.status,
            body,
            link: raw.link,
        })
    }

    async fn send_once(
        &self,
        url: &str,
        query: &Query<'_>,
        attempt: u32,
    ) -> Result<RawResponse, AttemptError> {
        log::trace!("GET {url} attempt={attempt}");
        let mut request = self
            .http_client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if RETRYABLE_STATUSES.contains(&status) {
            return Err(AttemptError::RetryableStatus {
                status,
                url: response.url().to_string(),
            });
        }

        let link = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await?;

        Ok(RawResponse { status, link, body })
    }
}

/// One fully received attempt, before JSON decoding.
struct RawResponse {
    status: StatusCode,
    link: Option<String>,
    body: Bytes,
}
