//! Cursor-following over GitHub's `Link` header.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use futures::Stream;
use serde_json::Value;

use crate::client::{GitHubClient, Query};
use crate::error::ApiError;
use crate::timestamp::parse_timestamp;

pub const DEFAULT_PER_PAGE: u32 = 100;

/// Filters for [`GitHubClient::pull_requests`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestQuery {
    pub state: String,
    pub per_page: u32,
    /// Stop at the first pull request last updated before this instant.
    /// Setting it switches the listing to newest-updated-first.
    pub updated_since: Option<DateTime<Utc>>,
    pub max_pages: Option<u32>,
}

impl Default for PullRequestQuery {
    fn default() -> Self {
        Self {
            state: "all".to_string(),
            per_page: DEFAULT_PER_PAGE,
            updated_since: None,
            max_pages: None,
        }
    }
}

impl PullRequestQuery {
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    #[must_use]
    pub const fn with_updated_since(mut self, updated_since: DateTime<Utc>) -> Self {
        self.updated_since = Some(updated_since);
        self
    }

    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("state", self.state.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", page.to_string()),
        ];
        if self.updated_since.is_some() {
            params.push(("sort", "updated".to_string()));
            params.push(("direction", "desc".to_string()));
        }
        params
    }

    /// True only when `updated_at` parses and is strictly older than the
    /// window. Records with an unknown time stay in.
    fn is_outside_window(&self, pr: &Value) -> bool {
        let Some(threshold) = self.updated_since else {
            return false;
        };
        pr.get("updated_at")
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
            .is_some_and(|updated_at| updated_at < threshold)
    }
}

struct PageCursor {
    path: String,
    query: PullRequestQuery,
    page: u32,
    pending: VecDeque<Value>,
    last_page_fetched: bool,
    yielded: u64,
}

impl GitHubClient {
    /// Count the items behind a list endpoint with a single request.
    ///
    /// Asks for one item per page and reads the `rel="last"` page number.
    /// Without that cursor the length of the returned page is used, which
    /// undercounts if the server omits the header on a longer listing.
    ///
    /// # Errors
    ///
    /// * If the request fails
    pub async fn count_via_pagination(
        &self,
        path: &str,
        extra_params: &Query<'_>,
    ) -> Result<u64, ApiError> {
        let mut params = vec![("per_page", "1".to_string()), ("page", "1".to_string())];
        params.extend(extra_params.iter().cloned());

        let response = self.fetch(path, &params).await?;

        if let Some(last_page) = response.last_page() {
            log::debug!("{path}: last page cursor says {last_page}");
            return Ok(last_page);
        }

        let items = response.body.as_array().map_or(0, Vec::len);
        log::debug!("{path}: no last page cursor, counting {items} item(s)");
        Ok(items as u64)
    }

    /// Lazily list the pull requests of a repository.
    ///
    /// Pages are only requested when the consumer has drained the previous
    /// one. The stream ends on an empty page, when the `Link` header stops
    /// advertising a next page, after `max_pages`, or at the first pull request
    /// outside `updated_since`. Each call starts again from page one.
    pub fn pull_requests<'a>(
        &'a self,
        owner: &'a str,
        repo: &'a str,
        query: PullRequestQuery,
    ) -> impl Stream<Item = Result<Value, ApiError>> + 'a {
        let cursor = PageCursor {
            path: format!("/repos/{owner}/{repo}/pulls"),
            query,
            page: 1,
            pending: VecDeque::new(),
            last_page_fetched: false,
            yielded: 0,
        };

        futures::stream::try_unfold(cursor, move |cursor| self.next_pull_request(cursor))
    }

    async fn next_pull_request(
        &self,
        mut cursor: PageCursor,
    ) -> Result<Option<(Value, PageCursor)>, ApiError> {
        loop {
            if let Some(pr) = cursor.pending.pop_front() {
                if cursor.query.is_outside_window(&pr) {
                    log::info!(
                        "Stopping by time window at page={}: PR updated_at={} is older than the window",
                        cursor.page - 1,
                        pr["updated_at"].as_str().unwrap_or_default(),
                    );
                    return Ok(None);
                }
                cursor.yielded += 1;
                return Ok(Some((pr, cursor)));
            }

            if cursor.last_page_fetched {
                log::info!("No next page link. Total yielded={}", cursor.yielded);
                return Ok(None);
            }

            if cursor.query.max_pages.is_some_and(|max| cursor.page > max) {
                log::info!("Stopping PR iteration due to max_pages={}", cursor.page - 1);
                return Ok(None);
            }

            let response = self
                .fetch(&cursor.path, &cursor.query.params(cursor.page))
                .await?;
            let has_next = response.has_next_page();
            let items = response.into_array("pull requests")?;

            if items.is_empty() {
                log::info!(
                    "No more PRs (page={}). Total yielded={}",
                    cursor.page,
                    cursor.yielded
                );
                return Ok(None);
            }

            log::info!(
                "Fetched PR page {}: {} items (yielded so far={})",
                cursor.page,
                items.len(),
                cursor.yielded
            );

            cursor.last_page_fetched = !has_next;
            cursor.page += 1;
            cursor.pending.extend(items);
        }
    }
}
