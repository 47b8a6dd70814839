#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Read-only GitHub REST client with retries and `Link`-header pagination.

mod client;
mod error;
mod link;
mod pagination;
mod parse;
mod repos;
mod retry;
mod timestamp;

pub use client::{ApiResponse, GITHUB_API_BASE, GitHubClient, Query};
pub use error::{ApiError, AttemptError};
pub use link::{has_next_page, parse_last_page};
pub use pagination::{DEFAULT_PER_PAGE, PullRequestQuery};
pub use repopulse_github_models as models;
pub use repos::DEFAULT_RELEASE_COUNT;
pub use retry::RetryPolicy;
pub use timestamp::parse_timestamp;
