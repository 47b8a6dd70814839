#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};

/// Headline numbers for a single repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub owner: String,
    pub repo: String,
    pub forks: u64,
    pub stars: u64,
    pub contributors: u64,
    pub pull_requests: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub name: String,
    /// ISO-8601 timestamp exactly as GitHub returned it.
    pub published_at: String,
}

/// The pull request that merged a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedPullRequest {
    pub number: u64,
    pub merge_commit_sha: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    /// Full commit message; empty when GitHub omitted it.
    pub message: String,
    /// Parent shas in the order GitHub lists them.
    pub parents: Vec<String>,
}

impl CommitInfo {
    /// First seven characters of the sha.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }
}

#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices().nth(7).map_or(sha, |(idx, _)| &sha[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_sha_truncates_to_seven() {
        assert_eq!(short_sha("0123456789abcdef"), "0123456");
    }

    #[test]
    fn test_short_sha_keeps_short_values() {
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(short_sha(""), "");
    }
}
