use repopulse_github_models::{CommitInfo, MergedPullRequest, ReleaseInfo, RepoStats};

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::pagination::DEFAULT_PER_PAGE;
use crate::parse::{parse_commit, parse_merged_pr, parse_release};

pub const DEFAULT_RELEASE_COUNT: usize = 3;

impl GitHubClient {
    /// The `n` newest releases, newest first.
    ///
    /// # Errors
    ///
    /// * If the request fails or the body is not a list
    pub async fn latest_releases(
        &self,
        owner: &str,
        repo: &str,
        n: usize,
    ) -> Result<Vec<ReleaseInfo>, ApiError> {
        let releases = self
            .fetch(
                &format!("/repos/{owner}/{repo}/releases"),
                &[("per_page", n.to_string()), ("page", "1".to_string())],
            )
            .await?
            .into_array("releases")?;

        Ok(releases.iter().take(n).map(parse_release).collect())
    }

    /// `(forks, stars)` of a repository.
    ///
    /// # Errors
    ///
    /// * If the request fails or the body is not an object
    pub async fn repo_info(&self, owner: &str, repo: &str) -> Result<(u64, u64), ApiError> {
        let data = self
            .fetch(&format!("/repos/{owner}/{repo}"), &[])
            .await?
            .into_object("repo")?;

        let count = |key: &str| data.get(key).and_then(serde_json::Value::as_u64).unwrap_or(0);
        Ok((count("forks_count"), count("stargazers_count")))
    }

    /// Contributor count, anonymous contributors included.
    ///
    /// # Errors
    ///
    /// * If the request fails
    pub async fn count_contributors(&self, owner: &str, repo: &str) -> Result<u64, ApiError> {
        self.count_via_pagination(
            &format!("/repos/{owner}/{repo}/contributors"),
            &[("anon", "true".to_string())],
        )
        .await
    }

    /// # Errors
    ///
    /// * If the request fails
    pub async fn count_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
    ) -> Result<u64, ApiError> {
        self.count_via_pagination(
            &format!("/repos/{owner}/{repo}/pulls"),
            &[("state", state.to_string())],
        )
        .await
    }

    /// Forks, stars, contributors and pull requests, fetched one after another.
    ///
    /// # Errors
    ///
    /// * If any of the three underlying queries fails
    pub async fn repo_stats(&self, owner: &str, repo: &str) -> Result<RepoStats, ApiError> {
        let (forks, stars) = self.repo_info(owner, repo).await?;
        let contributors = self.count_contributors(owner, repo).await?;
        let pull_requests = self.count_pull_requests(owner, repo, "all").await?;

        Ok(RepoStats {
            owner: owner.to_string(),
            repo: repo.to_string(),
            forks,
            stars,
            contributors,
            pull_requests,
        })
    }

    /// The most recently updated merged pull request whose head is `branch`.
    ///
    /// # Errors
    ///
    /// * If the request fails or the body is not a list
    pub async fn find_merged_pr_for_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<MergedPullRequest>, ApiError> {
        let pulls = self
            .fetch(
                &format!("/repos/{owner}/{repo}/pulls"),
                &[
                    ("state", "closed".to_string()),
                    ("head", format!("{owner}:{branch}")),
                    ("per_page", DEFAULT_PER_PAGE.to_string()),
                    ("page", "1".to_string()),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                ],
            )
            .await?
            .into_array("pulls")?;

        Ok(pulls.iter().find_map(parse_merged_pr))
    }

    /// Every commit of a pull request, in the order GitHub lists them.
    ///
    /// # Errors
    ///
    /// * If any page request fails or a page is not a list
    pub async fn list_pr_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitInfo>, ApiError> {
        let path = format!("/repos/{owner}/{repo}/pulls/{number}/commits");
        let mut commits = Vec::new();
        let mut page = 1_u32;

        loop {
            let response = self
                .fetch(
                    &path,
                    &[
                        ("per_page", DEFAULT_PER_PAGE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;
            let has_next = response.has_next_page();
            let items = response.into_array("pull request commits")?;

            if items.is_empty() {
                break;
            }
            commits.extend(items.iter().filter_map(parse_commit));

            if !has_next {
                break;
            }
            page += 1;
        }

        log::debug!("PR #{number}: {} commit(s) over {page} page(s)", commits.len());
        Ok(commits)
    }

    /// A single commit with its parent shas.
    ///
    /// # Errors
    ///
    /// * If the request fails or the body is not an object
    pub async fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitInfo, ApiError> {
        let mut data = self
            .fetch(&format!("/repos/{owner}/{repo}/commits/{sha}"), &[])
            .await?
            .into_object("commit")?;

        data.entry("sha")
            .or_insert_with(|| serde_json::Value::String(sha.to_string()));

        let value = serde_json::Value::Object(data);
        Ok(parse_commit(&value).unwrap_or_else(|| CommitInfo {
            sha: sha.to_string(),
            message: String::new(),
            parents: Vec::new(),
        }))
    }
}
