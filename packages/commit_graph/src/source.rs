use repopulse_github::{ApiError, GitHubClient};
use repopulse_github_models::{CommitInfo, MergedPullRequest};

/// Where the merge graph builder reads pull requests and commits from.
#[async_trait::async_trait]
pub trait CommitSource: Send + Sync {
    async fn find_merged_pr_for_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<MergedPullRequest>, ApiError>;

    async fn list_pr_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitInfo>, ApiError>;

    async fn get_commit(&self, owner: &str, repo: &str, sha: &str)
    -> Result<CommitInfo, ApiError>;
}

#[async_trait::async_trait]
impl CommitSource for GitHubClient {
    async fn find_merged_pr_for_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Option<MergedPullRequest>, ApiError> {
        Self::find_merged_pr_for_branch(self, owner, repo, branch).await
    }

    async fn list_pr_commits(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<CommitInfo>, ApiError> {
        Self::list_pr_commits(self, owner, repo, number).await
    }

    async fn get_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<CommitInfo, ApiError> {
        Self::get_commit(self, owner, repo, sha).await
    }
}
