use std::path::PathBuf;

use repopulse_github::ApiError;

/// Errors specific to building a merge graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphBuildError {
    /// No closed pull request with this head branch was merged.
    #[error(
        "Could not find a merged PR for branch '{branch}'. Make sure the branch existed and was merged via PR."
    )]
    NoMergedPr { branch: String },

    /// The merged pull request carries no merge commit sha.
    #[error("PR #{number} has no merge_commit_sha")]
    MissingMergeCommit { number: u64 },

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The DOT file could not be written.
    #[error("Failed to write commit graph to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
