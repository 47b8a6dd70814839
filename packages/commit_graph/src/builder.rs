use std::path::Path;

use repopulse_commit_graph_models::CommitGraph;

use crate::dot::write_dot;
use crate::error::GraphBuildError;
use crate::label::{branch_commit_label, merge_commit_label, parent_commit_label};
use crate::source::CommitSource;

const PROGRESS_EVERY: usize = 25;

/// Reconstruct the commit graph around the merge of `branch`.
///
/// The merged pull request's commits form a chain that ends in the merge
/// commit, and each parent of the merge commit points at it as well.
///
/// # Errors
///
/// * [`GraphBuildError::NoMergedPr`] if `branch` was never merged via a PR
/// * [`GraphBuildError::MissingMergeCommit`] if the PR has no merge sha
/// * [`GraphBuildError::Api`] if any GitHub request fails
pub async fn build_merge_graph<S: CommitSource + ?Sized>(
    source: &S,
    owner: &str,
    repo: &str,
    branch: &str,
) -> Result<CommitGraph, GraphBuildError> {
    let pr = source
        .find_merged_pr_for_branch(owner, repo, branch)
        .await?
        .ok_or_else(|| GraphBuildError::NoMergedPr {
            branch: branch.to_string(),
        })?;
    let merge_sha = pr
        .merge_commit_sha
        .ok_or(GraphBuildError::MissingMergeCommit { number: pr.number })?;

    log::info!(
        "Building commit graph for branch '{branch}' via merged PR #{}",
        pr.number
    );

    let pr_commits = source.list_pr_commits(owner, repo, pr.number).await?;
    log::info!("PR #{} commits fetched: {}", pr.number, pr_commits.len());

    let mut graph = CommitGraph::new();

    for (idx, commit) in pr_commits.iter().enumerate() {
        graph.add_node(&commit.sha, branch_commit_label(commit, branch));
        if (idx + 1) % PROGRESS_EVERY == 0 {
            log::info!(
                "Graph progress: processed {}/{} PR commits",
                idx + 1,
                pr_commits.len()
            );
        }
    }
    for pair in pr_commits.windows(2) {
        graph.add_edge(&pair[0].sha, &pair[1].sha);
    }

    let merge_commit = source.get_commit(owner, repo, &merge_sha).await?;
    graph.add_node(&merge_sha, merge_commit_label(&merge_sha));
    log::debug!(
        "Merge commit {merge_sha} has {} parent(s)",
        merge_commit.parents.len()
    );

    for parent_sha in &merge_commit.parents {
        let parent = source.get_commit(owner, repo, parent_sha).await?;
        graph.add_node(parent_sha, parent_commit_label(&parent));
        graph.add_edge(parent_sha, &merge_sha);
    }

    if let Some(tip) = pr_commits.last() {
        graph.add_edge(&tip.sha, &merge_sha);
    }

    Ok(graph)
}

/// Build the merge graph for `branch` and write it as DOT to `out_path`.
///
/// Nothing is written unless the whole graph could be assembled.
///
/// # Errors
///
/// * Any error from [`build_merge_graph`]
/// * [`GraphBuildError::Write`] if the file cannot be written
pub async fn build_commit_graph_dot<S: CommitSource + ?Sized>(
    source: &S,
    owner: &str,
    repo: &str,
    branch: &str,
    out_path: &Path,
) -> Result<CommitGraph, GraphBuildError> {
    let graph = build_merge_graph(source, owner, repo, branch).await?;
    write_dot(&graph, out_path)?;
    log::info!(
        "Wrote commit graph to {} (nodes={}, edges={})",
        out_path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
