#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Orchestration for the `repopulse` binary: repository stats, contributor
//! ranking and the merge commit graph, in that order.

pub mod cli;
pub mod logging;
pub mod report;

use std::io::Write;

use anyhow::Context as _;
use repopulse_commit_graph::build_commit_graph_dot;
use repopulse_github::{DEFAULT_RELEASE_COUNT, GitHubClient};
use repopulse_ranking::rank_contributor_stream;

pub use cli::{AppConfig, Cli};

/// Run against the configured API host, printing the report to stdout.
///
/// # Errors
///
/// * If the HTTP client cannot be built
/// * Any error from [`run_with_client`]
pub async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let client = GitHubClient::new()?
        .with_token(config.token.as_str())
        .with_base_url(config.api_url.as_str());

    run_with_client(&client, config, &mut std::io::stdout()).await
}

/// # Errors
///
/// * If any GitHub request fails
/// * If the commit graph cannot be built or written
/// * If writing the report to `out` fails
pub async fn run_with_client(
    client: &GitHubClient,
    config: &AppConfig,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let owner = config.owner.as_str();
    let repo = config.repo.as_str();

    log::info!("Fetching GitHub data for {owner}/{repo} ...");

    let releases = client
        .latest_releases(owner, repo, DEFAULT_RELEASE_COUNT)
        .await
        .context("Failed to fetch releases")?;
    let stats = client
        .repo_stats(owner, repo)
        .await
        .context("Failed to fetch repo stats")?;

    report::write_releases(out, DEFAULT_RELEASE_COUNT, &releases)?;
    report::write_stats(out, &stats)?;

    let ranking = rank_contributor_stream(
        client.pull_requests(owner, repo, config.pull_request_query()),
        config.exclude_bot_users,
    )
    .await
    .context("Failed to rank contributors")?;

    report::write_ranking(out, &ranking)?;
    out.flush()?;

    build_commit_graph_dot(client, owner, repo, &config.branch, &config.dot_out_path)
        .await
        .with_context(|| format!("Failed to build commit graph for branch '{}'", config.branch))?;

    log::info!("Done.");
    Ok(())
}
