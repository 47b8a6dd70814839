//! Console report sections.

use std::io::{self, Write};

use repopulse_github::models::{ReleaseInfo, RepoStats};
use repopulse_ranking::ContributorPrCount;

/// The header names the number of releases asked for, even when the
/// repository has fewer.
///
/// # Errors
///
/// * If writing to `out` fails
pub fn write_releases(
    out: &mut impl Write,
    requested: usize,
    releases: &[ReleaseInfo],
) -> io::Result<()> {
    writeln!(out, "\nLatest {requested} releases:")?;
    for release in releases {
        writeln!(
            out,
            "- {} | {} | {}",
            release.tag_name, release.name, release.published_at
        )?;
    }
    Ok(())
}

/// # Errors
///
/// * If writing to `out` fails
pub fn write_stats(out: &mut impl Write, stats: &RepoStats) -> io::Result<()> {
    writeln!(out, "\nRepo stats:")?;
    writeln!(out, "- forks: {}", stats.forks)?;
    writeln!(out, "- stars: {}", stats.stars)?;
    writeln!(out, "- contributors: {}", stats.contributors)?;
    writeln!(out, "- pull requests (all): {}", stats.pull_requests)
}

/// Numbered from 1, right-aligned to three columns.
///
/// # Errors
///
/// * If writing to `out` fails
pub fn write_ranking(out: &mut impl Write, ranking: &[ContributorPrCount]) -> io::Result<()> {
    writeln!(out, "\nContributors by number of PRs (desc):")?;
    for (i, row) in ranking.iter().enumerate() {
        writeln!(out, "{:>3}. {}: {}", i + 1, row.login, row.pr_count)?;
    }
    Ok(())
}
