#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Ranking of contributors by how many pull requests they opened.

use std::borrow::Borrow;
use std::collections::HashMap;

use futures::{TryStream, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorPrCount {
    pub login: String,
    pub pr_count: u64,
}

/// Whether a GitHub user object belongs to an automated account.
///
/// Either `type` is `"Bot"` or the login carries the `[bot]` suffix.
#[must_use]
pub fn is_bot_user(user: &Value) -> bool {
    let Some(user) = user.as_object() else {
        return false;
    };
    let login = user.get("login").and_then(Value::as_str).unwrap_or_default();
    let user_type = user.get("type").and_then(Value::as_str).unwrap_or_default();

    user_type == "Bot" || login.ends_with("[bot]")
}

/// Running per-login pull request counts.
#[derive(Debug, Default)]
pub struct ContributorTally {
    exclude_bots: bool,
    counts: HashMap<String, u64>,
    processed: u64,
    bots_skipped: u64,
}

impl ContributorTally {
    #[must_use]
    pub fn new(exclude_bots: bool) -> Self {
        Self {
            exclude_bots,
            ..Self::default()
        }
    }

    /// Count one pull request record. Records without a usable `user.login`
    /// are ignored.
    pub fn record(&mut self, pr: &Value) {
        self.processed += 1;

        let user = &pr["user"];
        if !user.is_object() {
            return;
        }

        if self.exclude_bots && is_bot_user(user) {
            self.bots_skipped += 1;
            return;
        }

        let Some(login) = user["login"].as_str().filter(|login| !login.is_empty()) else {
            return;
        };

        *self.counts.entry(login.to_string()).or_default() += 1;
    }

    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    #[must_use]
    pub const fn bots_skipped(&self) -> u64 {
        self.bots_skipped
    }

    #[must_use]
    pub fn contributors(&self) -> usize {
        self.counts.len()
    }

    /// Contributors by count descending, ties by login ignoring case.
    #[must_use]
    pub fn finish(self) -> Vec<ContributorPrCount> {
        log::debug!(
            "Processed {} PRs | {} contributors | {} bot PRs skipped",
            self.processed,
            self.counts.len(),
            self.bots_skipped
        );

        let mut ranking: Vec<ContributorPrCount> = self
            .counts
            .into_iter()
            .map(|(login, pr_count)| ContributorPrCount { login, pr_count })
            .collect();

        ranking.sort_by(|a, b| {
            b.pr_count
                .cmp(&a.pr_count)
                .then_with(|| a.login.to_lowercase().cmp(&b.login.to_lowercase()))
                .then_with(|| a.login.cmp(&b.login))
        });
        ranking
    }
}

/// Rank contributors over an in-memory sequence of pull request records.
#[must_use]
pub fn rank_contributors<I>(prs: I, exclude_bots: bool) -> Vec<ContributorPrCount>
where
    I: IntoIterator,
    I::Item: Borrow<Value>,
{
    let mut tally = ContributorTally::new(exclude_bots);
    for pr in prs {
        tally.record(pr.borrow());
    }
    tally.finish()
}

/// Rank contributors while draining a lazy stream of pull request records.
///
/// # Errors
///
/// * The first error yielded by the stream
pub async fn rank_contributor_stream<S>(
    prs: S,
    exclude_bots: bool,
) -> Result<Vec<ContributorPrCount>, S::Error>
where
    S: TryStream<Ok = Value>,
{
    let mut tally = ContributorTally::new(exclude_bots);
    prs.try_for_each(|pr| {
        tally.record(&pr);
        futures::future::ready(Ok(()))
    })
    .await?;
    Ok(tally.finish())
}
