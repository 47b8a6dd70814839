use repopulse_github_models::{CommitInfo, short_sha};

pub const DEFAULT_TITLE_LEN: usize = 22;

const ELLIPSIS: &str = "...";

/// A short, ASCII-only title for a commit node.
///
/// Uses the first line of the message with anything outside printable ASCII
/// dropped. Titles longer than `max_len` keep `max_len - 1` characters plus
/// `...`. An empty title falls back to the short sha, or `commit` when there
/// is no sha either.
#[must_use]
pub fn commit_title(commit: &CommitInfo, max_len: usize) -> String {
    let first_line = commit.message.lines().next().unwrap_or_default();
    let title: String = first_line
        .trim()
        .chars()
        .filter(|c| matches!(c, ' '..='~'))
        .collect();
    let title = title.trim();

    if title.is_empty() {
        return if commit.sha.is_empty() {
            "commit".to_string()
        } else {
            short_sha(&commit.sha).to_string()
        };
    }

    if title.len() > max_len {
        let keep = max_len.saturating_sub(1);
        format!("{}{ELLIPSIS}", &title[..keep])
    } else {
        title.to_string()
    }
}

/// Label for a commit made on the pull request branch.
#[must_use]
pub fn branch_commit_label(commit: &CommitInfo, branch: &str) -> String {
    format!(
        "{}\n{branch}\n{}",
        commit_title(commit, DEFAULT_TITLE_LEN),
        commit.short_sha()
    )
}

#[must_use]
pub fn merge_commit_label(sha: &str) -> String {
    format!("MR commit\nmain branch\n{}", short_sha(sha))
}

#[must_use]
pub fn parent_commit_label(commit: &CommitInfo) -> String {
    format!(
        "{}\nmain branch\n{}",
        commit_title(commit, DEFAULT_TITLE_LEN),
        commit.short_sha()
    )
}
