//! Defensive conversion of raw GitHub payloads into models.
//!
//! Missing or mistyped fields fall back to empty values instead of failing.

use repopulse_github_models::{CommitInfo, MergedPullRequest, ReleaseInfo};
use serde_json::Value;

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

pub(crate) fn parse_release(value: &Value) -> ReleaseInfo {
    let field = |key: &str| value[key].as_str().unwrap_or_default().to_string();
    ReleaseInfo {
        tag_name: field("tag_name"),
        name: field("name"),
        published_at: field("published_at"),
    }
}

/// `Some` only for pull requests that were actually merged.
pub(crate) fn parse_merged_pr(value: &Value) -> Option<MergedPullRequest> {
    non_empty_str(&value["merged_at"])?;
    Some(MergedPullRequest {
        number: value["number"].as_u64().unwrap_or_default(),
        merge_commit_sha: non_empty_str(&value["merge_commit_sha"]).map(ToString::to_string),
    })
}

/// Commit objects without a sha are dropped.
pub(crate) fn parse_commit(value: &Value) -> Option<CommitInfo> {
    let sha = non_empty_str(&value["sha"])?;
    Some(CommitInfo {
        sha: sha.to_string(),
        message: value["commit"]["message"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        parents: value["parents"]
            .as_array()
            .map(|parents| {
                parents
                    .iter()
                    .filter_map(|p| non_empty_str(&p["sha"]))
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_release_tolerates_nulls() {
        let release = parse_release(&json!({"tag_name": "3.7.0", "name": null}));
        assert_eq!(release.tag_name, "3.7.0");
        assert_eq!(release.name, "");
        assert_eq!(release.published_at, "");
    }

    #[test]
    fn test_parse_merged_pr_requires_merged_at() {
        assert!(parse_merged_pr(&json!({"number": 1, "merged_at": null})).is_none());
        assert!(parse_merged_pr(&json!({"number": 1, "merged_at": ""})).is_none());

        let pr = parse_merged_pr(&json!({
            "number": 7,
            "merged_at": "2024-01-01T00:00:00Z",
            "merge_commit_sha": "m123"
        }))
        .unwrap();
        assert_eq!(pr.number, 7);
        assert_eq!(pr.merge_commit_sha.as_deref(), Some("m123"));
    }

    #[test]
    fn test_parse_merged_pr_without_merge_sha() {
        let pr = parse_merged_pr(&json!({"number": 7, "merged_at": "2024-01-01T00:00:00Z"})).unwrap();
        assert_eq!(pr.merge_commit_sha, None);
    }

    #[test]
    fn test_parse_commit() {
        let commit = parse_commit(&json!({
            "sha": "abc",
            "commit": {"message": "Fix bug\n\nDetails"},
            "parents": [{"sha": "p1"}, {"url": "no-sha"}, {"sha": "p2"}]
        }))
        .unwrap();
        assert_eq!(commit.sha, "abc");
        assert_eq!(commit.message, "Fix bug\n\nDetails");
        assert_eq!(commit.parents, vec!["p1", "p2"]);
    }

    #[test]
    fn test_parse_commit_without_sha_is_skipped() {
        assert!(parse_commit(&json!({"commit": {"message": "x"}})).is_none());
        assert!(parse_commit(&json!("not an object")).is_none());
    }
}
