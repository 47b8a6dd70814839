use repopulse_commit_graph::{GraphBuildError, build_commit_graph_dot};
use repopulse_github::{GitHubClient, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GitHubClient {
    GitHubClient::new()
        .unwrap()
        .with_token("t")
        .with_base_url(server.uri())
        .with_retry_policy(RetryPolicy::immediate(3))
}

async fn mount_commit(server: &MockServer, sha: &str, message: &str, parents: &[&str]) {
    let parents: Vec<_> = parents.iter().map(|p| json!({"sha": p})).collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/ctfd/CTFd/commits/{sha}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": sha,
            "commit": {"message": message},
            "parents": parents,
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_graph_for_merged_branch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/ctfd/CTFd/pulls"))
        .and(query_param("state", "closed"))
        .and(query_param("head", "ctfd:feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 42, "merged_at": "2024-02-01T10:00:00Z", "merge_commit_sha": "m123"},
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/ctfd/CTFd/pulls/42/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sha": "c1", "commit": {"message": "Add feature"}, "parents": [{"sha": "p1"}]},
            {"sha": "c2", "commit": {"message": "Fix bug"}, "parents": [{"sha": "c1"}]},
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_commit(&mock_server, "m123", "Merge pull request #42", &["p1", "p2"]).await;
    mount_commit(&mock_server, "p1", "Bump version", &[]).await;
    mount_commit(&mock_server, "p2", "Fix bug", &["c1"]).await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("graph.dot");

    let graph = build_commit_graph_dot(&client(&mock_server), "ctfd", "CTFd", "feature", &out_path)
        .await
        .unwrap();

    for sha in ["c1", "c2", "m123", "p1", "p2"] {
        assert!(graph.contains_node(sha), "missing node {sha}");
    }
    assert_eq!(graph.node_count(), 5);
    for (parent, child) in [("c1", "c2"), ("c2", "m123"), ("p1", "m123"), ("p2", "m123")] {
        assert!(graph.contains_edge(parent, child), "missing edge {parent} -> {child}");
    }
    assert_eq!(graph.edge_count(), 4);

    let dot = std::fs::read_to_string(&out_path).unwrap();
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("rankdir=TB;"));
    assert!(dot.contains(r#""c2" -> "m123" [arrowsize=0.8];"#));
    assert!(dot.contains(r#""m123" [label="MR commit\nmain branch\nm123""#));
    assert!(dot.contains(r#""c1" [label="Add feature\nfeature\nc1""#));
}

#[test_log::test(tokio::test)]
async fn test_unmerged_branch_fails_without_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/ctfd/CTFd/pulls"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 5, "merged_at": null, "merge_commit_sha": "abc"},
        ])))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("graph.dot");

    let err = build_commit_graph_dot(&client(&mock_server), "ctfd", "CTFd", "stale", &out_path)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphBuildError::NoMergedPr { .. }));
    assert!(!out_path.exists());
}

#[test_log::test(tokio::test)]
async fn test_api_failure_is_wrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/ctfd/CTFd/pulls"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "rate limited"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("graph.dot");

    let err = build_commit_graph_dot(&client(&mock_server), "ctfd", "CTFd", "feature", &out_path)
        .await
        .unwrap_err();

    assert!(matches!(err, GraphBuildError::Api(_)));
    assert!(!out_path.exists());
}
