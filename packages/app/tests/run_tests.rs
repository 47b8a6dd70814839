use chrono::Utc;
use clap::Parser;
use repopulse_app::{AppConfig, Cli, run_with_client};
use repopulse_github::{GitHubClient, RetryPolicy};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REPO: &str = "/repos/ctfd/CTFd";

fn config(server: &MockServer, dot_out_path: &std::path::Path, extra: &[&str]) -> AppConfig {
    let uri = server.uri();
    let dot = dot_out_path.to_string_lossy().into_owned();
    let mut args = vec![
        "repopulse",
        "--token",
        "t",
        "--owner",
        "ctfd",
        "--repo",
        "CTFd",
        "--branch",
        "feature",
        "--api-url",
        uri.as_str(),
        "--dot-out-path",
        dot.as_str(),
    ];
    args.extend_from_slice(extra);
    AppConfig::from_cli(Cli::try_parse_from(args).unwrap(), Utc::now())
}

fn client(config: &AppConfig) -> GitHubClient {
    GitHubClient::new()
        .unwrap()
        .with_token(config.token.as_str())
        .with_base_url(config.api_url.as_str())
        .with_retry_policy(RetryPolicy::immediate(3))
}

async fn mount_json(server: &MockServer, route: String, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_stats(server: &MockServer) {
    mount_json(
        server,
        format!("{REPO}/releases"),
        json!([
            {"tag_name": "3.7.3", "name": "3.7.3", "published_at": "2024-06-01T00:00:00Z"},
            {"tag_name": "3.7.2", "name": "3.7.2", "published_at": "2024-05-01T00:00:00Z"},
        ]),
    )
    .await;
    mount_json(
        server,
        REPO.to_string(),
        json!({"forks_count": 3, "stargazers_count": 9}),
    )
    .await;
    mount_json(server, format!("{REPO}/contributors"), json!([{}, {}])).await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/pulls")))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{}]))
                .insert_header(
                    "Link",
                    r#"<https://api.github.com/repositories/1/pulls?per_page=1&page=4>; rel="last""#,
                ),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/pulls")))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 4, "user": {"login": "bob", "type": "User"}},
            {"number": 3, "user": {"login": "dependabot[bot]", "type": "Bot"}},
            {"number": 2, "user": {"login": "alice", "type": "User"}},
            {"number": 1, "user": {"login": "bob", "type": "User"}},
        ])))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_merge(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/pulls")))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 4, "merged_at": "2024-02-01T10:00:00Z", "merge_commit_sha": "m123"},
        ])))
        .mount(server)
        .await;
    mount_json(
        server,
        format!("{REPO}/pulls/4/commits"),
        json!([{"sha": "c1", "commit": {"message": "Add feature"}, "parents": [{"sha": "p1"}]}]),
    )
    .await;
    mount_json(
        server,
        format!("{REPO}/commits/m123"),
        json!({"sha": "m123", "commit": {"message": "Merge"}, "parents": [{"sha": "p1"}, {"sha": "c1"}]}),
    )
    .await;
    mount_json(
        server,
        format!("{REPO}/commits/p1"),
        json!({"sha": "p1", "commit": {"message": "Release"}, "parents": []}),
    )
    .await;
    mount_json(
        server,
        format!("{REPO}/commits/c1"),
        json!({"sha": "c1", "commit": {"message": "Add feature"}, "parents": [{"sha": "p1"}]}),
    )
    .await;
}

#[test_log::test(tokio::test)]
async fn test_full_run_prints_report_and_writes_graph() {
    let mock_server = MockServer::start().await;
    mount_stats(&mock_server).await;
    mount_merge(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let dot_path = dir.path().join("graph.dot");
    let config = config(&mock_server, &dot_path, &[]);

    let mut out = Vec::new();
    run_with_client(&client(&config), &config, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Latest 3 releases:\n- 3.7.3 | 3.7.3 | 2024-06-01T00:00:00Z\n"));
    assert!(text.contains("- forks: 3\n"));
    assert!(text.contains("- stars: 9\n"));
    assert!(text.contains("- contributors: 2\n"));
    assert!(text.contains("- pull requests (all): 4\n"));
    assert!(text.contains(
        "Contributors by number of PRs (desc):\n  1. bob: 2\n  2. alice: 1\n  3. dependabot[bot]: 1\n"
    ));

    let dot = std::fs::read_to_string(&dot_path).unwrap();
    assert!(dot.contains(r#""c1" -> "m123" [arrowsize=0.8];"#));
    assert!(dot.contains(r#""p1" -> "m123" [arrowsize=0.8];"#));
}

#[test_log::test(tokio::test)]
async fn test_run_can_exclude_bots() {
    let mock_server = MockServer::start().await;
    mount_stats(&mock_server).await;
    mount_merge(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let config = config(
        &mock_server,
        &dir.path().join("graph.dot"),
        &["--exclude-bot-users"],
    );

    let mut out = Vec::new();
    run_with_client(&client(&config), &config, &mut out)
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("  1. bob: 2\n  2. alice: 1\n"));
    assert!(!text.contains("dependabot"));
}

#[test_log::test(tokio::test)]
async fn test_run_fails_for_unmerged_branch() {
    let mock_server = MockServer::start().await;
    mount_stats(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/pulls")))
        .and(query_param("state", "closed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dot_path = dir.path().join("graph.dot");
    let config = config(&mock_server, &dot_path, &[]);

    let mut out = Vec::new();
    let err = run_with_client(&client(&config), &config, &mut out)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Could not find a merged PR"), "{err:#}");
    assert!(!dot_path.exists());
    assert!(String::from_utf8(out).unwrap().contains("Contributors by number of PRs"));
}
