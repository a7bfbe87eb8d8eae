//! Single-request behavior of the GitHub client.
//!
//! Uses wiremock to stand in for the GitHub API.

use gh_analyzer::{GithubClient, Notifications, Repository};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NOT_AVAILABLE: &str = "API not available, try again later";

#[tokio::test]
async fn test_fetch_decodes_body_and_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    "<https://api.github.com/orgs/acme/repos?page=2>; rel=\"next\"",
                )
                .set_body_json(serde_json::json!([
                    { "full_name": "acme/anvil" },
                    { "full_name": "acme/rocket" }
                ])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = GithubClient::new(&mock_server.uri()).unwrap();
    let mut notes = Notifications::new();
    let resource = client
        .fetch::<Vec<Repository>>("orgs/acme/repos", &[], &mut notes)
        .await;

    assert_eq!(resource.body.len(), 2);
    assert_eq!(resource.body[1].full_name, "acme/rocket");
    assert!(resource.links.has_next());
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_server_error_degrades_to_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(502)
                .insert_header("link", "<https://api.github.com/x?page=2>; rel=\"next\"")
                .set_body_json(serde_json::json!({ "message": "Server Error" })),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = GithubClient::new(&mock_server.uri()).unwrap();
    let mut notes = Notifications::new();

    for _ in 0..2 {
        let resource = client
            .fetch::<Vec<Repository>>("orgs/acme/repos", &[], &mut notes)
            .await;
        assert!(resource.body.is_empty());
        assert!(!resource.links.has_next());
    }

    // Same failure twice, one notification
    assert_eq!(notes.len(), 1);
    assert!(notes.contains(NOT_AVAILABLE));
}

#[tokio::test]
async fn test_get_json_reports_status_and_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/ghost/repos"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "Not Found" })),
        )
        .mount(&mock_server)
        .await;

    let client = GithubClient::new(&mock_server.uri()).unwrap();
    let err = client
        .get_json::<Vec<Repository>>("orgs/ghost/repos", &[])
        .await
        .unwrap_err();

    match err {
        gh_analyzer::AnalyzerError::ApiError {
            message,
            status_code,
        } => {
            assert_eq!(status_code, Some(404));
            assert!(message.contains("Not Found"), "{message}");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_is_reported_separately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(serde_json::json!({ "message": "API rate limit exceeded" })),
        )
        .mount(&mock_server)
        .await;

    let client = GithubClient::new(&mock_server.uri()).unwrap();

    let err = client
        .get_json::<Vec<Repository>>("orgs/acme/repos", &[])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        gh_analyzer::AnalyzerError::RateLimited {
            reset_at: Some(1_700_000_000)
        }
    ));

    let mut notes = Notifications::new();
    let resource = client
        .fetch::<Vec<Repository>>("orgs/acme/repos", &[], &mut notes)
        .await;
    assert!(resource.body.is_empty());
    assert!(notes.contains("API rate limit exceeded, try again later"));
}

#[tokio::test]
async fn test_unexpected_body_shape_is_recovered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/acme/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let client = GithubClient::new(&mock_server.uri()).unwrap();
    let mut notes = Notifications::new();
    let resource = client
        .fetch::<Vec<Repository>>("orgs/acme/repos", &[], &mut notes)
        .await;

    assert!(resource.body.is_empty());
    assert!(notes.contains("API returned an unexpected response, try again later"));
}

#[tokio::test]
async fn test_unreachable_host_degrades_to_empty_page() {
    // Nothing listens on the discard port
    let client = GithubClient::new("http://127.0.0.1:9").unwrap();
    let mut notes = Notifications::new();
    let resource = client
        .fetch::<Vec<Repository>>("orgs/acme/repos", &[], &mut notes)
        .await;

    assert!(resource.body.is_empty());
    assert!(notes.contains(NOT_AVAILABLE));
}
