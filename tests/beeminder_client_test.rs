/// Integration tests for the Beeminder HTTP client against a mock server.
///
/// Test coverage:
/// - Newest datapoint is picked locally, not from response order
/// - Read failures collapse to "no datapoint"
/// - Post body, query auth and error classification
/// - Account lookup
mod common;

use bmsync::domain::errors::RemoteError;
use bmsync::domain::models::{AuthConfig, Daystamp, MetricId, NewDatapoint, RequestId};
use bmsync::domain::ports::BeeminderClient;
use chrono::NaiveDate;
use common::{client_for, datapoint_json, reviews_goal};
use mockito::{Matcher, Server};

const DATAPOINTS_PATH: &str = "/users/alice/goals/reviews/datapoints.json";

fn new_datapoint(value: f64) -> NewDatapoint {
    let day = Daystamp::new(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap());
    NewDatapoint::new(
        day,
        value,
        "RemNote",
        RequestId::new(MetricId::ReviewCount, day, 1_772_884_800_000),
    )
}

#[tokio::test]
async fn test_fetch_latest_sorts_locally() {
    let mut server = Server::new_async().await;
    let body = serde_json::json!([
        datapoint_json(4.0, "20260307", 1_772_880_000),
        datapoint_json(9.0, "20260306", 1_772_890_000),
        datapoint_json(2.0, "20260307", 1_772_884_000),
    ]);
    let mock = server
        .mock("GET", DATAPOINTS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("auth_token".into(), "secret".into()),
            Matcher::UrlEncoded("sort".into(), "daystamp".into()),
            Matcher::UrlEncoded("count".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server.url());
    let latest = client
        .fetch_latest_datapoint(&reviews_goal())
        .await
        .expect("goal has datapoints");

    mock.assert_async().await;
    assert_eq!(latest.value, 2.0);
    assert_eq!(latest.daystamp, "20260307");
}

#[tokio::test]
async fn test_fetch_latest_on_empty_goal() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", DATAPOINTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server.url());
    assert!(client.fetch_latest_datapoint(&reviews_goal()).await.is_none());
}

#[tokio::test]
async fn test_fetch_failure_reads_as_empty() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", DATAPOINTS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = client_for(&server.url());
    assert!(client.fetch_latest_datapoint(&reviews_goal()).await.is_none());
}

#[tokio::test]
async fn test_unreachable_server_reads_as_empty() {
    let client = client_for("http://127.0.0.1:1");
    assert!(client.fetch_latest_datapoint(&reviews_goal()).await.is_none());
}

#[tokio::test]
async fn test_post_sends_body_and_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", DATAPOINTS_PATH)
        .match_query(Matcher::UrlEncoded("auth_token".into(), "secret".into()))
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "daystamp": "20260307",
            "value": 3.0,
            "comment": "via RemNote integration",
            "requestid": "reviewCount-20260307-1772884800000",
        })))
        .with_status(200)
        .with_body(datapoint_json(3.0, "20260307", 1_772_884_800).to_string())
        .create_async()
        .await;

    let client = client_for(&server.url());
    let created = client
        .post_datapoint(&reviews_goal(), &new_datapoint(3.0))
        .await
        .expect("post should succeed");

    mock.assert_async().await;
    assert_eq!(created.value, 3.0);
}

#[tokio::test]
async fn test_post_rejection_keeps_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", DATAPOINTS_PATH)
        .match_query(Matcher::Any)
        .with_status(422)
        .with_body(r#"{"errors":"value is not a number"}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .post_datapoint(&reviews_goal(), &new_datapoint(1.0))
        .await
        .unwrap_err();

    match err {
        RemoteError::ApiError { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("value is not a number"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_post_unauthorized_keeps_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", DATAPOINTS_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"errors":{"token":"bad_token"}}"#)
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .post_datapoint(&reviews_goal(), &new_datapoint(1.0))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RemoteError::ApiError {
            status: 401,
            body: r#"{"errors":{"token":"bad_token"}}"#.to_string(),
        }
    );
}

#[tokio::test]
async fn test_post_with_garbage_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", DATAPOINTS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .post_datapoint(&reviews_goal(), &new_datapoint(1.0))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_network_error_does_not_leak_token() {
    let client = client_for("http://127.0.0.1:1");
    let err = client
        .post_datapoint(&reviews_goal(), &new_datapoint(1.0))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::NetworkError(_)));
    assert!(!err.to_string().contains("secret"));
}

#[tokio::test]
async fn test_fetch_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/users/alice.json")
        .match_query(Matcher::UrlEncoded("auth_token".into(), "secret".into()))
        .with_status(200)
        .with_body(
            serde_json::json!({
                "username": "alice",
                "timezone": "Europe/Berlin",
                "goals": ["reviews", "edits"],
                "updated_at": 1772884800
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let user = client
        .fetch_user(&AuthConfig {
            user: "alice".to_string(),
            token: "secret".to_string(),
        })
        .await
        .expect("lookup should succeed");

    mock.assert_async().await;
    assert_eq!(user.username, "alice");
    assert_eq!(user.timezone.as_deref(), Some("Europe/Berlin"));
    assert_eq!(user.goals, vec!["reviews", "edits"]);
}
