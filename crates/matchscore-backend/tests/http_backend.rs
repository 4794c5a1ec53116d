use std::sync::Arc;
use std::time::Duration;

use matchscore_backend::{
    build_backend_client, resolve_controls, BackendClientConfig, BackendConfig, BackendError,
    ScoringSession,
};
use matchscore_core::Controls;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> BackendConfig {
    let mut cfg = BackendConfig::new(server.uri());
    cfg.timeout = Duration::from_secs(5);
    cfg
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetches_controls_with_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/controls"))
        .and(header("authorization", "Bearer t0ken"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"adjust": 10.0, "exponent": 3.0, "ota": 0.25})),
        )
        .mount(&server)
        .await;

    let client =
        build_backend_client(BackendClientConfig::Http(config(&server).with_token("t0ken")))
            .unwrap();
    let res = resolve_controls(client.as_ref()).await;

    assert!(res.advisory.is_none());
    assert_eq!(res.controls, Controls::new(10.0, 3.0, 0.25));
}

#[tokio::test]
async fn server_error_falls_back_to_defaults_with_advisory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/controls"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = build_backend_client(BackendClientConfig::Http(config(&server))).unwrap();
    let res = resolve_controls(client.as_ref()).await;

    assert_eq!(res.controls, Controls::default());
    let advisory = res.advisory.expect("advisory");
    assert!(advisory.message().starts_with("using default scoring controls because"));
    assert!(advisory.reason.contains("503"));
}

#[tokio::test]
async fn malformed_controls_body_falls_back_to_defaults() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/controls", json!({"adjust": "five"})).await;

    let client = build_backend_client(BackendClientConfig::Http(config(&server))).unwrap();
    let res = resolve_controls(client.as_ref()).await;

    assert!(res.is_default());
    assert_eq!(res.controls, Controls::default());
}

#[tokio::test]
async fn empty_questions_body_is_an_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/questions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  "))
        .mount(&server)
        .await;

    let client = build_backend_client(BackendClientConfig::Http(config(&server))).unwrap();
    let err = client.fetch_questions().await.unwrap_err();

    match err {
        BackendError::InvalidResponse(msg) => assert!(msg.contains("empty response body")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_defaults() {
    let mut cfg = BackendConfig::new("http://127.0.0.1:9");
    cfg.timeout = Duration::from_millis(500);
    let client = build_backend_client(BackendClientConfig::Http(cfg)).unwrap();

    let res = resolve_controls(client.as_ref()).await;
    assert!(res.is_default());
}

#[tokio::test]
async fn scores_pair_end_to_end_over_http() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/controls",
        json!({"adjust": 5, "exponent": 2, "ota": 0.5}),
    )
    .await;
    mount_json(
        &server,
        "/api/questions",
        json!([
            {"id": 1, "text": "How often do you exercise?", "question_number": 1,
             "options": [{"value": 1, "label": "Never"}, {"value": 5, "label": "Daily"}]},
            {"id": 2, "text": "Do you want pets?", "question_number": 2},
            {"id": 3, "text": "Do you smoke?", "question_number": 3}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/api/users/a/answers",
        json!([
            {"question": {"id": 1}, "me_answer": 4, "me_importance": 3,
             "looking_for_answer": 3, "looking_for_importance": 3},
            {"question": {"id": 2}, "me_answer": 3, "me_importance": 3,
             "looking_for_answer": 1, "looking_for_open_to_all": true,
             "looking_for_importance": 3},
            {"question": {"id": 3}, "me_answer": 1, "looking_for_answer": 1}
        ]),
    )
    .await;
    mount_json(
        &server,
        "/api/users/b/answers",
        json!([
            {"question": {"id": "1"}, "me_answer": 3, "me_multiplier": 3,
             "looking_for_answer": 2, "looking_for_multiplier": 3},
            {"question": {"id": 2}, "me_answer": 2, "me_importance": 3,
             "looking_for_answer": 3, "looking_for_importance": 3}
        ]),
    )
    .await;

    let client = build_backend_client(BackendClientConfig::Http(config(&server))).unwrap();
    let session = ScoringSession::start(Arc::clone(&client)).await;
    let out = session.score_pair("a", "b").await.unwrap();

    assert!(out.advisory.is_none());
    assert_eq!(out.report.mutual_count(), 2);
    assert_eq!(out.report.pct_a, 75.0);
    assert_eq!(out.report.pct_b, 80.0);
    assert_eq!(out.report.overall_pct, 77.46);
}

#[tokio::test]
async fn answers_fetch_failure_is_returned() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/questions", json!([])).await;
    mount_json(&server, "/api/users/a/answers", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/users/b/answers"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .mount(&server)
        .await;

    let client = build_backend_client(BackendClientConfig::Http(config(&server))).unwrap();
    let session = ScoringSession::start(client).await;
    let err = session.score_pair("a", "b").await.unwrap_err();

    match err {
        BackendError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such user");
        }
        other => panic!("unexpected error: {other}"),
    }
}
