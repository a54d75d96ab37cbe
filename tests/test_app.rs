use axum::{
    body,
    body::Body,
    http::{header, Request, StatusCode},
};
use portfolio::app_state::AppState;
use portfolio::create_app;
use portfolio::mailer::{Mailer, OutgoingEmail, StubMailer};
use portfolio::submission::SubmissionOutcome;
use tower::ServiceExt;

const RECIPIENT: &str = "owner@example.com";

pub async fn read_body(body: Body) -> String {
    let bytes = body::to_bytes(body, usize::MAX).await.expect("Failed");
    String::from_utf8(bytes.to_vec()).expect("response was not valid utf-8")
}

fn create_test_app(mailer: StubMailer) -> (axum::Router, AppState) {
    let state = AppState::with_mailer(Mailer::Stub(mailer), RECIPIENT);
    (create_app(state.clone(), "static"), state)
}

fn sent_emails(state: &AppState) -> Vec<OutgoingEmail> {
    match &*state.mailer {
        Mailer::Stub(stub) => stub.sent(),
        Mailer::Smtp(_) => unreachable!("tests only use the stub transport"),
    }
}

fn json_submission() -> String {
    serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "message": "Hello!",
    })
    .to_string()
}

#[tokio::test]
async fn health_check_works() {
    let (app, _) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health_check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn submit_json_works() {
    let (app, state) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_submission()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);
    let outcome: SubmissionOutcome =
        serde_json::from_str(&text).expect("Failed to parse response body");
    assert!(outcome.success);

    let sent = sent_emails(&state);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, "jane@example.com");
    assert_eq!(sent[0].to, RECIPIENT);
    assert_eq!(sent[0].subject, "New Message from Portfolio");
    assert_eq!(
        sent[0].text,
        "Name: Jane Doe\nEmail: jane@example.com\nMessage: Hello!"
    );
}

#[tokio::test]
async fn submit_form_urlencoded_works() {
    let (app, state) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "name=Jane+Doe&email=jane%40example.com&message=Hello%21",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = sent_emails(&state);
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].text,
        "Name: Jane Doe\nEmail: jane@example.com\nMessage: Hello!"
    );
}

#[tokio::test]
async fn submit_trims_fields_before_sending() {
    let (app, state) = create_test_app(StubMailer::default());

    let body = serde_json::json!({
        "name": "  Jane Doe ",
        "email": " jane@example.com ",
        "message": "Hello!\n",
    })
    .to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = sent_emails(&state);
    assert_eq!(
        sent[0].text,
        "Name: Jane Doe\nEmail: jane@example.com\nMessage: Hello!"
    );
}

#[tokio::test]
async fn submit_provider_failure_returns_500() {
    let (app, state) = create_test_app(StubMailer::failing());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json_submission()))
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::INTERNAL_SERVER_ERROR);
    let outcome: SubmissionOutcome =
        serde_json::from_str(&text).expect("Failed to parse response body");
    assert!(!outcome.success);
    assert!(sent_emails(&state).is_empty());
}

#[tokio::test]
async fn submit_invalid_email_rejected() {
    let (app, state) = create_test_app(StubMailer::default());

    let body = serde_json::json!({
        "name": "Jane Doe",
        "email": "@test.test",
        "message": "Hello!",
    })
    .to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::BAD_REQUEST);
    let outcome: SubmissionOutcome =
        serde_json::from_str(&text).expect("Failed to parse response body");
    assert!(!outcome.success);
    assert!(sent_emails(&state).is_empty());
}

#[tokio::test]
async fn submit_missing_field_rejected() {
    let (app, state) = create_test_app(StubMailer::default());

    let body = serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
    })
    .to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(sent_emails(&state).is_empty());
}

#[tokio::test]
async fn submit_whitespace_message_rejected() {
    let (app, state) = create_test_app(StubMailer::default());

    let body = serde_json::json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "message": "   ",
    })
    .to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(sent_emails(&state).is_empty());
}

#[tokio::test]
async fn submit_wrong_content_type_rejected() {
    let (app, _) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("hello"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn resubmitting_sends_a_second_email() {
    let (app, state) = create_test_app(StubMailer::default());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/submit")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json_submission()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(sent_emails(&state).len(), 2);
}

#[tokio::test]
async fn index_served_at_root() {
    let (app, _) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    assert_eq!(parts.status, StatusCode::OK);
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/html"));
    let text = read_body(body).await;
    assert!(text.contains("contact-form"));
}

#[tokio::test]
async fn unknown_path_falls_back_to_index() {
    let (app, _) = create_test_app(StubMailer::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/projects/price-watcher")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    assert_eq!(parts.status, StatusCode::OK);
    let text = read_body(body).await;
    assert!(text.contains("contact-form"));
}
