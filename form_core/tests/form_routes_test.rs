use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use form_core::{
    create_app,
    webhook::{HttpResponse, MockTransport, WebhookClient, WebhookEndpoint},
    AppState, UiTimings,
};
use serde_json::Value;
use tower::ServiceExt;

const ENDPOINT: &str = "https://hooks.example.com/webhook/rmis-content-input";

fn app(mock: &MockTransport) -> Router {
    create_app(AppState::new(
        WebhookClient::new(mock.clone(), WebhookEndpoint::new(ENDPOINT)),
        UiTimings::default(),
    ))
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

fn valid_fields() -> Value {
    serde_json::json!({
        "specificTopic": "Operational resilience testing",
        "keyMessage": "Resilience mapping belongs in your RMIS",
        "targetAudience": "Risk Managers"
    })
}

#[tokio::test]
async fn test_health() {
    let mock = MockTransport::new();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app(&mock).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["webhook"]["endpoint"], ENDPOINT);
}

#[tokio::test]
async fn test_form_page_renders_defaults() {
    let mock = MockTransport::new();
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let response = app(&mock).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("RMIS Content Generator"));
    assert!(html.contains(r#"value="webinar""#));
    assert!(html.contains("Strategic insights for modern RMIS implementation"));
}

#[tokio::test]
async fn test_validate_reports_every_field() {
    let mock = MockTransport::new();
    let request = json_request("/api/validate", serde_json::json!({ "specificTopic": "short" }));

    let response = app(&mock).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["data"]["is_valid"], false);
    assert_eq!(
        body["data"]["errors"]["specificTopic"][0],
        "Please provide a more detailed topic (minimum 10 characters)"
    );
    assert_eq!(body["data"]["errors"]["keyMessage"][0], "Key Message is required");
    assert_eq!(body["data"]["errors"]["targetAudience"][0], "Target Audience is required");
}

#[tokio::test]
async fn test_preview_applies_defaults() {
    let mock = MockTransport::new();
    let response = app(&mock)
        .oneshot(json_request("/api/preview", valid_fields()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["focusArea"], "General");
    assert_eq!(body["data"]["callToAction"], "webinar");
    assert_eq!(body["data"]["contentType"], "both");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_submit_success() {
    let mock = MockTransport::new();
    mock.add_response(
        &format!("POST {}", ENDPOINT),
        Ok(HttpResponse::new(200, r#"{"received":true}"#)),
    );

    let response = app(&mock)
        .oneshot(json_request("/api/submit", valid_fields()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["outcome"], "submitted");
    assert_eq!(body["data"]["webhook_response"]["received"], true);
    assert_eq!(body["data"]["status"]["kind"], "success");

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    let sent: Value = serde_json::from_str(calls[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(sent["targetAudience"], "Risk Managers");
}

#[tokio::test]
async fn test_submit_invalid_never_calls_webhook() {
    let mock = MockTransport::new();

    let response = app(&mock)
        .oneshot(json_request("/api/submit", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Please fix the validation errors before submitting.");
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_submit_upstream_failure_is_bad_gateway() {
    let mock = MockTransport::new();
    mock.add_response(&format!("POST {}", ENDPOINT), Ok(HttpResponse::new(500, "")));

    let response = app(&mock)
        .oneshot(json_request("/api/submit", valid_fields()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["data"]["outcome"], "failed");
    assert!(body["data"]["status"]["details"]
        .as_str()
        .unwrap()
        .contains("HTTP 500"));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_connection_test_unreachable() {
    let mock = MockTransport::new();
    let request = Request::builder()
        .uri("/api/connection-test")
        .body(Body::empty())
        .unwrap();

    let response = app(&mock).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["result"], "unreachable");
}

#[tokio::test]
async fn test_page_submit_renders_errors() {
    let mock = MockTransport::new();

    let response = app(&mock)
        .oneshot(form_request("action=submit&specificTopic=short"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Please fix the validation errors before submitting."));
    assert!(html.contains("Key Message is required"));
    assert!(!html.contains("http-equiv=\"refresh\""));
}

#[tokio::test]
async fn test_page_submit_success_schedules_reload() {
    let mock = MockTransport::new();
    mock.add_response(&format!("POST {}", ENDPOINT), Ok(HttpResponse::new(200, "{}")));

    let body = "action=submit&specificTopic=Operational+resilience+testing\
                &keyMessage=Resilience+mapping+belongs+in+your+RMIS&targetAudience=Risk+Managers";
    let response = app(&mock).oneshot(form_request(body)).await.unwrap();

    let html = body_string(response).await;
    assert!(html.contains("Content generation started successfully!"));
    assert!(html.contains(r#"<meta http-equiv="refresh" content="3; url=/">"#));
}

#[tokio::test]
async fn test_page_preview_opens_dialog() {
    let mock = MockTransport::new();

    let response = app(&mock)
        .oneshot(form_request("action=preview&specificTopic=Operational+resilience"))
        .await
        .unwrap();

    let html = body_string(response).await;
    assert!(html.contains(r#"<dialog id="preview" open>"#));
    assert!(html.contains("&quot;specificTopic&quot;: &quot;Operational resilience&quot;"));
}

#[tokio::test]
async fn test_page_unknown_action_is_bad_request() {
    let mock = MockTransport::new();

    let response = app(&mock).oneshot(form_request("action=launch")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mock = MockTransport::new();
    let request = Request::builder()
        .uri("/api/unknown")
        .body(Body::empty())
        .unwrap();

    let response = app(&mock).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "No route for /api/unknown");
    assert_eq!(mock.call_count(), 0);
}
