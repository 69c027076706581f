use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use na_inference::ArticleClassifier;
use na_storage::backends::MemoryStorage;
use na_web::{cors_layer, create_app, AppState, TokenService, DEFAULT_CORS_ORIGINS};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let tokens = TokenService::from_algorithm_name("test-secret", "HS256", Duration::from_secs(1800)).unwrap();
    let state = AppState::new(
        Arc::new(MemoryStorage::new()),
        Arc::new(ArticleClassifier::keywords_only()),
        tokens,
    );
    create_app(state, cors_layer(&DEFAULT_CORS_ORIGINS[..]).unwrap())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create_article(app: &Router, headline: &str, body: &str) -> Value {
    let (status, article) = send(
        app,
        Method::POST,
        "/news",
        Some(json!({ "headline": headline, "body": body })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    article
}

#[tokio::test]
async fn test_index_and_health() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("News Analyzer"));

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_create_then_read_back() {
    let app = app();
    let created = create_article(&app, "Trial results", "New cancer treatment approved").await;

    assert_eq!(created["categories"], json!(["Medical Science"]));
    assert_eq!(created["views"], json!(0));
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, Method::GET, &format!("/news/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, all) = send(&app, Method::GET, "/news", None, None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unmatched_text_is_other() {
    let app = app();
    let created = create_article(&app, "Energy", "Solar panels improve efficiency").await;
    assert_eq!(created["categories"], json!(["Other"]));
}

#[tokio::test]
async fn test_blank_fields_are_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/news",
        Some(json!({ "headline": "   ", "body": "Robots everywhere" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "headline must not be empty");
}

#[tokio::test]
async fn test_missing_article() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/news/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "News not found" }));

    let update = json!({ "headline": "h", "body": "b" });
    let (status, _) = send(&app, Method::PUT, "/news/99", Some(update), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/news/99", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/news/99/view", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_reclassifies_or_keeps_client_labels() {
    let app = app();
    let created = create_article(&app, "Launch", "A rocket reached orbit").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["categories"], json!(["Space"]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/news/{}", id),
        Some(json!({ "headline": "Lab", "body": "A new drug trial begins" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["headline"], "Lab");
    assert_eq!(updated["categories"], json!(["Medical Science"]));
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/news/{}", id),
        Some(json!({
            "headline": "Lab",
            "body": "A new drug trial begins",
            "categories": ["Other", "Biology", "Biology", "Physics", "Space", "AI"],
            "countries": ["Kenya"]
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["categories"], json!(["Biology", "Physics", "Space"]));
    assert_eq!(updated["countries"], json!(["Kenya"]));
}

#[tokio::test]
async fn test_unknown_label_is_rejected() {
    let app = app();
    let created = create_article(&app, "Launch", "A rocket reached orbit").await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/news/{}", id),
        Some(json!({ "headline": "h", "body": "b", "categories": ["Sports"] })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("Sports"));
}

#[tokio::test]
async fn test_unreadable_requests_get_detail_bodies() {
    let app = app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/news")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/news",
        Some(json!({ "headline": "no body" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) = send(&app, Method::GET, "/news/abc", None, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, body) = send(&app, Method::POST, "/login", Some(json!({ "email": "a@b.io" })), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_views_and_delete() {
    let app = app();
    let created = create_article(&app, "Drones", "Drone deliveries expand").await;
    let id = created["id"].as_i64().unwrap();

    send(&app, Method::POST, &format!("/news/{}/view", id), None, None).await;
    let (status, viewed) = send(&app, Method::POST, &format!("/news/{}/view", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(viewed["views"], json!(2));
    assert_eq!(viewed["updated_at"], created["updated_at"]);

    let (status, body) = send(&app, Method::DELETE, &format!("/news/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &format!("/news/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_login_me() {
    let app = app();
    let credentials = json!({ "email": "Reader@Example.com", "password": "hunter22" });

    let (status, user) = send(&app, Method::POST, "/register", Some(credentials.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "reader@example.com");
    assert!(user.get("hashed_password").is_none());

    let (status, body) = send(&app, Method::POST, "/register", Some(credentials.clone()), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let (status, login) = send(&app, Method::POST, "/login", Some(credentials), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["token_type"], "bearer");
    let token = login["access_token"].as_str().unwrap().to_string();

    let (status, me) = send(&app, Method::GET, "/me", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user["id"]);
    assert_eq!(me["email"], "reader@example.com");
}

#[tokio::test]
async fn test_bad_credentials_and_tokens() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "email": "a@b.io", "password": "right" })),
        None,
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "a@b.io", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid credentials");

    let (status, _) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "nobody@b.io", "password": "right" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, login) = send(
        &app,
        Method::POST,
        "/login",
        Some(json!({ "email": "a@b.io", "password": "right" })),
        None,
    )
    .await;
    let mut tampered = login["access_token"].as_str().unwrap().to_string();
    tampered.push('x');
    let (status, _) = send(&app, Method::GET, "/me", None, Some(&tampered)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "email": "not-an-email", "password": "pw" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::POST,
        "/register",
        Some(json!({ "email": "a@b.io", "password": "" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cors_allowlist() {
    let app = app();
    let preflight = Request::builder()
        .method(Method::OPTIONS)
        .uri("/news")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(preflight).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:5173");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let foreign = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(foreign).await.unwrap();
    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
