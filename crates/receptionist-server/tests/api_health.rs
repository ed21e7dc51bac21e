mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_string, post_form, setup_app, ScriptedChat};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

async fn get(router: &axum::Router, uri: &str) -> axum::http::Response<Body> {
    router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_root_returns_ok() {
    let app = setup_app(ScriptedChat::replying("unused"));
    let response = get(&app.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "OK");
}

#[tokio::test]
async fn test_health_reports_active_calls() {
    let app = setup_app(ScriptedChat::replying("unused"));
    post_form(&app.router, "/voice", "CallSid=CA1").await;
    post_form(&app.router, "/voice", "CallSid=CA2").await;

    let response = get(&app.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["active_calls"], 2);
}

#[tokio::test]
async fn test_webhooks_reject_get() {
    let app = setup_app(ScriptedChat::replying("unused"));
    let response = get(&app.router, "/voice").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
