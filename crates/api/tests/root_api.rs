//! API root discovery, health, content negotiation, and general HTTP behaviour.

mod common;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use common::{body_json, body_text, get, get_with_headers};
use sqlx::PgPool;

#[tokio::test]
async fn root_lists_collection_locators() {
    let app = common::build_offline_app();
    let response = get(app, "/api/v1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "snippets": "http://testserver/api/v1/snippets",
            "users": "http://testserver/api/v1/users",
        })
    );
}

#[tokio::test]
async fn root_honors_forwarded_proto() {
    let app = common::build_offline_app();
    let response = get_with_headers(app, "/api/v1", &[("x-forwarded-proto", "https")]).await;

    let json = body_json(response).await;
    assert_eq!(json["users"], "https://testserver/api/v1/users");
}

#[tokio::test]
async fn browsable_format_from_query_and_accept() {
    let response = get(common::build_offline_app(), "/api/v1?format=api").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
    let html = body_text(response).await;
    assert!(html.contains("<h1>Api Root</h1>"));
    assert!(html.contains("http://testserver/api/v1/snippets"));

    let response = get_with_headers(
        common::build_offline_app(),
        "/api/v1",
        &[("accept", "text/html,application/xhtml+xml")],
    )
    .await;
    assert_eq!(response.headers()[CONTENT_TYPE], "text/html; charset=utf-8");
}

#[tokio::test]
async fn unsupported_format_is_rejected() {
    let response = get(common::build_offline_app(), "/api/v1?format=xml").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let response = get(common::build_offline_app(), "/api/v1").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("response must carry x-request-id");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn root_locators_resolve_to_collections(pool: PgPool) {
    let app = common::build_test_app(pool);
    let root = body_json(get(app.clone(), "/api/v1").await).await;

    for (_, locator) in root.as_object().unwrap() {
        let path = locator
            .as_str()
            .unwrap()
            .strip_prefix("http://testserver")
            .unwrap();
        let response = get(app.clone(), path).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert!(body_json(response).await.is_array());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/widgets").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
