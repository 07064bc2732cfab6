//! HTTP 适配层测试：直接驱动 axum Router，不占用端口

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use linkshift::{server::build_router, ConfigManager, LinkConverter};

fn app() -> axum::Router {
    let converter = Arc::new(LinkConverter::new().unwrap());
    build_router(converter, &ConfigManager::get_default())
}

async fn post_json(body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/converter")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn batch_conversion_returns_original_and_links() {
    let (status, body) = post_json(json!({ "url": "https://item.taobao.com/item.htm?id=123456789" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["original"], "https://item.taobao.com/item.htm?id=123456789");
    assert_eq!(
        body["cnfans"],
        "https://cnfans.com/product/?shop_type=taobao&id=123456789&ref=191373"
    );
    assert_eq!(body.as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn targeted_conversion_returns_single_key() {
    let (status, body) = post_json(json!({
        "url": "https://hoobuy.com/product/1/123456?inviteCode=abc",
        "target": "cnfans"
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "cnfans": "https://cnfans.com/product/?shop_type=taobao&id=123456&ref=191373" })
    );
}

#[tokio::test]
async fn targeted_conversion_failure_is_null() {
    let (status, body) = post_json(json!({
        "url": "https://detail.tmall.com/item.htm?id=55",
        "target": "hoobuy"
    }))
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hoobuy": null }));
}

#[tokio::test]
async fn unknown_target_is_bad_request() {
    let (status, body) = post_json(json!({
        "url": "https://item.taobao.com/item.htm?id=1",
        "target": "nobuy"
    }))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_url_is_bad_request() {
    let (status, body) = post_json(json!({ "url": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "url is required");
}

#[tokio::test]
async fn missing_url_field_is_bad_request() {
    let (status, body) = post_json(json!({ "target": "cnfans" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("url"));
}

#[tokio::test]
async fn non_json_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/converter")
        .header("content-type", "application/json")
        .body(Body::from("not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unrecognized_link_with_id_param_is_unprocessable() {
    let (status, body) = post_json(json!({ "url": "https://example.com/page?id=5" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn total_failure_is_unprocessable() {
    let (status, body) = post_json(json!({ "url": "https://example.com/page" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn middlemen_listing_in_registry_order() {
    let request = Request::builder()
        .uri("/api/middlemen")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 10);
    assert_eq!(list[0], json!({ "key": "kakobuy", "displayName": "KakoBuy" }));
}

#[tokio::test]
async fn health_check() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
