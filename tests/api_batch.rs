mod helpers;

use std::time::Duration;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use helpers::{article_page, test_state};
use jaundice::api::router;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let app = router(test_state(Duration::from_secs(5)));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_rates_a_batch_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(article_page(&["Все аутсайдера побег."]).into_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ok = format!("{}/article", server.uri());
    let missing = format!("{}/missing", server.uri());
    let (status, body) = get_json(&format!("/?urls={ok},{missing}")).await;

    assert_eq!(status, StatusCode::OK);
    let mut reports = body.as_array().unwrap().clone();
    reports.sort_by_key(|r| r["url"].as_str().unwrap().to_string());

    assert_eq!(
        reports,
        vec![
            json!({"url": ok, "status": "OK", "rate": 33.33, "length": 3}),
            json!({"url": missing, "status": "FETCH_ERROR", "rate": null, "length": null}),
        ]
    );
}

#[tokio::test]
async fn test_rejects_oversized_batch_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let urls = vec![format!("{}/article", server.uri()); 11].join(",");
    let (status, body) = get_json(&format!("/?urls={urls}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "too many urls in request, should be 10 or less"})
    );
}
