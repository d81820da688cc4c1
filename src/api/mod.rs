pub mod dtos;
pub mod handlers;

use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::analysis::{ArticleReport, ProcessingStatus};
use crate::app_state::AppState;
use crate::health::{self, HealthResponse};
use dtos::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::analyze_articles, health::health_check),
    components(schemas(ArticleReport, ProcessingStatus, ErrorResponse, HealthResponse)),
    tags(
        (name = "jaundice", description = "Charged-language rating of news articles"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::analyze_articles))
        .route("/healthz", get(health::health_check))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sanitizer::InosmiSanitizer;
    use crate::text::{DictionaryAnalyzer, Lexicon};
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_app(lexicon: Lexicon) -> Router {
        let state = AppState::new(
            Config::default(),
            lexicon,
            Arc::new(DictionaryAnalyzer::new()),
            Arc::new(InosmiSanitizer::new()),
        );
        router(state)
    }

    fn app() -> Router {
        create_test_app(Lexicon::from_words(["аутсайдер", "банкротство"]))
    }

    async fn send_get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_missing_urls_is_bad_request() {
        let (status, body) = send_get(app(), "/").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no urls given");

        let (status, _) = send_get(app(), "/?urls=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_too_many_urls_is_bad_request() {
        let urls = (0..11)
            .map(|i| format!("https://inosmi.ru/{i}.html"))
            .collect::<Vec<_>>()
            .join(",");
        let (status, body) = send_get(app(), &format!("/?urls={urls}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            serde_json::json!({"error": "too many urls in request, should be 10 or less"})
        );
    }

    #[tokio::test]
    async fn test_foreign_hosts_are_parsing_errors() {
        let (status, body) = send_get(
            app(),
            "/?urls=https://lenta.ru/brief/2021/08/26/afg_terror/,https://lenta.ru/brief/2021/08/26/afg_terror/",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reports = body.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        for report in reports {
            assert_eq!(
                report,
                &serde_json::json!({
                    "url": "https://lenta.ru/brief/2021/08/26/afg_terror/",
                    "status": "PARSING_ERROR",
                    "rate": null,
                    "length": null
                })
            );
        }
    }

    #[tokio::test]
    async fn test_blank_entry_gets_its_own_report() {
        let (status, body) = send_get(
            app(),
            "/?urls=https://lenta.ru/brief/2021/08/26/afg_terror/,,https://lenta.ru/news/",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let reports = body.as_array().unwrap();
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().any(|report| report
            == &serde_json::json!({
                "url": "",
                "status": "PARSING_ERROR",
                "rate": null,
                "length": null
            })));
    }

    #[tokio::test]
    async fn test_health_reports_lexicon_size() {
        let (status, body) = send_get(app(), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        assert_eq!(body["lexicon_words"], 2);
    }

    #[tokio::test]
    async fn test_health_fails_on_empty_lexicon() {
        let (status, _) = send_get(create_test_app(Lexicon::default()), "/healthz").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_openapi_document_lists_routes() {
        let (status, body) = send_get(app(), "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/").is_some());
        assert!(body["paths"].get("/healthz").is_some());
    }
}
