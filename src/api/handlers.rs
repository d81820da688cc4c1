use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::analysis::ArticleReport;
use crate::api::dtos::{AnalyzeQuery, ErrorResponse};
use crate::app_state::AppState;

/// Rate every article in `urls` and return one report per URL.
#[utoipa::path(
    get,
    path = "/",
    tag = "jaundice",
    params(AnalyzeQuery),
    responses(
        (status = 200, description = "One report per submitted URL", body = Vec<ArticleReport>),
        (status = 400, description = "Missing urls or too many of them", body = ErrorResponse),
        (status = 500, description = "HTTP client could not be created", body = ErrorResponse)
    )
)]
pub async fn analyze_articles(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Response {
    let urls = match query.validate(state.config.max_urls_per_request()) {
        Ok(urls) => urls,
        Err(e) => {
            warn!(error = %e, "rejected batch");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    let coordinator = match state.coordinator() {
        Ok(coordinator) => coordinator,
        Err(e) => {
            error!(error = %e, "failed to prepare batch");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response();
        }
    };

    info!(count = urls.len(), "rating batch");
    let reports = coordinator.run_batch(urls).await;
    (StatusCode::OK, Json(reports)).into_response()
}
