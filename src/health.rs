use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub lexicon_words: usize,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse),
        (status = 503, description = "Service unavailable")
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    // An empty lexicon would rate every article 0%.
    if state.lexicon.is_empty() {
        error!("Health check failed: charged-word lexicon is empty");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    debug!("Health check passed");
    Ok(Json(HealthResponse {
        status: "OK".to_string(),
        lexicon_words: state.lexicon.len(),
    }))
}
