use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};

use super::cors_headers;
use crate::models::SetupResponse;
use crate::AppState;

pub async fn setup_preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers(), "ok")
}

// POST /functions/v1/setup-finance-tables
pub async fn setup_finance_tables(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = &state.config.setup_token {
        let expected = format!("Bearer {}", token);
        let provided = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            tracing::warn!("Rejected schema setup without a valid setup token");
            return (
                StatusCode::UNAUTHORIZED,
                cors_headers(),
                Json(serde_json::json!({ "error": "Unauthorized" })),
            )
                .into_response();
        }
    }

    match state.repository.install_schema().await {
        Ok(()) => (
            StatusCode::OK,
            cors_headers(),
            Json(SetupResponse { success: true, message: "Finance tables created successfully".to_string() }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Schema setup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(),
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
