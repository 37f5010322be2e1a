use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::future::Future;
use thiserror::Error;
use uuid::Uuid;

use super::cors_headers;
use crate::models::{AssistantRequest, AssistantResponse};
use crate::services::{CompletionError, FinancialContext, RepositoryError};
use crate::AppState;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("Message and user_id are required")]
    MissingFields,

    #[error("user_id must be a UUID")]
    InvalidUserId,

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error("failed to build financial context: {0}")]
    Context(#[from] serde_json::Error),
}

impl AssistantError {
    fn status(&self) -> StatusCode {
        match self {
            AssistantError::MissingFields | AssistantError::InvalidUserId | AssistantError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AssistantError::Completion(_) | AssistantError::Context(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": "An error occurred while processing your request",
            "details": self.to_string(),
        });
        (self.status(), cors_headers(), Json(body)).into_response()
    }
}

pub async fn assistant_preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

// POST /functions/v1/ai-financial-assistant
pub async fn financial_assistant(State(state): State<AppState>, body: Bytes) -> Response {
    match answer(&state, &body).await {
        Ok(reply) => (StatusCode::OK, cors_headers(), Json(reply)).into_response(),
        Err(e) => {
            tracing::error!("Error in AI financial assistant: {}", e);
            e.into_response()
        }
    }
}

async fn answer(state: &AppState, body: &[u8]) -> Result<AssistantResponse, AssistantError> {
    let request: AssistantRequest =
        serde_json::from_slice(body).map_err(|e| AssistantError::InvalidBody(e.to_string()))?;
    let (message, user_id) = match (request.message, request.user_id) {
        (Some(m), Some(u)) if !m.trim().is_empty() && !u.trim().is_empty() => (m, u),
        _ => return Err(AssistantError::MissingFields),
    };
    let user_id = Uuid::parse_str(user_id.trim()).map_err(|_| AssistantError::InvalidUserId)?;

    let repo = &state.repository;
    let transactions = or_empty("transactions", repo.transactions(user_id)).await;
    let budget_categories = or_empty("budget categories", repo.budget_categories(user_id)).await;
    let income = or_empty("income data", repo.income_sources(user_id)).await;

    let context = FinancialContext::new(transactions, budget_categories, income);
    let system_prompt = context.system_prompt()?;
    let message = state.completion.complete(&system_prompt, &message).await?;

    Ok(AssistantResponse { message, financial_summary: context.summary() })
}

/// A collection that cannot be read is left out of the context rather than failing the request.
async fn or_empty<T>(what: &str, fetch: impl Future<Output = Result<Vec<T>, RepositoryError>>) -> Vec<T> {
    match fetch.await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Error fetching {}: {}", what, e);
            Vec::new()
        }
    }
}
