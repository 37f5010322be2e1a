// Library root - exports for the server binary, the setup CLI and tests

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;

use axum::{
    routing::{get, post},
    Router,
};
use services::{CompletionClient, FinanceRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub repository: Arc<dyn FinanceRepository>,
    pub completion: Arc<dyn CompletionClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/functions/v1/ai-financial-assistant",
            post(handlers::financial_assistant).options(handlers::assistant_preflight),
        )
        .route(
            "/functions/v1/setup-finance-tables",
            post(handlers::setup_finance_tables).options(handlers::setup_preflight),
        )
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
