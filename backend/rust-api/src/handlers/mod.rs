pub mod assistant;
pub mod setup;

pub use assistant::{assistant_preflight, financial_assistant};
pub use setup::{setup_finance_tables, setup_preflight};

use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::HeaderName;

/// Headers the browser client needs on every edge-function response, preflight included.
pub fn cors_headers() -> [(HeaderName, &'static str); 2] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (ACCESS_CONTROL_ALLOW_HEADERS, "authorization, x-client-info, apikey, content-type"),
    ]
}

pub async fn health_check() -> &'static str {
    "OK"
}
