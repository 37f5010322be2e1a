use finpilot_api::{
    database,
    services::{OpenAiClient, PgFinanceRepository},
    AppState, Config,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finpilot_api=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting FinPilot API server...");

    let config = Arc::new(Config::from_env()?);
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; assistant requests will fail");
    }
    info!("Configuration loaded");

    let db_pool = database::connect(&config).await?;
    info!("Database connection pool created");

    let app_state = AppState {
        config: config.clone(),
        repository: Arc::new(PgFinanceRepository::new(db_pool)),
        completion: Arc::new(OpenAiClient::new(&config)?),
    };

    let app = finpilot_api::router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutting down gracefully...");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
