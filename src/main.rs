//! Server binary: reads config from env, opens the store, ensures the schema, serves until Ctrl-C/SIGTERM.

use submissions_api::{app, AppState, ServerConfig, SubmissionStore};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("submissions_api=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env().inspect_err(|e| tracing::error!(error = %e, "bad configuration"))?;

    let store = SubmissionStore::connect(&config)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "database connection failed"))?;
    store
        .ensure_schema()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "schema initialization failed"))?;

    let state = AppState { store: store.clone() };
    let router = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
    tracing::info!("shutdown signal received");
}
