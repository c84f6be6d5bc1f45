use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matakuliah::api::router;
use matakuliah::config::AppConfig;
use matakuliah::db::{CourseStore, MemoryCourseStore, SqliteCourseStore, sqlite};
use matakuliah::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "matakuliah=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn CourseStore> = if config.uses_memory_store() {
        info!("using in-memory course store");
        Arc::new(MemoryCourseStore::new())
    } else {
        let pool = sqlite::connect(&config.database_url, config.max_connections).await?;
        info!("connected to {}", config.database_url);
        Arc::new(SqliteCourseStore::new(pool))
    };

    let state = AppState::new(store, config.request_timeout);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", err);
    }
    info!("shutting down");
}
