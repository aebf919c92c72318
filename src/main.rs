use anyhow::anyhow;
use campusdesk::logging::init_tracing;
use campusdesk::metrics::init_metrics;
use campusdesk::router::init_router;
use campusdesk::state::init_app_state;
use campusdesk_config::ServerConfig;
use campusdesk_db::init_db_pool;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = ServerConfig::from_env();
    let _log_guard = init_tracing(&config)?;
    let metrics_handle = init_metrics(config.metrics_enabled)?;

    let pool = init_db_pool().await?;
    let state = init_app_state(pool)
        .await
        .map_err(|e| anyhow!("Failed to initialize application state: {}", e.error))?;
    let app = init_router(state, metrics_handle);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(listener, app).await?;

    Ok(())
}
