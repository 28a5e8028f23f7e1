use axum::routing::get;
use rcl_api::{config::ApiConfig, state::ApiState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    rcl_api::tracing::init_tracing(&config.env);

    // Connect to the database and bring the schema up to date
    let pool = rcl_db::create_pool(&config.database_url, config.max_db_connections).await?;
    rcl_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    // Prometheus exporter; the handle backs the /metrics endpoint
    let metrics_handle = rcl_api::metrics::init_metrics()?;

    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173".to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .collect::<Vec<_>>();

    let state = ApiState::new(pool, config.env);
    let app = rcl_api::router::router()
        .with_state(state)
        .merge(
            axum::Router::new()
                .route("/metrics", get(rcl_api::metrics::metrics_handler))
                .with_state(metrics_handle),
        )
        .layer(axum::middleware::from_fn(rcl_api::metrics::track_metrics))
        .layer(rcl_api::middleware::cors::create_cors_layer(allowed_origins));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
