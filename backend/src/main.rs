use backend::{
    config::ServerConfig, create_router, diversify::DiversifyConfig, error::ServiceError,
    osrm::OsrmClient, AppState,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=info,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::parse();
    let client = OsrmClient::new(
        config.osrm_url.clone(),
        config.request_timeout(),
        &config.user_agent,
    )?;
    tracing::info!(
        "directions backend: {} (timeout {}s)",
        client.base_url(),
        config.request_timeout_secs
    );

    let app = create_router(AppState::new(client, DiversifyConfig::default()));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("starting backend on http://{}", config.bind);
    tracing::info!("API endpoints:");
    tracing::info!("  POST /api/route - Plan three sun-ranked alternative routes");
    tracing::info!("  GET /api/health - Liveness probe");
    axum::serve(listener, app).await?;
    Ok(())
}
