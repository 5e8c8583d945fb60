//! Storefront Core - view-state service for a headless storefront

use anyhow::Result;
use storefront_core::api::{router, AppState};
use storefront_core::config::load_app_config;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_app_config()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter.clone().into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port = config.port;
    let app = router(AppState { config }).layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive());

    tracing::info!("Storefront core listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}
