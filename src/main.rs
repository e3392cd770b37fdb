use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinematch_api::{
    catalog::CatalogStore, config::Config, routes::create_router,
    services::providers::tmdb::TmdbProvider, state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // A missing or corrupt snapshot is fatal; the process must not serve
    // requests without an aligned catalog.
    let catalog = CatalogStore::load(&config.catalog_path, &config.embeddings_path)
        .context("failed to load catalog snapshot")?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        Duration::from_secs(config.provider_timeout_secs),
    )
    .context("failed to build metadata provider")?;

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(provider),
        config.top_n,
        config.enrich_concurrency,
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
