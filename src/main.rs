use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use brandbrain_api::api::{create_router, AppState};
use brandbrain_api::catalog::PodcastCatalog;
use brandbrain_api::config::Config;
use brandbrain_api::services::OpenAiProvider;
use brandbrain_api::vector::VectorIndex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_api_url.clone(),
        config.chat_model.clone(),
        config.embedding_model.clone(),
    );

    let index = VectorIndex::load(&config.index_path);
    let catalog = PodcastCatalog::load(&config.pods_path, &config.stats_path);

    let state = AppState::new(Arc::new(provider), index, catalog, config.top_k);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
