// Entry point: logging, config, provider registry, then serve the chat route.

use std::sync::Arc;

use anyhow::{Context, Result};
use chat_actions_core::Dispatcher;
use chat_server::{build_registry, router, CommandAgent, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config_path = Config::find_config_file();
    let config = Config::load_from(config_path.as_deref())?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration file"),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!(
        bind = %config.server.bind,
        search = config.providers.search,
        price = config.providers.price,
        "Configuration loaded"
    );

    let registry = build_registry(&config)?;
    tracing::info!(
        providers = registry.len(),
        actions = registry.catalog().len(),
        "Action registry ready"
    );

    let agent = Arc::new(CommandAgent::new(Dispatcher::new(registry)));
    let app = router(agent);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    tracing::info!(addr = %config.server.bind, "Chat server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
