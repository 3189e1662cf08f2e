use anyhow::{Context, Result};
use chat_actions_core::ActionRegistry;
use chat_actions_price::PriceActionProvider;
use chat_actions_search::SearchActionProvider;

use crate::config::Config;

/// Build the registry with every provider enabled in `config`.
///
/// Registration order is fixed (search, then price) so that duplicate action
/// names resolve the same way on every start.
pub fn build_registry(config: &Config) -> Result<ActionRegistry> {
    let registry = ActionRegistry::new();
    register_configured_providers(&registry, config)?;
    Ok(registry)
}

pub fn register_configured_providers(registry: &ActionRegistry, config: &Config) -> Result<()> {
    if config.providers.search {
        registry.register_provider(SearchActionProvider::new());
    }

    if config.providers.price {
        let provider = PriceActionProvider::new(config.price.clone())
            .context("Failed to configure price provider")?;
        registry.register_provider(provider);
    }

    if registry.is_empty() {
        tracing::warn!("No action providers enabled; every action will fail to resolve");
    }
    Ok(())
}
