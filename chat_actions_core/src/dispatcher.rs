use serde_json::Value;

use crate::actions::Action;
use crate::error::ActionError;
use crate::registry::ActionRegistry;

/// Resolves an action to the provider that serves it and executes it there.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: ActionRegistry,
}

impl Dispatcher {
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Execute `action` on the earliest-registered provider advertising its name.
    ///
    /// Exactly one provider is invoked, or none when resolution fails. The
    /// provider's result, success or failure, is returned unchanged.
    pub async fn execute_action(&self, action: &Action) -> Result<Value, ActionError> {
        let Some(provider) = self.registry.find_provider(action.name()) else {
            tracing::warn!(action = action.name(), "No provider found for action");
            return Err(ActionError::no_provider(action.name()));
        };

        tracing::debug!(
            action = action.name(),
            provider = provider.name(),
            "Dispatching action"
        );

        let result = provider.execute(action).await;
        if let Err(err) = &result {
            tracing::warn!(
                action = action.name(),
                provider = provider.name(),
                error = %err,
                "Action failed"
            );
        }
        result
    }
}
