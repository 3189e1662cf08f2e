/// Error type for action resolution and execution.
///
/// Every variant carries the name of the action it concerns so callers can
/// surface a message without keeping the request around.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A provider was selected but does not implement the requested action.
    #[error("Action {action} not supported")]
    UnsupportedAction { action: String },

    /// No active provider declares the requested action.
    #[error("No provider found for action: {action}")]
    NoProviderForAction { action: String },

    /// The provider rejected the parameter bag.
    #[error("Invalid parameters for action {action}: {reason}")]
    InvalidParameters { action: String, reason: String },

    /// Failure raised inside a provider while performing the action.
    #[error("Action {action} failed: {source}")]
    Provider {
        action: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ActionError {
    pub fn unsupported(action: impl Into<String>) -> Self {
        Self::UnsupportedAction {
            action: action.into(),
        }
    }

    pub fn no_provider(action: impl Into<String>) -> Self {
        Self::NoProviderForAction {
            action: action.into(),
        }
    }

    pub fn invalid_parameters(action: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidParameters {
            action: action.into(),
            reason: reason.to_string(),
        }
    }

    pub fn provider(action: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Provider {
            action: action.into(),
            source: source.into(),
        }
    }
}
