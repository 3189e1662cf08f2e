// plugins/search/src/lib.rs
use async_trait::async_trait;
use chat_actions_core::{Action, ActionError, ActionProvider, ActionType};
use serde::Deserialize;
use serde_json::{json, Map, Value};

pub const SEARCH_ACTION: &str = "search";

/// Provides search functionality to the chat agent.
///
/// Results are always empty until a search backend is wired in; the action
/// surface is what callers and the agent's tool list depend on.
#[derive(Debug)]
pub struct SearchActionProvider {
    actions: Vec<Action>,
}

impl SearchActionProvider {
    pub fn new() -> Self {
        let mut parameters = Map::new();
        parameters.insert("query".to_string(), json!("string"));
        parameters.insert("filters".to_string(), json!("object"));

        let actions = vec![
            Action::new(ActionType::Search, SEARCH_ACTION, "Perform a search query")
                .with_parameters(parameters),
        ];

        Self { actions }
    }
}

impl Default for SearchActionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct SearchInput {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    filters: Option<Value>,
}

#[async_trait]
impl ActionProvider for SearchActionProvider {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Provides search functionality"
    }

    fn actions(&self) -> &[Action] {
        &self.actions
    }

    async fn execute(&self, action: &Action) -> Result<Value, ActionError> {
        if action.name() != SEARCH_ACTION {
            return Err(ActionError::unsupported(action.name()));
        }

        let input: SearchInput = action.decode_parameters()?;
        let query = input.query.unwrap_or_default();
        let filters = input.filters.unwrap_or(Value::Null);
        tracing::info!(query = %query, filters = %filters, "Searching");

        Ok(json!({ "results": [] }))
    }
}
