use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ActionError;

/// Coarse category of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Search,
    Execute,
    Navigate,
    Custom,
}

/// A request descriptor naming a capability and carrying its parameters.
///
/// Providers advertise the actions they serve as `Action` values; callers
/// submit an `Action` with the same name to have it executed. Immutable once
/// built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: ActionType,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<Map<String, Value>>,
}

impl Action {
    pub fn new(kind: ActionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Bare invocation request: only the name matters for dispatch.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(ActionType::Custom, name, "")
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    pub fn kind(&self) -> ActionType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> Option<&Map<String, Value>> {
        self.parameters.as_ref()
    }

    pub fn parameter(&self, key: &str) -> Option<&Value> {
        self.parameters.as_ref().and_then(|p| p.get(key))
    }

    /// Decode the parameter bag into a typed input struct.
    ///
    /// A missing bag decodes as an empty object, so inputs whose fields are
    /// all optional still succeed.
    pub fn decode_parameters<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
        let bag = Value::Object(self.parameters.clone().unwrap_or_default());
        serde_json::from_value(bag).map_err(|e| ActionError::invalid_parameters(&self.name, e))
    }
}

/// A named bundle of actions plus the logic to execute them.
///
/// Implementors only need to describe themselves and execute; the registry
/// resolves actions against [`ActionProvider::actions`].
#[async_trait]
pub trait ActionProvider: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Actions this provider advertises, in declaration order.
    fn actions(&self) -> &[Action];

    fn supports(&self, action_name: &str) -> bool {
        self.actions().iter().any(|a| a.name() == action_name)
    }

    /// Execute a previously advertised action.
    ///
    /// Must fail with [`ActionError::UnsupportedAction`] when the name is not
    /// one the implementation recognizes.
    async fn execute(&self, action: &Action) -> Result<Value, ActionError>;
}
