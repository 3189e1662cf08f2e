// Chat agents turn a user message into a reply, dispatching actions on the way.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chat_actions_core::{Action, ActionType, Dispatcher};
use serde_json::Value;

/// Reserved command name that lists the catalog instead of dispatching.
pub const LIST_ACTIONS_COMMAND: &str = "actions";

/// Anything that can answer a single chat message.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    async fn respond(&self, message: &str) -> Result<String>;
}

/// Agent that takes explicit slash commands instead of natural language.
///
/// `/<action> {json}` dispatches an action, `/actions` lists the catalog and
/// anything else gets a short usage reply.
pub struct CommandAgent {
    dispatcher: Dispatcher,
}

impl CommandAgent {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    fn list_actions(&self) -> String {
        let catalog = self.dispatcher.registry().catalog();
        if catalog.is_empty() {
            return "No actions are available.".to_string();
        }

        let mut out = String::from("Available actions:");
        for entry in catalog {
            out.push_str(&format!(
                "\n- {} ({}): {}",
                entry.action.name(),
                entry.provider,
                entry.action.description()
            ));
        }
        out
    }

    fn usage(&self) -> String {
        let names: Vec<String> = self
            .dispatcher
            .registry()
            .catalog()
            .into_iter()
            .map(|e| e.action.name().to_string())
            .collect();

        if names.is_empty() {
            "I can't do anything yet: no actions are available.".to_string()
        } else {
            format!(
                "Send `/<action> {{json parameters}}` to run an action, or `/actions` for details. Available: {}",
                names.join(", ")
            )
        }
    }
}

/// Split `/name {json}` into an action request.
pub fn parse_command(message: &str) -> Result<Option<Action>> {
    let Some(command) = message.trim().strip_prefix('/') else {
        return Ok(None);
    };

    let (name, args) = match command.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (command, ""),
    };
    if name.is_empty() {
        bail!("Missing action name after '/'");
    }

    let action = Action::new(ActionType::Custom, name, "");
    if args.is_empty() {
        return Ok(Some(action));
    }

    let parameters: Value =
        serde_json::from_str(args).with_context(|| format!("Invalid parameters for {name}"))?;
    match parameters {
        Value::Object(map) => Ok(Some(action.with_parameters(map))),
        _ => bail!("Parameters for {name} must be a JSON object"),
    }
}

#[async_trait]
impl ChatAgent for CommandAgent {
    async fn respond(&self, message: &str) -> Result<String> {
        let action = match parse_command(message) {
            Ok(Some(action)) if action.name() == LIST_ACTIONS_COMMAND => {
                return Ok(self.list_actions())
            }
            Ok(Some(action)) => action,
            Ok(None) => return Ok(self.usage()),
            Err(err) => return Ok(format!("{err:#}")),
        };

        tracing::info!(action = action.name(), "Executing action from chat");
        let result = self.dispatcher.execute_action(&action).await?;
        Ok(serde_json::to_string_pretty(&result)?)
    }
}
