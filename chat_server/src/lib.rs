//! Chat front end over the action dispatcher: configuration, provider
//! bootstrap, the chat agent and its HTTP route.

pub mod agent;
pub mod bootstrap;
pub mod config;
pub mod routes;

pub use agent::{ChatAgent, CommandAgent};
pub use bootstrap::build_registry;
pub use config::Config;
pub use routes::router;
