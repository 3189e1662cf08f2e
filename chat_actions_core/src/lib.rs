//! Action providers, the registry that tracks them, and the dispatcher that
//! routes an action to whichever provider serves it.

pub mod actions;
pub mod dispatcher;
pub mod error;
pub mod registry;

pub use actions::{Action, ActionProvider, ActionType};
pub use dispatcher::Dispatcher;
pub use error::ActionError;
pub use registry::{ActionRegistry, CatalogEntry};
