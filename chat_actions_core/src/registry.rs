use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;

use crate::actions::{Action, ActionProvider};

type ProviderList = Vec<Arc<dyn ActionProvider>>;

/// An advertised action together with the provider that serves it.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub provider: String,
    pub action: Action,
}

/// The set of currently active action providers, in registration order.
///
/// Cloning yields another handle onto the same registry. Readers always work
/// over an immutable snapshot; every mutation builds a new list and swaps it
/// in atomically, so a lookup never observes a half-applied change.
#[derive(Clone)]
pub struct ActionRegistry {
    providers: Arc<ArcSwap<ProviderList>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(ArcSwap::from_pointee(Vec::new())),
        }
    }

    /// Append a provider. Names are not checked for uniqueness.
    pub fn register_provider<P>(&self, provider: P)
    where
        P: ActionProvider + 'static,
    {
        self.register_shared(Arc::new(provider));
    }

    /// Append a provider that is already shared elsewhere.
    pub fn register_shared(&self, provider: Arc<dyn ActionProvider>) {
        self.providers.rcu(|current| {
            let mut next: ProviderList = current.iter().cloned().collect();
            next.push(Arc::clone(&provider));
            next
        });

        tracing::info!(
            provider = provider.name(),
            actions = provider.actions().len(),
            "Registered action provider"
        );
    }

    /// Remove every provider named `name`, returning how many were removed.
    ///
    /// Unknown names are a silent no-op.
    pub fn unregister_provider(&self, name: &str) -> usize {
        let previous = self.providers.rcu(|current| {
            current
                .iter()
                .filter(|p| p.name() != name)
                .cloned()
                .collect::<ProviderList>()
        });

        let removed = previous.iter().filter(|p| p.name() == name).count();
        if removed > 0 {
            tracing::info!(provider = name, removed, "Unregistered action provider");
        } else {
            tracing::debug!(provider = name, "No provider to unregister");
        }
        removed
    }

    /// Copy of the active providers in registration order.
    pub fn list_providers(&self) -> Vec<Arc<dyn ActionProvider>> {
        self.providers.load().iter().cloned().collect()
    }

    /// First provider, in registration order, that advertises `action_name`.
    pub fn find_provider(&self, action_name: &str) -> Option<Arc<dyn ActionProvider>> {
        self.providers
            .load()
            .iter()
            .find(|p| p.supports(action_name))
            .cloned()
    }

    /// Every advertised action across active providers, in registration order
    /// (useful for handing a tool list to an agent runtime).
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.providers
            .load()
            .iter()
            .flat_map(|p| {
                p.actions().iter().map(move |action| CatalogEntry {
                    provider: p.name().to_string(),
                    action: action.clone(),
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.load().is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.providers.load();
        f.debug_list()
            .entries(snapshot.iter().map(|p| p.name()))
            .finish()
    }
}
