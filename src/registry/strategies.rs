//! Lookup of strategy providers by name.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{Error, Result};
use crate::strategy::{
    LookaheadProvider, RandomProvider, Strategy, StrategyParameters, StrategyProvider, UctProvider,
};

use super::id::{check_name, decode_parameters, encode, split};

/// Shared handle to a strategy provider.
pub type ProviderHandle = Arc<dyn StrategyProvider>;

/// Registry of strategy providers, keyed by name.
///
/// Turns strategy ids into strategies and back.
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    providers: FxHashMap<String, ProviderHandle>,
}

impl StrategyRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in provider: `Random`, `NPlyLookahead`,
    /// `UCT`, `UCTOneNodeExpansion` and `UCTWinsFirst`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let builtins: [ProviderHandle; 5] = [
            Arc::new(RandomProvider),
            Arc::new(LookaheadProvider::new()),
            Arc::new(UctProvider::record_all_nodes()),
            Arc::new(UctProvider::one_node_expansion()),
            Arc::new(UctProvider::wins_first()),
        ];
        let mut registry = Self::new();
        for provider in builtins {
            let name = provider.name().to_string();
            registry.providers.insert(name, provider);
        }
        registry
    }

    /// Add a provider; its name must be new and free of `:` and `=`.
    pub fn register(&mut self, provider: ProviderHandle) -> Result<()> {
        let name = provider.name().to_string();
        check_name(&name)?;
        if self.providers.contains_key(&name) {
            return Err(Error::DuplicateStrategy(name));
        }
        self.providers.insert(name, provider);
        Ok(())
    }

    /// Provider registered under `name`.
    pub fn provider(&self, name: &str) -> Result<&ProviderHandle> {
        self.providers
            .get(name)
            .ok_or_else(|| Error::UnknownStrategy(name.to_string()))
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve an id to its provider and parsed parameters.
    pub fn decode(&self, id: &str) -> Result<(&ProviderHandle, StrategyParameters)> {
        let (name, _) = split(id)?;
        let provider = self.provider(name)?;
        let params = decode_parameters(provider.as_ref(), id)?;
        Ok((provider, params))
    }

    /// Canonical id for a registered provider and parameters.
    pub fn encode(&self, name: &str, params: &StrategyParameters) -> Result<String> {
        encode(self.provider(name)?.as_ref(), params)
    }

    /// Build the strategy an id describes.
    pub fn strategy(&self, id: &str) -> Result<Arc<dyn Strategy>> {
        let (provider, params) = self.decode(id)?;
        provider.build(&params)
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("providers", &self.names())
            .finish()
    }
}
