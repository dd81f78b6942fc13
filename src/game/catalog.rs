//! Game lookup by id with per-id cached construction.
//!
//! Building a game provider can be expensive (a rule engine may need to
//! compile its rules). The catalog stores a factory per id and builds each
//! provider at most once, on first use. Construction is guarded by a
//! once-cell per id, so two workers asking for the same game at the same
//! time wait for a single build, while lookups of other ids proceed.

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::core::{Error, Result};
use crate::games::{MatchingPennies, SheepAndWolf, TicTacToe};

use super::state::GameProvider;

/// Shared handle to a game provider.
pub type ProviderRef = Arc<dyn GameProvider>;

type ProviderFactory = Box<dyn Fn() -> Result<ProviderRef> + Send + Sync>;

struct CatalogEntry {
    factory: ProviderFactory,
    provider: OnceCell<ProviderRef>,
}

/// Registry of games, keyed by id.
#[derive(Default)]
pub struct GameCatalog {
    entries: RwLock<FxHashMap<String, Arc<CatalogEntry>>>,
}

fn builtin_providers() -> [ProviderRef; 3] {
    [Arc::new(TicTacToe), Arc::new(SheepAndWolf), Arc::new(MatchingPennies)]
}

impl GameCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in games.
    #[must_use]
    pub fn with_builtins() -> Self {
        let catalog = Self::new();
        for provider in builtin_providers() {
            let registered = catalog.register_provider(provider);
            debug_assert!(registered.is_ok(), "{registered:?}");
        }
        catalog
    }

    /// Register a factory, run on first lookup of `id`.
    pub fn register<F>(&self, id: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> Result<ProviderRef> + Send + Sync + 'static,
    {
        self.insert(
            id.into(),
            CatalogEntry {
                factory: Box::new(factory),
                provider: OnceCell::new(),
            },
        )
    }

    /// Register an already-built provider under its own id.
    pub fn register_provider(&self, provider: ProviderRef) -> Result<()> {
        let id = provider.id().to_string();
        let cell = OnceCell::with_value(Arc::clone(&provider));
        self.insert(
            id,
            CatalogEntry {
                factory: Box::new(move || Ok(Arc::clone(&provider))),
                provider: cell,
            },
        )
    }

    fn insert(&self, id: String, entry: CatalogEntry) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.contains_key(&id) {
            return Err(Error::DuplicateGame(id));
        }
        entries.insert(id, Arc::new(entry));
        Ok(())
    }

    /// Get the provider for `id`, building it if this is the first request.
    ///
    /// A failed build is not cached; the next lookup tries again.
    pub fn get(&self, id: &str) -> Result<ProviderRef> {
        let entry = self
            .entries
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownGame(id.to_string()))?;

        entry
            .provider
            .get_or_try_init(|| {
                tracing::debug!(game = id, "building game provider");
                (entry.factory)()
            })
            .cloned()
    }

    /// Check whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().contains_key(id)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for GameCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameCatalog").field("ids", &self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_builtins() {
        let catalog = GameCatalog::with_builtins();
        assert_eq!(
            catalog.ids(),
            vec!["MATCHING_PENNIES", "SHEEP_AND_WOLF", "TIC_TAC_TOE"]
        );
        assert_eq!(catalog.get("TIC_TAC_TOE").unwrap().id(), "TIC_TAC_TOE");
        assert!(matches!(
            catalog.get("CHESS"),
            Err(Error::UnknownGame(id)) if id == "CHESS"
        ));
    }

    #[test]
    fn test_builtin_ids_are_distinct() {
        let catalog = GameCatalog::new();
        for provider in builtin_providers() {
            catalog.register_provider(provider).unwrap();
        }
        assert_eq!(catalog.ids().len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let catalog = GameCatalog::with_builtins();
        let result = catalog.register_provider(Arc::new(TicTacToe));
        assert!(matches!(result, Err(Error::DuplicateGame(_))));
    }

    #[test]
    fn test_concurrent_first_use_builds_once() {
        let builds = Arc::new(AtomicUsize::new(0));
        let catalog = Arc::new(GameCatalog::new());
        {
            let builds = Arc::clone(&builds);
            catalog
                .register("SLOW", move || {
                    builds.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(std::time::Duration::from_millis(20));
                    Ok(Arc::new(TicTacToe) as ProviderRef)
                })
                .unwrap();
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let catalog = Arc::clone(&catalog);
                thread::spawn(move || catalog.get("SLOW").map(|p| p.id().to_string()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), "TIC_TAC_TOE");
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failed_build_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let catalog = GameCatalog::new();
        {
            let attempts = Arc::clone(&attempts);
            catalog
                .register("FLAKY", move || {
                    if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::InvalidConfiguration {
                            message: "rules failed to compile".to_string(),
                        })
                    } else {
                        Ok(Arc::new(TicTacToe) as ProviderRef)
                    }
                })
                .unwrap();
        }

        assert!(catalog.get("FLAKY").is_err());
        assert!(catalog.get("FLAKY").is_ok());
        assert!(catalog.get("FLAKY").is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
