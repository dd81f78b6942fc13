//! Arena configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::experiment::JsonLinesStore;

/// Settings for running experiments.
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Worker threads running matches. With 0, matches run on the
    /// scheduling thread.
    pub worker_threads: usize,

    /// Work items the queue holds before the scheduler blocks.
    pub queue_capacity: usize,

    /// Root directory of the result logs.
    pub results_dir: PathBuf,

    /// Abort loading on a malformed result line instead of skipping it.
    pub strict_results: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            queue_capacity: 100,
            results_dir: PathBuf::from("results"),
            strict_results: false,
        }
    }
}

impl ArenaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::io(format!("read {}", path.display()), err))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.queue_capacity == 0 {
            return Err(Error::InvalidConfiguration {
                message: "queue_capacity must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_strict_results(mut self, strict: bool) -> Self {
        self.strict_results = strict;
        self
    }

    /// Result store this config describes.
    #[must_use]
    pub fn result_store(&self) -> JsonLinesStore {
        JsonLinesStore::new(&self.results_dir).strict(self.strict_results)
    }
}
