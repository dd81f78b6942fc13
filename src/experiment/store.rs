//! Persisted match results.
//!
//! The on-disk format is one JSON object per line, appended as matches
//! finish, under `<root>/<experiment>/results`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::core::{Error, Result};
use crate::runner::MatchResult;

/// File name of an experiment's result log.
pub const RESULTS_FILE: &str = "results";

/// Where match results are kept.
pub trait ResultStore: Send + Sync {
    /// Every stored result of an experiment; empty if none were stored yet.
    fn load(&self, experiment: &str) -> Result<Vec<MatchResult>>;

    /// Store one result.
    fn append(&self, result: &MatchResult) -> Result<()>;
}

/// Append-only JSON-lines result logs, one per experiment.
#[derive(Debug)]
pub struct JsonLinesStore {
    root: PathBuf,
    strict: bool,
    write_lock: Mutex<()>,
}

impl JsonLinesStore {
    /// A lenient store: malformed lines are skipped with a warning.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            strict: false,
            write_lock: Mutex::new(()),
        }
    }

    /// Fail loading on the first malformed line instead of skipping it.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an experiment's log.
    #[must_use]
    pub fn results_path(&self, experiment: &str) -> PathBuf {
        self.root.join(experiment).join(RESULTS_FILE)
    }
}

impl ResultStore for JsonLinesStore {
    fn load(&self, experiment: &str) -> Result<Vec<MatchResult>> {
        let path = self.results_path(experiment);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::io(format!("open {}", path.display()), err)),
        };

        let mut results = Vec::new();
        for (number, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line.map_err(|err| Error::io(format!("read {}", path.display()), err))?;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            // Raw bytes: a line that is not UTF-8 is just another malformed line.
            match serde_json::from_slice::<MatchResult>(&line) {
                Ok(result) => results.push(result),
                Err(err) if self.strict => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = number + 1,
                        error = %err,
                        "skipping malformed result line"
                    );
                }
            }
        }
        Ok(results)
    }

    fn append(&self, result: &MatchResult) -> Result<()> {
        let mut line = serde_json::to_string(result)?;
        line.push('\n');

        let path = self.results_path(&result.spec.experiment_name);
        let _guard = self.write_lock.lock();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|err| Error::io(format!("create {}", dir.display()), err))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| Error::io(format!("open {}", path.display()), err))?;
        file.write_all(line.as_bytes())
            .map_err(|err| Error::io(format!("append to {}", path.display()), err))
    }
}

/// Results kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    results: Mutex<Vec<MatchResult>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with earlier results.
    #[must_use]
    pub fn with_results(results: Vec<MatchResult>) -> Self {
        Self {
            results: Mutex::new(results),
        }
    }

    /// Snapshot of every stored result, in append order.
    #[must_use]
    pub fn results(&self) -> Vec<MatchResult> {
        self.results.lock().clone()
    }
}

impl ResultStore for MemoryStore {
    fn load(&self, experiment: &str) -> Result<Vec<MatchResult>> {
        Ok(self
            .results
            .lock()
            .iter()
            .filter(|r| r.spec.experiment_name == experiment)
            .cloned()
            .collect())
    }

    fn append(&self, result: &MatchResult) -> Result<()> {
        self.results.lock().push(result.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::MatchSpec;

    fn result(experiment: &str) -> MatchResult {
        MatchResult::success(
            MatchSpec::new(experiment, "TIC_TAC_TOE", vec!["Random".into(), "Random".into()]),
            vec![1, 2, 3, 4],
            vec![0.5, 0.5],
            vec![vec!["( mark 1 1 )".into(), "noop".into()]],
            7,
        )
    }

    #[test]
    fn test_memory_store_filters_by_experiment() {
        let store = MemoryStore::new();
        store.append(&result("a")).unwrap();
        store.append(&result("b")).unwrap();
        store.append(&result("a")).unwrap();

        assert_eq!(store.load("a").unwrap().len(), 2);
        assert_eq!(store.load("c").unwrap().len(), 0);
        assert_eq!(store.results().len(), 3);
    }

    #[test]
    fn test_results_path() {
        let store = JsonLinesStore::new("/tmp/arena");
        assert_eq!(
            store.results_path("exp"),
            PathBuf::from("/tmp/arena/exp/results")
        );
    }
}
