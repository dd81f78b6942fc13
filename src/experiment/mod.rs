//! Experiments and the machinery that runs them.
//!
//! ## Overview
//!
//! An [`Experiment`] names the matches it wants as a [`SpecMultiset`]: each
//! spec with the number of times it should be played. The [`Scheduler`]
//! subtracts the successful results already in a [`ResultStore`], orders
//! the remainder with [`plan_matches`] and runs it on a worker pool.
//! Errored results do not count as done, so rerunning an experiment retries
//! its failures.

pub mod chart;
pub mod multiset;
pub mod scheduler;
pub mod store;

use crate::core::Result;

pub use ab_test::{AbTestExperiment, LeaderboardEntry};
pub use chart::{ChartCell, ParameterChartExperiment};
pub use multiset::SpecMultiset;
pub use scheduler::{plan_matches, ScheduleSummary, Scheduler};
pub use store::{JsonLinesStore, MemoryStore, ResultStore, RESULTS_FILE};

/// A named set of matches to play.
pub trait Experiment {
    /// Name used for match specs and for the result log.
    fn name(&self) -> &str;

    /// Every spec this experiment wants, with its desired count.
    fn matches_to_run(&self) -> Result<SpecMultiset>;
}
