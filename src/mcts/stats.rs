//! Counters kept while a search runs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What one call to `UctSearch::search` did.
///
/// Counters start from zero on every call; forced moves return before any
/// rollout and leave everything at zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Rollouts performed.
    pub iterations: u32,

    /// Nodes added to the tree, root included.
    pub nodes_expanded: u32,

    /// Random playouts run past the tree boundary.
    pub simulations: u32,

    /// Rollouts that ended on a terminal node already in the tree.
    pub terminal_hits: u32,

    /// Deepest node created.
    pub max_depth: u16,

    /// Wall time of the rollout loop, in microseconds.
    pub time_us: u64,
}

impl SearchStats {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rollout throughput; `None` until some time has been measured.
    #[must_use]
    pub fn rollouts_per_second(&self) -> Option<f64> {
        (self.time_us > 0).then(|| f64::from(self.iterations) * 1e6 / self.time_us as f64)
    }

    /// Fraction of rollouts that needed a random playout.
    #[must_use]
    pub fn playout_share(&self) -> f64 {
        match self.iterations {
            0 => 0.0,
            n => f64::from(self.simulations) / f64::from(n),
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rollouts, {} nodes, {} playouts, depth {}",
            self.iterations, self.nodes_expanded, self.simulations, self.max_depth
        )?;
        if let Some(rate) = self.rollouts_per_second() {
            write!(f, ", {rate:.0}/s")?;
        }
        Ok(())
    }
}
