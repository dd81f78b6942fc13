//! UCT configuration parameters.

use serde::{Deserialize, Serialize};

/// Which states a rollout adds to the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expansion {
    /// Every state visited by a rollout becomes a node.
    RecordAllNodes,
    /// One new node per rollout; the rest of the rollout is a random playout.
    OneNodeExpansion,
}

/// How a child is picked while descending the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Untried moves first, then the highest UCB1 score.
    Ucb1,
    /// Tried moves that always won (most visited first), then untried moves,
    /// then the highest UCB1 score.
    WinsFirst,
}

/// How the move is chosen once the iterations are spent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinalMove {
    /// Most visited child.
    MostVisits,
    /// Highest mean value for the searching role, then most visits.
    WinsFirst,
}

/// UCT configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UctConfig {
    /// `c_p` in the UCB1 bonus `c_p * sqrt(ln(parent visits) / edge visits)`.
    pub exploration_constant: f64,

    /// Rollouts per real move.
    pub iterations: u32,

    pub expansion: Expansion,

    pub selection: Selection,

    pub final_move: FinalMove,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: 1000,
            expansion: Expansion::RecordAllNodes,
            selection: Selection::Ucb1,
            final_move: FinalMove::MostVisits,
        }
    }
}

impl UctConfig {
    /// Plain UCT that records every visited state.
    #[must_use]
    pub fn record_all_nodes() -> Self {
        Self::default()
    }

    /// UCT that adds one node per rollout.
    #[must_use]
    pub fn one_node_expansion() -> Self {
        Self::default().with_expansion(Expansion::OneNodeExpansion)
    }

    /// One-node-expansion UCT that favors moves which have only ever won.
    #[must_use]
    pub fn wins_first() -> Self {
        Self::one_node_expansion()
            .with_selection(Selection::WinsFirst)
            .with_final_move(FinalMove::WinsFirst)
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom rollout count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_final_move(mut self, final_move: FinalMove) -> Self {
        self.final_move = final_move;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UctConfig::default();
        assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.expansion, Expansion::RecordAllNodes);
        assert_eq!(config.final_move, FinalMove::MostVisits);
    }

    #[test]
    fn test_presets() {
        let config = UctConfig::wins_first();
        assert_eq!(config.expansion, Expansion::OneNodeExpansion);
        assert_eq!(config.selection, Selection::WinsFirst);
        assert_eq!(config.final_move, FinalMove::WinsFirst);
    }

    #[test]
    fn test_builder_pattern() {
        let config = UctConfig::default()
            .with_exploration(2.0)
            .with_iterations(50);

        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.iterations, 50);
    }

    #[test]
    fn test_serialization() {
        let config = UctConfig::one_node_expansion().with_iterations(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UctConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
