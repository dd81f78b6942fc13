//! UCT-based strategies.

use std::sync::Arc;

use crate::core::{Error, GameRng, Result, Role};
use crate::game::{Move, TurnTakingState};
use crate::mcts::{UctConfig, UctSearch};

use super::params::{ParameterDescription, StrategyParameters};
use super::{lift, Strategy, StrategyProvider, TurnTakingPlayer, TurnTakingStrategy};

/// Monte-Carlo tree search with a fixed rollout budget per move.
#[derive(Clone, Debug, PartialEq)]
pub struct UctStrategy {
    config: UctConfig,
}

impl UctStrategy {
    #[must_use]
    pub fn new(config: UctConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &UctConfig {
        &self.config
    }
}

impl TurnTakingStrategy for UctStrategy {
    fn turn_taking_player(&self, role: Role, rng: GameRng) -> Box<dyn TurnTakingPlayer> {
        Box::new(UctPlayer {
            role,
            search: UctSearch::new(self.config.clone(), rng),
        })
    }
}

struct UctPlayer {
    role: Role,
    search: UctSearch,
}

impl TurnTakingPlayer for UctPlayer {
    fn choose(&mut self, state: &TurnTakingState) -> Result<Move> {
        self.search.search(state, self.role)
    }
}

/// Provider for one UCT variant.
///
/// Parameters:
/// - `c_p`: exploration constant, real, at least 0, default sqrt(2)
/// - `iterationCount`: rollouts per move, integer, at least 1, required
#[derive(Clone, Debug)]
pub struct UctProvider {
    name: &'static str,
    base: UctConfig,
    parameters: [ParameterDescription; 2],
}

impl UctProvider {
    fn with_base(name: &'static str, base: UctConfig) -> Self {
        Self {
            name,
            base,
            parameters: [Self::exploration(), Self::iteration_count()],
        }
    }

    /// `UCT`: every visited state is recorded in the tree.
    #[must_use]
    pub fn record_all_nodes() -> Self {
        Self::with_base("UCT", UctConfig::record_all_nodes())
    }

    /// `UCTOneNodeExpansion`: one node per rollout.
    #[must_use]
    pub fn one_node_expansion() -> Self {
        Self::with_base("UCTOneNodeExpansion", UctConfig::one_node_expansion())
    }

    /// `UCTWinsFirst`: one node per rollout, sure wins replayed first.
    #[must_use]
    pub fn wins_first() -> Self {
        Self::with_base("UCTWinsFirst", UctConfig::wins_first())
    }

    /// Description of `c_p`.
    #[must_use]
    pub fn exploration() -> ParameterDescription {
        ParameterDescription::double("c_p")
            .with_min(0.0)
            .with_default(std::f64::consts::SQRT_2)
    }

    /// Description of `iterationCount`.
    #[must_use]
    pub fn iteration_count() -> ParameterDescription {
        ParameterDescription::int("iterationCount").with_min(1_i64)
    }
}

impl StrategyProvider for UctProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn parameters(&self) -> &[ParameterDescription] {
        &self.parameters
    }

    fn build(&self, params: &StrategyParameters) -> Result<Arc<dyn Strategy>> {
        let c_p = params.get_double(&self.parameters[0])?;
        let iterations = params.get_int(&self.parameters[1])?;
        let iterations = u32::try_from(iterations).map_err(|_| Error::ParameterOutOfBounds {
            name: self.parameters[1].name().to_string(),
            bound: format!("at most {}", u32::MAX),
            value: iterations.to_string(),
        })?;

        let config = self
            .base
            .clone()
            .with_exploration(c_p)
            .with_iterations(iterations);
        Ok(lift(UctStrategy::new(config)))
    }
}
