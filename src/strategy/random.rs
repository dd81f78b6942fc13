//! Uniformly random play.

use std::sync::Arc;

use crate::core::{Error, GameRng, Result, Role};
use crate::game::{Move, StateRef};

use super::params::{ParameterDescription, StrategyParameters};
use super::{Player, Strategy, StrategyProvider};

/// Picks uniformly among the legal moves of its role.
///
/// Needs no turn structure, so it also plays simultaneous games.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn player(&self, role: Role, rng: GameRng) -> Box<dyn Player> {
        Box::new(RandomPlayer {
            role,
            rng,
            state: None,
        })
    }
}

struct RandomPlayer {
    role: Role,
    rng: GameRng,
    state: Option<StateRef>,
}

impl Player for RandomPlayer {
    fn initialize(&mut self, state: StateRef) {
        self.state = Some(state);
    }

    fn advance(&mut self, _moves: &[Move], state: StateRef) {
        self.state = Some(state);
    }

    fn choose_move(&mut self) -> Result<Move> {
        let role = self.role;
        let state = self
            .state
            .as_ref()
            .ok_or(Error::PlayerNotInitialized { role })?;
        let legal = state.legal_moves(role)?;
        self.rng
            .choose(&legal)
            .cloned()
            .ok_or(Error::NoLegalMoves { role })
    }
}

/// Provider for [`RandomStrategy`]; takes no parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomProvider;

impl StrategyProvider for RandomProvider {
    fn name(&self) -> &str {
        "Random"
    }

    fn parameters(&self) -> &[ParameterDescription] {
        &[]
    }

    fn build(&self, _params: &StrategyParameters) -> Result<Arc<dyn Strategy>> {
        Ok(Arc::new(RandomStrategy))
    }
}
