//! Pluggable decision strategies.
//!
//! ## Overview
//!
//! A [`Strategy`] is a recipe. Given a role and a random source it yields a
//! [`Player`], which follows one match turn by turn and picks a move for its
//! role whenever asked. A player is uninitialized until it receives the
//! starting state and is updated after every ply.
//!
//! Search strategies only make sense where one role moves at a time. They
//! implement [`TurnTakingStrategy`], which sees positions through
//! [`TurnTakingState`], and are turned into ordinary strategies with
//! [`lift`]. A lifted player answers forced moves itself and only invokes
//! the search when its role has a real choice.
//!
//! ## Built-in strategies
//!
//! - [`RandomStrategy`]: uniform over legal moves, works in any game
//! - [`LookaheadStrategy`]: depth-limited minimax
//! - [`UctStrategy`]: Monte-Carlo tree search, three variants
//!
//! Each has a [`StrategyProvider`] that builds it from
//! [`StrategyParameters`]; providers are what the strategy registry looks
//! up by name.

pub mod choose;
pub mod lookahead;
pub mod params;
pub mod random;
pub mod uct;

use std::sync::Arc;

use crate::core::{Error, GameRng, Result, Role};
use crate::game::{Move, StateRef, TurnTakingState};

pub use lookahead::{LookaheadProvider, LookaheadStrategy};
pub use params::{ParameterDescription, ParameterValue, ParametersBuilder, StrategyParameters, ValueKind};
pub use random::{RandomProvider, RandomStrategy};
pub use uct::{UctProvider, UctStrategy};

/// A stateful, turn-by-turn move chooser for one role in one match.
pub trait Player: Send {
    /// Receive the starting state.
    fn initialize(&mut self, state: StateRef);

    /// Receive the joint move just played and the state it led to.
    fn advance(&mut self, moves: &[Move], state: StateRef);

    /// Choose a move for this player's role in the current state.
    fn choose_move(&mut self) -> Result<Move>;
}

/// A decision algorithm that can play any role.
pub trait Strategy: Send + Sync {
    /// Create a player for `role`, drawing randomness from `rng`.
    fn player(&self, role: Role, rng: GameRng) -> Box<dyn Player>;
}

/// A move chooser that only needs the current turn-taking position.
pub trait TurnTakingPlayer: Send {
    /// Choose a move for the role to move in `state`.
    fn choose(&mut self, state: &TurnTakingState) -> Result<Move>;
}

/// A decision algorithm for turn-taking games.
pub trait TurnTakingStrategy: Send + Sync {
    fn turn_taking_player(&self, role: Role, rng: GameRng) -> Box<dyn TurnTakingPlayer>;
}

/// Builds a strategy from parameters.
pub trait StrategyProvider: Send + Sync {
    /// Name used in strategy ids.
    fn name(&self) -> &str;

    /// Accepted parameters, in declaration order.
    fn parameters(&self) -> &[ParameterDescription];

    /// Validate `params` and build the strategy.
    fn build(&self, params: &StrategyParameters) -> Result<Arc<dyn Strategy>>;
}

/// Expose a turn-taking strategy as a general strategy.
pub fn lift<S>(strategy: S) -> Arc<dyn Strategy>
where
    S: TurnTakingStrategy + 'static,
{
    Arc::new(Lifted(strategy))
}

struct Lifted<S>(S);

impl<S: TurnTakingStrategy> Strategy for Lifted<S> {
    fn player(&self, role: Role, rng: GameRng) -> Box<dyn Player> {
        Box::new(LiftedPlayer {
            role,
            inner: self.0.turn_taking_player(role, rng),
            state: None,
        })
    }
}

struct LiftedPlayer {
    role: Role,
    inner: Box<dyn TurnTakingPlayer>,
    state: Option<StateRef>,
}

impl Player for LiftedPlayer {
    fn initialize(&mut self, state: StateRef) {
        self.state = Some(state);
    }

    fn advance(&mut self, _moves: &[Move], state: StateRef) {
        self.state = Some(state);
    }

    fn choose_move(&mut self) -> Result<Move> {
        let state = self
            .state
            .as_ref()
            .ok_or(Error::PlayerNotInitialized { role: self.role })?;

        let mut legal = state.legal_moves(self.role)?;
        match legal.len() {
            0 => Err(Error::NoLegalMoves { role: self.role }),
            1 => legal.pop().ok_or(Error::NoLegalMoves { role: self.role }),
            _ => self.inner.choose(&TurnTakingState::new(Arc::clone(state))),
        }
    }
}
