//! # game-arena
//!
//! Reproducible strategy-versus-strategy experiments over a generic game
//! tree.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Strategies see games only through the
//!    [`GameState`] contract. Any engine that implements it, and is
//!    deterministic, can be plugged into the [`GameCatalog`].
//!
//! 2. **Reproducible**: A match is a pure function of its spec and seed
//!    words. Rerunning a recorded [`MatchResult`] with its seed replays the
//!    same moves and outcomes.
//!
//! 3. **Errors Are Results**: Failures inside a match end up in the match's
//!    result and never escape the runner or a worker thread.
//!
//! ## Architecture
//!
//! - **Immutable States**: Transitions build new states behind
//!   [`StateRef`]; search keeps as many siblings alive as it needs.
//!
//! - **Turn-Taking View**: [`TurnTakingState`] works out which single role
//!   has a choice, so search strategies can ignore the other roles.
//!
//! - **Strategy Ids**: `Name:param=value` strings are the durable names of
//!   configured strategies, used in specs and results alike.
//!
//! ## Modules
//!
//! - `core`: Roles, RNG, errors
//! - `game`: The game contract, moves, turn-taking view, game catalog
//! - `games`: Tic-tac-toe, sheep and wolf, matching pennies
//! - `strategy`: Players, strategies and their providers
//! - `mcts`: UCT search
//! - `registry`: Strategy ids and the strategy registry
//! - `runner`: Match specs, results, the match runner
//! - `experiment`: Experiments, result stores, the scheduler
//! - `config`: Arena configuration

pub mod config;
pub mod core;
pub mod experiment;
pub mod game;
pub mod games;
pub mod mcts;
pub mod registry;
pub mod runner;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{Error, GameRng, Result, Role, RoleMap};

pub use crate::game::{
    GameCatalog, GameProvider, GameState, Move, ProviderRef, StateRef, TurnTakingState,
};

pub use crate::strategy::{
    lift, Player, Strategy, StrategyParameters, StrategyProvider, TurnTakingPlayer,
    TurnTakingStrategy,
};

pub use crate::mcts::{UctConfig, UctSearch};

pub use crate::registry::StrategyRegistry;

pub use crate::runner::{MatchResult, MatchRunner, MatchSpec};

pub use crate::experiment::{
    AbTestExperiment, Experiment, JsonLinesStore, MemoryStore, ParameterChartExperiment,
    ResultStore, Scheduler, SpecMultiset,
};

pub use crate::config::ArenaConfig;
