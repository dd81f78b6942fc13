//! Upper Confidence bounds applied to Trees.
//!
//! ## Overview
//!
//! Monte-Carlo tree search for turn-taking games with any number of roles.
//! Each rollout descends the tree from the current position, picking edges
//! with a [`SelectionPolicy`], adds new nodes according to the configured
//! [`Expansion`], and credits the final outcome to every edge it used.
//!
//! Three variants are wired up by [`UctConfig`] presets:
//!
//! - `record_all_nodes`: every state a rollout visits becomes a node
//! - `one_node_expansion`: one node per rollout, then a random playout
//! - `wins_first`: one node per rollout, and moves that have only ever won
//!   are replayed before anything else
//!
//! ## Usage
//!
//! ```rust
//! use game_arena::core::{GameRng, Role};
//! use game_arena::game::{GameProvider, TurnTakingState};
//! use game_arena::games::TicTacToe;
//! use game_arena::mcts::{UctConfig, UctSearch};
//!
//! let state = TurnTakingState::new(TicTacToe.initial_state());
//! let mut search = UctSearch::new(UctConfig::default().with_iterations(200), GameRng::new(7));
//! let mv = search.search(&state, Role::new(0)).unwrap();
//! assert!(state.possible_moves().unwrap().contains(&mv));
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::{Expansion, FinalMove, Selection, UctConfig};
pub use node::{Edge, NodeId, UctNode, UNVISITED_VALUE};
pub use policy::{
    FinalMovePolicy, MostVisits, RandomSimulation, SelectionPolicy, SimulationPolicy, Ucb1,
    WinsFirstFinal, WinsFirstSelection,
};
pub use search::UctSearch;
pub use stats::SearchStats;
pub use tree::{TreeStats, UctTree};
