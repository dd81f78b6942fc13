//! Game tree model.
//!
//! ## Overview
//!
//! Strategies and the match runner only see games through [`GameState`]:
//! an immutable position that lists legal moves per role, produces a new
//! state for a joint move, and scores terminal positions. Any engine that
//! satisfies the contract is interchangeable, whether hand-written or
//! backed by a rule interpreter.
//!
//! - [`TurnTakingState`]: single-mover view used by search strategies
//! - [`GameCatalog`]: id-to-provider lookup with cached construction
//! - [`conformance`]: random-walk checks for implementations

pub mod catalog;
pub mod conformance;
pub mod moves;
pub mod state;
pub mod turn_taking;

pub use catalog::{GameCatalog, ProviderRef};
pub use moves::Move;
pub use state::{ensure_role, validate_joint_move, GameProvider, GameState, StateRef};
pub use turn_taking::TurnTakingState;
