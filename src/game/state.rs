//! The game tree contract.
//!
//! Games implement [`GameState`] to describe one immutable position:
//! - Which moves each role may make
//! - Which state a joint move (one move per role) leads to
//! - Whether the game is over, and how each role scored
//!
//! Games with turns model the waiting role explicitly, usually with
//! [`Move::noop`].

use std::fmt;
use std::sync::Arc;

use crate::core::{Error, Result, Role, RoleMap};

use super::moves::Move;

/// Shared handle to an immutable game state.
pub type StateRef = Arc<dyn GameState>;

/// An immutable position in a multi-role game.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Non-empty for every role of a non-terminal state
/// - `next_state`: Must be deterministic and must reject illegal moves
/// - `outcome`: Returns `Error::NotTerminal` before the game is over
pub trait GameState: Send + Sync + fmt::Debug {
    /// Number of roles in the game.
    fn num_roles(&self) -> usize;

    /// Legal moves for a role, in a stable order.
    fn legal_moves(&self, role: Role) -> Result<Vec<Move>>;

    /// Resolve a move name back to a move for the given role.
    fn move_named(&self, role: Role, name: &str) -> Result<Move>;

    /// Apply one move per role, in role order.
    fn next_state(&self, moves: &[Move]) -> Result<StateRef>;

    /// Check if the game is over.
    fn is_terminal(&self) -> bool;

    /// Score for a role; only defined when terminal.
    fn outcome(&self, role: Role) -> Result<f64>;

    // === Convenience Methods ===

    /// Scores for every role.
    fn outcomes(&self) -> Result<RoleMap<f64>> {
        let values = Role::all(self.num_roles())
            .map(|role| self.outcome(role))
            .collect::<Result<Vec<_>>>()?;
        Ok(RoleMap::from_vec(values))
    }
}

/// Source of initial states for one game.
pub trait GameProvider: Send + Sync {
    /// Stable identifier, used in match specs.
    fn id(&self) -> &str;

    /// Name for display.
    fn display_name(&self) -> &str {
        self.id()
    }

    /// The starting position.
    fn initial_state(&self) -> StateRef;

    /// Constant sum of all roles' outcomes, if the game is constant-sum.
    fn zero_sum_total(&self) -> Option<f64> {
        None
    }
}

/// Fail with `InvalidRole` unless `role` is one of `role_count` roles.
pub fn ensure_role(role: Role, role_count: usize) -> Result<()> {
    if role.index() < role_count {
        Ok(())
    } else {
        Err(Error::InvalidRole { role, role_count })
    }
}

/// Check that `moves` holds exactly one legal move per role of `state`.
///
/// Games call this at the top of `next_state` before applying anything.
pub fn validate_joint_move(state: &dyn GameState, moves: &[Move]) -> Result<()> {
    let expected = state.num_roles();
    if moves.len() != expected {
        return Err(Error::WrongMoveCount {
            expected,
            got: moves.len(),
        });
    }
    for (role, mv) in Role::all(expected).zip(moves) {
        if !state.legal_moves(role)?.contains(mv) {
            return Err(Error::IllegalMove {
                role,
                name: mv.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_role() {
        assert!(ensure_role(Role::new(1), 2).is_ok());
        assert!(matches!(
            ensure_role(Role::new(2), 2),
            Err(Error::InvalidRole { role_count: 2, .. })
        ));
    }
}
