//! Single-mover view of a game state.
//!
//! ## Overview
//!
//! In a turn-taking game at most one role has a real choice at any position;
//! everyone else has exactly one legal move (typically `noop`). The
//! [`TurnTakingState`] wrapper finds that role once, caches it, and lets
//! search code think in terms of "the move" rather than joint moves.
//!
//! When no role has a choice, role 0 is treated as the mover. When two roles
//! have a choice, the position is simultaneous and every query that needs
//! the mover fails with `Error::SimultaneousPosition`.
//!
//! ## Usage
//!
//! ```
//! use game_arena::game::{GameProvider, TurnTakingState};
//! use game_arena::games::TicTacToe;
//!
//! let root = TurnTakingState::new(TicTacToe.initial_state());
//! let mover = root.role_to_move().unwrap();
//! for child in root.possible_next_states().unwrap() {
//!     let (mv, state) = child.unwrap();
//!     assert_ne!(state.role_to_move().unwrap(), mover, "{mv} passes the turn");
//! }
//! ```

use once_cell::sync::OnceCell;
use std::sync::Arc;

use crate::core::{Error, GameRng, Result, Role, RoleMap};

use super::moves::Move;
use super::state::StateRef;

#[derive(Debug)]
struct Inner {
    state: StateRef,
    role_to_move: OnceCell<Role>,
}

/// A game state viewed as a turn-taking position.
///
/// Cloning shares the wrapped state and the cached mover.
#[derive(Clone, Debug)]
pub struct TurnTakingState {
    inner: Arc<Inner>,
}

impl TurnTakingState {
    /// Wrap a game state.
    #[must_use]
    pub fn new(state: StateRef) -> Self {
        Self {
            inner: Arc::new(Inner {
                state,
                role_to_move: OnceCell::new(),
            }),
        }
    }

    /// The wrapped state.
    #[must_use]
    pub fn state(&self) -> &StateRef {
        &self.inner.state
    }

    /// Number of roles in the game.
    #[must_use]
    pub fn num_roles(&self) -> usize {
        self.inner.state.num_roles()
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.inner.state.is_terminal()
    }

    /// The one role with more than one legal move, or role 0 if none.
    ///
    /// Computed on first call and cached.
    pub fn role_to_move(&self) -> Result<Role> {
        self.inner
            .role_to_move
            .get_or_try_init(|| find_mover(&self.inner.state))
            .copied()
    }

    /// Legal moves of the role to move.
    pub fn possible_moves(&self) -> Result<Vec<Move>> {
        let mover = self.role_to_move()?;
        self.inner.state.legal_moves(mover)
    }

    /// Play `mv` for the role to move and the forced move for every other role.
    pub fn next_state(&self, mv: &Move) -> Result<TurnTakingState> {
        let mover = self.role_to_move()?;
        let state = &self.inner.state;

        let mut joint = Vec::with_capacity(state.num_roles());
        for role in Role::all(state.num_roles()) {
            if role == mover {
                joint.push(mv.clone());
                continue;
            }
            let mut legal = state.legal_moves(role)?;
            match legal.len() {
                1 => joint.extend(legal.pop()),
                0 => return Err(Error::NoLegalMoves { role }),
                _ => {
                    return Err(Error::SimultaneousPosition {
                        first: mover,
                        second: role,
                    })
                }
            }
        }

        Ok(TurnTakingState::new(state.next_state(&joint)?))
    }

    /// Every possible move paired with the state it leads to.
    ///
    /// Children are produced lazily and are not retained.
    pub fn possible_next_states(
        &self,
    ) -> Result<impl Iterator<Item = Result<(Move, TurnTakingState)>> + '_> {
        let moves = self.possible_moves()?;
        Ok(moves
            .into_iter()
            .map(move |mv| self.next_state(&mv).map(|next| (mv, next))))
    }

    /// Play a uniformly random move for the role to move.
    pub fn random_next_state(&self, rng: &mut GameRng) -> Result<TurnTakingState> {
        let moves = self.possible_moves()?;
        let mover = self.role_to_move()?;
        let mv = rng
            .choose(&moves)
            .ok_or(Error::NoLegalMoves { role: mover })?;
        self.next_state(mv)
    }

    /// Resolve a move name for a role.
    pub fn move_named(&self, role: Role, name: &str) -> Result<Move> {
        self.inner.state.move_named(role, name)
    }

    /// Score for a role; only defined when terminal.
    pub fn outcome(&self, role: Role) -> Result<f64> {
        self.inner.state.outcome(role)
    }

    /// Scores for every role; only defined when terminal.
    pub fn outcomes(&self) -> Result<RoleMap<f64>> {
        self.inner.state.outcomes()
    }
}

fn find_mover(state: &StateRef) -> Result<Role> {
    if state.is_terminal() {
        return Ok(Role::new(0));
    }

    let mut mover: Option<Role> = None;
    for role in Role::all(state.num_roles()) {
        if state.legal_moves(role)?.len() > 1 {
            if let Some(first) = mover {
                return Err(Error::SimultaneousPosition {
                    first,
                    second: role,
                });
            }
            mover = Some(role);
        }
    }
    Ok(mover.unwrap_or(Role::new(0)))
}
