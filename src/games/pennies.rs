//! Matching pennies: one simultaneous turn.
//!
//! Both roles pick `heads` or `tails` at once. Role 0 scores 1.0 when the
//! choices match, role 1 when they differ. Useful for exercising code paths
//! that must cope with positions where more than one role has a choice.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::core::{Error, Result, Role};
use crate::game::{ensure_role, validate_joint_move, GameProvider, GameState, Move, StateRef};

const ROLE_COUNT: usize = 2;

static SIDES: Lazy<[Move; 2]> = Lazy::new(|| [Move::new("heads", 0), Move::new("tails", 1)]);

/// Provider for matching pennies.
#[derive(Clone, Copy, Debug, Default)]
pub struct MatchingPennies;

impl GameProvider for MatchingPennies {
    fn id(&self) -> &str {
        "MATCHING_PENNIES"
    }

    fn display_name(&self) -> &str {
        "Matching pennies"
    }

    fn initial_state(&self) -> StateRef {
        Arc::new(PenniesState { choices: None })
    }

    fn zero_sum_total(&self) -> Option<f64> {
        Some(1.0)
    }
}

/// Either the opening position or the revealed pair of coins.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PenniesState {
    choices: Option<[u32; 2]>,
}

impl GameState for PenniesState {
    fn num_roles(&self) -> usize {
        ROLE_COUNT
    }

    fn legal_moves(&self, role: Role) -> Result<Vec<Move>> {
        ensure_role(role, ROLE_COUNT)?;
        if self.is_terminal() {
            return Ok(Vec::new());
        }
        Ok(SIDES.to_vec())
    }

    fn move_named(&self, role: Role, name: &str) -> Result<Move> {
        ensure_role(role, ROLE_COUNT)?;
        SIDES
            .iter()
            .find(|mv| mv.name() == name)
            .cloned()
            .ok_or_else(|| Error::NoSuchMove {
                role,
                name: name.to_string(),
            })
    }

    fn next_state(&self, moves: &[Move]) -> Result<StateRef> {
        validate_joint_move(self, moves)?;
        Ok(Arc::new(PenniesState {
            choices: Some([moves[0].code(), moves[1].code()]),
        }))
    }

    fn is_terminal(&self) -> bool {
        self.choices.is_some()
    }

    fn outcome(&self, role: Role) -> Result<f64> {
        ensure_role(role, ROLE_COUNT)?;
        let [first, second] = self.choices.ok_or(Error::NotTerminal)?;
        let matcher_wins = first == second;
        Ok(if matcher_wins == (role.index() == 0) {
            1.0
        } else {
            0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_roles_choose() {
        let state = MatchingPennies.initial_state();
        assert_eq!(state.legal_moves(Role::new(0)).unwrap().len(), 2);
        assert_eq!(state.legal_moves(Role::new(1)).unwrap().len(), 2);
    }

    #[test]
    fn test_outcomes() {
        let state = MatchingPennies.initial_state();
        let heads = state.move_named(Role::new(0), "heads").unwrap();
        let tails = state.move_named(Role::new(1), "tails").unwrap();

        let matched = state.next_state(&[heads.clone(), heads.clone()]).unwrap();
        assert_eq!(matched.outcomes().unwrap().as_slice(), &[1.0, 0.0]);

        let mismatched = state.next_state(&[heads, tails]).unwrap();
        assert_eq!(mismatched.outcomes().unwrap().as_slice(), &[0.0, 1.0]);
        assert!(mismatched.legal_moves(Role::new(0)).unwrap().is_empty());
    }
}
