//! Tic-tac-toe on a 3×3 board.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::core::{Error, Result, Role};
use crate::game::{ensure_role, validate_joint_move, GameProvider, GameState, Move, StateRef};

const ROLE_COUNT: usize = 2;

/// Winning lines as cell indices (`row * 3 + column`).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One mark move per cell; the code is the cell index.
static MARK_MOVES: Lazy<Vec<Move>> = Lazy::new(|| {
    (0..9u32)
        .map(|cell| {
            let column = cell % 3 + 1;
            let row = cell / 3 + 1;
            Move::new(format!("( mark {column} {row} )"), cell)
        })
        .collect()
});

/// Provider for tic-tac-toe.
///
/// Role 0 plays `x` and moves first. A win scores 1.0, a loss 0.0 and a
/// draw 0.5 for each side. Moves are named `( mark X Y )` with 1-based
/// column and row; the waiting role plays `noop`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TicTacToe;

impl GameProvider for TicTacToe {
    fn id(&self) -> &str {
        "TIC_TAC_TOE"
    }

    fn display_name(&self) -> &str {
        "Tic-tac-toe"
    }

    fn initial_state(&self) -> StateRef {
        Arc::new(TicTacToeState::default())
    }

    fn zero_sum_total(&self) -> Option<f64> {
        Some(1.0)
    }
}

/// A tic-tac-toe position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    cells: [Option<Role>; 9],
    to_move: Role,
    winner: Option<Role>,
    filled: u8,
}

impl TicTacToeState {
    /// Owner of a cell, by 0-based column and row.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<Role> {
        self.cells[row * 3 + column]
    }

    /// The winner, if any line is complete.
    #[must_use]
    pub fn winner(&self) -> Option<Role> {
        self.winner
    }

    fn place(&self, cell: usize) -> Self {
        let mut next = self.clone();
        next.cells[cell] = Some(self.to_move);
        next.filled += 1;
        next.to_move = Role::new(1 - self.to_move.0);
        next.winner = LINES.iter().find_map(|line| {
            let owner = next.cells[line[0]]?;
            line.iter()
                .all(|&i| next.cells[i] == Some(owner))
                .then_some(owner)
        });
        next
    }
}

impl GameState for TicTacToeState {
    fn num_roles(&self) -> usize {
        ROLE_COUNT
    }

    fn legal_moves(&self, role: Role) -> Result<Vec<Move>> {
        ensure_role(role, ROLE_COUNT)?;
        if self.is_terminal() {
            return Ok(Vec::new());
        }
        if role != self.to_move {
            return Ok(vec![Move::noop()]);
        }
        Ok(self
            .cells
            .iter()
            .zip(MARK_MOVES.iter())
            .filter(|(cell, _)| cell.is_none())
            .map(|(_, mv)| mv.clone())
            .collect())
    }

    fn move_named(&self, role: Role, name: &str) -> Result<Move> {
        ensure_role(role, ROLE_COUNT)?;
        if name == "noop" {
            return Ok(Move::noop());
        }
        MARK_MOVES
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
        let cell = moves[self.to_move.index()].code() as usize;
        Ok(Arc::new(self.place(cell)))
    }

    fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.filled == 9
    }

    fn outcome(&self, role: Role) -> Result<f64> {
        ensure_role(role, ROLE_COUNT)?;
        if !self.is_terminal() {
            return Err(Error::NotTerminal);
        }
        Ok(match self.winner {
            Some(winner) if winner == role => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(names: &[&str]) -> StateRef {
        let mut state = TicTacToe.initial_state();
        for name in names {
            let mover = if state.legal_moves(Role::new(0)).unwrap() == vec![Move::noop()] {
                1
            } else {
                0
            };
            let mut joint = vec![Move::noop(), Move::noop()];
            joint[mover] = state.move_named(Role::new(mover as u8), name).unwrap();
            state = state.next_state(&joint).unwrap();
        }
        state
    }

    #[test]
    fn test_initial_state() {
        let state = TicTacToe.initial_state();
        assert_eq!(state.num_roles(), 2);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves(Role::new(0)).unwrap().len(), 9);
        assert_eq!(state.legal_moves(Role::new(1)).unwrap(), vec![Move::noop()]);
        assert!(matches!(state.outcome(Role::new(0)), Err(Error::NotTerminal)));
    }

    #[test]
    fn test_move_names() {
        let state = TicTacToe.initial_state();
        let names: Vec<String> = state
            .legal_moves(Role::new(0))
            .unwrap()
            .iter()
            .map(|mv| mv.name().to_string())
            .collect();
        assert_eq!(names[0], "( mark 1 1 )");
        assert_eq!(names[1], "( mark 2 1 )");
        assert_eq!(names[3], "( mark 1 2 )");
        assert!(matches!(
            state.move_named(Role::new(0), "( mark 4 4 )"),
            Err(Error::NoSuchMove { .. })
        ));
    }

    #[test]
    fn test_row_win() {
        // x takes the top row while o plays the middle row
        let state = play(&[
            "( mark 1 1 )",
            "( mark 1 2 )",
            "( mark 2 1 )",
            "( mark 2 2 )",
            "( mark 3 1 )",
        ]);
        assert!(state.is_terminal());
        assert_eq!(state.outcome(Role::new(0)).unwrap(), 1.0);
        assert_eq!(state.outcome(Role::new(1)).unwrap(), 0.0);
        assert!(state.legal_moves(Role::new(0)).unwrap().is_empty());
    }

    #[test]
    fn test_draw() {
        // x o x / x o o / o x x
        let state = play(&[
            "( mark 1 1 )",
            "( mark 2 1 )",
            "( mark 3 1 )",
            "( mark 2 2 )",
            "( mark 1 2 )",
            "( mark 3 2 )",
            "( mark 2 3 )",
            "( mark 1 3 )",
            "( mark 3 3 )",
        ]);
        assert!(state.is_terminal());
        assert_eq!(state.outcome(Role::new(0)).unwrap(), 0.5);
        assert_eq!(state.outcome(Role::new(1)).unwrap(), 0.5);
    }

    #[test]
    fn test_illegal_moves_rejected() {
        let state = play(&["( mark 2 2 )"]);
        let taken = state.move_named(Role::new(1), "( mark 2 2 )").unwrap();
        let result = state.next_state(&[Move::noop(), taken]);
        assert!(matches!(result, Err(Error::IllegalMove { .. })));

        let result = state.next_state(&[Move::noop()]);
        assert!(matches!(
            result,
            Err(Error::WrongMoveCount { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_transition_leaves_parent_untouched() {
        let parent = TicTacToe.initial_state();
        let mv = parent.move_named(Role::new(0), "( mark 1 1 )").unwrap();
        let child = parent.next_state(&[mv, Move::noop()]).unwrap();
        assert_eq!(parent.legal_moves(Role::new(0)).unwrap().len(), 9);
        assert_eq!(child.legal_moves(Role::new(1)).unwrap().len(), 8);
    }
}
