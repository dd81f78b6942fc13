//! Conformance checks for the built-in games.

use std::sync::Arc;

use game_arena::core::{Error, Result, Role};
use game_arena::game::conformance::{assert_same_game, assert_well_formed};
use game_arena::game::{ensure_role, validate_joint_move, GameProvider, GameState, Move, StateRef};
use game_arena::games::{MatchingPennies, SheepAndWolf, TicTacToe};

// =============================================================================
// Bitboard tic-tac-toe
// =============================================================================

const WINS: [u16; 8] = [
    0b000_000_111,
    0b000_111_000,
    0b111_000_000,
    0b001_001_001,
    0b010_010_010,
    0b100_100_100,
    0b100_010_001,
    0b001_010_100,
];

/// Tic-tac-toe with bitboards and its own move codes.
struct BitboardTicTacToe;

impl GameProvider for BitboardTicTacToe {
    fn id(&self) -> &str {
        "BITBOARD_TIC_TAC_TOE"
    }

    fn initial_state(&self) -> StateRef {
        Arc::new(Bitboard::default())
    }

    fn zero_sum_total(&self) -> Option<f64> {
        Some(1.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Bitboard {
    boards: [u16; 2],
    to_move: usize,
}

impl Bitboard {
    fn won(&self, role: usize) -> bool {
        WINS.iter().any(|&line| self.boards[role] & line == line)
    }

    fn occupied(&self) -> u16 {
        self.boards[0] | self.boards[1]
    }

    fn mark(cell: u32) -> Move {
        Move::new(format!("( mark {} {} )", cell % 3 + 1, cell / 3 + 1), 100 + cell)
    }
}

impl GameState for Bitboard {
    fn num_roles(&self) -> usize {
        2
    }

    fn legal_moves(&self, role: Role) -> Result<Vec<Move>> {
        ensure_role(role, 2)?;
        if self.is_terminal() {
            return Ok(Vec::new());
        }
        if role.index() != self.to_move {
            return Ok(vec![Move::noop()]);
        }
        let occupied = self.occupied();
        Ok((0..9)
            .filter(|cell| occupied & (1 << cell) == 0)
            .map(Self::mark)
            .collect())
    }

    fn move_named(&self, role: Role, name: &str) -> Result<Move> {
        ensure_role(role, 2)?;
        if name == "noop" {
            return Ok(Move::noop());
        }
        (0..9)
            .map(Self::mark)
            .find(|mv| mv.name() == name)
            .ok_or_else(|| Error::NoSuchMove {
                role,
                name: name.to_string(),
            })
    }

    fn next_state(&self, moves: &[Move]) -> Result<StateRef> {
        validate_joint_move(self, moves)?;
        let cell = moves[self.to_move].code() - 100;
        let mut next = *self;
        next.boards[self.to_move] |= 1 << cell;
        next.to_move = 1 - self.to_move;
        Ok(Arc::new(next))
    }

    fn is_terminal(&self) -> bool {
        self.won(0) || self.won(1) || self.occupied() == 0b111_111_111
    }

    fn outcome(&self, role: Role) -> Result<f64> {
        ensure_role(role, 2)?;
        if !self.is_terminal() {
            return Err(Error::NotTerminal);
        }
        let other = 1 - role.index();
        Ok(if self.won(role.index()) {
            1.0
        } else if self.won(other) {
            0.0
        } else {
            0.5
        })
    }
}

// =============================================================================
// Cross-implementation Tests
// =============================================================================

#[test]
fn test_bitboard_matches_reference() {
    assert_same_game(&TicTacToe, &BitboardTicTacToe, 200, 42).unwrap();
}

#[test]
fn test_reference_matches_bitboard() {
    assert_same_game(&BitboardTicTacToe, &TicTacToe, 200, 7).unwrap();
}

// =============================================================================
// Well-formedness Tests
// =============================================================================

#[test]
fn test_tic_tac_toe_well_formed() {
    assert_well_formed(&TicTacToe, 200, 1).unwrap();
}

#[test]
fn test_sheep_and_wolf_well_formed() {
    assert_well_formed(&SheepAndWolf, 50, 2).unwrap();
}

#[test]
fn test_matching_pennies_well_formed() {
    assert_well_formed(&MatchingPennies, 50, 3).unwrap();
}

#[test]
fn test_bitboard_well_formed() {
    assert_well_formed(&BitboardTicTacToe, 100, 4).unwrap();
}

#[test]
fn test_illegal_joint_moves_rejected() {
    let state = TicTacToe.initial_state();
    let mark = state.move_named(Role::new(0), "( mark 2 2 )").unwrap();

    assert!(matches!(
        state.next_state(&[mark.clone()]),
        Err(Error::WrongMoveCount { expected: 2, got: 1 })
    ));
    assert!(matches!(
        state.next_state(&[Move::noop(), mark]),
        Err(Error::IllegalMove { .. })
    ));
}
