//! Sheep and Wolf on an 8×8 board.
//!
//! The wolf (role 0) starts at (4, 8) and steps one square diagonally in any
//! direction. Four sheep (role 1) start on row 1 at columns 1, 3, 5 and 7
//! and step one square diagonally forward, toward higher rows. The wolf
//! moves first and the two sides alternate; the waiting side plays `noop`.
//!
//! The game ends when the wolf is trapped, when the wolf has reached or
//! passed the row of every sheep, or when the sheep have no move left. The
//! sheep win only by trapping the wolf.

use im::Vector;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::core::{Error, Result, Role};
use crate::game::{ensure_role, validate_joint_move, GameProvider, GameState, Move, StateRef};

const ROLE_COUNT: usize = 2;
const BOARD_SIZE: i8 = 8;
const WOLF: Role = Role::new(0);
const SHEEP: Role = Role::new(1);

/// A board square, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub x: i8,
    pub y: i8,
}

impl Square {
    #[must_use]
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i8, dy: i8) -> Option<Square> {
        let x = self.x + dx;
        let y = self.y + dy;
        ((1..=BOARD_SIZE).contains(&x) && (1..=BOARD_SIZE).contains(&y)).then_some(Square { x, y })
    }
}

/// Pack a step into a move code: one nibble per coordinate.
fn step_code(from: Square, to: Square) -> u32 {
    (from.x as u32) << 12 | (from.y as u32) << 8 | (to.x as u32) << 4 | to.y as u32
}

fn step_from_code(code: u32) -> (Square, Square) {
    let nibble = |shift: u32| ((code >> shift) & 0xF) as i8;
    (
        Square::new(nibble(12), nibble(8)),
        Square::new(nibble(4), nibble(0)),
    )
}

fn step_move(from: Square, to: Square) -> Move {
    let mut name = String::with_capacity(24);
    let _ = write!(name, "( move c{} c{} c{} c{} )", from.x, from.y, to.x, to.y);
    Move::new(name, step_code(from, to))
}

/// Provider for Sheep and Wolf.
#[derive(Clone, Copy, Debug, Default)]
pub struct SheepAndWolf;

impl GameProvider for SheepAndWolf {
    fn id(&self) -> &str {
        "SHEEP_AND_WOLF"
    }

    fn display_name(&self) -> &str {
        "Sheep and Wolf"
    }

    fn initial_state(&self) -> StateRef {
        Arc::new(SheepAndWolfState {
            wolf_to_move: true,
            wolf: Square::new(4, 8),
            sheep: [1, 3, 5, 7].into_iter().map(|x| Square::new(x, 1)).collect(),
        })
    }

    fn zero_sum_total(&self) -> Option<f64> {
        Some(1.0)
    }
}

/// A Sheep and Wolf position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheepAndWolfState {
    wolf_to_move: bool,
    wolf: Square,
    sheep: Vector<Square>,
}

impl SheepAndWolfState {
    /// The wolf's square.
    #[must_use]
    pub fn wolf(&self) -> Square {
        self.wolf
    }

    /// The sheep's squares, in their starting order.
    #[must_use]
    pub fn sheep(&self) -> &Vector<Square> {
        &self.sheep
    }

    fn occupied(&self, square: Square) -> bool {
        self.wolf == square || self.sheep.contains(&square)
    }

    fn wolf_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(4);
        for dx in [-1, 1] {
            for dy in [-1, 1] {
                if let Some(to) = self.wolf.offset(dx, dy).filter(|&to| !self.occupied(to)) {
                    moves.push(step_move(self.wolf, to));
                }
            }
        }
        moves
    }

    fn sheep_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(8);
        for &from in &self.sheep {
            for dx in [-1, 1] {
                if let Some(to) = from.offset(dx, 1).filter(|&to| !self.occupied(to)) {
                    moves.push(step_move(from, to));
                }
            }
        }
        moves
    }

    fn wolf_trapped(&self) -> bool {
        self.wolf_moves().is_empty()
    }

    fn wolf_past_sheep(&self) -> bool {
        self.sheep.iter().all(|sheep| sheep.y >= self.wolf.y)
    }
}

impl GameState for SheepAndWolfState {
    fn num_roles(&self) -> usize {
        ROLE_COUNT
    }

    fn legal_moves(&self, role: Role) -> Result<Vec<Move>> {
        ensure_role(role, ROLE_COUNT)?;
        if self.is_terminal() {
            return Ok(Vec::new());
        }
        Ok(match (role, self.wolf_to_move) {
            (WOLF, true) => self.wolf_moves(),
            (SHEEP, false) => self.sheep_moves(),
            _ => vec![Move::noop()],
        })
    }

    fn move_named(&self, role: Role, name: &str) -> Result<Move> {
        ensure_role(role, ROLE_COUNT)?;
        if name == "noop" {
            return Ok(Move::noop());
        }
        parse_step(name)
            .map(|(from, to)| step_move(from, to))
            .ok_or_else(|| Error::NoSuchMove {
                role,
                name: name.to_string(),
            })
    }

    fn next_state(&self, moves: &[Move]) -> Result<StateRef> {
        validate_joint_move(self, moves)?;
        let mut next = self.clone();
        next.wolf_to_move = !self.wolf_to_move;

        if self.wolf_to_move {
            let (_, to) = step_from_code(moves[WOLF.index()].code());
            next.wolf = to;
        } else {
            let (from, to) = step_from_code(moves[SHEEP.index()].code());
            if let Some(index) = self.sheep.index_of(&from) {
                next.sheep.set(index, to);
            }
        }
        Ok(Arc::new(next))
    }

    fn is_terminal(&self) -> bool {
        self.wolf_trapped() || self.wolf_past_sheep() || self.sheep_moves().is_empty()
    }

    fn outcome(&self, role: Role) -> Result<f64> {
        ensure_role(role, ROLE_COUNT)?;
        if !self.is_terminal() {
            return Err(Error::NotTerminal);
        }
        let won = (role == SHEEP) == self.wolf_trapped();
        Ok(if won { 1.0 } else { 0.0 })
    }
}

/// Parse `( move cX1 cY1 cX2 cY2 )`.
fn parse_step(name: &str) -> Option<(Square, Square)> {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    let [open, verb, x1, y1, x2, y2, close] = tokens.as_slice() else {
        return None;
    };
    if *open != "(" || *verb != "move" || *close != ")" {
        return None;
    }
    let coord = |token: &str| -> Option<i8> {
        let value: i8 = token.strip_prefix('c')?.parse().ok()?;
        (1..=BOARD_SIZE).contains(&value).then_some(value)
    };
    Some((
        Square::new(coord(*x1)?, coord(*y1)?),
        Square::new(coord(*x2)?, coord(*y2)?),
    ))
}
