//! Hand-written games that implement the game tree contract.
//!
//! - [`TicTacToe`]: two roles, turn-taking, constant-sum
//! - [`SheepAndWolf`]: two roles, turn-taking, asymmetric
//! - [`MatchingPennies`]: two roles, one simultaneous turn

mod pennies;
mod sheep_and_wolf;
mod tictactoe;

pub use pennies::{MatchingPennies, PenniesState};
pub use sheep_and_wolf::{SheepAndWolf, SheepAndWolfState, Square};
pub use tictactoe::{TicTacToe, TicTacToeState};
