//! Depth-limited minimax.
//!
//! Each candidate move is scored by searching the resulting position
//! `plies - 1` further plies. Terminal positions score their outcome for
//! the searching role; positions at the horizon score `default_outcome`.
//! Elsewhere a position scores the maximum over its children when the
//! searching role is to move and the minimum otherwise, which assumes a
//! two-role zero-sum game.

use std::sync::Arc;

use crate::core::{Error, GameRng, Result, Role};
use crate::game::{Move, TurnTakingState};

use super::choose::pick_highest_scoring;
use super::params::{ParameterDescription, StrategyParameters};
use super::{lift, Strategy, StrategyProvider, TurnTakingPlayer, TurnTakingStrategy};

/// N-ply minimax lookahead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookaheadStrategy {
    plies: u32,
    default_outcome: f64,
}

impl LookaheadStrategy {
    /// Create a lookahead over `plies` plies (at least 1).
    pub fn new(plies: u32, default_outcome: f64) -> Result<Self> {
        if plies < 1 {
            return Err(Error::ParameterOutOfBounds {
                name: "pliesToLookAhead".to_string(),
                bound: "at least 1".to_string(),
                value: plies.to_string(),
            });
        }
        Ok(Self {
            plies,
            default_outcome,
        })
    }

    #[must_use]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    #[must_use]
    pub fn default_outcome(&self) -> f64 {
        self.default_outcome
    }
}

impl TurnTakingStrategy for LookaheadStrategy {
    fn turn_taking_player(&self, role: Role, rng: GameRng) -> Box<dyn TurnTakingPlayer> {
        Box::new(LookaheadPlayer {
            strategy: *self,
            role,
            rng,
        })
    }
}

struct LookaheadPlayer {
    strategy: LookaheadStrategy,
    role: Role,
    rng: GameRng,
}

impl LookaheadPlayer {
    fn score(&self, state: &TurnTakingState, plies_left: u32) -> Result<f64> {
        if state.is_terminal() {
            return state.outcome(self.role);
        }
        if plies_left == 0 {
            return Ok(self.strategy.default_outcome);
        }

        let maximize = state.role_to_move()? == self.role;
        let mut best: Option<f64> = None;
        for child in state.possible_next_states()? {
            let (_, next) = child?;
            let score = self.score(&next, plies_left - 1)?;
            best = Some(match best {
                None => score,
                Some(b) if maximize => b.max(score),
                Some(b) => b.min(score),
            });
        }
        best.ok_or(Error::NoLegalMoves {
            role: state.role_to_move()?,
        })
    }
}

impl TurnTakingPlayer for LookaheadPlayer {
    fn choose(&mut self, state: &TurnTakingState) -> Result<Move> {
        let mut scored = Vec::new();
        for child in state.possible_next_states()? {
            let (mv, next) = child?;
            let score = self.score(&next, self.strategy.plies - 1)?;
            scored.push((mv, score));
        }
        tracing::trace!(role = self.role.index(), candidates = scored.len(), "lookahead scored moves");
        pick_highest_scoring(scored, &mut self.rng)?.ok_or(Error::NoLegalMoves { role: self.role })
    }
}

/// Provider for [`LookaheadStrategy`], named `NPlyLookahead`.
///
/// Parameters:
/// - `pliesToLookAhead`: integer, at least 1, required
/// - `defaultOutcome`: real in [0, 1], default 0.5
#[derive(Clone, Debug)]
pub struct LookaheadProvider {
    parameters: [ParameterDescription; 2],
}

impl LookaheadProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parameters: [Self::plies(), Self::default_outcome()],
        }
    }

    /// Description of `pliesToLookAhead`.
    #[must_use]
    pub fn plies() -> ParameterDescription {
        ParameterDescription::int("pliesToLookAhead").with_min(1_i64)
    }

    /// Description of `defaultOutcome`.
    #[must_use]
    pub fn default_outcome() -> ParameterDescription {
        ParameterDescription::double("defaultOutcome")
            .with_min(0.0)
            .with_max(1.0)
            .with_default(0.5)
    }
}

impl Default for LookaheadProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyProvider for LookaheadProvider {
    fn name(&self) -> &str {
        "NPlyLookahead"
    }

    fn parameters(&self) -> &[ParameterDescription] {
        &self.parameters
    }

    fn build(&self, params: &StrategyParameters) -> Result<Arc<dyn Strategy>> {
        let plies = params.get_int(&self.parameters[0])?;
        let default_outcome = params.get_double(&self.parameters[1])?;
        let plies = u32::try_from(plies).map_err(|_| Error::ParameterOutOfBounds {
            name: self.parameters[0].name().to_string(),
            bound: format!("at most {}", u32::MAX),
            value: plies.to_string(),
        })?;
        Ok(lift(LookaheadStrategy::new(plies, default_outcome)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameProvider, GameState};
    use crate::games::TicTacToe;

    fn play(names: &[&str]) -> TurnTakingState {
        let mut state = TurnTakingState::new(TicTacToe.initial_state());
        for name in names {
            let mover = state.role_to_move().unwrap();
            let mv = state.move_named(mover, name).unwrap();
            state = state.next_state(&mv).unwrap();
        }
        state
    }

    fn choose(plies: u32, state: &TurnTakingState, seed: u64) -> Move {
        let role = state.role_to_move().unwrap();
        let mut player = LookaheadStrategy::new(plies, 0.5)
            .unwrap()
            .turn_taking_player(role, GameRng::new(seed));
        player.choose(state).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        // x: (1,1) (2,1); o: (1,2) (2,2); x to move wins at (3,1)
        let state = play(&["( mark 1 1 )", "( mark 1 2 )", "( mark 2 1 )", "( mark 2 2 )"]);
        for seed in 0..5 {
            assert_eq!(choose(1, &state, seed).name(), "( mark 3 1 )");
        }
    }

    #[test]
    fn test_blocks_immediate_loss() {
        // x: (1,1) (3,3); o: (1,2) (2,2); x must block o at (3,2)
        let state = play(&["( mark 1 1 )", "( mark 1 2 )", "( mark 3 3 )", "( mark 2 2 )"]);
        for seed in 0..5 {
            assert_eq!(choose(2, &state, seed).name(), "( mark 3 2 )");
        }
    }

    #[test]
    fn test_zero_plies_rejected() {
        assert!(matches!(
            LookaheadStrategy::new(0, 0.5),
            Err(Error::ParameterOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_provider_defaults() {
        let provider = LookaheadProvider::new();
        let params = StrategyParameters::builder()
            .put(&LookaheadProvider::plies(), 2_i64)
            .unwrap()
            .build();
        assert!(provider.build(&params).is_ok());
        assert!(matches!(
            provider.build(&StrategyParameters::empty()),
            Err(Error::MissingParameter(_))
        ));
    }

    #[test]
    fn test_terminal_children_score_outcomes() {
        let state = play(&["( mark 1 1 )", "( mark 1 2 )", "( mark 2 1 )", "( mark 2 2 )"]);
        let player = LookaheadPlayer {
            strategy: LookaheadStrategy::new(1, 0.5).unwrap(),
            role: Role::new(0),
            rng: GameRng::new(0),
        };
        let win = state
            .next_state(&state.move_named(Role::new(0), "( mark 3 1 )").unwrap())
            .unwrap();
        assert_eq!(player.score(&win, 0).unwrap(), 1.0);

        let quiet = state
            .next_state(&state.move_named(Role::new(0), "( mark 3 3 )").unwrap())
            .unwrap();
        assert_eq!(player.score(&quiet, 0).unwrap(), 0.5);
        assert!(win.state().is_terminal());
    }
}
