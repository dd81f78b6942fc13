//! Plays one match from a spec.
//!
//! A match is fully determined by its spec and seed words: the seed keys a
//! match RNG, each player gets a stream forked from it in role order, and
//! every other source of randomness derives from those streams.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

use crate::core::{Error, GameRng, Result, Role};
use crate::game::GameCatalog;
use crate::registry::StrategyRegistry;
use crate::strategy::Player;

use super::spec::{MatchResult, MatchSpec};

/// Seed words drawn when a match is run without an explicit seed.
pub const SEED_WORDS: usize = 4;

/// Draw fresh seed words from the thread-local generator.
#[must_use]
pub fn random_seed() -> Vec<u32> {
    let mut rng = rand::thread_rng();
    (0..SEED_WORDS).map(|_| rng.gen()).collect()
}

/// Runs matches against a game catalog and a strategy registry.
#[derive(Clone, Debug)]
pub struct MatchRunner {
    catalog: Arc<GameCatalog>,
    registry: Arc<StrategyRegistry>,
}

impl MatchRunner {
    pub fn new(catalog: Arc<GameCatalog>, registry: Arc<StrategyRegistry>) -> Self {
        Self { catalog, registry }
    }

    /// Runner over the built-in games and strategies.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(GameCatalog::with_builtins()),
            Arc::new(StrategyRegistry::with_defaults()),
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<GameCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<StrategyRegistry> {
        &self.registry
    }

    /// Play `spec` to the end.
    ///
    /// Never fails: errors and panics raised by the game or the strategies
    /// are recorded in the result, along with the plies played so far.
    pub fn run(&self, spec: &MatchSpec, seed: Option<Vec<u32>>) -> MatchResult {
        let start = Instant::now();
        let seed = seed.unwrap_or_else(random_seed);
        tracing::debug!(
            experiment = %spec.experiment_name,
            game = %spec.game_id,
            strategies = ?spec.strategy_ids,
            "starting match"
        );

        let mut history = Vec::new();
        let played = panic::catch_unwind(AssertUnwindSafe(|| self.play(spec, &seed, &mut history)));
        let elapsed = start.elapsed().as_millis() as u64;

        let error = match played {
            Ok(Ok(outcomes)) => {
                tracing::debug!(
                    experiment = %spec.experiment_name,
                    game = %spec.game_id,
                    plies = history.len(),
                    elapsed_ms = elapsed,
                    ?outcomes,
                    "match finished"
                );
                return MatchResult::success(spec.clone(), seed, outcomes, history, elapsed);
            }
            Ok(Err(err)) => err,
            Err(payload) => Error::Panicked(panic_message(payload.as_ref())),
        };

        tracing::warn!(
            experiment = %spec.experiment_name,
            game = %spec.game_id,
            plies = history.len(),
            error = %error,
            "match failed"
        );
        MatchResult::failure(spec.clone(), seed, error.to_string(), history, elapsed)
    }

    fn play(&self, spec: &MatchSpec, seed: &[u32], history: &mut Vec<Vec<String>>) -> Result<Vec<f64>> {
        let game = self.catalog.get(&spec.game_id)?;
        let mut state = game.initial_state();

        let num_roles = state.num_roles();
        if spec.strategy_ids.len() != num_roles {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "game '{}' has {} roles but {} strategies were given",
                    spec.game_id,
                    num_roles,
                    spec.strategy_ids.len()
                ),
            });
        }

        let mut match_rng = GameRng::from_words(seed);
        let mut players = spec
            .strategy_ids
            .iter()
            .zip(Role::all(num_roles))
            .map(|(id, role)| Ok(self.registry.strategy(id)?.player(role, match_rng.fork())))
            .collect::<Result<Vec<Box<dyn Player>>>>()?;

        for player in &mut players {
            player.initialize(Arc::clone(&state));
        }

        while !state.is_terminal() {
            let moves = players
                .iter_mut()
                .map(|player| player.choose_move())
                .collect::<Result<Vec<_>>>()?;
            let next = state.next_state(&moves)?;
            history.push(moves.iter().map(|mv| mv.name().to_string()).collect());

            for player in &mut players {
                player.advance(&moves, Arc::clone(&next));
            }
            state = next;
        }

        Ok(state.outcomes()?.as_slice().to_vec())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
