//! Executing single matches.
//!
//! A [`MatchSpec`] names an experiment, a game and one strategy id per role.
//! [`MatchRunner::run`] plays it and always returns a [`MatchResult`]; errors
//! are data, not failures of the call.

pub mod match_runner;
pub mod spec;

pub use match_runner::{random_seed, MatchRunner, SEED_WORDS};
pub use spec::{MatchResult, MatchSpec};
