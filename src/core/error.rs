//! Error types for game-arena.

use thiserror::Error;

use super::role::Role;

/// Main error type for the crate.
///
/// Configuration and parameter errors abort whatever triggered them.
/// In-match errors are captured by the match runner into the result of the
/// match. Persistence errors are logged by the scheduler and never stop a
/// worker.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // === Configuration ===
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),

    #[error("strategy '{strategy}' has no parameter named '{parameter}'")]
    UnknownParameter { strategy: String, parameter: String },

    #[error("malformed component '{component}' in strategy id '{id}': expected exactly one '='")]
    MalformedStrategyId { id: String, component: String },

    #[error("parameter '{0}' supplied more than once")]
    DuplicateParameter(String),

    #[error("{what} '{text}' contains the disallowed character '{character}'")]
    DisallowedCharacter {
        what: &'static str,
        text: String,
        character: char,
    },

    #[error("two strategy providers share the name '{0}'")]
    DuplicateStrategy(String),

    #[error("unknown game '{0}'")]
    UnknownGame(String),

    #[error("two games share the id '{0}'")]
    DuplicateGame(String),

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    // === Parameters ===
    #[error("parameter '{name}' must be {bound}, but was {value}")]
    ParameterOutOfBounds {
        name: String,
        bound: String,
        value: String,
    },

    #[error("cannot parse '{text}' as a value for parameter '{name}'")]
    InvalidParameterValue { name: String, text: String },

    #[error("no value was provided for parameter '{0}' and it has no default")]
    MissingParameter(String),

    #[error("parameter '{name}' holds a {actual} value, not a {expected} value")]
    ParameterType {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    // === In-match ===
    #[error("{role} is out of range for a game with {role_count} roles")]
    InvalidRole { role: Role, role_count: usize },

    #[error("no move named '{name}' exists for {role}")]
    NoSuchMove { role: Role, name: String },

    #[error("move '{name}' is not legal for {role} in this state")]
    IllegalMove { role: Role, name: String },

    #[error("expected one move per role ({expected}), got {got}")]
    WrongMoveCount { expected: usize, got: usize },

    #[error("outcomes are only defined for terminal states")]
    NotTerminal,

    #[error("{role} has no legal moves")]
    NoLegalMoves { role: Role },

    #[error("roles {first} and {second} both have a choice of moves; this position is not turn-taking")]
    SimultaneousPosition { first: Role, second: Role },

    #[error("player for {role} was asked for a move before receiving a game state")]
    PlayerNotInitialized { role: Role },

    #[error("a move was scored {score}, which cannot be ranked")]
    InvalidScore { score: f64 },

    #[error("match panicked: {0}")]
    Panicked(String),

    // === Persistence ===
    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with a description of what was being attempted.
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Convenience Result type for game-arena operations.
pub type Result<T> = std::result::Result<T, Error>;
