//! Named, immutable moves.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// Code reserved for the shared no-op move.
pub const NOOP_CODE: u32 = u32::MAX;

static NOOP: Lazy<Move> = Lazy::new(|| Move::new("noop", NOOP_CODE));

/// An opaque, named action.
///
/// The name is what gets recorded in match histories and what
/// `GameState::move_named` resolves. The `code` is a payload owned by the
/// game that produced the move; it lets the game apply the move without
/// parsing the name again. Two moves are equal when both name and code match.
///
/// Cloning is cheap: the name is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    name: Arc<str>,
    code: u32,
}

impl Move {
    /// Create a new move.
    pub fn new(name: impl Into<Arc<str>>, code: u32) -> Self {
        Self {
            name: name.into(),
            code,
        }
    }

    /// The `noop` move, given to roles with nothing to decide.
    #[must_use]
    pub fn noop() -> Self {
        NOOP.clone()
    }

    /// Human-readable name, as recorded in move histories.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Game-specific payload.
    #[must_use]
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Whether this is the shared no-op move.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.code == NOOP_CODE && &*self.name == "noop"
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.name)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_move_equality() {
        let a = Move::new("( mark 1 1 )", 0);
        let b = Move::new(String::from("( mark 1 1 )"), 0);
        let c = Move::new("( mark 1 2 )", 3);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: FxHashSet<Move> = [a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_noop() {
        let noop = Move::noop();
        assert_eq!(noop.name(), "noop");
        assert!(noop.is_noop());
        assert_eq!(noop, Move::noop());
        assert!(!Move::new("noop", 0).is_noop());
        assert_eq!(noop.to_string(), "noop");
    }
}
