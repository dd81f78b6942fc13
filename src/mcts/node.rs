//! UCT node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId). Nodes do not
//! hold game states; the search replays moves from the root instead.

use smallvec::SmallVec;

use crate::core::{Role, RoleMap};
use crate::game::Move;

/// Mean value reported for an edge that was never visited.
pub const UNVISITED_VALUE: f64 = -1.0;

/// Index into the UctTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Edge representing a move from a parent node to a child.
#[derive(Clone, Debug)]
pub struct Edge {
    /// The move this edge represents.
    pub mv: Move,

    /// Child node (NONE if not yet in the tree).
    pub child: NodeId,

    /// Rollouts that took this move.
    pub visits: u32,

    /// Total outcome accumulated through this move (per role).
    pub total_reward: RoleMap<f64>,
}

impl Edge {
    /// Create a new edge for a move.
    pub fn new(mv: Move, role_count: usize) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: RoleMap::with_value(role_count, 0.0),
        }
    }

    /// Mean outcome for a role, or `UNVISITED_VALUE` if never visited.
    #[must_use]
    pub fn mean_reward(&self, role: Role) -> f64 {
        if self.visits == 0 {
            UNVISITED_VALUE
        } else {
            self.total_reward[role] / self.visits as f64
        }
    }

    /// Check if this edge has been tried by at least one rollout.
    #[must_use]
    pub fn is_tried(&self) -> bool {
        self.visits > 0
    }

    /// Check if this edge has a child node.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A node in the UCT tree.
#[derive(Clone, Debug)]
pub struct UctNode {
    /// Role to move at this node.
    pub to_move: Role,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Rollouts that passed through this node.
    pub visits: u32,

    /// Outcomes, if this is a terminal state.
    pub terminal_reward: Option<RoleMap<f64>>,

    /// One edge per possible move of `to_move`; empty until expanded.
    pub edges: SmallVec<[Edge; 8]>,
}

impl UctNode {
    /// Create a new non-terminal node.
    pub fn new(to_move: Role, depth: u16) -> Self {
        Self {
            to_move,
            depth,
            visits: 0,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(to_move: Role) -> Self {
        Self::new(to_move, 0)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.terminal_reward.is_some()
    }

    /// Check if any edge has never been tried.
    #[must_use]
    pub fn has_untried(&self) -> bool {
        self.edges.iter().any(|e| !e.is_tried())
    }

    /// Indices of edges never tried.
    pub fn untried_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_tried())
            .map(|(i, _)| i)
    }
}
