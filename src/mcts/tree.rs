//! Node arena for one search.
//!
//! Nodes live in a `Vec` and point at each other through [`NodeId`]s, so
//! the whole tree is dropped in one go when the next search resets it.

use super::node::{NodeId, UctNode};
use crate::core::Role;
use crate::game::Move;

/// Initial arena size; a few hundred rollouts fit without reallocating.
const DEFAULT_CAPACITY: usize = 1024;

/// The search tree.
///
/// Slot 0 always holds the root. Nodes are only ever appended.
#[derive(Clone, Debug)]
pub struct UctTree {
    nodes: Vec<UctNode>,
    role_count: usize,
}

impl UctTree {
    /// A tree holding only a root for `root_to_move`.
    pub fn new(root_to_move: Role, role_count: usize) -> Self {
        Self::with_capacity(root_to_move, role_count, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(root_to_move: Role, role_count: usize, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(UctNode::root(root_to_move));
        Self { nodes, role_count }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &UctNode {
        &self.nodes[id.raw() as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut UctNode {
        &mut self.nodes[id.raw() as usize]
    }

    /// Append a node and return its id.
    pub fn alloc(&mut self, node: UctNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of roles whose rewards each edge tracks.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.role_count
    }

    /// Forget every node; keeps the allocation.
    pub fn reset(&mut self, root_to_move: Role, role_count: usize) {
        self.nodes.clear();
        self.nodes.push(UctNode::root(root_to_move));
        self.role_count = role_count;
    }

    #[must_use]
    pub fn root_node(&self) -> &UctNode {
        &self.nodes[0]
    }

    /// Nodes in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &UctNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Moves along the most visited expanded edges, starting at the root.
    ///
    /// Ties go to the earlier edge. Stops at the first node without an
    /// expanded, visited edge.
    #[must_use]
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = self.root_node();
        while let Some(edge) = node
            .edges
            .iter()
            .filter(|e| e.is_expanded() && e.is_tried())
            .reduce(|best, e| if e.visits > best.visits { e } else { best })
        {
            line.push(edge.mv.clone());
            node = self.get(edge.child);
        }
        line
    }

    /// Summarize the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            if node.is_terminal() {
                stats.terminal_count += 1;
            }
            for edge in &node.edges {
                stats.total_edges += 1;
                if !edge.is_tried() {
                    stats.untried_edges += 1;
                }
            }
        }
        stats
    }
}

/// Size and coverage of a [`UctTree`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub terminal_count: usize,
    pub total_edges: usize,
    /// Edges no rollout has taken yet.
    pub untried_edges: usize,
}

impl TreeStats {
    /// Share of edges taken by at least one rollout.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.total_edges == 0 {
            return 1.0;
        }
        (self.total_edges - self.untried_edges) as f64 / self.total_edges as f64
    }
}
