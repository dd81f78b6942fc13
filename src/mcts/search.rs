//! Core UCT search algorithm.
//!
//! Every rollout starts at the root position and replays the moves it
//! selects, so nodes never need to store states. Outcomes are credited to
//! every edge on the rollout path, for every role; selection at a node uses
//! the outcome of the role to move there.

use std::time::Instant;

use crate::core::{Error, GameRng, Result, Role, RoleMap};
use crate::game::{Move, TurnTakingState};

use super::config::{Expansion, UctConfig};
use super::node::{Edge, NodeId, UctNode};
use super::policy::{
    final_move_policy, selection_policy, FinalMovePolicy, RandomSimulation, SelectionPolicy,
    SimulationPolicy,
};
use super::stats::SearchStats;
use super::tree::UctTree;

/// UCT search context.
///
/// Owns the tree, the configuration and the random source. The tree is
/// rebuilt from scratch for every call to [`UctSearch::search`].
pub struct UctSearch {
    config: UctConfig,

    tree: UctTree,

    rng: GameRng,

    selection: Box<dyn SelectionPolicy>,

    final_move: Box<dyn FinalMovePolicy>,

    simulation: Box<dyn SimulationPolicy>,

    stats: SearchStats,
}

impl UctSearch {
    /// Create a search context; policies follow the config.
    pub fn new(config: UctConfig, rng: GameRng) -> Self {
        Self {
            selection: selection_policy(config.selection),
            final_move: final_move_policy(config.final_move),
            simulation: Box::new(RandomSimulation),
            tree: UctTree::new(Role::new(0), 2),
            rng,
            config,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &UctConfig {
        &self.config
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree left behind by the most recent search.
    #[must_use]
    pub fn tree(&self) -> &UctTree {
        &self.tree
    }

    /// Run `config.iterations` rollouts from `state` and pick a move for `role`.
    pub fn search(&mut self, state: &TurnTakingState, role: Role) -> Result<Move> {
        let start = Instant::now();
        self.stats.reset();

        if state.is_terminal() {
            return Err(Error::NoLegalMoves { role });
        }
        self.tree.reset(state.role_to_move()?, state.num_roles());
        let root = self.tree.root();
        self.expand_node(root, state)?;

        let root_node = self.tree.get(root);
        if root_node.edges.is_empty() {
            return Err(Error::NoLegalMoves { role });
        }
        if root_node.edges.len() == 1 {
            return Ok(root_node.edges[0].mv.clone());
        }

        for _ in 0..self.config.iterations {
            self.iteration(state)?;
            self.stats.iterations += 1;
        }
        self.stats.time_us = start.elapsed().as_micros() as u64;

        let idx = self
            .final_move
            .choose(self.tree.root_node(), role, &mut self.rng)
            .ok_or(Error::NoLegalMoves { role })?;
        let chosen = self.tree.root_node().edges[idx].mv.clone();

        tracing::trace!(
            role = role.index(),
            stats = %self.stats,
            tree_nodes = self.tree.len(),
            line = ?self.tree.principal_variation(),
            chosen = %chosen,
            "uct search finished"
        );
        Ok(chosen)
    }

    /// Single rollout: select, expand, simulate, backpropagate.
    fn iteration(&mut self, root_state: &TurnTakingState) -> Result<()> {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();
        let mut state = root_state.clone();

        loop {
            let node = self.tree.get(current);
            if let Some(rewards) = node.terminal_reward.clone() {
                self.stats.terminal_hits += 1;
                self.backpropagate(&path, &rewards);
                return Ok(());
            }

            let edge_idx = self.selection.select(node, &mut self.rng, &self.config)?;
            path.push((current, edge_idx));

            let edge = &node.edges[edge_idx];
            let child = edge.child;
            state = state.next_state(&edge.mv)?;

            if !child.is_none() {
                current = child;
                continue;
            }

            let new_node = self.expand_child(current, edge_idx, &state)?;
            match self.config.expansion {
                Expansion::RecordAllNodes => current = new_node,
                Expansion::OneNodeExpansion => {
                    let rewards = if state.is_terminal() {
                        state.outcomes()?
                    } else {
                        let mut sim_rng = self.rng.fork();
                        self.stats.simulations += 1;
                        self.simulation.simulate(&state, &mut sim_rng)?
                    };
                    self.backpropagate(&path, &rewards);
                    return Ok(());
                }
            }
        }
    }

    /// Fill in a freshly allocated node from its state.
    fn expand_node(&mut self, node_id: NodeId, state: &TurnTakingState) -> Result<()> {
        let role_count = self.tree.role_count();

        if state.is_terminal() {
            self.tree.get_mut(node_id).terminal_reward = Some(state.outcomes()?);
        } else {
            let moves = state.possible_moves()?;
            let node = self.tree.get_mut(node_id);
            node.edges
                .extend(moves.into_iter().map(|mv| Edge::new(mv, role_count)));
        }

        self.stats.nodes_expanded += 1;
        Ok(())
    }

    /// Add the child reached through `edge_idx` of `parent_id`.
    fn expand_child(
        &mut self,
        parent_id: NodeId,
        edge_idx: usize,
        state: &TurnTakingState,
    ) -> Result<NodeId> {
        let depth = self.tree.get(parent_id).depth + 1;
        let to_move = state.role_to_move()?;

        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }

        let child_id = self.tree.alloc(UctNode::new(to_move, depth));
        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;
        self.expand_node(child_id, state)?;
        Ok(child_id)
    }

    /// Credit `rewards` to every node and edge on the path.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: &RoleMap<f64>) {
        for &(node_id, edge_idx) in path {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;
            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;
            edge.total_reward.accumulate(rewards);
        }
    }
}
