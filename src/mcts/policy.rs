//! UCT policies for selection, final move choice, and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: which edge a rollout follows inside the tree
//! - `FinalMovePolicy`: which root edge is played once the search ends
//! - `SimulationPolicy`: how a rollout continues past the tree boundary

use crate::core::{GameRng, Result, Role, RoleMap};
use crate::game::TurnTakingState;
use crate::strategy::choose::{pick_best_by, pick_highest_scoring};

use super::config::{FinalMove, Selection, UctConfig};
use super::node::{Edge, UctNode};

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which edge to follow from a node.
pub trait SelectionPolicy: Send + Sync {
    /// Select an edge index from a non-terminal node with at least one edge.
    fn select(&self, node: &UctNode, rng: &mut GameRng, config: &UctConfig) -> Result<usize>;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Untried edges are taken first, at random. Once every edge has been tried
/// the score is Q(a) + c * sqrt(ln(N) / n(a)), where Q is the mean outcome
/// for the role to move at the node.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ucb1;

impl SelectionPolicy for Ucb1 {
    fn select(&self, node: &UctNode, rng: &mut GameRng, config: &UctConfig) -> Result<usize> {
        if let Some(idx) = random_untried(node, rng) {
            return Ok(idx);
        }
        ucb1_best(node, rng, config)
    }
}

/// Selection that keeps replaying moves which have only ever won.
///
/// Tried edges whose mean outcome for the mover is at least 1 come first,
/// most visited first. Then untried edges, then UCB1.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinsFirstSelection;

impl SelectionPolicy for WinsFirstSelection {
    fn select(&self, node: &UctNode, rng: &mut GameRng, config: &UctConfig) -> Result<usize> {
        let winners: Vec<usize> = node
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_tried() && e.mean_reward(node.to_move) >= 1.0)
            .map(|(i, _)| i)
            .collect();
        if let Some(idx) = pick_best_by(winners, rng, |&a, &b| {
            node.edges[a].visits.cmp(&node.edges[b].visits)
        }) {
            return Ok(idx);
        }
        if let Some(idx) = random_untried(node, rng) {
            return Ok(idx);
        }
        ucb1_best(node, rng, config)
    }
}

fn random_untried(node: &UctNode, rng: &mut GameRng) -> Option<usize> {
    let untried: Vec<usize> = node.untried_edges().collect();
    rng.choose(&untried).copied()
}

fn ucb1_best(node: &UctNode, rng: &mut GameRng, config: &UctConfig) -> Result<usize> {
    let ln_parent = (node.visits.max(1) as f64).ln();
    let scored = node
        .edges
        .iter()
        .enumerate()
        .map(|(i, edge)| (i, ucb1_score(edge, node.to_move, ln_parent, config)))
        .collect();
    Ok(pick_highest_scoring(scored, rng)?.unwrap_or(0))
}

fn ucb1_score(edge: &Edge, role: Role, ln_parent: f64, config: &UctConfig) -> f64 {
    let exploitation = edge.mean_reward(role);
    let exploration = if edge.visits == 0 {
        f64::INFINITY
    } else {
        config.exploration_constant * (ln_parent / edge.visits as f64).sqrt()
    };
    exploitation + exploration
}

/// Build the selection policy a config asks for.
pub fn selection_policy(selection: Selection) -> Box<dyn SelectionPolicy> {
    match selection {
        Selection::Ucb1 => Box::new(Ucb1),
        Selection::WinsFirst => Box::new(WinsFirstSelection),
    }
}

// =============================================================================
// Final Move Policy
// =============================================================================

/// Policy for picking the move to play from the searched root.
pub trait FinalMovePolicy: Send + Sync {
    /// Pick an edge of `root` for `role`; `None` only when there are no edges.
    fn choose(&self, root: &UctNode, role: Role, rng: &mut GameRng) -> Option<usize>;
}

/// Play the most visited move.
#[derive(Clone, Copy, Debug, Default)]
pub struct MostVisits;

impl FinalMovePolicy for MostVisits {
    fn choose(&self, root: &UctNode, _role: Role, rng: &mut GameRng) -> Option<usize> {
        let indices = (0..root.edges.len()).collect();
        pick_best_by(indices, rng, |&a, &b| {
            root.edges[a].visits.cmp(&root.edges[b].visits)
        })
    }
}

/// Play the move with the best mean outcome, then the most visited.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinsFirstFinal;

impl FinalMovePolicy for WinsFirstFinal {
    fn choose(&self, root: &UctNode, role: Role, rng: &mut GameRng) -> Option<usize> {
        let indices = (0..root.edges.len()).collect();
        pick_best_by(indices, rng, |&a, &b| {
            let (ea, eb) = (&root.edges[a], &root.edges[b]);
            ea.mean_reward(role)
                .total_cmp(&eb.mean_reward(role))
                .then(ea.visits.cmp(&eb.visits))
        })
    }
}

/// Build the final move policy a config asks for.
pub fn final_move_policy(final_move: FinalMove) -> Box<dyn FinalMovePolicy> {
    match final_move {
        FinalMove::MostVisits => Box::new(MostVisits),
        FinalMove::WinsFirst => Box::new(WinsFirstFinal),
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for finishing a rollout outside the tree.
pub trait SimulationPolicy: Send + Sync {
    /// Play from `state` to the end, returning outcomes per role.
    fn simulate(&self, state: &TurnTakingState, rng: &mut GameRng) -> Result<RoleMap<f64>>;
}

/// Plays uniformly random moves until the game ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomSimulation;

impl SimulationPolicy for RandomSimulation {
    fn simulate(&self, state: &TurnTakingState, rng: &mut GameRng) -> Result<RoleMap<f64>> {
        let mut state = state.clone();
        while !state.is_terminal() {
            state = state.random_next_state(rng)?;
        }
        state.outcomes()
    }
}
