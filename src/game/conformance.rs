//! Checks that game implementations honor the game tree contract.
//!
//! Both helpers play seeded random walks and panic with a description of
//! the first violation found, in the manner of `assert_eq!`. Errors raised
//! by the games themselves are returned instead.

use rustc_hash::FxHashSet;

use crate::core::{Error, GameRng, Result, Role};

use super::moves::Move;
use super::state::{GameProvider, StateRef};

/// Absolute tolerance when comparing outcome sums.
const SUM_TOLERANCE: f64 = 1e-9;

fn move_names(state: &StateRef, role: Role) -> Result<FxHashSet<String>> {
    Ok(state
        .legal_moves(role)?
        .iter()
        .map(|mv| mv.name().to_string())
        .collect())
}

fn random_joint_move(state: &StateRef, rng: &mut GameRng) -> Result<Vec<Move>> {
    Role::all(state.num_roles())
        .map(|role| {
            let legal = state.legal_moves(role)?;
            rng.choose(&legal)
                .cloned()
                .ok_or(Error::NoLegalMoves { role })
        })
        .collect()
}

/// Play `runs` random walks through both providers in lockstep.
///
/// At every position the two sides must agree on terminality and on the set
/// of legal move names for every role. Moves chosen on the reference side
/// are translated to the candidate with `move_named`. At the end both sides
/// must report the same outcomes.
pub fn assert_same_game(
    reference: &dyn GameProvider,
    candidate: &dyn GameProvider,
    runs: usize,
    seed: u64,
) -> Result<()> {
    let mut rng = GameRng::new(seed);

    for run in 0..runs {
        let mut expected = reference.initial_state();
        let mut actual = candidate.initial_state();
        assert_eq!(
            expected.num_roles(),
            actual.num_roles(),
            "role counts differ"
        );
        let mut ply = 0usize;

        loop {
            assert_eq!(
                expected.is_terminal(),
                actual.is_terminal(),
                "run {run}, ply {ply}: terminality differs"
            );
            if expected.is_terminal() {
                break;
            }

            for role in Role::all(expected.num_roles()) {
                let expected_names = move_names(&expected, role)?;
                let actual_names = move_names(&actual, role)?;
                assert_eq!(
                    expected_names, actual_names,
                    "run {run}, ply {ply}: legal moves differ for {role}"
                );
            }

            let joint = random_joint_move(&expected, &mut rng)?;
            let translated = Role::all(actual.num_roles())
                .zip(&joint)
                .map(|(role, mv)| actual.move_named(role, mv.name()))
                .collect::<Result<Vec<_>>>()?;

            expected = expected.next_state(&joint)?;
            actual = actual.next_state(&translated)?;
            ply += 1;
        }

        for role in Role::all(expected.num_roles()) {
            assert_eq!(
                expected.outcome(role)?,
                actual.outcome(role)?,
                "run {run}: outcomes differ for {role}"
            );
        }
    }

    Ok(())
}

/// Play `runs` random walks through one provider and check its contract.
///
/// - Non-terminal states offer every role at least one move
/// - Non-terminal states refuse to report outcomes
/// - Terminal states report an outcome for every role
/// - Constant-sum games keep their declared total
/// - Every legal move name resolves back to the same move
pub fn assert_well_formed(provider: &dyn GameProvider, runs: usize, seed: u64) -> Result<()> {
    let mut rng = GameRng::new(seed);

    for run in 0..runs {
        let mut state = provider.initial_state();
        let mut ply = 0usize;

        while !state.is_terminal() {
            for role in Role::all(state.num_roles()) {
                let legal = state.legal_moves(role)?;
                assert!(
                    !legal.is_empty(),
                    "run {run}, ply {ply}: {role} has no moves in a non-terminal state"
                );
                for mv in &legal {
                    assert_eq!(
                        &state.move_named(role, mv.name())?,
                        mv,
                        "run {run}, ply {ply}: move name does not resolve"
                    );
                }
                assert!(
                    matches!(state.outcome(role), Err(Error::NotTerminal)),
                    "run {run}, ply {ply}: outcome defined before the end"
                );
            }

            let joint = random_joint_move(&state, &mut rng)?;
            state = state.next_state(&joint)?;
            ply += 1;
        }

        let outcomes = state.outcomes()?;
        if let Some(total) = provider.zero_sum_total() {
            let sum: f64 = outcomes.as_slice().iter().sum();
            assert!(
                (sum - total).abs() < SUM_TOLERANCE,
                "run {run}: outcomes sum to {sum}, expected {total}"
            );
        }
    }

    Ok(())
}
