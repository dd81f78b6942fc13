//! Tie-breaking helpers shared by the strategies.

use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::core::{Error, GameRng, Result};

/// Pick one of the greatest items under `cmp`, uniformly at random among ties.
///
/// Returns `None` for an empty input.
pub fn pick_best_by<T, F>(items: Vec<T>, rng: &mut GameRng, mut cmp: F) -> Option<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut best: SmallVec<[usize; 8]> = SmallVec::new();
    for i in 0..items.len() {
        match best.first() {
            None => best.push(i),
            Some(&leader) => match cmp(&items[i], &items[leader]) {
                Ordering::Greater => {
                    best.clear();
                    best.push(i);
                }
                Ordering::Equal => best.push(i),
                Ordering::Less => {}
            },
        }
    }

    let &chosen = rng.choose(&best)?;
    items.into_iter().nth(chosen)
}

/// Pick the item with the highest score, uniformly at random among ties.
///
/// Scores must be comparable: NaN and negative infinity are rejected.
pub fn pick_highest_scoring<T>(scored: Vec<(T, f64)>, rng: &mut GameRng) -> Result<Option<T>> {
    if let Some(&(_, score)) = scored
        .iter()
        .find(|(_, score)| score.is_nan() || *score == f64::NEG_INFINITY)
    {
        return Err(Error::InvalidScore { score });
    }
    Ok(pick_best_by(scored, rng, |a, b| a.1.total_cmp(&b.1)).map(|(item, _)| item))
}
