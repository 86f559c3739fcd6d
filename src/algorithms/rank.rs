//! Discrimination scoring for ranking guesses.
//!
//! Scoring one guess is O(N²) matrix comparisons over the answer universe,
//! so ranking a whole dictionary is an offline job, not something to do
//! between rounds. [`rank_guesses`] therefore takes an explicit bound.

use log::info;
use rayon::prelude::*;

use crate::decompose::Decomposition;
use crate::dictionary::Dictionary;
use crate::FeedbackMatrix;

/// Average number of universe members whose feedback against `guess`
/// differs from a given answer's, over all answers in the universe. A
/// guess that splits every member apart scores `|U| - 1`; one that tells
/// them all apart from nothing scores 0.
pub fn discrimination(guess: &Decomposition, universe: &[&Decomposition]) -> f64 {
    if universe.is_empty() {
        return 0.0;
    }
    let matrices: Vec<FeedbackMatrix> = universe
        .iter()
        .map(|answer| FeedbackMatrix::of_pair(guess, answer))
        .collect();
    let mut distinguished = 0usize;
    for mine in &matrices {
        distinguished += matrices.iter().filter(|other| *other != mine).count();
    }
    distinguished as f64 / matrices.len() as f64
}

/// Score the first `limit` dictionary entries against the whole dictionary
/// as the answer universe. Guesses are scored in parallel and each result
/// stands alone, so an interrupted run simply ends short.
pub fn rank_guesses<'d>(dictionary: &'d Dictionary, limit: usize) -> Vec<(&'d str, f64)> {
    let universe: Vec<&Decomposition> = dictionary.iter().map(|(_, decomp)| decomp).collect();
    dictionary
        .iter()
        .take(limit)
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(word, decomp)| {
            info!("scoring {word}");
            (word, discrimination(decomp, &universe))
        })
        .collect()
}
