//! Greedy farthest-point selection of unrelated languages.
//!
//! The first pick is the candidate farthest from the root. Every following
//! pick maximizes its minimum distance to the languages already selected,
//! which approximates max-min diversity without exhaustive search.

use crate::analysis::distance::ConceptualDistance;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct LanguageSelector<'a> {
    metric: ConceptualDistance<'a>,
}

impl<'a> LanguageSelector<'a> {
    pub fn new(metric: ConceptualDistance<'a>) -> Self {
        Self { metric }
    }

    /// Pick up to `n` distinct codes from `pool`, none equal to `root`.
    ///
    /// Ties go to the candidate seen first in `pool`. Returns fewer than `n`
    /// codes when the pool runs out.
    pub fn select(&self, root: &str, pool: &[&str], n: usize) -> Vec<String> {
        let mut candidates: Vec<&str> = Vec::with_capacity(pool.len());
        for &code in pool {
            if code != root && !candidates.contains(&code) {
                candidates.push(code);
            }
        }

        let mut selected: Vec<&str> = Vec::with_capacity(n);
        while selected.len() < n && !candidates.is_empty() {
            let score = |candidate: &str| -> f64 {
                if selected.is_empty() {
                    self.metric.distance(root, candidate)
                } else {
                    selected
                        .iter()
                        .map(|chosen| self.metric.distance(chosen, candidate))
                        .fold(f64::INFINITY, f64::min)
                }
            };

            let mut best_index = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (index, candidate) in candidates.iter().enumerate() {
                let candidate_score = score(candidate);
                if candidate_score > best_score {
                    best_index = index;
                    best_score = candidate_score;
                }
            }

            let picked = candidates.remove(best_index);
            debug!("Selected '{}' (min distance {:.3})", picked, best_score);
            selected.push(picked);
        }

        selected.into_iter().map(str::to_string).collect()
    }
}
