//! Row-stochasticity check.
//!
//! A Markov graph is valid when every vertex's outgoing probabilities sum to
//! 1 within a tolerance (0.01 by default, i.e. the `0.99..=1.01` band). The
//! analysis engine assumes this holds and never re-checks it; callers run
//! [`check_stochastic`] first.

use serde::Serialize;
use tracing::warn;

use crate::model::MarkovGraph;

/// Default tolerance on each row sum.
pub const DEFAULT_STOCHASTIC_TOLERANCE: f32 = 0.01;

/// Outgoing weight sum of one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowSum {
    /// Vertex id (1-based).
    pub vertex: usize,
    /// Sum of outgoing probabilities.
    pub sum: f32,
    /// Whether `|sum - 1| <= tolerance`.
    pub valid: bool,
}

/// Result of [`check_stochastic`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StochasticReport {
    /// One entry per vertex, ascending.
    pub rows: Vec<RowSum>,
    /// Tolerance used for the check.
    pub tolerance: f32,
    /// `true` when every row is valid.
    pub valid: bool,
}

impl StochasticReport {
    /// Rows that failed the check.
    pub fn invalid_rows(&self) -> impl Iterator<Item = &RowSum> {
        self.rows.iter().filter(|row| !row.valid)
    }
}

/// Check that each vertex's outgoing weights sum to 1 within `tolerance`.
#[must_use]
pub fn check_stochastic(graph: &MarkovGraph, tolerance: f32) -> StochasticReport {
    let rows: Vec<RowSum> = graph
        .vertices()
        .map(|(vertex, edges)| {
            let sum: f32 = edges.iter().map(|e| e.probability).sum();
            RowSum {
                vertex,
                sum,
                valid: (sum - 1.0).abs() <= tolerance,
            }
        })
        .collect();

    let valid = rows.iter().all(|row| row.valid);
    for row in rows.iter().filter(|row| !row.valid) {
        warn!(vertex = row.vertex, sum = row.sum, "row does not sum to 1");
    }

    StochasticReport {
        rows,
        tolerance,
        valid,
    }
}
