use serde::Serialize;
use tracing::instrument;

use super::power::{PowerConfig, power_to_convergence};
use super::transition::Matrix;

/// Limit row of a persistent class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationaryResult {
    /// Probabilities aligned with the class member order.
    pub distribution: Vec<f32>,
    pub iterations: usize,
    pub converged: bool,
}

/// Approximate the stationary distribution of a class sub-chain.
///
/// Powers `sub` under `config` and returns the first row of the final
/// power. For a periodic class the powers oscillate, so the row is reported
/// with `converged: false`.
#[must_use]
#[instrument(skip(sub), fields(size = sub.nrows()))]
pub fn stationary_distribution(sub: &Matrix, config: &PowerConfig) -> StationaryResult {
    let outcome = power_to_convergence(sub, config);
    let distribution = if outcome.matrix.nrows() == 0 {
        Vec::new()
    } else {
        outcome.matrix.row(0).iter().copied().collect()
    };

    StationaryResult {
        distribution,
        iterations: outcome.iterations,
        converged: outcome.converged,
    }
}
