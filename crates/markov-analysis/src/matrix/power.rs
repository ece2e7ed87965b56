use markov_core::config::AnalysisConfig;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use super::transition::{Matrix, matrix_difference};

/// Stopping policy for [`power_to_convergence`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerConfig {
    /// Stop once `Σ|M_{k+1} − M_k|` is at most this value.
    pub tolerance: f32,
    /// Maximum number of multiplications.
    pub max_iterations: usize,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self::from(&AnalysisConfig::default())
    }
}

impl From<&AnalysisConfig> for PowerConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }
}

/// Final power of a matrix and how it was reached.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerOutcome {
    pub matrix: Matrix,
    /// Multiplications performed.
    pub iterations: usize,
    pub converged: bool,
}

/// Raise `m` to successive powers until consecutive powers stop changing.
///
/// Computes `M_{k+1} = M_k · M` starting from `M_1 = m`. Running out of
/// iterations is reported through `converged: false`; the last power is
/// still returned.
#[must_use]
#[instrument(skip(m), fields(size = m.nrows()))]
pub fn power_to_convergence(m: &Matrix, config: &PowerConfig) -> PowerOutcome {
    if m.is_empty() {
        return PowerOutcome {
            matrix: m.clone(),
            iterations: 0,
            converged: true,
        };
    }

    let mut current = m.clone();
    for iteration in 1..=config.max_iterations {
        let next = &current * m;
        let delta = matrix_difference(&next, &current);
        current = next;
        if delta <= config.tolerance {
            debug!(iterations = iteration, delta, "power iteration converged");
            return PowerOutcome {
                matrix: current,
                iterations: iteration,
                converged: true,
            };
        }
    }

    warn!(
        max_iterations = config.max_iterations,
        "power iteration did not converge"
    );
    PowerOutcome {
        matrix: current,
        iterations: config.max_iterations,
        converged: false,
    }
}

/// Exact `k`-th power of `m` by repeated squaring (`k = 0` gives the
/// identity). Takes `O(log k)` multiplications.
#[must_use]
pub fn matrix_power(m: &Matrix, k: usize) -> Matrix {
    let mut out = Matrix::identity(m.nrows(), m.ncols());
    let mut base = m.clone();
    let mut exp = k;
    while exp > 0 {
        if exp & 1 == 1 {
            out = &out * &base;
        }
        exp >>= 1;
        if exp > 0 {
            base = &base * &base;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_converges_after_one_step() {
        let out = power_to_convergence(&Matrix::identity(3, 3), &PowerConfig::default());
        assert!(out.converged);
        assert_eq!(out.iterations, 1);
        assert_eq!(out.matrix, Matrix::identity(3, 3));
    }

    #[test]
    fn swap_never_converges() {
        let swap = Matrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let out = power_to_convergence(&swap, &PowerConfig::default());
        assert!(!out.converged);
        assert_eq!(out.iterations, 100);
    }

    #[test]
    fn iteration_cap_is_configurable() {
        let swap = Matrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let config = PowerConfig {
            tolerance: 0.01,
            max_iterations: 7,
        };
        let out = power_to_convergence(&swap, &config);
        assert!(!out.converged);
        assert_eq!(out.iterations, 7);
        // Seventh multiplication yields M^8 = I.
        assert_eq!(out.matrix, Matrix::identity(2, 2));
    }

    #[test]
    fn mixing_chain_reaches_its_limit() {
        let m = Matrix::from_row_slice(2, 2, &[0.9, 0.1, 0.5, 0.5]);
        let out = power_to_convergence(&m, &PowerConfig::default());
        assert!(out.converged);
        // Limit rows are (5/6, 1/6).
        for row in 0..2 {
            assert!((out.matrix[(row, 0)] - 5.0 / 6.0).abs() < 0.01);
            assert!((out.matrix[(row, 1)] - 1.0 / 6.0).abs() < 0.01);
        }
    }

    #[test]
    fn exact_powers() {
        let swap = Matrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(matrix_power(&swap, 0), Matrix::identity(2, 2));
        assert_eq!(matrix_power(&swap, 1), swap);
        assert_eq!(matrix_power(&swap, 3), swap);
        assert_eq!(matrix_power(&swap, 4), Matrix::identity(2, 2));
    }

    #[test]
    fn huge_exponent_finishes() {
        let swap = Matrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(matrix_power(&swap, 4_000_000_001), swap);
        assert_eq!(matrix_power(&swap, usize::MAX - 1), Matrix::identity(2, 2));
    }

    #[test]
    fn squaring_matches_repeated_multiplication() {
        let m = Matrix::from_row_slice(3, 3, &[0.2, 0.5, 0.3, 0.1, 0.1, 0.8, 0.6, 0.3, 0.1]);
        let mut expected = Matrix::identity(3, 3);
        for k in 0..=13 {
            assert!(matrix_difference(&matrix_power(&m, k), &expected) < 1e-4);
            expected = &expected * &m;
        }
    }

    #[test]
    fn empty_matrix_converges_trivially() {
        let out = power_to_convergence(&Matrix::zeros(0, 0), &PowerConfig::default());
        assert!(out.converged);
        assert_eq!(out.iterations, 0);
    }

    #[test]
    fn config_is_taken_from_analysis_settings() {
        let analysis = AnalysisConfig {
            tolerance: 0.5,
            max_iterations: 3,
            ..AnalysisConfig::default()
        };
        let config = PowerConfig::from(&analysis);
        assert!((config.tolerance - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.max_iterations, 3);
    }
}
