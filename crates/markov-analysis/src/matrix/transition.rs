use markov_core::MarkovGraph;
use nalgebra::DMatrix;
use tracing::{debug, instrument};

use crate::error::{AnalysisError, try_filled};

/// Dense square transition matrix; entry `(i, j)` is `P(i+1 → j+1)`.
pub type Matrix = DMatrix<f32>;

/// Build the transition matrix of `graph`.
///
/// Parallel edges between the same pair of vertices are summed.
///
/// # Errors
///
/// - [`AnalysisError::InvalidGraph`] if an edge points outside the graph.
/// - [`AnalysisError::AllocationFailure`] if the `n × n` storage cannot be
///   allocated.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn transition_matrix(graph: &MarkovGraph) -> Result<Matrix, AnalysisError> {
    let n = graph.vertex_count();
    let len = n.checked_mul(n).ok_or(AnalysisError::AllocationFailure {
        what: "transition matrix",
    })?;
    let mut matrix = Matrix::from_vec(n, n, try_filled(len, 0.0_f32, "transition matrix")?);

    for (vertex, edges) in graph.vertices() {
        for edge in edges {
            if edge.to == 0 || edge.to > n {
                return Err(AnalysisError::InvalidGraph {
                    vertex,
                    destination: edge.to,
                    vertex_count: n,
                });
            }
            matrix[(vertex - 1, edge.to - 1)] += edge.probability;
        }
    }

    debug!(edges = graph.edge_count(), "transition matrix built");
    Ok(matrix)
}

/// Sum of absolute element-wise differences.
///
/// Both matrices are expected to share a shape; extra entries of the larger
/// one are ignored.
#[must_use]
pub fn matrix_difference(a: &Matrix, b: &Matrix) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum()
}

/// Restrict `matrix` to the rows and columns of `members` (1-based vertex
/// ids), in member order.
#[must_use]
pub fn sub_chain(matrix: &Matrix, members: &[usize]) -> Matrix {
    let k = members.len();
    Matrix::from_fn(k, k, |r, c| {
        let (Some(row), Some(col)) = (members[r].checked_sub(1), members[c].checked_sub(1)) else {
            return 0.0;
        };
        matrix.get((row, col)).copied().unwrap_or(0.0)
    })
}

/// Row vectors of `matrix`, for reporting.
#[must_use]
pub fn rows(matrix: &Matrix) -> Vec<Vec<f32>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}
