//! Text input format for Markov graphs.
//!
//! ```text
//! # comment lines and blank lines are ignored
//! 3            <- vertex count
//! 1 2 1.0      <- from to probability
//! 2 1 1.0
//! 3 3 1.0
//! ```
//!
//! Edges are appended to their source vertex in file order.

use std::path::Path;

use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::model::MarkovGraph;

/// Read and parse a graph file.
///
/// # Errors
///
/// Returns [`GraphError::Io`] if the file cannot be read and any error of
/// [`parse_graph`] otherwise.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_graph(path: &Path) -> Result<MarkovGraph, GraphError> {
    let text = std::fs::read_to_string(path)?;
    parse_graph(&text)
}

/// Parse a graph from its text form.
///
/// # Errors
///
/// - [`GraphError::Parse`] for a missing or malformed vertex count or edge line.
/// - [`GraphError::EmptyGraph`] for a vertex count of zero.
/// - [`GraphError::VertexOutOfRange`] for an endpoint outside `1..=N`.
/// - [`GraphError::NegativeProbability`] for a negative or non-finite weight.
/// - [`GraphError::AllocationFailure`] when the vertex count is too large to
///   allocate.
pub fn parse_graph(text: &str) -> Result<MarkovGraph, GraphError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let (header_line, header) = lines.next().ok_or_else(|| GraphError::Parse {
        line: 1,
        message: "missing vertex count".to_string(),
    })?;
    let vertex_count: usize = header.parse().map_err(|_| GraphError::Parse {
        line: header_line,
        message: format!("expected a vertex count, found `{header}`"),
    })?;

    let mut graph = MarkovGraph::new(vertex_count)?;

    for (line, content) in lines {
        let fields: Vec<&str> = content.split_whitespace().collect();
        let [from, to, probability] = fields.as_slice() else {
            return Err(GraphError::Parse {
                line,
                message: format!("expected `from to probability`, found `{content}`"),
            });
        };

        let from = parse_vertex(from, line, vertex_count)?;
        let to = parse_vertex(to, line, vertex_count)?;
        let probability: f32 = probability.parse().map_err(|_| GraphError::Parse {
            line,
            message: format!("invalid probability `{probability}`"),
        })?;
        if !probability.is_finite() || probability < 0.0 {
            return Err(GraphError::NegativeProbability {
                line,
                value: probability,
            });
        }

        graph.add_edge(from, to, probability)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "parsed markov graph"
    );
    Ok(graph)
}

fn parse_vertex(token: &str, line: usize, vertex_count: usize) -> Result<usize, GraphError> {
    let vertex: usize = token.parse().map_err(|_| GraphError::Parse {
        line,
        message: format!("invalid vertex id `{token}`"),
    })?;
    if (1..=vertex_count).contains(&vertex) {
        Ok(vertex)
    } else {
        Err(GraphError::VertexOutOfRange {
            line,
            vertex,
            vertex_count,
        })
    }
}
