//! Directed, probability-weighted state graph.
//!
//! # Vertex numbering
//!
//! Vertices are numbered `1..=vertex_count`. Internally the adjacency is a
//! `Vec` indexed by `vertex - 1`; every public method takes and returns
//! 1-based ids.
//!
//! # Content hash
//!
//! [`MarkovGraph::content_hash`] is a BLAKE3 hash of the vertex count and the
//! edge list in adjacency order. Reports carry it so two runs over the same
//! chain can be matched up.

#![allow(clippy::module_name_repetitions)]

use serde::Serialize;

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// One outgoing transition of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    /// Destination vertex (1-based).
    pub to: usize,
    /// Transition probability.
    pub probability: f32,
}

impl Edge {
    #[must_use]
    pub const fn new(to: usize, probability: f32) -> Self {
        Self { to, probability }
    }
}

// ---------------------------------------------------------------------------
// MarkovGraph
// ---------------------------------------------------------------------------

/// A discrete-time Markov chain as an adjacency list.
///
/// The checked builder ([`MarkovGraph::new`] + [`MarkovGraph::add_edge`])
/// guarantees every destination lies in `1..=vertex_count`.
/// [`MarkovGraph::from_adjacency`] skips that check; consumers that read
/// destinations must verify them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovGraph {
    adjacency: Vec<Vec<Edge>>,
}

impl MarkovGraph {
    /// Create a graph with `vertex_count` vertices and no edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] if `vertex_count` is zero and
    /// [`GraphError::AllocationFailure`] if the adjacency cannot be reserved.
    /// The reservation only catches requests the allocator refuses outright;
    /// on an overcommitting host a large count may still be accepted.
    pub fn new(vertex_count: usize) -> Result<Self, GraphError> {
        if vertex_count == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(vertex_count)
            .map_err(|_| GraphError::AllocationFailure { vertex_count })?;
        adjacency.resize_with(vertex_count, Vec::new);
        Ok(Self { adjacency })
    }

    /// Wrap a prebuilt adjacency list without validating destinations.
    ///
    /// `adjacency[i]` holds the edges of vertex `i + 1`.
    #[must_use]
    pub const fn from_adjacency(adjacency: Vec<Vec<Edge>>) -> Self {
        Self { adjacency }
    }

    /// Append an edge `from -> to` after the existing edges of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEdge`] if either endpoint is outside the
    /// graph and [`GraphError::InvalidProbability`] for a negative or
    /// non-finite weight.
    pub fn add_edge(&mut self, from: usize, to: usize, probability: f32) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        if !(1..=vertex_count).contains(&from) || !(1..=vertex_count).contains(&to) {
            return Err(GraphError::InvalidEdge {
                from,
                to,
                vertex_count,
            });
        }
        if !probability.is_finite() || probability < 0.0 {
            return Err(GraphError::InvalidProbability {
                from,
                to,
                value: probability,
            });
        }
        self.adjacency[from - 1].push(Edge::new(to, probability));
        Ok(())
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of edges across all vertices.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Outgoing edges of `vertex` in insertion order.
    ///
    /// Returns an empty slice for ids outside the graph.
    #[must_use]
    pub fn edges(&self, vertex: usize) -> &[Edge] {
        vertex
            .checked_sub(1)
            .and_then(|idx| self.adjacency.get(idx))
            .map_or(&[], Vec::as_slice)
    }

    /// Iterate `(vertex, edges)` pairs in ascending vertex order.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, &[Edge])> {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(idx, edges)| (idx + 1, edges.as_slice()))
    }

    /// Sum of outgoing probabilities of `vertex`.
    #[must_use]
    pub fn out_weight(&self, vertex: usize) -> f32 {
        self.edges(vertex).iter().map(|e| e.probability).sum()
    }

    /// BLAKE3 fingerprint of the vertex count and the ordered edge list.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(self.vertex_count() as u64).to_le_bytes());
        for (from, edges) in self.vertices() {
            for edge in edges {
                hasher.update(&(from as u64).to_le_bytes());
                hasher.update(&(edge.to as u64).to_le_bytes());
                hasher.update(&edge.probability.to_le_bytes());
            }
        }
        format!("blake3:{}", hasher.finalize())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state() -> MarkovGraph {
        let mut g = MarkovGraph::new(2).expect("graph");
        g.add_edge(1, 2, 0.5).expect("edge");
        g.add_edge(1, 1, 0.5).expect("edge");
        g.add_edge(2, 1, 1.0).expect("edge");
        g
    }

    #[test]
    fn zero_vertices_rejected() {
        assert!(matches!(MarkovGraph::new(0), Err(GraphError::EmptyGraph)));
    }

    #[test]
    fn unallocatable_vertex_count_is_an_error() {
        assert!(matches!(
            MarkovGraph::new(usize::MAX),
            Err(GraphError::AllocationFailure {
                vertex_count: usize::MAX
            })
        ));
    }

    #[test]
    fn edges_keep_insertion_order() {
        let g = two_state();
        let targets: Vec<usize> = g.edges(1).iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![2, 1]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn add_edge_rejects_out_of_range_endpoints() {
        let mut g = MarkovGraph::new(2).expect("graph");
        assert!(matches!(
            g.add_edge(1, 3, 1.0),
            Err(GraphError::InvalidEdge { to: 3, .. })
        ));
        assert!(matches!(
            g.add_edge(0, 1, 1.0),
            Err(GraphError::InvalidEdge { from: 0, .. })
        ));
    }

    #[test]
    fn add_edge_rejects_negative_probability() {
        let mut g = MarkovGraph::new(1).expect("graph");
        assert!(matches!(
            g.add_edge(1, 1, -0.1),
            Err(GraphError::InvalidProbability { .. })
        ));
        assert!(g.add_edge(1, 1, f32::NAN).is_err());
    }

    #[test]
    fn edges_of_unknown_vertex_is_empty() {
        let g = two_state();
        assert!(g.edges(0).is_empty());
        assert!(g.edges(3).is_empty());
    }

    #[test]
    fn out_weight_sums_edges() {
        let g = two_state();
        assert!((g.out_weight(1) - 1.0).abs() < f32::EPSILON);
        assert!((g.out_weight(2) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn content_hash_tracks_edges() {
        let a = two_state();
        let mut b = two_state();
        assert_eq!(a.content_hash(), b.content_hash());
        assert!(a.content_hash().starts_with("blake3:"));

        b.add_edge(2, 2, 0.0).expect("edge");
        assert_ne!(a.content_hash(), b.content_hash());
    }
}
