//! Strongly connected class decomposition (Tarjan).
//!
//! # Algorithm
//!
//! Single-pass Tarjan over the state graph, driven by an explicit work stack
//! of `(vertex, next edge)` frames instead of recursion, so traversal depth
//! is bounded by heap memory rather than the call stack.
//!
//! - Roots are tried in ascending vertex order; edges in adjacency order.
//! - A tree edge descends into the neighbour. When the neighbour's frame
//!   finishes, its low-link folds into the parent's.
//! - An edge to a vertex still on the Tarjan stack folds that vertex's
//!   *discovery index* into the low-link.
//! - An edge to a finished vertex (off-stack) is ignored: it reaches a class
//!   that is already closed.
//! - A vertex whose low-link equals its discovery index closes a class:
//!   the Tarjan stack is popped down to it.
//!
//! Class ids follow closing order, so numbering is a deterministic function
//! of vertex order and edge order.

#![allow(clippy::module_name_repetitions)]

use std::fmt;

use markov_core::MarkovGraph;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::{AnalysisError, try_filled};

// ---------------------------------------------------------------------------
// Class / Partition
// ---------------------------------------------------------------------------

/// Ordinal of a class in discovery order (zero-based; displayed `C1`, `C2`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClassId(usize);

impl ClassId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position in [`Partition::classes`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Display name (`C1` for index 0).
    #[must_use]
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0 + 1)
    }
}

/// One communicating class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Class {
    pub id: ClassId,
    /// Member vertices (1-based), ascending.
    pub members: Vec<usize>,
}

impl Class {
    #[must_use]
    pub fn name(&self) -> String {
        self.id.name()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, vertex: usize) -> bool {
        self.members.binary_search(&vertex).is_ok()
    }
}

/// Classes of a graph plus the vertex → class map.
///
/// Every vertex belongs to exactly one class and no class is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    classes: Vec<Class>,
    vertex_to_class: Vec<usize>,
}

impl Partition {
    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    #[must_use]
    pub fn class(&self, index: usize) -> Option<&Class> {
        self.classes.get(index)
    }

    /// Class index of a 1-based vertex.
    #[must_use]
    pub fn class_of(&self, vertex: usize) -> Option<usize> {
        vertex
            .checked_sub(1)
            .and_then(|idx| self.vertex_to_class.get(idx))
            .copied()
    }

    /// Class index per vertex; entry `i` is the class of vertex `i + 1`.
    #[must_use]
    pub fn vertex_to_class(&self) -> &[usize] {
        &self.vertex_to_class
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_to_class.len()
    }
}

// ---------------------------------------------------------------------------
// Tarjan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct VertexState {
    index: Option<usize>,
    low_link: usize,
    on_stack: bool,
}

impl VertexState {
    const UNVISITED: Self = Self {
        index: None,
        low_link: 0,
        on_stack: false,
    };
}

/// Pending work for one vertex on the traversal path.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    next_edge: usize,
}

struct Tarjan<'g> {
    graph: &'g MarkovGraph,
    state: Vec<VertexState>,
    stack: Vec<usize>,
    frames: Vec<Frame>,
    classes: Vec<Class>,
    vertex_to_class: Vec<usize>,
    next_index: usize,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g MarkovGraph) -> Result<Self, AnalysisError> {
        let n = graph.vertex_count();
        let mut stack = Vec::new();
        stack
            .try_reserve(n)
            .map_err(AnalysisError::allocation("tarjan stack"))?;
        let mut frames = Vec::new();
        frames
            .try_reserve(n)
            .map_err(AnalysisError::allocation("traversal frames"))?;

        Ok(Self {
            graph,
            state: try_filled(n, VertexState::UNVISITED, "tarjan vertex state")?,
            stack,
            frames,
            classes: Vec::new(),
            vertex_to_class: try_filled(n, usize::MAX, "vertex-to-class map")?,
            next_index: 0,
        })
    }

    fn run(mut self) -> Result<Partition, AnalysisError> {
        for root in 0..self.graph.vertex_count() {
            if self.state[root].index.is_none() {
                self.traverse(root)?;
            }
        }
        Ok(Partition {
            classes: self.classes,
            vertex_to_class: self.vertex_to_class,
        })
    }

    fn discover(&mut self, vertex: usize) {
        self.state[vertex] = VertexState {
            index: Some(self.next_index),
            low_link: self.next_index,
            on_stack: true,
        };
        self.next_index += 1;
        self.stack.push(vertex);
        self.frames.push(Frame {
            vertex,
            next_edge: 0,
        });
    }

    fn traverse(&mut self, root: usize) -> Result<(), AnalysisError> {
        let vertex_count = self.graph.vertex_count();
        self.discover(root);

        while let Some(frame) = self.frames.last_mut() {
            let v = frame.vertex;

            if let Some(edge) = self.graph.edges(v + 1).get(frame.next_edge) {
                frame.next_edge += 1;
                if edge.to == 0 || edge.to > vertex_count {
                    return Err(AnalysisError::InvalidGraph {
                        vertex: v + 1,
                        destination: edge.to,
                        vertex_count,
                    });
                }
                let w = edge.to - 1;

                match self.state[w].index {
                    None => self.discover(w),
                    Some(w_index) if self.state[w].on_stack => {
                        self.state[v].low_link = self.state[v].low_link.min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All edges of `v` handled: return to the caller frame.
            self.frames.pop();
            if self.state[v].index == Some(self.state[v].low_link) {
                self.close_class(v)?;
            }
            if let Some(parent) = self.frames.last() {
                let p = parent.vertex;
                self.state[p].low_link = self.state[p].low_link.min(self.state[v].low_link);
            }
        }

        Ok(())
    }

    fn close_class(&mut self, root: usize) -> Result<(), AnalysisError> {
        self.classes
            .try_reserve(1)
            .map_err(AnalysisError::allocation("partition classes"))?;
        let class_index = self.classes.len();

        let mut members = Vec::new();
        while let Some(popped) = self.stack.pop() {
            self.state[popped].on_stack = false;
            self.vertex_to_class[popped] = class_index;
            members.push(popped + 1);
            if popped == root {
                break;
            }
        }
        members.sort_unstable();

        let class = Class {
            id: ClassId::new(class_index),
            members,
        };
        debug!(class = %class.id, members = ?class.members, "closed class");
        self.classes.push(class);
        Ok(())
    }
}

/// Partition `graph` into strongly connected classes.
///
/// # Errors
///
/// - [`AnalysisError::InvalidGraph`] if an edge points outside the graph.
/// - [`AnalysisError::AllocationFailure`] if bookkeeping storage cannot be
///   allocated.
#[instrument(skip(graph), fields(vertices = graph.vertex_count()))]
pub fn decompose(graph: &MarkovGraph) -> Result<Partition, AnalysisError> {
    let partition = Tarjan::new(graph)?.run()?;
    debug!(classes = partition.class_count(), "decomposition complete");
    Ok(partition)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
