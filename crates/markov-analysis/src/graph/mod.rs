//! Structural analysis of the state graph.
//!
//! # Overview
//!
//! Splits a [`markov_core::MarkovGraph`] into communicating classes and
//! describes how those classes connect:
//!
//! 1. **Decomposition** ([`scc`]): Tarjan's algorithm over the state graph,
//!    producing a [`Partition`] with classes numbered in completion order.
//! 2. **Condensation** ([`condense`]): one [`Link`] per distinct pair of
//!    classes joined by at least one edge.
//! 3. **Reduction** ([`reduce`]): the minimal link set with the same
//!    reachability (the Hasse diagram of the class order).
//! 4. **Classification** ([`classify`]): persistent vs transient classes,
//!    absorbing states, irreducibility.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use markov_analysis::graph::{classify, condense, decompose, reduce};
//!
//! let partition = decompose(&graph)?;
//! let links = condense(&partition, &graph);
//! let hasse = reduce(&links);
//! let traits = classify(&partition, &links);
//! ```

pub mod classify;
pub mod condense;
pub mod reduce;
pub mod scc;

// Re-export primary types at module level for convenience.
pub use classify::{Characteristics, classify};
pub use condense::{Link, LinkSet, condense};
pub use reduce::reduce;
pub use scc::{Class, ClassId, Partition, decompose};
