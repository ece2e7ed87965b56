//! Markov graph model.
//!
//! A [`MarkovGraph`] is a dense, 1-indexed adjacency list: vertex `v` owns an
//! ordered sequence of [`Edge`]s. Edge order is preserved exactly as inserted
//! because downstream class numbering depends on it.

pub mod graph;
pub mod label;

pub use graph::{Edge, MarkovGraph};
pub use label::vertex_label;
