#![forbid(unsafe_code)]
//! markov-analysis library.
//!
//! # Pipeline
//!
//! ```text
//! MarkovGraph
//!      ↓  graph::scc::decompose()
//! Partition (classes C1..Ck + vertex → class map)
//!      ↓  graph::condense::condense()
//! LinkSet (direct inter-class links)
//!      ├─ graph::reduce::reduce()      → Hasse links
//!      └─ graph::classify::classify()  → persistent / absorbing / irreducible
//! MarkovGraph + Partition
//!      ↓  matrix::*
//! transition matrix, limit powers, stationary rows, periods
//! ```
//!
//! [`chain::analyze`] runs every stage and returns one [`chain::ChainReport`].
//!
//! # Conventions
//!
//! - **Errors**: [`AnalysisError`] for malformed graphs and allocation
//!   failure. Non-convergence is a result flag, never an error.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod chain;
pub mod error;
pub mod graph;
pub mod matrix;

pub use chain::{ChainReport, ClassReport, analyze};
pub use error::AnalysisError;
