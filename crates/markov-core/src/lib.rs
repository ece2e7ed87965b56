#![forbid(unsafe_code)]
//! markov-core library.
//!
//! Graph model, text input parser, row-stochasticity validation, error codes,
//! and configuration shared by the analysis engine and the CLI.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums that map onto [`error::ErrorCode`];
//!   `anyhow::Result` only where configuration files are read.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod validate;

pub use error::{ErrorCode, GraphError};
pub use model::{Edge, MarkovGraph, vertex_label};
