//! Dense matrix engine: transition matrix, limit powers, stationary rows,
//! class periods.
//!
//! All arithmetic is `f32`. Matrices are [`nalgebra::DMatrix`]; the state
//! spaces handled here are small enough for dense storage.

pub mod period;
pub mod power;
pub mod stationary;
pub mod transition;

pub use period::{gcd, period};
pub use power::{PowerConfig, PowerOutcome, matrix_power, power_to_convergence};
pub use stationary::{StationaryResult, stationary_distribution};
pub use transition::{Matrix, matrix_difference, rows, sub_chain, transition_matrix};
