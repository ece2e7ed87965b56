use std::collections::TryReserveError;

use markov_core::ErrorCode;

/// Errors that abort an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// An edge points outside `1..=vertex_count`.
    #[error("vertex {vertex} has an edge to {destination}, outside 1..={vertex_count}")]
    InvalidGraph {
        vertex: usize,
        destination: usize,
        vertex_count: usize,
    },

    /// Scratch storage for the named structure could not be allocated.
    #[error("cannot allocate {what}")]
    AllocationFailure { what: &'static str },
}

impl AnalysisError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidGraph { .. } => ErrorCode::InvalidGraph,
            Self::AllocationFailure { .. } => ErrorCode::AllocationFailure,
        }
    }

    pub(crate) fn allocation(what: &'static str) -> impl FnOnce(TryReserveError) -> Self {
        move |_| Self::AllocationFailure { what }
    }
}

/// Allocate `len` copies of `value`, reporting failure instead of aborting.
///
/// Only a reservation the allocator refuses is reported. On a host that
/// overcommits memory a large reservation can succeed and the process can
/// still be killed while the copies are written.
pub(crate) fn try_filled<T: Clone>(
    len: usize,
    value: T,
    what: &'static str,
) -> Result<Vec<T>, AnalysisError> {
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(AnalysisError::allocation(what))?;
    out.resize(len, value);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_taxonomy() {
        let invalid = AnalysisError::InvalidGraph {
            vertex: 1,
            destination: 7,
            vertex_count: 3,
        };
        assert_eq!(invalid.code(), ErrorCode::InvalidGraph);
        assert_eq!(
            invalid.to_string(),
            "vertex 1 has an edge to 7, outside 1..=3"
        );

        let oom = AnalysisError::AllocationFailure { what: "tarjan stack" };
        assert_eq!(oom.code(), ErrorCode::AllocationFailure);
    }

    #[test]
    fn try_reserve_failure_maps_to_allocation_failure() {
        let mut v: Vec<u64> = Vec::new();
        let err = v
            .try_reserve(usize::MAX)
            .map_err(AnalysisError::allocation("test buffer"))
            .unwrap_err();
        assert_eq!(err, AnalysisError::AllocationFailure { what: "test buffer" });
    }
}
