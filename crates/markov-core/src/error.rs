use std::fmt;
use std::io;

/// Machine-readable error codes for scripted and agent-driven callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InputNotFound,
    InputParseError,
    InvalidGraph,
    NotStochastic,
    AllocationFailure,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InputNotFound => "E2001",
            Self::InputParseError => "E2002",
            Self::InvalidGraph => "E2003",
            Self::NotStochastic => "E2004",
            Self::AllocationFailure => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InputNotFound => "Input file not found",
            Self::InputParseError => "Input file parse error",
            Self::InvalidGraph => "Invalid Markov graph",
            Self::NotStochastic => "Graph is not row-stochastic",
            Self::AllocationFailure => "Allocation failure",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in markov.toml and retry."),
            Self::InputNotFound => Some("Check the input path and retry."),
            Self::InputParseError => {
                Some("Expected a vertex count followed by `from to probability` lines.")
            }
            Self::InvalidGraph => Some("Every vertex id must lie between 1 and the vertex count."),
            Self::NotStochastic => {
                Some("Make each vertex's outgoing probabilities sum to 1 (within 0.01).")
            }
            Self::AllocationFailure => Some("Reduce the number of states and retry."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Errors raised while building or loading a [`crate::MarkovGraph`].
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The input file could not be read.
    #[error("cannot read input: {0}")]
    Io(#[from] io::Error),

    /// A token could not be parsed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// An edge endpoint lies outside `1..=vertex_count`.
    #[error("line {line}: vertex {vertex} is outside 1..={vertex_count}")]
    VertexOutOfRange {
        line: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// The declared vertex count is zero.
    #[error("graph must have at least one vertex")]
    EmptyGraph,

    /// An edge added through the builder API has an endpoint outside the graph.
    #[error("edge {from} -> {to} is outside 1..={vertex_count}")]
    InvalidEdge {
        from: usize,
        to: usize,
        vertex_count: usize,
    },

    /// An edge added through the builder API has a negative or non-finite weight.
    #[error("edge {from} -> {to} has invalid probability {value}")]
    InvalidProbability { from: usize, to: usize, value: f32 },

    /// An edge weight is negative or not a finite number.
    #[error("line {line}: probability {value} must be a finite non-negative number")]
    NegativeProbability { line: usize, value: f32 },

    /// Adjacency storage for the declared vertex count could not be allocated.
    #[error("cannot allocate adjacency for {vertex_count} vertices")]
    AllocationFailure { vertex_count: usize },
}

impl GraphError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(err) => match err.kind() {
                io::ErrorKind::NotFound => ErrorCode::InputNotFound,
                _ => ErrorCode::InternalUnexpected,
            },
            Self::Parse { .. } | Self::EmptyGraph | Self::NegativeProbability { .. } => {
                ErrorCode::InputParseError
            }
            Self::VertexOutOfRange { .. }
            | Self::InvalidEdge { .. }
            | Self::InvalidProbability { .. } => ErrorCode::InvalidGraph,
            Self::AllocationFailure { .. } => ErrorCode::AllocationFailure,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
