//! Error taxonomy for spanner construction

use thiserror::Error;

use crate::graph::Vertex;

/// Everything that can reject a run, from malformed input to a failed
/// internal invariant. Invariant violations are always fatal: continuing
/// would leave the spanner edge list in an undefined state.
#[derive(Debug, Error)]
pub enum SpannerError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected header `n m`, got {found:?}")]
    MalformedHeader { line: usize, found: String },

    #[error("line {line}: expected edge `u v w`, got {found:?}")]
    MalformedEdge { line: usize, found: String },

    #[error("header declared {declared} edges but input holds {found}")]
    EdgeCountMismatch { declared: usize, found: usize },

    #[error("edge endpoint {vertex} outside 1..={vertex_count}")]
    EndpointOutOfRange { vertex: Vertex, vertex_count: usize },

    #[error("self-loop at vertex {vertex}")]
    SelfLoop { vertex: Vertex },

    #[error("stretch parameter k must be positive, got {0}")]
    InvalidStretch(u32),

    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),

    #[error("phase 1 completed {completed} of {expected} rounds")]
    IncompleteRounds { completed: u32, expected: u32 },
}
