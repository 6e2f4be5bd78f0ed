//! Errors raised while building or traversing a [`TraceGraph`](crate::TraceGraph).

use crate::vertex::VertexId;

/// Structural errors reported by graph construction and traversal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The handle was not minted by this graph.
    #[error("vertex {0} does not belong to this graph")]
    UnknownVertex(VertexId),

    /// `add` was called on a vertex that is already part of a chain.
    #[error("vertex {0} is already owned by a worker")]
    AlreadyOwned(VertexId),

    /// `link` requires its source to be part of a worker chain.
    #[error("vertex {0} has no owning worker")]
    Unowned(VertexId),

    /// A vertex cannot be linked to itself.
    #[error("cannot link vertex {0} to itself")]
    SelfLink(VertexId),

    /// Edges always go forward in time.
    #[error("edge from {from} (t={from_ts}) to {to} (t={to_ts}) goes back in time")]
    NonChronological {
        from: VertexId,
        to: VertexId,
        from_ts: i64,
        to_ts: i64,
    },

    /// The two timestamps are too far apart for the duration to fit in an `i64`.
    #[error("duration from {from} (t={from_ts}) to {to} (t={to_ts}) overflows")]
    DurationOverflow {
        from: VertexId,
        to: VertexId,
        from_ts: i64,
        to_ts: i64,
    },

    /// A horizontal walk came back to a vertex it had already seen.
    #[error("cycle detected at vertex {0}")]
    CycleDetected(VertexId),
}
