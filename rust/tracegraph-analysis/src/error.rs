//! Errors that abort a critical-path computation.
//!
//! All of these describe an input graph that violates the execution-graph
//! invariants (or a caller passing foreign handles).  None are retried: the
//! analysis cannot complete on that input.

use tracegraph_core::{EdgeId, EdgeType, GraphError, VertexId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriticalPathError {
    #[error("vertex {0} is not part of the input graph")]
    UnknownVertex(VertexId),

    #[error("edge {0} is not part of the input graph")]
    UnknownEdge(EdgeId),

    #[error("vertex {0} has no owning worker in the input graph")]
    UnknownParent(VertexId),

    /// Horizontal edges must stay on one worker's timeline.
    #[error("horizontal edge {edge} leaves worker {expected} for {found}")]
    CrossWorkerHorizontal {
        edge: EdgeId,
        expected: String,
        found: String,
    },

    #[error("epsilon edge {edge} lasts {duration}, expected 0")]
    NonZeroEpsilon { edge: EdgeId, duration: i64 },

    #[error("edge {edge} has illegal type {edge_type}")]
    IllegalEdgeType { edge: EdgeId, edge_type: EdgeType },

    /// A path component was spliced before the worker had a vertex in the
    /// output graph.
    #[error("critical path has no vertex yet for worker {0}")]
    MissingAnchor(String),

    #[error("blocking resolution nested deeper than {limit} levels at edge {edge}")]
    ResolutionTooDeep { edge: EdgeId, limit: usize },

    #[error("worker {0} has no vertices")]
    NoVertices(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
