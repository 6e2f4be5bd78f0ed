//! Tracegraph Core
//!
//! Execution-graph model for multi-actor traces: timestamped vertices grouped
//! into per-worker timelines, joined by typed horizontal (same worker) and
//! vertical (cross worker) edges.
#![warn(clippy::all)]

pub mod edge;
pub mod error;
pub mod graph;
pub mod statistics;
pub mod vertex;
pub mod visitor;
pub mod worker;

pub use edge::{Edge, EdgeId, EdgeType};
pub use error::GraphError;
pub use graph::{GraphView, TraceGraph};
pub use statistics::GraphStatistics;
pub use vertex::{EdgeDirection, Vertex, VertexId};
pub use visitor::GraphVisitor;
pub use worker::{GraphWorker, TaskWorker};
