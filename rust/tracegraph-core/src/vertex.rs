//! Timestamped points on a worker's timeline.

use crate::edge::EdgeId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Handle to a vertex inside the arena of one [`TraceGraph`](crate::TraceGraph).
///
/// Handles are only meaningful for the graph that minted them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EdgeDirection
// ---------------------------------------------------------------------------

/// The four edge slots of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeDirection {
    OutgoingHorizontal,
    IncomingHorizontal,
    OutgoingVertical,
    IncomingVertical,
}

impl EdgeDirection {
    pub const ALL: [EdgeDirection; 4] = [
        EdgeDirection::OutgoingHorizontal,
        EdgeDirection::IncomingHorizontal,
        EdgeDirection::OutgoingVertical,
        EdgeDirection::IncomingVertical,
    ];

    fn slot(self) -> usize {
        match self {
            EdgeDirection::OutgoingHorizontal => 0,
            EdgeDirection::IncomingHorizontal => 1,
            EdgeDirection::OutgoingVertical => 2,
            EdgeDirection::IncomingVertical => 3,
        }
    }

    /// The slot the same edge occupies on its other endpoint.
    pub fn opposite(self) -> Self {
        match self {
            EdgeDirection::OutgoingHorizontal => EdgeDirection::IncomingHorizontal,
            EdgeDirection::IncomingHorizontal => EdgeDirection::OutgoingHorizontal,
            EdgeDirection::OutgoingVertical => EdgeDirection::IncomingVertical,
            EdgeDirection::IncomingVertical => EdgeDirection::OutgoingVertical,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            EdgeDirection::OutgoingHorizontal | EdgeDirection::IncomingHorizontal
        )
    }
}

// ---------------------------------------------------------------------------
// Vertex
// ---------------------------------------------------------------------------

/// A point in time on one worker's timeline.
///
/// A vertex holds at most one edge per [`EdgeDirection`]: one predecessor and
/// one successor on its own timeline, and at most one vertical link in each
/// direction to another timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    id: VertexId,
    ts: i64,
    edges: [Option<EdgeId>; 4],
}

impl Vertex {
    pub(crate) fn new(id: VertexId, ts: i64) -> Self {
        Self {
            id,
            ts,
            edges: [None; 4],
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn ts(&self) -> i64 {
        self.ts
    }

    /// The edge occupying `dir`, if any.
    pub fn edge(&self, dir: EdgeDirection) -> Option<EdgeId> {
        self.edges[dir.slot()]
    }

    pub(crate) fn set_edge(&mut self, dir: EdgeDirection, edge: Option<EdgeId>) -> Option<EdgeId> {
        std::mem::replace(&mut self.edges[dir.slot()], edge)
    }

    pub fn is_detached(&self) -> bool {
        self.edges.iter().all(Option::is_none)
    }
}

/// Vertices order by timestamp; equal timestamps fall back to creation order.
impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ts.cmp(&other.ts).then(self.id.cmp(&other.id))
    }
}
