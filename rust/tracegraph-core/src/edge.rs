//! Typed, directed intervals between two vertices.

use crate::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Handle to an edge inside the arena of one [`TraceGraph`](crate::TraceGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Why a worker's state held for the interval an edge covers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    /// Untyped link; must not survive on a fully built timeline.
    Default,
    Running,
    Blocked,
    Interrupted,
    Preempted,
    Timer,
    Network,
    UserInput,
    BlockDevice,
    Ipi,
    /// Zero-duration join point.
    #[strum(serialize = "EPS")]
    #[serde(rename = "EPS")]
    Epsilon,
    Unknown,
}

impl EdgeType {
    /// Waits that are explained by chasing the waker on another timeline.
    pub fn is_blocking(self) -> bool {
        matches!(self, EdgeType::Blocked | EdgeType::Network)
    }
}

/// A directed interval from one vertex to a later (or simultaneous) one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    edge_type: EdgeType,
    duration: i64,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, from: VertexId, to: VertexId, duration: i64) -> Self {
        Self {
            id,
            from,
            to,
            edge_type: EdgeType::Default,
            duration,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    pub(crate) fn set_edge_type(&mut self, edge_type: EdgeType) {
        self.edge_type = edge_type;
    }

    /// `to.ts - from.ts`.
    pub fn duration(&self) -> i64 {
        self.duration
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} -> {}, {}, {}]",
            self.id, self.from, self.to, self.edge_type, self.duration
        )
    }
}
