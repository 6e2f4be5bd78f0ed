//! The critical-path algorithm contract and the closed set of variants.

use crate::bounded::BoundedCriticalPath;
use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use tracegraph_core::{GraphView, GraphWorker, TraceGraph, VertexId};

/// Computes the critical path between two vertices of an input graph.
pub trait CriticalPathAlgorithm<W: GraphWorker> {
    /// Stable identifier, used by configuration and the registry.
    fn id(&self) -> &'static str;

    /// Human readable name.
    fn display_name(&self) -> &'static str;

    /// Build a standalone graph holding the critical path from `start` to
    /// `end` (or to the end of `start`'s timeline when `end` is `None`).
    fn compute(
        &self,
        start: VertexId,
        end: Option<VertexId>,
    ) -> Result<TraceGraph<W>, CriticalPathError>;
}

/// Known algorithm variants.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    /// Blocking intervals are explained by searching backward, never earlier
    /// than the start of the interval.
    #[default]
    Bounded,
}

impl AlgorithmKind {
    pub fn id(self) -> &'static str {
        match self {
            AlgorithmKind::Bounded => "tracegraph.critical_path.bounded",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AlgorithmKind::Bounded => "Bounded critical path",
        }
    }

    /// Instantiate this variant over `graph`.
    pub fn instantiate<'g, G: GraphView>(
        self,
        graph: &'g G,
        config: &CriticalPathConfig,
    ) -> Box<dyn CriticalPathAlgorithm<G::Worker> + 'g> {
        match self {
            AlgorithmKind::Bounded => Box::new(BoundedCriticalPath::with_config(graph, config)),
        }
    }
}
