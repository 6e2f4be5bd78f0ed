//! Lookup of the available critical-path algorithms.
//!
//! The set of algorithms is closed ([`AlgorithmKind`]), so the registry is a
//! plain mapping from variant to descriptor and constructor.

use crate::algorithm::{AlgorithmKind, CriticalPathAlgorithm};
use crate::config::CriticalPathConfig;
use serde::Serialize;
use strum::IntoEnumIterator;
use tracegraph_core::GraphView;

/// What a presentation layer needs to offer an algorithm to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmDescriptor {
    pub kind: AlgorithmKind,
    pub id: &'static str,
    pub display_name: &'static str,
}

impl From<AlgorithmKind> for AlgorithmDescriptor {
    fn from(kind: AlgorithmKind) -> Self {
        Self {
            kind,
            id: kind.id(),
            display_name: kind.display_name(),
        }
    }
}

pub struct AlgorithmRegistry;

impl AlgorithmRegistry {
    /// Every registered algorithm, in declaration order.
    pub fn registered_types() -> Vec<AlgorithmDescriptor> {
        AlgorithmKind::iter().map(AlgorithmDescriptor::from).collect()
    }

    /// Resolve either a full identifier or a short name (`"bounded"`).
    pub fn find(name: &str) -> Option<AlgorithmKind> {
        AlgorithmKind::iter().find(|kind| kind.id() == name || kind.to_string() == name)
    }

    pub fn create<'g, G: GraphView>(
        kind: AlgorithmKind,
        graph: &'g G,
        config: &CriticalPathConfig,
    ) -> Box<dyn CriticalPathAlgorithm<G::Worker> + 'g> {
        kind.instantiate(graph, config)
    }
}
