//! Critical path of a whole worker timeline.

use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use crate::registry::AlgorithmRegistry;
use tracegraph_core::{GraphView, TraceGraph};
use tracing::info;

/// Run the configured algorithm from the first to the last vertex of
/// `worker`'s timeline.
pub fn compute_worker_critical_path<G: GraphView>(
    graph: &G,
    worker: &G::Worker,
    config: &CriticalPathConfig,
) -> Result<TraceGraph<G::Worker>, CriticalPathError> {
    let (Some(start), Some(end)) = (graph.head(worker), graph.tail(worker)) else {
        return Err(CriticalPathError::NoVertices(format!("{worker:?}")));
    };
    let algorithm = AlgorithmRegistry::create(config.algorithm, graph, config);
    info!(
        algorithm = algorithm.id(),
        worker = ?worker,
        from = graph.ts(start),
        to = graph.ts(end),
        "computing worker critical path"
    );
    algorithm.compute(start, Some(end))
}
