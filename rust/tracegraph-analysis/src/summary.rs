//! Summaries of a computed critical path.

use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracegraph_core::{EdgeDirection, EdgeId, EdgeType, GraphView, GraphWorker, TraceGraph};

/// The edges of a critical path in the order they are followed from the
/// head of `home`'s timeline.  At each vertex an outgoing link to another
/// worker is preferred over staying on the current timeline.
pub fn critical_path_edges<W: GraphWorker>(path: &TraceGraph<W>, home: &W) -> Vec<EdgeId> {
    let mut edges = Vec::new();
    let Some(mut current) = path.head(home) else {
        return edges;
    };
    let mut seen = HashSet::new();
    while seen.insert(current) {
        let next = path
            .edge_at(current, EdgeDirection::OutgoingVertical)
            .or_else(|| path.edge_at(current, EdgeDirection::OutgoingHorizontal));
        let Some(edge) = next else { break };
        edges.push(edge.id());
        current = edge.to();
    }
    edges
}

/// Where the time on a critical path went.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSummary<W: GraphWorker> {
    total: i64,
    edge_count: usize,
    by_type: BTreeMap<EdgeType, i64>,
    by_worker: Vec<(W, i64)>,
}

impl<W: GraphWorker> PathSummary<W> {
    /// Summarize the path that starts at the head of `home`'s timeline.
    /// Each edge is credited to the worker it leaves from.  Sums saturate at
    /// `i64::MAX`.
    pub fn from_path(path: &TraceGraph<W>, home: &W) -> Self {
        let mut by_type: BTreeMap<EdgeType, i64> = BTreeMap::new();
        let mut by_worker: Vec<(W, i64)> = Vec::new();
        let mut index: HashMap<W, usize> = HashMap::new();
        let mut total: i64 = 0;
        let edges = critical_path_edges(path, home);
        for &id in &edges {
            let edge = path.edge(id);
            total = total.saturating_add(edge.duration());
            let by = by_type.entry(edge.edge_type()).or_insert(0);
            *by = by.saturating_add(edge.duration());
            if let Some(worker) = path.parent_of(edge.from()) {
                let slot = *index.entry(worker.clone()).or_insert_with(|| {
                    by_worker.push((worker.clone(), 0));
                    by_worker.len() - 1
                });
                by_worker[slot].1 = by_worker[slot].1.saturating_add(edge.duration());
            }
        }
        Self {
            total,
            edge_count: edges.len(),
            by_type,
            by_worker,
        }
    }

    pub fn total_duration(&self) -> i64 {
        self.total
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn duration_of(&self, edge_type: EdgeType) -> i64 {
        self.by_type.get(&edge_type).copied().unwrap_or(0)
    }

    pub fn duration_for(&self, worker: &W) -> i64 {
        self.by_worker
            .iter()
            .find(|(w, _)| w == worker)
            .map_or(0, |(_, d)| *d)
    }

    /// Workers in the order the path first visits them.
    pub fn workers(&self) -> impl Iterator<Item = &W> {
        self.by_worker.iter().map(|(w, _)| w)
    }

    pub fn to_json(&self) -> Value {
        let by_type: serde_json::Map<String, Value> = self
            .by_type
            .iter()
            .map(|(t, d)| (t.to_string(), json!(d)))
            .collect();
        let by_worker: Vec<Value> = self
            .by_worker
            .iter()
            .map(|(w, d)| json!({ "worker": w.worker_info(), "host": w.host_id(), "duration": d }))
            .collect();
        json!({
            "total": self.total,
            "edges": self.edge_count,
            "by_type": by_type,
            "by_worker": by_worker,
        })
    }
}
