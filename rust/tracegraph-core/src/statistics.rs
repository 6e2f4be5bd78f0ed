//! Per-worker running totals over a scan-line traversal.

use crate::edge::Edge;
use crate::error::GraphError;
use crate::graph::{GraphView, TraceGraph};
use crate::visitor::GraphVisitor;
use crate::worker::GraphWorker;
use serde_json::json;
use std::collections::HashMap;

/// Sum of horizontal edge durations, per worker and overall, for the part of
/// a graph reachable from one worker.
///
/// Vertical links carry no worker time and are not counted.
#[derive(Debug, Clone)]
pub struct GraphStatistics<W: GraphWorker> {
    sums: Vec<(W, i64)>,
    index: HashMap<W, usize>,
    total: i64,
}

impl<W: GraphWorker> GraphStatistics<W> {
    /// Traverse `graph` from the head of `worker` and accumulate.
    pub fn compute(graph: &TraceGraph<W>, worker: &W) -> Result<Self, GraphError> {
        let mut stats = Self {
            sums: Vec::new(),
            index: HashMap::new(),
            total: 0,
        };
        graph.scan_line_traverse_worker(worker, &mut stats)?;
        Ok(stats)
    }

    pub fn sum_for(&self, worker: &W) -> Option<i64> {
        self.index.get(worker).map(|&i| self.sums[i].1)
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Workers in the order the traversal first credited them.
    pub fn workers(&self) -> impl Iterator<Item = (&W, i64)> {
        self.sums.iter().map(|(w, s)| (w, *s))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let workers: Vec<serde_json::Value> = self
            .sums
            .iter()
            .map(|(w, sum)| {
                json!({
                    "worker": format!("{w:?}"),
                    "host": w.host_id(),
                    "info": w.worker_info(),
                    "sum": sum,
                })
            })
            .collect();
        json!({ "total": self.total, "workers": workers })
    }

    fn credit(&mut self, worker: &W, duration: i64) {
        let slot = match self.index.get(worker) {
            Some(&slot) => slot,
            None => {
                self.sums.push((worker.clone(), 0));
                self.index.insert(worker.clone(), self.sums.len() - 1);
                self.sums.len() - 1
            }
        };
        self.sums[slot].1 = self.sums[slot].1.saturating_add(duration);
        self.total = self.total.saturating_add(duration);
    }
}

impl<W: GraphWorker> GraphVisitor<W> for GraphStatistics<W> {
    fn visit_edge(&mut self, graph: &TraceGraph<W>, edge: &Edge, horizontal: bool) {
        if !horizontal {
            return;
        }
        if let Some(worker) = graph.parent_of(edge.from()) {
            self.credit(worker, edge.duration());
        }
    }
}
