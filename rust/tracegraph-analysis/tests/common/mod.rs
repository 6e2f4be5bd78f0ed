//! Reference execution graphs and the critical paths expected from them.
#![allow(dead_code)]

use tracegraph_core::{
    EdgeDirection, EdgeId, EdgeType, GraphView, TaskWorker, TraceGraph, VertexId,
};

// =============================================================================
// Helper: build graphs quickly
// =============================================================================

pub fn actor(n: i64) -> TaskWorker {
    TaskWorker::new("test", n, format!("actor{n}"))
}

#[derive(Default)]
pub struct Builder {
    graph: TraceGraph<TaskWorker>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// New vertex on `w` with no edge from the previous one.
    pub fn add(&mut self, w: &TaskWorker, ts: i64) -> VertexId {
        let v = self.graph.new_vertex(ts);
        self.graph.add(w.clone(), v).unwrap();
        v
    }

    pub fn append(&mut self, w: &TaskWorker, ts: i64, edge_type: EdgeType) -> VertexId {
        let v = self.graph.new_vertex(ts);
        self.graph.append(w.clone(), v, edge_type).unwrap();
        v
    }

    pub fn link(&mut self, from: VertexId, to: VertexId) -> EdgeId {
        self.link_typed(from, to, EdgeType::Default)
    }

    pub fn link_typed(&mut self, from: VertexId, to: VertexId, edge_type: EdgeType) -> EdgeId {
        self.graph.link(from, to, edge_type).unwrap()
    }

    pub fn graph(&self) -> &TraceGraph<TaskWorker> {
        &self.graph
    }

    pub fn finish(self) -> TraceGraph<TaskWorker> {
        self.graph
    }
}

// =============================================================================
// Comparison
// =============================================================================

type SlotView = Option<(EdgeType, i64, Option<TaskWorker>)>;

fn slot_view(g: &TraceGraph<TaskWorker>, v: VertexId, dir: EdgeDirection) -> SlotView {
    g.edge_at(v, dir).map(|e| {
        let other = if e.from() == v { e.to() } else { e.from() };
        (e.edge_type(), g.ts(other), g.parent_of(other).cloned())
    })
}

/// Structural equality: same workers, same timestamps per timeline, and the
/// same edge (type, far timestamp, far worker) in every slot.
pub fn assert_same_graph(expected: &TraceGraph<TaskWorker>, actual: &TraceGraph<TaskWorker>) {
    let mut expected_workers: Vec<TaskWorker> = expected.workers().cloned().collect();
    let mut actual_workers: Vec<TaskWorker> = actual.workers().cloned().collect();
    expected_workers.sort();
    actual_workers.sort();
    assert_eq!(expected_workers, actual_workers, "workers differ");

    for w in &expected_workers {
        let e_nodes = expected.nodes_of(w);
        let a_nodes = actual.nodes_of(w);
        let e_times: Vec<i64> = e_nodes.iter().map(|&v| expected.ts(v)).collect();
        let a_times: Vec<i64> = a_nodes.iter().map(|&v| actual.ts(v)).collect();
        assert_eq!(e_times, a_times, "timeline of {w}");
        for (i, (&e, &a)) in e_nodes.iter().zip(a_nodes).enumerate() {
            for dir in EdgeDirection::ALL {
                assert_eq!(
                    slot_view(expected, e, dir),
                    slot_view(actual, a, dir),
                    "{w} vertex #{i} at {} slot {dir:?}",
                    expected.ts(e)
                );
            }
        }
    }
    assert_eq!(expected.edge_count(), actual.edge_count(), "edge count");
}

// =============================================================================
// Scenarios
// =============================================================================

pub struct Scenario {
    pub name: &'static str,
    pub build: fn() -> TraceGraph<TaskWorker>,
    pub bounded: fn() -> TraceGraph<TaskWorker>,
}

pub fn all() -> Vec<Scenario> {
    vec![
        Scenario { name: "basic", build: basic, bounded: basic },
        Scenario { name: "wakeup_self", build: wakeup_self, bounded: wakeup_self_bounded },
        Scenario { name: "wakeup_missing", build: wakeup_missing, bounded: wakeup_missing },
        Scenario { name: "wakeup_unknown", build: wakeup_unknown, bounded: wakeup_unknown_bounded },
        Scenario { name: "wakeup_new", build: wakeup_new, bounded: wakeup_new_bounded },
        Scenario { name: "opened_delay", build: opened_delay, bounded: opened_delay_bounded },
        Scenario { name: "opened", build: opened, bounded: opened_bounded },
        Scenario { name: "wakeup_mutual", build: wakeup_mutual, bounded: wakeup_mutual_bounded },
        Scenario { name: "wakeup_embedded", build: wakeup_embedded, bounded: fork_join_bounded },
        Scenario { name: "wakeup_interleave", build: wakeup_interleave, bounded: fork_join_bounded },
        Scenario { name: "nested", build: nested, bounded: nested_bounded },
        Scenario { name: "net1", build: net1, bounded: net1_bounded },
    ]
}

pub fn basic() -> TraceGraph<TaskWorker> {
    let a0 = actor(0);
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 1, EdgeType::Running);
    b.finish()
}

/// A worker woken up by its own timer.
pub fn wakeup_self() -> TraceGraph<TaskWorker> {
    let a0 = actor(0);
    let mut b = Builder::new();
    b.add(&a0, 0);
    let start = b.append(&a0, 1, EdgeType::Running);
    b.append(&a0, 2, EdgeType::Running);
    let end = b.append(&a0, 3, EdgeType::Blocked);
    b.append(&a0, 4, EdgeType::Running);
    let mut g = b.finish();
    let timer = g.link_vertical(start, end).unwrap();
    g.set_edge_type(timer, EdgeType::Timer);
    g
}

pub fn wakeup_self_bounded() -> TraceGraph<TaskWorker> {
    let a0 = actor(0);
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 1, EdgeType::Running);
    b.append(&a0, 2, EdgeType::Running);
    b.append(&a0, 3, EdgeType::Timer);
    b.append(&a0, 4, EdgeType::Running);
    b.finish()
}

/// Nothing wakes the worker up; the block stays on its timeline.
pub fn wakeup_missing() -> TraceGraph<TaskWorker> {
    let a0 = actor(0);
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 2, EdgeType::Running);
    b.append(&a0, 4, EdgeType::Blocked);
    b.append(&a0, 6, EdgeType::Running);
    b.finish()
}

/// Woken by a packet from a worker with no known history.
pub fn wakeup_unknown() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 2, EdgeType::Running);
    let wake = b.append(&a0, 4, EdgeType::Blocked);
    b.append(&a0, 6, EdgeType::Running);
    let net = b.add(&a1, 3);
    b.link_typed(net, wake, EdgeType::Network);
    b.finish()
}

pub fn wakeup_unknown_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let block_start = b.append(&a0, 2, EdgeType::Running);
    let block_end = b.add(&a0, 4);
    b.append(&a0, 6, EdgeType::Running);
    let other_start = b.add(&a1, 2);
    let other_end = b.append(&a1, 3, EdgeType::Unknown);
    b.link(block_start, other_start);
    b.link_typed(other_end, block_end, EdgeType::Network);
    b.finish()
}

/// The waker was itself started by the blocked worker, before the block.
pub fn wakeup_new() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let src_link = b.append(&a0, 2, EdgeType::Running);
    b.append(&a0, 4, EdgeType::Running);
    let block_end = b.append(&a0, 6, EdgeType::Blocked);
    b.append(&a0, 8, EdgeType::Running);
    let dst_link = b.add(&a1, 3);
    let wakeup = b.append(&a1, 6, EdgeType::Running);
    b.link(src_link, dst_link);
    b.link(wakeup, block_end);
    b.finish()
}

pub fn wakeup_new_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 2, EdgeType::Running);
    let block_start = b.append(&a0, 4, EdgeType::Running);
    let block_end = b.add(&a0, 6);
    b.append(&a0, 8, EdgeType::Running);
    let dst_link = b.add(&a1, 4);
    let wakeup = b.append(&a1, 6, EdgeType::Running);
    b.link(block_start, dst_link);
    b.link(wakeup, block_end);
    b.finish()
}

/// The waker sent its wake-up before the block began; the link is late.
pub fn opened_delay() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 3, EdgeType::Running);
    let wake = b.append(&a0, 6, EdgeType::Blocked);
    b.append(&a0, 9, EdgeType::Running);
    b.add(&a1, 0);
    let send = b.append(&a1, 2, EdgeType::Running);
    b.append(&a1, 5, EdgeType::Running);
    b.link(send, wake);
    b.finish()
}

pub fn opened_delay_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let v1 = b.append(&a0, 3, EdgeType::Running);
    let v2 = b.add(&a1, 3);
    let v3 = b.add(&a0, 6);
    b.link(v1, v2);
    b.link(v2, v3);
    b.append(&a0, 9, EdgeType::Running);
    b.finish()
}

pub fn opened() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 3, EdgeType::Running);
    let wake = b.append(&a0, 6, EdgeType::Blocked);
    b.append(&a0, 9, EdgeType::Running);
    b.add(&a1, 0);
    let send = b.append(&a1, 6, EdgeType::Running);
    b.append(&a1, 9, EdgeType::Running);
    b.link(send, wake);
    b.finish()
}

pub fn opened_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let v1 = b.append(&a0, 3, EdgeType::Running);
    let v2 = b.add(&a1, 3);
    let v3 = b.append(&a1, 6, EdgeType::Running);
    let v4 = b.add(&a0, 6);
    b.link(v1, v2);
    b.link(v3, v4);
    b.append(&a0, 9, EdgeType::Running);
    b.finish()
}

/// Two workers wake each other in turn.
pub fn wakeup_mutual() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 1, EdgeType::Running);
    let a0_wakeup = b.append(&a0, 2, EdgeType::Running);
    b.append(&a0, 3, EdgeType::Running);
    let a0_unblock = b.append(&a0, 4, EdgeType::Blocked);
    b.append(&a0, 5, EdgeType::Running);

    b.add(&a1, 0);
    b.append(&a1, 1, EdgeType::Running);
    let a1_unblock = b.append(&a1, 2, EdgeType::Blocked);
    b.append(&a1, 3, EdgeType::Running);
    let a1_wakeup = b.append(&a1, 4, EdgeType::Running);
    b.append(&a1, 5, EdgeType::Running);

    b.link(a0_wakeup, a1_unblock);
    b.link(a1_wakeup, a0_unblock);
    b.finish()
}

pub fn wakeup_mutual_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1) = (actor(0), actor(1));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 1, EdgeType::Running);
    b.append(&a0, 2, EdgeType::Running);
    let a0_start_block = b.append(&a0, 3, EdgeType::Running);
    let a0_end_block = b.add(&a0, 4);
    b.append(&a0, 5, EdgeType::Running);

    let a1_start_block = b.add(&a1, 3);
    let a1_end_block = b.append(&a1, 4, EdgeType::Running);

    b.link(a0_start_block, a1_start_block);
    b.link(a1_end_block, a0_end_block);
    b.finish()
}

/// Forks two helpers and joins them; the second helper's run encloses the
/// first's.
pub fn wakeup_embedded() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2) = (actor(0), actor(1), actor(2));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let first_fork = b.append(&a0, 2, EdgeType::Running);
    let second_fork = b.append(&a0, 4, EdgeType::Running);
    b.append(&a0, 6, EdgeType::Running);
    let first_unblock = b.append(&a0, 8, EdgeType::Blocked);
    let second_unblock = b.append(&a0, 10, EdgeType::Blocked);
    b.append(&a0, 12, EdgeType::Running);

    let a1_in = b.add(&a1, 4);
    let a1_out = b.append(&a1, 8, EdgeType::Running);
    let a2_in = b.add(&a2, 2);
    let a2_out = b.append(&a2, 10, EdgeType::Running);

    b.link(first_fork, a2_in);
    b.link(second_fork, a1_in);
    b.link(a1_out, first_unblock);
    b.link(a2_out, second_unblock);
    b.finish()
}

/// Same shape as [`wakeup_embedded`] but the helpers' runs overlap.
pub fn wakeup_interleave() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2) = (actor(0), actor(1), actor(2));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let first_fork = b.append(&a0, 2, EdgeType::Running);
    let second_fork = b.append(&a0, 4, EdgeType::Running);
    b.append(&a0, 6, EdgeType::Running);
    let first_unblock = b.append(&a0, 8, EdgeType::Blocked);
    let second_unblock = b.append(&a0, 10, EdgeType::Blocked);
    b.append(&a0, 12, EdgeType::Running);

    let a1_in = b.add(&a1, 2);
    let a1_out = b.append(&a1, 8, EdgeType::Running);
    let a2_in = b.add(&a2, 4);
    let a2_out = b.append(&a2, 10, EdgeType::Running);

    b.link(first_fork, a1_in);
    b.link(second_fork, a2_in);
    b.link(a1_out, first_unblock);
    b.link(a2_out, second_unblock);
    b.finish()
}

/// Expected path for both fork/join scenarios.
pub fn fork_join_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2) = (actor(0), actor(1), actor(2));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 2, EdgeType::Running);
    b.append(&a0, 4, EdgeType::Running);
    let start_block = b.append(&a0, 6, EdgeType::Running);
    let first_unblock = b.add(&a0, 8);
    let second_unblock = b.add(&a0, 10);
    b.append(&a0, 12, EdgeType::Running);

    let a1_in = b.add(&a1, 6);
    let a1_out = b.append(&a1, 8, EdgeType::Running);
    let a2_in = b.add(&a2, 8);
    let a2_out = b.append(&a2, 10, EdgeType::Running);

    b.link(start_block, a1_in);
    b.link(a1_out, first_unblock);
    b.link(first_unblock, a2_in);
    b.link(a2_out, second_unblock);
    b.finish()
}

/// Four workers, each blocked on the next.
pub fn nested() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2, a3) = (actor(0), actor(1), actor(2), actor(3));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let a0_fork = b.append(&a0, 1, EdgeType::Running);
    let a0_return = b.append(&a0, 6, EdgeType::Blocked);
    b.append(&a0, 7, EdgeType::Running);

    let a1_in = b.add(&a1, 1);
    let a1_fork = b.append(&a1, 2, EdgeType::Running);
    let a1_return = b.append(&a1, 5, EdgeType::Blocked);
    let a1_end = b.append(&a1, 6, EdgeType::Running);

    let a2_in = b.add(&a2, 2);
    let a2_fork = b.append(&a2, 3, EdgeType::Running);
    let a2_return = b.append(&a2, 4, EdgeType::Blocked);
    let a2_end = b.append(&a2, 5, EdgeType::Running);

    let a3_in = b.add(&a3, 3);
    let a3_end = b.append(&a3, 4, EdgeType::Running);

    b.link(a0_fork, a1_in);
    b.link(a1_fork, a2_in);
    b.link(a2_fork, a3_in);
    b.link(a3_end, a2_return);
    b.link(a2_end, a1_return);
    b.link(a1_end, a0_return);
    b.finish()
}

pub fn nested_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2, a3) = (actor(0), actor(1), actor(2), actor(3));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let a0_fork = b.append(&a0, 1, EdgeType::Running);
    let a0_return = b.add(&a0, 6);
    b.append(&a0, 7, EdgeType::Running);

    let a1_in = b.add(&a1, 1);
    let a1_fork = b.append(&a1, 2, EdgeType::Running);
    let a1_return = b.add(&a1, 5);
    let a1_end = b.append(&a1, 6, EdgeType::Running);

    let a2_in = b.add(&a2, 2);
    let a2_fork = b.append(&a2, 3, EdgeType::Running);
    let a2_return = b.add(&a2, 4);
    let a2_end = b.append(&a2, 5, EdgeType::Running);

    let a3_in = b.add(&a3, 3);
    let a3_end = b.append(&a3, 4, EdgeType::Running);

    b.link(a0_fork, a1_in);
    b.link(a1_fork, a2_in);
    b.link(a2_fork, a3_in);
    b.link(a3_end, a2_return);
    b.link(a2_end, a1_return);
    b.link(a1_end, a0_return);
    b.finish()
}

/// A request relayed over the network through two other workers.
pub fn net1() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2, a3) = (actor(0), actor(1), actor(2), actor(3));
    let mut b = Builder::new();
    b.add(&a0, 0);
    b.append(&a0, 1, EdgeType::Running);
    let a0_unblock = b.append(&a0, 11, EdgeType::Blocked);
    b.append(&a0, 12, EdgeType::Running);

    b.add(&a1, 3);
    let a1_send = b.append(&a1, 4, EdgeType::Running);
    b.append(&a1, 5, EdgeType::Running);

    b.add(&a2, 6);
    let a2_rcv = b.append(&a2, 7, EdgeType::Running);
    let a2_send = b.append(&a2, 8, EdgeType::Running);

    b.add(&a3, 9);
    let a3_rcv = b.append(&a3, 10, EdgeType::Running);
    let a3_end = b.append(&a3, 11, EdgeType::Running);

    b.link_typed(a1_send, a2_rcv, EdgeType::Network);
    b.link_typed(a2_send, a3_rcv, EdgeType::Network);
    b.link(a3_end, a0_unblock);
    b.finish()
}

pub fn net1_bounded() -> TraceGraph<TaskWorker> {
    let (a0, a1, a2, a3) = (actor(0), actor(1), actor(2), actor(3));
    let mut b = Builder::new();
    b.add(&a0, 0);
    let a0_fork = b.append(&a0, 1, EdgeType::Running);
    let a0_unblock = b.add(&a0, 11);
    b.append(&a0, 12, EdgeType::Running);

    let a1_start = b.add(&a1, 1);
    b.append(&a1, 3, EdgeType::Unknown);
    let a1_send = b.append(&a1, 4, EdgeType::Running);

    let a2_rcv = b.add(&a2, 7);
    let a2_send = b.append(&a2, 8, EdgeType::Running);

    let a3_rcv = b.add(&a3, 10);
    let a3_end = b.append(&a3, 11, EdgeType::Running);

    b.link(a0_fork, a1_start);
    b.link_typed(a1_send, a2_rcv, EdgeType::Network);
    b.link_typed(a2_send, a3_rcv, EdgeType::Network);
    b.link(a3_end, a0_unblock);
    b.finish()
}
