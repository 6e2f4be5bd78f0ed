//! Bounded critical path.
//!
//! Walks the start worker's timeline forward.  Intervals where the worker was
//! busy are copied to the output as they are.  A blocking interval
//! (`BLOCKED`, `NETWORK`) is replaced by the chain of activity that led to
//! the wake-up, found by searching backward from the waking link.  The search
//! never goes earlier than the start of the blocking interval, and nested
//! blocking intervals on the way are resolved the same way.
//!
//! # Invariants
//!
//! - The output is a fresh graph; the input is only read.
//! - Every output vertex carries the timestamp of the input vertex it stands
//!   for, so the home worker's timeline in the output spans exactly
//!   `[ts(start), ts(last step)]`.
//! - The walk stops at the first step that would pass `end`; a step landing
//!   exactly on `end` is kept.

use crate::algorithm::{AlgorithmKind, CriticalPathAlgorithm};
use crate::config::CriticalPathConfig;
use crate::error::CriticalPathError;
use tracegraph_core::{EdgeDirection, EdgeId, EdgeType, GraphView, TraceGraph, VertexId};
use tracing::{debug, trace};

pub struct BoundedCriticalPath<'g, G: GraphView> {
    graph: &'g G,
    max_depth: usize,
}

impl<'g, G: GraphView> BoundedCriticalPath<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self::with_config(graph, &CriticalPathConfig::default())
    }

    pub fn with_config(graph: &'g G, config: &CriticalPathConfig) -> Self {
        Self {
            graph,
            max_depth: config.max_resolution_depth,
        }
    }

    pub fn graph(&self) -> &'g G {
        self.graph
    }

    fn owner(&self, vertex: VertexId) -> Result<&'g G::Worker, CriticalPathError> {
        self.graph
            .parent_of(vertex)
            .ok_or(CriticalPathError::UnknownParent(vertex))
    }

    /// Compute the critical path from `start` up to `end`, or up to the end
    /// of `start`'s timeline when `end` is `None`.
    pub fn compute(
        &self,
        start: VertexId,
        end: Option<VertexId>,
    ) -> Result<TraceGraph<G::Worker>, CriticalPathError> {
        let graph = self.graph;
        if !graph.contains(start) {
            return Err(CriticalPathError::UnknownVertex(start));
        }
        let home = self.owner(start)?;
        let end_ts = match end {
            Some(end) if !graph.contains(end) => return Err(CriticalPathError::UnknownVertex(end)),
            Some(end) => graph.ts(end),
            None => i64::MAX,
        };
        debug!(start = %start, end_ts, worker = ?home, "computing bounded critical path");

        let mut path = TraceGraph::new();
        let seed = path.new_vertex(graph.ts(start));
        path.add(home.clone(), seed)?;

        let mut current = start;
        while let Some(next) = graph.edge_at(current, EdgeDirection::OutgoingHorizontal) {
            let to = next.to();
            if graph.ts(to) > end_ts {
                break;
            }
            let owner = graph.parent_of(to);
            if owner != Some(home) {
                return Err(CriticalPathError::CrossWorkerHorizontal {
                    edge: next.id(),
                    expected: format!("{home:?}"),
                    found: owner.map_or_else(|| "<none>".to_string(), |w| format!("{w:?}")),
                });
            }
            trace!(edge = %next, "critical path step");
            match next.edge_type() {
                EdgeType::Running
                | EdgeType::Interrupted
                | EdgeType::Preempted
                | EdgeType::Timer
                | EdgeType::BlockDevice
                | EdgeType::UserInput
                | EdgeType::Ipi
                | EdgeType::Unknown => {
                    let vertex = path.new_vertex(graph.ts(to));
                    path.append(home.clone(), vertex, next.edge_type())?;
                }
                EdgeType::Blocked | EdgeType::Network => {
                    let mut links =
                        self.resolve_at_depth(next.id(), graph.ts(next.from()), 0)?;
                    links.reverse();
                    self.append_path_component(&mut path, current, &links)?;
                }
                EdgeType::Epsilon => {
                    if next.duration() != 0 {
                        return Err(CriticalPathError::NonZeroEpsilon {
                            edge: next.id(),
                            duration: next.duration(),
                        });
                    }
                }
                EdgeType::Default => {
                    return Err(CriticalPathError::IllegalEdgeType {
                        edge: next.id(),
                        edge_type: next.edge_type(),
                    })
                }
            }
            current = to;
        }

        debug!(
            vertices = path.size(),
            edges = path.edge_count(),
            "critical path computed"
        );
        Ok(path)
    }

    /// Explain a blocking interval: the input edges leading to its wake-up,
    /// ordered from the waking link backward.
    ///
    /// The search does not go earlier than `max(bound, ts(blocking.from))`.
    /// An empty list means nothing woke the worker up.
    pub fn resolve_blocking_bounded(
        &self,
        blocking: EdgeId,
        bound: i64,
    ) -> Result<Vec<EdgeId>, CriticalPathError> {
        self.check_edge(blocking)?;
        self.resolve_at_depth(blocking, bound, 0)
    }

    fn check_edge(&self, edge: EdgeId) -> Result<(), CriticalPathError> {
        if self.graph.contains_edge(edge) {
            Ok(())
        } else {
            Err(CriticalPathError::UnknownEdge(edge))
        }
    }

    fn resolve_at_depth(
        &self,
        blocking: EdgeId,
        bound: i64,
        depth: usize,
    ) -> Result<Vec<EdgeId>, CriticalPathError> {
        if depth > self.max_depth {
            return Err(CriticalPathError::ResolutionTooDeep {
                edge: blocking,
                limit: self.max_depth,
            });
        }
        let graph = self.graph;
        let blocking = graph.edge(blocking);
        let Some(down) = self.find_wakeup(blocking.to()) else {
            debug!(edge = %blocking, "no wake-up found for blocking interval");
            return Ok(Vec::new());
        };

        let mut sub_path = vec![down];
        let current_bound = bound.max(graph.ts(blocking.from()));
        // Vertices that were also reached by a link, with the path length at
        // the time; the search resumes there when a timeline dead-ends.
        let mut branches: Vec<(VertexId, usize)> = Vec::new();
        let mut vertex_from = Some(graph.edge(down).from());

        while let Some(vertex) = vertex_from {
            if graph.ts(vertex) <= current_bound {
                break;
            }
            let incoming_vertical = graph.edge_at(vertex, EdgeDirection::IncomingVertical);
            let incoming_horizontal = graph.edge_at(vertex, EdgeDirection::IncomingHorizontal);

            if let Some(waker) = incoming_vertical {
                if graph.ts(waker.from()) <= current_bound {
                    sub_path.push(waker.id());
                    break;
                }
                if !matches!(incoming_horizontal, Some(h) if h.edge_type().is_blocking()) {
                    branches.push((vertex, sub_path.len()));
                }
            }

            vertex_from = match incoming_horizontal {
                Some(prev) => {
                    if prev.edge_type().is_blocking() {
                        sub_path.extend(self.resolve_at_depth(prev.id(), current_bound, depth + 1)?);
                    } else {
                        sub_path.push(prev.id());
                    }
                    Some(prev.from())
                }
                None => match branches.pop() {
                    Some((branch, checkpoint)) => {
                        sub_path.truncate(checkpoint);
                        graph
                            .edge_at(branch, EdgeDirection::IncomingVertical)
                            .map(|waker| {
                                sub_path.push(waker.id());
                                waker.from()
                            })
                    }
                    None => None,
                },
            };
        }
        trace!(edges = sub_path.len(), depth, "blocking interval resolved");
        Ok(sub_path)
    }

    /// The link that woke a worker up at or after `vertex`, following only
    /// zero-length `EPS` hops.
    fn find_wakeup(&self, vertex: VertexId) -> Option<EdgeId> {
        let graph = self.graph;
        let mut current = vertex;
        loop {
            if let Some(waker) = graph.vertex(current).edge(EdgeDirection::IncomingVertical) {
                return Some(waker);
            }
            match graph.edge_at(current, EdgeDirection::OutgoingHorizontal) {
                Some(next) if next.edge_type() == EdgeType::Epsilon => current = next.to(),
                _ => return None,
            }
        }
    }

    /// Splice `links` (chronological) into `path` after the home worker's
    /// tail.  `current` is the input vertex where the blocking interval
    /// began.  With no links the blocking edge itself is copied.
    ///
    /// Every handle is checked against the input graph before `path` is
    /// touched.
    pub fn append_path_component(
        &self,
        path: &mut TraceGraph<G::Worker>,
        current: VertexId,
        links: &[EdgeId],
    ) -> Result<(), CriticalPathError> {
        let graph = self.graph;
        if !graph.contains(current) {
            return Err(CriticalPathError::UnknownVertex(current));
        }
        links.iter().try_for_each(|&link| self.check_edge(link))?;
        let home = self.owner(current)?;
        let Some(&first) = links.first() else {
            if let Some(next) = graph.edge_at(current, EdgeDirection::OutgoingHorizontal) {
                let vertex = path.new_vertex(graph.ts(next.to()));
                path.append(home.clone(), vertex, next.edge_type())?;
            }
            return Ok(());
        };

        let tail = path
            .tail(home)
            .ok_or_else(|| CriticalPathError::MissingAnchor(format!("{home:?}")))?;
        let first = graph.edge(first);
        let source = self.owner(first.from())?;
        let mut anchor = if source == home {
            tail
        } else {
            let joint = path.new_vertex(graph.ts(current));
            path.add(source.clone(), joint)?;
            path.link_vertical(tail, joint)?;
            if graph.ts(first.from()) > graph.ts(current) {
                let gap = path.new_vertex(graph.ts(first.from()));
                path.append(source.clone(), gap, EdgeType::Unknown)?;
                gap
            } else {
                joint
            }
        };

        let mut previous_to: Option<VertexId> = None;
        for &link in links {
            let link = graph.edge(link);
            if let Some(prev_to) = previous_to {
                if prev_to != link.from() {
                    let ts = graph.ts(prev_to).max(graph.ts(link.from()));
                    anchor =
                        self.copy_link(path, anchor, prev_to, link.from(), ts, EdgeType::Default)?;
                }
            }
            anchor = self.copy_link(
                path,
                anchor,
                link.from(),
                link.to(),
                graph.ts(link.to()),
                link.edge_type(),
            )?;
            previous_to = Some(link.to());
        }
        Ok(())
    }

    /// Mirror the input link `from -> to` in `path`, starting at `anchor`.
    /// Returns the new output vertex standing for `to`.
    fn copy_link(
        &self,
        path: &mut TraceGraph<G::Worker>,
        anchor: VertexId,
        from: VertexId,
        to: VertexId,
        ts: i64,
        edge_type: EdgeType,
    ) -> Result<VertexId, CriticalPathError> {
        let target = self.owner(to)?;
        let vertex = path.new_vertex(ts);
        path.add(target.clone(), vertex)?;
        let edge = if self.graph.parent_of(from) == Some(target) {
            path.link_horizontal(anchor, vertex)?
        } else {
            path.link_vertical(anchor, vertex)?
        };
        path.set_edge_type(edge, edge_type);
        Ok(vertex)
    }
}

impl<'g, G: GraphView> CriticalPathAlgorithm<G::Worker> for BoundedCriticalPath<'g, G> {
    fn id(&self) -> &'static str {
        AlgorithmKind::Bounded.id()
    }

    fn display_name(&self) -> &'static str {
        AlgorithmKind::Bounded.display_name()
    }

    fn compute(
        &self,
        start: VertexId,
        end: Option<VertexId>,
    ) -> Result<TraceGraph<G::Worker>, CriticalPathError> {
        BoundedCriticalPath::compute(self, start, end)
    }
}
