//! The execution graph: per-worker timelines joined by vertical links.
//!
//! # Representation
//!
//! Vertices and edges live in two arenas owned by the [`TraceGraph`] and are
//! addressed by [`VertexId`] / [`EdgeId`] handles.  A vertex is minted
//! detached by [`TraceGraph::new_vertex`] and joins a worker's chain through
//! [`add`](TraceGraph::add), [`append`](TraceGraph::append) or
//! [`link`](TraceGraph::link).
//!
//! # Invariants
//!
//! 1. A vertex has at most one edge per [`EdgeDirection`].  Linking into an
//!    occupied slot replaces the previous edge, which is detached from both
//!    of its endpoints.
//! 2. Every edge goes forward in time (`from.ts <= to.ts`) and never links a
//!    vertex to itself.
//! 3. A vertex belongs to at most one worker chain.

use crate::edge::{Edge, EdgeId, EdgeType};
use crate::error::GraphError;
use crate::vertex::{EdgeDirection, Vertex, VertexId};
use crate::visitor::GraphVisitor;
use crate::worker::GraphWorker;
use std::collections::{HashMap, HashSet};
use tracing::warn;

// ---------------------------------------------------------------------------
// GraphView
// ---------------------------------------------------------------------------

/// Read-only access to an execution graph.
///
/// Analyses take their input through this trait so that they can never
/// mutate the graph they are reading.
pub trait GraphView {
    type Worker: GraphWorker;

    /// Whether `vertex` was minted by this graph.
    fn contains(&self, vertex: VertexId) -> bool;

    /// Whether `edge` was minted by this graph.
    fn contains_edge(&self, edge: EdgeId) -> bool;

    /// # Panics
    /// Panics if `vertex` was not minted by this graph.
    fn vertex(&self, vertex: VertexId) -> &Vertex;

    /// # Panics
    /// Panics if `edge` was not minted by this graph.
    fn edge(&self, edge: EdgeId) -> &Edge;

    /// The worker whose chain holds `vertex`, if any.
    fn parent_of(&self, vertex: VertexId) -> Option<&Self::Worker>;

    /// The chain of `worker`, oldest first.  Empty for unknown workers.
    fn nodes_of(&self, worker: &Self::Worker) -> &[VertexId];

    fn ts(&self, vertex: VertexId) -> i64 {
        self.vertex(vertex).ts()
    }

    fn edge_at(&self, vertex: VertexId, dir: EdgeDirection) -> Option<&Edge> {
        self.vertex(vertex).edge(dir).map(|e| self.edge(e))
    }

    fn head(&self, worker: &Self::Worker) -> Option<VertexId> {
        self.nodes_of(worker).first().copied()
    }

    fn tail(&self, worker: &Self::Worker) -> Option<VertexId> {
        self.nodes_of(worker).last().copied()
    }
}

// ---------------------------------------------------------------------------
// TraceGraph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TraceGraph<W: GraphWorker> {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    /// Workers in registration order; `chains[i]` belongs to `workers[i]`.
    workers: Vec<W>,
    chains: Vec<Vec<VertexId>>,
    worker_slots: HashMap<W, usize>,
    /// Owning worker slot, indexed by vertex.
    owners: Vec<Option<usize>>,
}

impl<W: GraphWorker> Default for TraceGraph<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: GraphWorker> TraceGraph<W> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            workers: Vec::new(),
            chains: Vec::new(),
            worker_slots: HashMap::new(),
            owners: Vec::new(),
        }
    }

    /// Mint a detached vertex at `ts`.
    pub fn new_vertex(&mut self, ts: i64) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(id, ts));
        self.owners.push(None);
        id
    }

    /// Number of vertices registered in a worker chain.
    pub fn size(&self) -> usize {
        self.chains.iter().map(Vec::len).sum()
    }

    /// Number of edges currently attached to vertices.
    pub fn edge_count(&self) -> usize {
        self.vertices
            .iter()
            .map(|v| {
                usize::from(v.edge(EdgeDirection::OutgoingHorizontal).is_some())
                    + usize::from(v.edge(EdgeDirection::OutgoingVertical).is_some())
            })
            .sum()
    }

    /// Workers in the order they first received a vertex.
    pub fn workers(&self) -> impl Iterator<Item = &W> {
        self.workers.iter()
    }

    fn check(&self, vertex: VertexId) -> Result<(), GraphError> {
        if self.contains(vertex) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(vertex))
        }
    }

    fn worker_slot(&mut self, worker: W) -> usize {
        if let Some(&slot) = self.worker_slots.get(&worker) {
            return slot;
        }
        let slot = self.workers.len();
        self.workers.push(worker.clone());
        self.chains.push(Vec::new());
        self.worker_slots.insert(worker, slot);
        slot
    }

    // -- chain construction -------------------------------------------------

    /// Make `vertex` the new tail of `worker`'s chain without linking it to
    /// the previous tail.
    pub fn add(&mut self, worker: W, vertex: VertexId) -> Result<(), GraphError> {
        self.check(vertex)?;
        if self.owners[vertex.index()].is_some() {
            return Err(GraphError::AlreadyOwned(vertex));
        }
        let slot = self.worker_slot(worker);
        self.chains[slot].push(vertex);
        self.owners[vertex.index()] = Some(slot);
        Ok(())
    }

    /// Make `vertex` the new tail of `worker`'s chain and link the previous
    /// tail to it with an edge of `edge_type`.
    ///
    /// Returns `None` when `vertex` is the first of the chain.  On error the
    /// graph is left unchanged.
    pub fn append(
        &mut self,
        worker: W,
        vertex: VertexId,
        edge_type: EdgeType,
    ) -> Result<Option<EdgeId>, GraphError> {
        self.check(vertex)?;
        if self.owners[vertex.index()].is_some() {
            return Err(GraphError::AlreadyOwned(vertex));
        }
        let previous = self.tail(&worker);
        if let Some(prev) = previous {
            self.check_link(prev, vertex)?;
        }
        self.add(worker, vertex)?;
        match previous {
            Some(prev) => {
                let edge = self.link_horizontal(prev, vertex)?;
                self.set_edge_type(edge, edge_type);
                Ok(Some(edge))
            }
            None => Ok(None),
        }
    }

    /// Link two vertices, horizontally when they share a worker and
    /// vertically otherwise.
    ///
    /// `from` must already be in a chain; a detached `to` joins `from`'s
    /// worker.
    pub fn link(
        &mut self,
        from: VertexId,
        to: VertexId,
        edge_type: EdgeType,
    ) -> Result<EdgeId, GraphError> {
        self.check_link(from, to)?;
        let from_slot = self.owners[from.index()].ok_or(GraphError::Unowned(from))?;
        let to_slot = match self.owners[to.index()] {
            Some(slot) => slot,
            None => {
                let worker = self.workers[from_slot].clone();
                self.add(worker, to)?;
                from_slot
            }
        };
        let edge = if from_slot == to_slot {
            self.link_horizontal(from, to)?
        } else {
            self.link_vertical(from, to)?
        };
        self.set_edge_type(edge, edge_type);
        Ok(edge)
    }

    /// Create a `DEFAULT` edge in the horizontal slots of both vertices.
    pub fn link_horizontal(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId, GraphError> {
        self.link_with(from, to, EdgeDirection::OutgoingHorizontal)
    }

    /// Create a `DEFAULT` edge in the vertical slots of both vertices.
    pub fn link_vertical(&mut self, from: VertexId, to: VertexId) -> Result<EdgeId, GraphError> {
        self.link_with(from, to, EdgeDirection::OutgoingVertical)
    }

    pub fn set_edge_type(&mut self, edge: EdgeId, edge_type: EdgeType) {
        self.edges[edge.index()].set_edge_type(edge_type);
    }

    /// Validate a prospective edge and return its duration.
    fn check_link(&self, from: VertexId, to: VertexId) -> Result<i64, GraphError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Err(GraphError::SelfLink(from));
        }
        let (from_ts, to_ts) = (self.ts(from), self.ts(to));
        if to_ts < from_ts {
            return Err(GraphError::NonChronological {
                from,
                to,
                from_ts,
                to_ts,
            });
        }
        to_ts
            .checked_sub(from_ts)
            .ok_or(GraphError::DurationOverflow {
                from,
                to,
                from_ts,
                to_ts,
            })
    }

    fn link_with(
        &mut self,
        from: VertexId,
        to: VertexId,
        outgoing: EdgeDirection,
    ) -> Result<EdgeId, GraphError> {
        let duration = self.check_link(from, to)?;
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge::new(id, from, to, duration));
        self.attach(from, outgoing, id);
        self.attach(to, outgoing.opposite(), id);
        Ok(id)
    }

    fn attach(&mut self, vertex: VertexId, dir: EdgeDirection, edge: EdgeId) {
        let Some(displaced) = self.vertices[vertex.index()].set_edge(dir, Some(edge)) else {
            return;
        };
        if displaced == edge {
            return;
        }
        warn!(
            vertex = %vertex,
            slot = ?dir,
            displaced = %displaced,
            replacement = %edge,
            "edge slot overwritten"
        );
        self.release_far_end(displaced, vertex, dir);
    }

    /// Clear the slot `edge` holds on the endpoint other than `near`.
    fn release_far_end(&mut self, edge: EdgeId, near: VertexId, near_dir: EdgeDirection) {
        let e = &self.edges[edge.index()];
        let far = if e.from() == near { e.to() } else { e.from() };
        let far_dir = near_dir.opposite();
        let far_vertex = &mut self.vertices[far.index()];
        if far_vertex.edge(far_dir) == Some(edge) {
            far_vertex.set_edge(far_dir, None);
        }
    }

    /// Unregister the tail of `worker`'s chain and detach its edges.
    pub fn remove_tail(&mut self, worker: &W) -> Option<VertexId> {
        let slot = *self.worker_slots.get(worker)?;
        let tail = self.chains[slot].pop()?;
        self.owners[tail.index()] = None;
        for dir in EdgeDirection::ALL {
            if let Some(edge) = self.vertices[tail.index()].set_edge(dir, None) {
                self.release_far_end(edge, tail, dir);
            }
        }
        Some(tail)
    }

    // -- lookups ------------------------------------------------------------

    /// The first vertex of the horizontal segment containing `vertex`.
    pub fn head_of(&self, vertex: VertexId) -> Result<VertexId, GraphError> {
        self.check(vertex)?;
        let mut head = vertex;
        while let Some(edge) = self.edge_at(head, EdgeDirection::IncomingHorizontal) {
            head = edge.from();
            if head == vertex {
                return Err(GraphError::CycleDetected(vertex));
            }
        }
        Ok(head)
    }

    /// The earliest chain head over all workers.
    pub fn graph_head(&self) -> Option<VertexId> {
        self.chains
            .iter()
            .filter_map(|chain| chain.first().copied())
            .fold(None, |best: Option<VertexId>, v| match best {
                Some(b) if self.ts(b) <= self.ts(v) => Some(b),
                _ => Some(v),
            })
    }

    /// The first vertex of `worker` at or after `ts`.
    pub fn vertex_at(&self, ts: i64, worker: &W) -> Option<VertexId> {
        let chain = self.nodes_of(worker);
        let idx = chain.partition_point(|&v| self.ts(v) < ts);
        chain.get(idx).copied()
    }

    // -- traversal ----------------------------------------------------------

    /// Visit every horizontal segment reachable from `start` through vertical
    /// links, each exactly once.
    pub fn scan_line_traverse<V: GraphVisitor<W>>(
        &self,
        start: VertexId,
        visitor: &mut V,
    ) -> Result<(), GraphError> {
        self.check(start)?;
        let mut pending = vec![start];
        let mut visited: HashSet<VertexId> = HashSet::new();

        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            let head = self.head_of(current)?;
            visitor.visit_head(self, self.vertex(head));

            let mut node = Some(head);
            while let Some(n) = node {
                let vertex = self.vertex(n);
                visitor.visit_vertex(self, vertex);
                if let Some(up) = self.edge_at(n, EdgeDirection::OutgoingVertical) {
                    pending.push(up.to());
                    visitor.visit_edge(self, up, false);
                }
                if let Some(down) = self.edge_at(n, EdgeDirection::IncomingVertical) {
                    pending.push(down.from());
                }
                visited.insert(n);

                node = match self.edge_at(n, EdgeDirection::OutgoingHorizontal) {
                    Some(next) => {
                        visitor.visit_edge(self, next, true);
                        if visited.contains(&next.to()) {
                            return Err(GraphError::CycleDetected(next.to()));
                        }
                        Some(next.to())
                    }
                    None => None,
                };
            }
        }
        Ok(())
    }

    /// [`scan_line_traverse`](Self::scan_line_traverse) from the head of
    /// `worker`'s chain.  Does nothing for an unknown worker.
    pub fn scan_line_traverse_worker<V: GraphVisitor<W>>(
        &self,
        worker: &W,
        visitor: &mut V,
    ) -> Result<(), GraphError> {
        match self.head(worker) {
            Some(head) => self.scan_line_traverse(head, visitor),
            None => Ok(()),
        }
    }
}

impl<W: GraphWorker> GraphView for TraceGraph<W> {
    type Worker = W;

    fn contains(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertices.len()
    }

    fn contains_edge(&self, edge: EdgeId) -> bool {
        edge.index() < self.edges.len()
    }

    fn vertex(&self, vertex: VertexId) -> &Vertex {
        &self.vertices[vertex.index()]
    }

    fn edge(&self, edge: EdgeId) -> &Edge {
        &self.edges[edge.index()]
    }

    fn parent_of(&self, vertex: VertexId) -> Option<&W> {
        let slot = (*self.owners.get(vertex.index())?)?;
        self.workers.get(slot)
    }

    fn nodes_of(&self, worker: &W) -> &[VertexId] {
        match self.worker_slots.get(worker) {
            Some(&slot) => &self.chains[slot],
            None => &[],
        }
    }
}
