//! Callbacks for [`TraceGraph::scan_line_traverse`](crate::TraceGraph::scan_line_traverse).

use crate::edge::Edge;
use crate::graph::TraceGraph;
use crate::vertex::Vertex;
use crate::worker::GraphWorker;

/// Receives the segments, vertices and edges of a scan-line traversal.
///
/// Every method has a no-op default so visitors only implement what they
/// count.
pub trait GraphVisitor<W: GraphWorker> {
    /// Called once per horizontal segment, with its first vertex.
    fn visit_head(&mut self, _graph: &TraceGraph<W>, _vertex: &Vertex) {}

    /// Called once per reachable vertex.
    fn visit_vertex(&mut self, _graph: &TraceGraph<W>, _vertex: &Vertex) {}

    /// Called once per outgoing edge; `horizontal` tells the two kinds apart.
    fn visit_edge(&mut self, _graph: &TraceGraph<W>, _edge: &Edge, _horizontal: bool) {}
}
