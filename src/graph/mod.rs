mod edge;
mod generator;
mod ids;
mod vertex;

pub use edge::{Edge, EdgeSegment};
pub use generator::generate;
pub use ids::{EdgeId, VertexId};
pub use vertex::{ForceBreakdown, JITTER_SCALE, MIN_DISTANCE_SQUARED, MoveParams, Vertex};

use crate::error::GraphError;
use std::collections::VecDeque;

/// Owns every vertex and edge of one simulation run.
///
/// Ids are indices into the two stores; nothing is removed once created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Create one unconnected vertex per lightness value
    pub fn from_lightness(lightness: impl IntoIterator<Item = f32>) -> Self {
        let mut graph = Graph::new();
        for value in lightness {
            graph.add_vertex(value);
        }
        graph
    }

    pub fn add_vertex(&mut self, lightness: f32) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(id, lightness));
        id
    }

    /// Link two vertices and register the edge on both endpoints
    pub fn spawn_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        max_length: f32,
        stiffness: f32,
    ) -> Result<EdgeId, GraphError> {
        if a == b {
            return Err(GraphError::InvalidParameter(format!(
                "cannot link {} to itself",
                a
            )));
        }
        if a.index() >= self.vertices.len() || b.index() >= self.vertices.len() {
            return Err(GraphError::InvalidParameter(format!(
                "edge {}-{} references a missing vertex",
                a, b
            )));
        }
        if max_length.is_nan() || stiffness.is_nan() || max_length < 0.0 || stiffness < 0.0 {
            return Err(GraphError::InvalidParameter(
                "edge length and stiffness must be non-negative".to_string(),
            ));
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, a, b, max_length, stiffness));
        self.vertices[a.index()].attach_edge(id);
        self.vertices[b.index()].attach_edge(id);
        Ok(id)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges per vertex, the quantity densification drives toward its target
    pub fn average_connectedness(&self) -> f32 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        self.edges.len() as f32 / self.vertices.len() as f32
    }

    /// Mean number of incident edges per vertex
    pub fn mean_degree(&self) -> f32 {
        2.0 * self.average_connectedness()
    }

    /// Vertices sharing an edge with `vertex`
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex(vertex)
            .into_iter()
            .flat_map(|v| v.connected_edges().iter())
            .filter_map(move |edge_id| self.edges.get(edge_id.index())?.other_endpoint(vertex))
    }

    /// Check if an edge already joins `a` and `b`
    pub fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.vertex(a).is_some_and(|v| {
            v.connected_edges()
                .iter()
                .filter_map(|edge_id| self.edges.get(edge_id.index()))
                .any(|edge| edge.connects(a, b))
        })
    }

    /// Every vertex reachable from every other (true for 0 or 1 vertices)
    pub fn is_connected(&self) -> bool {
        let Some(first) = self.vertices.first() else {
            return true;
        };

        let mut seen = vec![false; self.vertices.len()];
        let mut queue = VecDeque::from([first.id()]);
        seen[first.id().index()] = true;
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }

        reached == self.vertices.len()
    }

    /// No cycles, counting parallel edges as a cycle
    pub fn is_acyclic(&self) -> bool {
        // Union-find: an edge inside one component closes a cycle
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for edge in &self.edges {
            let root_a = find(&mut parent, edge.vertex_a().index());
            let root_b = find(&mut parent, edge.vertex_b().index());
            if root_a == root_b {
                return false;
            }
            parent[root_a] = root_b;
        }
        true
    }

    /// Connected and acyclic
    pub fn is_tree(&self) -> bool {
        self.is_connected() && self.is_acyclic()
    }
}
