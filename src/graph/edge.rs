use super::ids::{EdgeId, VertexId};
use bevy::math::Vec3;

/// An elastic link between two vertices.
///
/// Acts as a one-sided spring: it pulls once stretched past `max_length`
/// and never pushes when compressed.
/// Invariant: `vertex_a != vertex_b`
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    vertex_a: VertexId,
    vertex_b: VertexId,
    /// Rest length below which no pull is exerted
    max_length: f32,
    stiffness: f32,
}

impl Edge {
    pub fn new(
        id: EdgeId,
        vertex_a: VertexId,
        vertex_b: VertexId,
        max_length: f32,
        stiffness: f32,
    ) -> Self {
        debug_assert_ne!(vertex_a, vertex_b, "edge endpoints must differ");
        Edge {
            id,
            vertex_a,
            vertex_b,
            max_length,
            stiffness,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn vertex_a(&self) -> VertexId {
        self.vertex_a
    }

    pub fn vertex_b(&self) -> VertexId {
        self.vertex_b
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    pub fn stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Check if this edge touches a given vertex
    pub fn contains(&self, vertex: VertexId) -> bool {
        self.vertex_a == vertex || self.vertex_b == vertex
    }

    /// Check if this edge joins `a` and `b`, in either direction
    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.vertex_a == a && self.vertex_b == b) || (self.vertex_a == b && self.vertex_b == a)
    }

    /// Get the endpoint opposite `vertex`
    pub fn other_endpoint(&self, vertex: VertexId) -> Option<VertexId> {
        if self.vertex_a == vertex {
            Some(self.vertex_b)
        } else if self.vertex_b == vertex {
            Some(self.vertex_a)
        } else {
            None
        }
    }

    /// Force this edge exerts on `on_vertex`.
    ///
    /// Zero when `on_vertex` is not an endpoint or the edge is not stretched
    /// past its rest length. Otherwise `(distance - max_length) * stiffness`
    /// directed toward the other endpoint.
    pub fn pull_strength(&self, on_vertex: VertexId, positions: &[Vec3]) -> Vec3 {
        let Some(other) = self.other_endpoint(on_vertex) else {
            return Vec3::ZERO;
        };
        let (Some(&on_pos), Some(&other_pos)) =
            (positions.get(on_vertex.index()), positions.get(other.index()))
        else {
            return Vec3::ZERO;
        };

        let distance_vector = other_pos - on_pos;
        let distance = distance_vector.length();
        if distance < self.max_length {
            return Vec3::ZERO;
        }

        distance_vector.normalize_or_zero() * (distance - self.max_length) * self.stiffness
    }

    /// Current endpoint-to-endpoint distance
    pub fn length(&self, positions: &[Vec3]) -> f32 {
        let (start, end) = self.endpoints(positions);
        start.distance(end)
    }

    /// Positions of `vertex_a` and `vertex_b`
    pub fn endpoints(&self, positions: &[Vec3]) -> (Vec3, Vec3) {
        let start = positions
            .get(self.vertex_a.index())
            .copied()
            .unwrap_or(Vec3::ZERO);
        let end = positions
            .get(self.vertex_b.index())
            .copied()
            .unwrap_or(Vec3::ZERO);
        (start, end)
    }

    /// Geometry a renderer needs to stretch a unit link between the endpoints
    pub fn segment(&self, positions: &[Vec3]) -> EdgeSegment {
        let (start, end) = self.endpoints(positions);
        let delta = end - start;
        EdgeSegment {
            edge: self.id,
            start,
            direction: delta.normalize_or_zero(),
            length: delta.length(),
        }
    }
}

/// Placement of an edge for the presentation layer: anchored at `vertex_a`,
/// facing `vertex_b`, scaled along its forward axis by `length`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub edge: EdgeId,
    pub start: Vec3,
    pub direction: Vec3,
    pub length: f32,
}

impl EdgeSegment {
    pub fn end(&self) -> Vec3 {
        self.start + self.direction * self.length
    }
}
