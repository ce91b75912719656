use super::edge::Edge;
use super::ids::{EdgeId, VertexId};
use bevy::math::{Vec3, Vec4};
use rand::Rng;
use std::f32::consts::TAU;

/// Below this squared distance two vertices are treated as coincident
pub const MIN_DISTANCE_SQUARED: f32 = 1e-4;

/// Largest magnitude of the random wiggle added every tick
pub const JITTER_SCALE: f32 = 0.001;

/// A point mass in the graph.
///
/// Position is owned by the vertex's physics body, so force methods take
/// positions explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    id: VertexId,
    /// In [0, 1]; drives the resting height and the grey shade
    lightness: f32,
    /// Incident edges in the order they were spawned
    connected_edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn new(id: VertexId, lightness: f32) -> Self {
        Vertex {
            id,
            lightness: lightness.clamp(0.0, 1.0),
            connected_edges: Vec::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    pub fn connected_edges(&self) -> &[EdgeId] {
        &self.connected_edges
    }

    /// Number of incident edges
    pub fn degree(&self) -> usize {
        self.connected_edges.len()
    }

    pub(crate) fn attach_edge(&mut self, edge: EdgeId) {
        self.connected_edges.push(edge);
    }

    /// Greyscale RGBA, black at lightness 0 and white at 1
    pub fn shade(&self) -> Vec4 {
        Vec4::new(self.lightness, self.lightness, self.lightness, 1.0)
    }

    /// Height this vertex floats toward between `floor` and `ceiling`
    pub fn ideal_height(&self, floor: f32, ceiling: f32) -> f32 {
        floor + (ceiling - floor) * self.lightness
    }

    /// Push this vertex (at `position`) exerts on a vertex at `other_position`.
    ///
    /// Points from this vertex toward the other one, so it is the repulsion
    /// felt by the other vertex. Scales with this vertex's degree and falls
    /// off with squared distance.
    pub fn repulsion_force(&self, position: Vec3, other_position: Vec3) -> Vec3 {
        let difference = other_position - position;
        let distance_squared = difference.length_squared();
        if distance_squared < MIN_DISTANCE_SQUARED {
            return Vec3::ZERO;
        }
        (self.degree() as f32 / distance_squared) * difference.normalize()
    }

    /// Linear spring toward the ideal height, vertical only
    pub fn float_force(&self, position: Vec3, floor: f32, ceiling: f32) -> Vec3 {
        Vec3::Y * (self.ideal_height(floor, ceiling) - position.y)
    }

    /// Every force acting on this vertex for one tick.
    ///
    /// `vertices`, `edges` and `positions` are the full graph snapshot;
    /// `positions` is indexed by vertex id.
    pub fn compute_move<R: Rng + ?Sized>(
        &self,
        vertices: &[Vertex],
        edges: &[Edge],
        positions: &[Vec3],
        params: &MoveParams,
        rng: &mut R,
    ) -> ForceBreakdown {
        let position = positions
            .get(self.id.index())
            .copied()
            .unwrap_or(Vec3::ZERO);

        // Each other vertex pushes on us with its own degree
        let repulsion: Vec3 = vertices
            .iter()
            .filter(|other| other.id != self.id)
            .filter_map(|other| {
                let other_position = positions.get(other.id.index())?;
                Some(other.repulsion_force(*other_position, position))
            })
            .sum();

        let pull: Vec3 = self
            .connected_edges
            .iter()
            .filter_map(|edge_id| edges.get(edge_id.index()))
            .map(|edge| edge.pull_strength(self.id, positions))
            .sum();

        let float = self.float_force(position, params.floor, params.ceiling);

        let jitter = random_direction(rng) * rng.random_range(0.0..=JITTER_SCALE);

        ForceBreakdown {
            repulsion: repulsion * params.repulsion_scale,
            pull: pull * params.pull_scale,
            float,
            jitter,
        }
    }
}

/// Uniformly distributed unit vector
fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let z: f32 = rng.random_range(-1.0..=1.0);
    let theta = rng.random_range(0.0..TAU);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), r * theta.sin(), z)
}

/// Per-tick inputs to [`Vertex::compute_move`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    /// Accepted for the host loop's bookkeeping; forces are not rescaled by it
    pub delta_time: f32,
    /// Cap on the resultant, already scaled to the tick by the caller
    pub max_force_magnitude: f32,
    pub floor: f32,
    pub ceiling: f32,
    pub repulsion_scale: f32,
    pub pull_scale: f32,
}

/// The four contributions to a vertex's resultant force
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceBreakdown {
    pub repulsion: Vec3,
    pub pull: Vec3,
    pub float: Vec3,
    pub jitter: Vec3,
}

impl ForceBreakdown {
    pub fn resultant(&self) -> Vec3 {
        self.repulsion + self.pull + self.float + self.jitter
    }

    /// Resultant with its magnitude capped at `max_magnitude`
    pub fn clamped(&self, max_magnitude: f32) -> Vec3 {
        self.resultant().clamp_length_max(max_magnitude.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn vertex_with_degree(id: usize, lightness: f32, degree: usize) -> Vertex {
        let mut v = Vertex::new(VertexId(id), lightness);
        for e in 0..degree {
            v.attach_edge(EdgeId(e));
        }
        v
    }

    fn params(floor: f32, ceiling: f32, max: f32) -> MoveParams {
        MoveParams {
            delta_time: 1.0,
            max_force_magnitude: max,
            floor,
            ceiling,
            repulsion_scale: 1.0,
            pull_scale: 1.0,
        }
    }

    #[test]
    fn test_repulsion_zero_for_coincident() {
        let v = vertex_with_degree(0, 0.5, 3);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.repulsion_force(p, p), Vec3::ZERO);
        assert_eq!(v.repulsion_force(p, p + Vec3::splat(0.005)), Vec3::ZERO);
    }

    #[test]
    fn test_repulsion_scales_with_degree_and_distance() {
        let v = vertex_with_degree(0, 0.5, 4);
        let force = v.repulsion_force(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        // 4 / 2² = 1, pointing from v toward the other vertex
        assert!((force - Vec3::X).length() < 1e-6);

        let farther = v.repulsion_force(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        assert!((farther.length() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_isolated_vertex_does_not_repel() {
        let v = vertex_with_degree(0, 0.5, 0);
        assert_eq!(v.repulsion_force(Vec3::ZERO, Vec3::X), Vec3::ZERO);
    }

    #[test]
    fn test_float_force_at_ideal_height() {
        let v = Vertex::new(VertexId(0), 0.5);
        assert_eq!(v.ideal_height(-10.0, 10.0), 0.0);
        assert_eq!(v.float_force(Vec3::new(3.0, 0.0, -2.0), -10.0, 10.0), Vec3::ZERO);
    }

    #[test]
    fn test_float_force_toward_ceiling() {
        let v = Vertex::new(VertexId(0), 1.0);
        let force = v.float_force(Vec3::ZERO, -10.0, 10.0);
        assert_eq!(force, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_lightness_is_clamped() {
        assert_eq!(Vertex::new(VertexId(0), 1.5).lightness(), 1.0);
        assert_eq!(Vertex::new(VertexId(0), -0.5).lightness(), 0.0);
        assert_eq!(Vertex::new(VertexId(0), 0.25).shade(), Vec4::new(0.25, 0.25, 0.25, 1.0));
    }

    #[test]
    fn test_compute_move_collects_other_vertices() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = vertex_with_degree(0, 0.5, 0);
        let b = vertex_with_degree(1, 0.5, 4);
        let vertices = vec![a.clone(), b];
        let positions = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)];

        let p = params(-10.0, 10.0, 100.0);
        let breakdown = a.compute_move(&vertices, &[], &positions, &p, &mut rng);

        // b has degree 4 at distance 2 → pushes a along -X with magnitude 1
        assert!((breakdown.repulsion - Vec3::NEG_X).length() < 1e-6);
        assert_eq!(breakdown.pull, Vec3::ZERO);
        assert_eq!(breakdown.float, Vec3::ZERO);
        assert!(breakdown.jitter.length() <= JITTER_SCALE + 1e-7);
    }

    #[test]
    fn test_jitter_has_no_preferred_axis() {
        let mut rng = StdRng::seed_from_u64(5);
        let v = Vertex::new(VertexId(0), 0.5);
        let p = params(-10.0, 10.0, 100.0);
        let mut sum = Vec3::ZERO;
        for _ in 0..4000 {
            let jitter = v.compute_move(&[], &[], &[Vec3::ZERO], &p, &mut rng).jitter;
            assert!(jitter.length() <= JITTER_SCALE + 1e-7);
            sum += jitter;
        }
        // Mean of the wiggle stays near the origin on every axis
        let mean = sum / 4000.0;
        assert!(mean.abs().max_element() < JITTER_SCALE * 0.1, "mean {:?}", mean);
    }

    #[test]
    fn test_random_direction_is_unit_length() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..500 {
            assert!((random_direction(&mut rng).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_compute_move_sums_incident_pulls() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut a = Vertex::new(VertexId(0), 0.5);
        let mut b = Vertex::new(VertexId(1), 0.5);
        let edge = Edge::new(EdgeId(0), VertexId(0), VertexId(1), 10.0, 2.0);
        a.attach_edge(EdgeId(0));
        b.attach_edge(EdgeId(0));
        let vertices = vec![a.clone(), b];
        let positions = [Vec3::ZERO, Vec3::new(0.0, 0.0, 20.0)];

        let mut p = params(-10.0, 10.0, 100.0);
        p.repulsion_scale = 0.0;
        let breakdown = a.compute_move(&vertices, &[edge], &positions, &p, &mut rng);

        assert!((breakdown.pull - Vec3::new(0.0, 0.0, 20.0)).length() < 1e-5);
        assert_eq!(breakdown.repulsion, Vec3::ZERO);
    }

    #[test]
    fn test_clamp_never_exceeds_max() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let breakdown = ForceBreakdown {
                repulsion: Vec3::new(
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                    rng.random_range(-50.0..50.0),
                ),
                pull: Vec3::splat(rng.random_range(-20.0..20.0)),
                float: Vec3::Y * rng.random_range(-20.0..20.0),
                jitter: Vec3::splat(JITTER_SCALE),
            };
            let max = rng.random_range(0.0..5.0);
            assert!(breakdown.clamped(max).length() <= max + 1e-4);
        }
    }

    #[test]
    fn test_clamp_keeps_small_forces() {
        let breakdown = ForceBreakdown {
            float: Vec3::Y,
            ..Default::default()
        };
        assert_eq!(breakdown.clamped(10.0), Vec3::Y);
        assert_eq!(breakdown.clamped(-1.0), Vec3::ZERO);
    }
}
