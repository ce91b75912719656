//! Tick driver tying the graph to its physics bodies.
//!
//! Each tick is a read-then-apply pass: all positions are snapshotted, every
//! vertex's force is computed from that snapshot, and only then are forces
//! handed to the bodies. The result does not depend on vertex order.

use crate::config::{LayoutConfig, SimulationConfig};
use crate::error::GraphError;
use crate::graph::{self, EdgeId, EdgeSegment, Graph, MoveParams, VertexId};
use crate::physics::PhysicsBody;
use bevy::math::{Vec3, Vec4};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A running layout: the graph, one body per vertex and the tunables
#[derive(Debug, Clone)]
pub struct Simulation<B> {
    graph: Graph,
    /// Indexed by vertex id
    bodies: Vec<B>,
    config: SimulationConfig,
    rng: StdRng,
    ticks: u64,
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Largest force applied this tick (after clamping)
    pub max_force: f32,
    pub mean_force: f32,
}

/// Snapshot of how far the layout is from rest, for logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutStats {
    pub vertices: usize,
    pub edges: usize,
    pub mean_degree: f32,
    /// Mean distance between each vertex's height and its ideal height
    pub mean_height_error: f32,
    pub max_height_error: f32,
    /// Edges currently stretched past their rest length
    pub stretched_edges: usize,
}

impl<B: PhysicsBody> Simulation<B> {
    /// Generate a graph from `config` and scatter a body for each vertex.
    ///
    /// `spawn` builds a body at the given start position.
    pub fn generate(
        config: &LayoutConfig,
        mut spawn: impl FnMut(Vec3) -> B,
    ) -> Result<Self, GraphError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let graph = graph::generate(&config.graph, &mut rng)?;
        let radius = config.spawn_radius;
        let bodies = (0..graph.vertex_count())
            .map(|_| {
                let unit = Vec3::new(
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                );
                spawn(unit * radius)
            })
            .collect();

        Self::from_parts(graph, bodies, config.simulation, rng)
    }

    /// Assemble a simulation from an existing graph and bodies
    pub fn from_parts(
        graph: Graph,
        bodies: Vec<B>,
        config: SimulationConfig,
        rng: StdRng,
    ) -> Result<Self, GraphError> {
        config.validate()?;
        if bodies.len() != graph.vertex_count() {
            return Err(GraphError::InvalidParameter(format!(
                "{} bodies for {} vertices",
                bodies.len(),
                graph.vertex_count()
            )));
        }

        Ok(Simulation {
            graph,
            bodies,
            config,
            rng,
            ticks: 0,
        })
    }

    /// Compute every vertex's clamped force and apply it to its body.
    ///
    /// The force cap is `max_force_magnitude * delta_time`; the forces
    /// themselves are not rescaled by `delta_time`.
    pub fn tick(&mut self, delta_time: f32) -> TickReport {
        let positions = self.positions();
        let params = MoveParams {
            delta_time,
            max_force_magnitude: self.config.max_force_magnitude * delta_time,
            floor: self.config.floor,
            ceiling: self.config.ceiling,
            repulsion_scale: self.config.repulsion_scale,
            pull_scale: self.config.pull_scale,
        };

        let vertices = self.graph.vertices();
        let edges = self.graph.edges();
        let forces: Vec<Vec3> = vertices
            .iter()
            .map(|vertex| {
                vertex
                    .compute_move(vertices, edges, &positions, &params, &mut self.rng)
                    .clamped(params.max_force_magnitude)
            })
            .collect();

        for (body, force) in self.bodies.iter_mut().zip(&forces) {
            body.apply_force(*force);
        }

        self.ticks += 1;
        let max_force = forces.iter().map(|f| f.length()).fold(0.0_f32, f32::max);
        let mean_force = if forces.is_empty() {
            0.0
        } else {
            forces.iter().map(|f| f.length()).sum::<f32>() / forces.len() as f32
        };

        let report = TickReport {
            tick: self.ticks,
            max_force,
            mean_force,
        };
        debug!(
            "tick {}: max force {:.4}, mean force {:.4}",
            report.tick, report.max_force, report.mean_force
        );
        report
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn bodies(&self) -> &[B] {
        &self.bodies
    }

    /// Bodies for the physics collaborator to integrate
    pub fn bodies_mut(&mut self) -> &mut [B] {
        &mut self.bodies
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Swap the runtime tunables; invalid values are rejected and the old
    /// config is kept
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<(), GraphError> {
        if let Err(err) = config.validate() {
            warn!("Rejected simulation config: {}", err);
            return Err(err);
        }
        self.config = config;
        Ok(())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Current positions, indexed by vertex id
    pub fn positions(&self) -> Vec<Vec3> {
        self.bodies.iter().map(|b| b.position()).collect()
    }

    pub fn position(&self, vertex: VertexId) -> Option<Vec3> {
        self.bodies.get(vertex.index()).map(|b| b.position())
    }

    pub fn lightness(&self, vertex: VertexId) -> Option<f32> {
        self.graph.vertex(vertex).map(|v| v.lightness())
    }

    pub fn shade(&self, vertex: VertexId) -> Option<Vec4> {
        self.graph.vertex(vertex).map(|v| v.shade())
    }

    /// Positions of the edge's `vertex_a` and `vertex_b`
    pub fn edge_endpoints(&self, edge: EdgeId) -> Option<(Vec3, Vec3)> {
        let edge = self.graph.edge(edge)?;
        Some((
            self.position(edge.vertex_a())?,
            self.position(edge.vertex_b())?,
        ))
    }

    /// Placement of every edge, in edge id order
    pub fn edge_segments(&self) -> Vec<EdgeSegment> {
        let positions = self.positions();
        self.graph
            .edges()
            .iter()
            .map(|edge| edge.segment(&positions))
            .collect()
    }

    pub fn stats(&self) -> LayoutStats {
        let positions = self.positions();
        let errors: Vec<f32> = self
            .graph
            .vertices()
            .iter()
            .zip(&positions)
            .map(|(vertex, position)| {
                (vertex.ideal_height(self.config.floor, self.config.ceiling) - position.y).abs()
            })
            .collect();

        let mean_height_error = if errors.is_empty() {
            0.0
        } else {
            errors.iter().sum::<f32>() / errors.len() as f32
        };

        LayoutStats {
            vertices: self.graph.vertex_count(),
            edges: self.graph.edge_count(),
            mean_degree: self.graph.mean_degree(),
            mean_height_error,
            max_height_error: errors.iter().copied().fold(0.0, f32::max),
            stretched_edges: self
                .graph
                .edges()
                .iter()
                .filter(|edge| edge.length(&positions) > edge.max_length())
                .count(),
        }
    }
}
