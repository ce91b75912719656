use super::{Graph, VertexId};
use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::random::RandomPool;
use log::{debug, info};
use rand::Rng;

/// Build a random connected graph.
///
/// A random spanning tree is grown first so every vertex is reachable. Unless
/// the config asks for an acyclic graph, extra edges between not-yet-adjacent
/// vertices are then added until the edges-per-vertex target is met.
pub fn generate<R: Rng + ?Sized>(config: &GraphConfig, rng: &mut R) -> Result<Graph, GraphError> {
    config.validate()?;

    let mut graph = Graph::new();
    for _ in 0..config.vertex_count {
        graph.add_vertex(rng.random::<f32>());
    }

    spanning_phase(&mut graph, config, rng)?;
    if !config.acyclic {
        densification_phase(&mut graph, config, rng)?;
    }

    info!(
        "Generated graph: {} vertices, {} edges, mean degree {:.2}",
        graph.vertex_count(),
        graph.edge_count(),
        graph.mean_degree()
    );

    Ok(graph)
}

/// Attach every vertex, one at a time, to a random already-attached parent
fn spanning_phase<R: Rng + ?Sized>(
    graph: &mut Graph,
    config: &GraphConfig,
    rng: &mut R,
) -> Result<(), GraphError> {
    let mut unconnected: RandomPool<VertexId> = graph.vertices().iter().map(|v| v.id()).collect();
    let mut connected = RandomPool::new();
    connected.push(unconnected.remove_one(rng)?);

    while !unconnected.is_empty() {
        let parent = *connected.get_one(rng)?;
        let child = unconnected.remove_one(rng)?;
        graph.spawn_edge(parent, child, config.edge_max_length, config.edge_stiffness)?;
        connected.push(child);
    }

    Ok(())
}

/// Number of edges densification aims for: `N * average_connectedness`,
/// capped at the edge count of the complete graph
pub fn target_edge_count(config: &GraphConfig) -> usize {
    let n = config.vertex_count;
    let max_edges = n * n.saturating_sub(1) / 2;
    let requested = (n as f32 * config.average_connectedness) as usize;
    max_edges.min(requested)
}

fn densification_phase<R: Rng + ?Sized>(
    graph: &mut Graph,
    config: &GraphConfig,
    rng: &mut R,
) -> Result<(), GraphError> {
    let n = graph.vertex_count();
    let edges_to_spawn = target_edge_count(config);
    debug!(
        "Densifying toward {} edges ({:.2} per vertex)",
        edges_to_spawn,
        edges_to_spawn as f32 / n as f32
    );

    while graph.edge_count() < edges_to_spawn {
        let mut open: RandomPool<VertexId> = graph
            .vertices()
            .iter()
            .filter(|v| v.degree() < n - 1)
            .map(|v| v.id())
            .collect();

        let Ok(v1) = open.remove_one(rng) else {
            debug!("Every vertex is saturated, stopping at {} edges", graph.edge_count());
            break;
        };

        let mut candidates: RandomPool<VertexId> = open
            .iter()
            .copied()
            .filter(|&v| !graph.are_adjacent(v1, v))
            .collect();

        let Ok(v2) = candidates.remove_one(rng) else {
            debug!("No free partner for {}, stopping at {} edges", v1, graph.edge_count());
            break;
        };

        graph.spawn_edge(v1, v2, config.edge_max_length, config.edge_stiffness)?;
    }

    Ok(())
}
