//! Buoyant graph layout.
//!
//! Generates a random connected graph and lays it out with a stylized force
//! simulation: vertices repel each other in proportion to their degree,
//! edges pull once stretched past their rest length, and every vertex floats
//! toward a height picked by its lightness.
//!
//! - `graph`: vertex/edge arena, force contributions, random generation
//! - `random`: weighted and uniform selection helpers
//! - `simulation`: read-then-apply tick driver over `PhysicsBody` values
//! - `physics`: the body capability and a damped point-mass implementation
//! - `plugin`: Bevy glue running the layout in an app's schedule

pub mod config;
pub mod error;
pub mod graph;
pub mod physics;
pub mod plugin;
pub mod random;
pub mod simulation;

pub use config::{GraphConfig, LayoutConfig, SimulationConfig};
pub use error::{ConfigError, GraphError, SelectionError};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use physics::{NodePhysics, PhysicsBody};
pub use plugin::LayoutPlugin;
pub use simulation::{LayoutStats, Simulation, TickReport};
