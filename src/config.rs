//! Layout configuration.
//!
//! Every field has a default, so a JSON file only needs the values it wants
//! to change:
//!
//! ```json
//! { "graph": { "vertex_count": 120, "acyclic": true }, "seed": 42 }
//! ```

use crate::error::{ConfigError, GraphError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Preset layout configurations
pub mod presets {
    use super::{GraphConfig, LayoutConfig, SimulationConfig};

    /// A spanning tree, no extra edges
    pub const TREE: LayoutConfig = LayoutConfig {
        graph: GraphConfig {
            vertex_count: 40,
            acyclic: true,
            average_connectedness: 1.0,
            edge_max_length: 10.0,
            edge_stiffness: 10.0,
        },
        simulation: SimulationConfig::DEFAULT,
        seed: None,
        spawn_radius: 1.0,
    };

    /// A few cycles on top of the tree
    pub const SPARSE: LayoutConfig = LayoutConfig {
        graph: GraphConfig {
            vertex_count: 60,
            acyclic: false,
            average_connectedness: 1.5,
            edge_max_length: 10.0,
            edge_stiffness: 10.0,
        },
        simulation: SimulationConfig::DEFAULT,
        seed: None,
        spawn_radius: 1.0,
    };

    /// Tightly knit graph with shorter, softer links
    pub const DENSE: LayoutConfig = LayoutConfig {
        graph: GraphConfig {
            vertex_count: 30,
            acyclic: false,
            average_connectedness: 6.0,
            edge_max_length: 6.0,
            edge_stiffness: 4.0,
        },
        simulation: SimulationConfig {
            max_force_magnitude: 20.0,
            ..SimulationConfig::DEFAULT
        },
        seed: None,
        spawn_radius: 2.0,
    };
}

/// Inputs to graph generation, read once at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub vertex_count: usize,
    /// Stop after the spanning tree
    pub acyclic: bool,
    /// Target edges per vertex; ignored when `acyclic`
    pub average_connectedness: f32,
    pub edge_max_length: f32,
    pub edge_stiffness: f32,
}

impl GraphConfig {
    pub const DEFAULT: GraphConfig = GraphConfig {
        vertex_count: 50,
        acyclic: false,
        average_connectedness: 2.0,
        edge_max_length: 10.0,
        edge_stiffness: 10.0,
    };

    pub fn validate(&self) -> Result<(), GraphError> {
        if self.vertex_count < 1 {
            return Err(invalid("vertex_count must be at least 1"));
        }
        if !self.average_connectedness.is_finite() || self.average_connectedness < 0.0 {
            return Err(invalid("average_connectedness must be finite and non-negative"));
        }
        if !self.edge_max_length.is_finite() || self.edge_max_length < 0.0 {
            return Err(invalid("edge_max_length must be finite and non-negative"));
        }
        if !self.edge_stiffness.is_finite() || self.edge_stiffness < 0.0 {
            return Err(invalid("edge_stiffness must be finite and non-negative"));
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tunables read every tick; may be swapped while the simulation runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Height of a vertex with lightness 0
    pub floor: f32,
    /// Height of a vertex with lightness 1
    pub ceiling: f32,
    pub repulsion_scale: f32,
    pub pull_scale: f32,
    /// Cap on a vertex's resultant force per second of simulated time
    pub max_force_magnitude: f32,
}

impl SimulationConfig {
    pub const DEFAULT: SimulationConfig = SimulationConfig {
        floor: -10.0,
        ceiling: 10.0,
        repulsion_scale: 1.0,
        pull_scale: 1.0,
        max_force_magnitude: 10.0,
    };

    pub fn validate(&self) -> Result<(), GraphError> {
        if !self.floor.is_finite() || !self.ceiling.is_finite() {
            return Err(invalid("floor and ceiling must be finite"));
        }
        if self.floor > self.ceiling {
            return Err(invalid("floor must not be above ceiling"));
        }
        for (name, value) in [
            ("repulsion_scale", self.repulsion_scale),
            ("pull_scale", self.pull_scale),
            ("max_force_magnitude", self.max_force_magnitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidParameter(format!(
                    "{} must be finite and non-negative",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything needed to start a layout run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub graph: GraphConfig,
    pub simulation: SimulationConfig,
    /// Fixed seed for reproducible runs; fresh entropy when absent
    pub seed: Option<u64>,
    /// Half-extent of the cube vertices are scattered in at startup
    pub spawn_radius: f32,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<(), GraphError> {
        self.graph.validate()?;
        self.simulation.validate()?;
        if !self.spawn_radius.is_finite() || self.spawn_radius < 0.0 {
            return Err(invalid("spawn_radius must be finite and non-negative"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            graph: GraphConfig::DEFAULT,
            simulation: SimulationConfig::DEFAULT,
            seed: None,
            spawn_radius: 1.0,
        }
    }
}

fn invalid(message: &str) -> GraphError {
    GraphError::InvalidParameter(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
        for preset in [presets::TREE, presets::SPARSE, presets::DENSE] {
            assert!(preset.validate().is_ok());
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "graph": { "vertex_count": 12, "acyclic": true }, "seed": 9 }"#;
        let config = LayoutConfig::from_json_str(json).unwrap();

        assert_eq!(config.graph.vertex_count, 12);
        assert!(config.graph.acyclic);
        assert_eq!(config.graph.edge_stiffness, 10.0);
        assert_eq!(config.simulation, SimulationConfig::default());
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.spawn_radius, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let json = presets::DENSE.to_json_string().unwrap();
        assert_eq!(LayoutConfig::from_json_str(&json).unwrap(), presets::DENSE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_vertices = r#"{ "graph": { "vertex_count": 0 } }"#;
        assert!(matches!(
            LayoutConfig::from_json_str(zero_vertices),
            Err(ConfigError::Invalid(GraphError::InvalidParameter(_)))
        ));

        let negative = r#"{ "graph": { "average_connectedness": -1.0 } }"#;
        assert!(LayoutConfig::from_json_str(negative).is_err());

        let inverted = r#"{ "simulation": { "floor": 5.0, "ceiling": -5.0 } }"#;
        assert!(LayoutConfig::from_json_str(inverted).is_err());

        let stiffness = r#"{ "graph": { "edge_stiffness": -2.0 } }"#;
        assert!(LayoutConfig::from_json_str(stiffness).is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            LayoutConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            LayoutConfig::from_path("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
