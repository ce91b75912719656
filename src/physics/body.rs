use super::PhysicsBody;
use bevy::math::Vec3;

/// Preset body tunings
pub mod presets {
    /// Settles quickly, little overshoot (default)
    pub const CALM: BodyPreset = BodyPreset {
        mass: 1.0,
        damping: 0.90,
    };

    /// Heavy and sluggish
    pub const HEAVY: BodyPreset = BodyPreset {
        mass: 4.0,
        damping: 0.75,
    };

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct BodyPreset {
        pub mass: f32,
        /// Per-step velocity multiplier (0.0 = full damping, 1.0 = no damping)
        pub damping: f32,
    }
}

pub use presets::BodyPreset;

/// Reference point-mass body: accumulates forces, then integrates them with
/// damped semi-implicit Euler
#[derive(Debug, Clone, PartialEq)]
pub struct NodePhysics {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated forces this tick
    pub forces: Vec3,
    pub mass: f32,
    pub damping: f32,
}

impl Default for NodePhysics {
    fn default() -> Self {
        NodePhysics::from_preset(Vec3::ZERO, presets::CALM)
    }
}

impl NodePhysics {
    pub fn at(position: Vec3) -> Self {
        NodePhysics {
            position,
            ..Default::default()
        }
    }

    pub fn from_preset(position: Vec3, preset: BodyPreset) -> Self {
        NodePhysics {
            position,
            velocity: Vec3::ZERO,
            forces: Vec3::ZERO,
            mass: preset.mass.max(f32::EPSILON),
            damping: preset.damping.clamp(0.0, 1.0),
        }
    }

    /// Apply an impulse (instant velocity change)
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    /// Advance by `dt` seconds and clear the accumulated forces
    pub fn integrate(&mut self, dt: f32) {
        let acceleration = self.forces / self.mass;
        self.velocity += acceleration * dt;
        self.velocity *= self.damping;
        self.position += self.velocity * dt;
        self.forces = Vec3::ZERO;
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }
}

impl PhysicsBody for NodePhysics {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn apply_force(&mut self, force: Vec3) {
        self.forces += force;
    }
}

/// Integrate every body by `dt`
pub fn integrate_all(bodies: &mut [NodePhysics], dt: f32) {
    for body in bodies {
        body.integrate(dt);
    }
}
