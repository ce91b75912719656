mod body;

pub use body::{BodyPreset, NodePhysics, integrate_all, presets};

use bevy::math::Vec3;

/// The physical body behind a vertex.
///
/// The layout only reads positions and hands out forces; whoever implements
/// this owns mass, damping and the actual integration step.
pub trait PhysicsBody {
    fn position(&self) -> Vec3;

    /// Apply `force` for the current tick
    fn apply_force(&mut self, force: Vec3);
}
