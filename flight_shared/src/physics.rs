//! Displacement resolution.
//!
//! Exclusive flight hands its velocity to a resolver that moves the body
//! against collision geometry and reports the velocity actually achieved.
//! Real hosts back this with their character controller.

use tracing::debug;

use crate::math::Vec3;

/// Collision-aware mover.
pub trait DisplacementResolver: Send + Sync {
    /// Moves the body by `requested * dt_sec` and returns the velocity that
    /// was actually applied.
    fn resolve(&mut self, requested: Vec3, dt_sec: f32) -> Vec3;
}

/// Resolver with no collision geometry.
#[derive(Debug, Default)]
pub struct PassThroughResolver;

impl DisplacementResolver for PassThroughResolver {
    fn resolve(&mut self, requested: Vec3, _dt_sec: f32) -> Vec3 {
        requested
    }
}

/// Moves a point body above an infinite horizontal floor at `ground_height`.
///
/// Motion into the floor is stopped: the body rests on the plane and the
/// downward part of its velocity is removed.
#[derive(Debug, Clone)]
pub struct GroundPlaneResolver {
    pub position: Vec3,
    pub ground_height: f32,
}

impl GroundPlaneResolver {
    pub fn new(position: Vec3, ground_height: f32) -> Self {
        Self {
            position,
            ground_height,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.position.y <= self.ground_height
    }
}

impl DisplacementResolver for GroundPlaneResolver {
    fn resolve(&mut self, requested: Vec3, dt_sec: f32) -> Vec3 {
        let mut next = self.position + requested * dt_sec;
        let mut applied = requested;
        if next.y < self.ground_height {
            next.y = self.ground_height;
            if applied.y < 0.0 {
                applied.y = 0.0;
            }
            debug!(x = next.x, z = next.z, "Body hit ground plane");
        }
        self.position = next;
        applied
    }
}
