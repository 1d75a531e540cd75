//! Fixtures shared by the integration tests.

use flight_movement::FlightRig;
use flight_shared::{
    math::Vec3,
    physics::DisplacementResolver,
    tracking::{SharedController, SharedNode},
};

/// Resolver that records every request and scales the applied velocity.
#[derive(Debug)]
pub struct RecordingResolver {
    pub requests: Vec<Vec3>,
    pub scale: f32,
}

impl RecordingResolver {
    pub fn new(scale: f32) -> Self {
        Self {
            requests: Vec::new(),
            scale,
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.len()
    }
}

impl DisplacementResolver for RecordingResolver {
    fn resolve(&mut self, requested: Vec3, _dt_sec: f32) -> Vec3 {
        self.requests.push(requested);
        requested * self.scale
    }
}

/// Host-side handles to a full rig: head at eye height facing -Z, hands
/// either side of it.
pub struct TestRig {
    pub head: SharedNode,
    pub left: SharedNode,
    pub right: SharedNode,
    pub controller: SharedController,
}

impl TestRig {
    pub fn new() -> Self {
        Self {
            head: SharedNode::new(-Vec3::Z, Vec3::new(0.0, 1.7, 0.0)),
            left: SharedNode::new(-Vec3::Z, Vec3::new(-0.3, 1.1, 0.0)),
            right: SharedNode::new(-Vec3::Z, Vec3::new(0.3, 1.1, 0.0)),
            controller: SharedController::new("by_button", "primary"),
        }
    }

    pub fn rig(&self) -> FlightRig {
        FlightRig::new()
            .with_head(self.head.clone())
            .with_left_hand(self.left.clone())
            .with_right_hand(self.right.clone())
            .with_controller(self.controller.clone())
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}

/// Installs a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
