//! Tracked device abstraction.
//!
//! The flight provider never looks devices up by name; the host injects
//! implementations of these traits. An XR runtime binding would wrap its
//! pose and action APIs; [`SharedNode`] and [`SharedController`] are plain
//! in-memory devices that a host (or a test) updates every frame.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::math::{Vec2, Vec3};

/// A world-space tracked pose: the head camera or a hand controller.
pub trait TrackedNode: Send + Sync {
    /// Direction the node is looking or pointing. Unit length.
    fn forward(&self) -> Vec3;
    /// World-space origin of the node.
    fn position(&self) -> Vec3;
}

/// Digital and analog input of one hand controller.
pub trait ControllerInput: Send + Sync {
    /// Whether the controller is currently tracked and reporting input.
    fn is_active(&self) -> bool;
    fn is_button_pressed(&self, action: &str) -> bool;
    /// 2D analog axis; each component in `[-1, 1]`.
    fn axis(&self, action: &str) -> Vec2;
}

/// Pose snapshot stored by [`SharedNode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePose {
    pub forward: Vec3,
    pub position: Vec3,
}

impl Default for NodePose {
    fn default() -> Self {
        Self {
            forward: -Vec3::Z,
            position: Vec3::ZERO,
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Tracked node whose pose is set by the host. Clones share the pose.
#[derive(Debug, Clone, Default)]
pub struct SharedNode {
    pose: Arc<RwLock<NodePose>>,
}

impl SharedNode {
    pub fn new(forward: Vec3, position: Vec3) -> Self {
        Self {
            pose: Arc::new(RwLock::new(NodePose { forward, position })),
        }
    }

    /// Stores a new forward direction (normalized on the way in).
    pub fn set_forward(&self, forward: Vec3) {
        write(&self.pose).forward = forward.normalize_or_zero();
    }

    pub fn set_position(&self, position: Vec3) {
        write(&self.pose).position = position;
    }

    pub fn pose(&self) -> NodePose {
        *read(&self.pose)
    }
}

impl TrackedNode for SharedNode {
    fn forward(&self) -> Vec3 {
        read(&self.pose).forward
    }

    fn position(&self) -> Vec3 {
        read(&self.pose).position
    }
}

/// Input snapshot stored by [`SharedController`].
///
/// Holds one button and one axis; queries for any other action report
/// released / centered.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub active: bool,
    pub button_action: String,
    pub button_pressed: bool,
    pub axis_action: String,
    pub axis: Vec2,
}

/// Controller whose state is set by the host. Clones share the state.
#[derive(Debug, Clone)]
pub struct SharedController {
    state: Arc<RwLock<ControllerState>>,
}

impl SharedController {
    /// An active controller with the given button and axis action names.
    pub fn new(button_action: &str, axis_action: &str) -> Self {
        Self {
            state: Arc::new(RwLock::new(ControllerState {
                active: true,
                button_action: button_action.to_string(),
                button_pressed: false,
                axis_action: axis_action.to_string(),
                axis: Vec2::ZERO,
            })),
        }
    }

    pub fn set_active(&self, active: bool) {
        write(&self.state).active = active;
    }

    pub fn set_button(&self, pressed: bool) {
        write(&self.state).button_pressed = pressed;
    }

    /// Stores the stick position, clamped into the axis range.
    pub fn set_axis(&self, axis: Vec2) {
        write(&self.state).axis = axis.clamp_axis();
    }

    pub fn state(&self) -> ControllerState {
        read(&self.state).clone()
    }
}

impl ControllerInput for SharedController {
    fn is_active(&self) -> bool {
        read(&self.state).active
    }

    fn is_button_pressed(&self, action: &str) -> bool {
        let state = read(&self.state);
        state.button_action == action && state.button_pressed
    }

    fn axis(&self, action: &str) -> Vec2 {
        let state = read(&self.state);
        if state.axis_action == action {
            state.axis
        } else {
            Vec2::ZERO
        }
    }
}
