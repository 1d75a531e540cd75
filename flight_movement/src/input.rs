//! Input handling.
//!
//! Each frame the host's devices are sampled once into a `FrameInputs`
//! snapshot; the flight model only ever reads that snapshot, which keeps the
//! math deterministic and testable without devices.

use flight_shared::{
    config::{ControllerSide, FlightParameters},
    math::{Vec2, Vec3},
    tracking::{ControllerInput, TrackedNode},
};

/// Everything the flight model reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Player up axis.
    pub up: Vec3,
    pub head_forward: Vec3,
    /// Facing of the controller that drives flight.
    pub controller_forward: Vec3,
    pub left_controller_position: Vec3,
    pub right_controller_position: Vec3,
    /// Stick of the flight controller: `y` forward/back, `x` strafe.
    pub joystick: Vec2,
    pub button_pressed: bool,
    /// Whether the flight controller is tracked this frame.
    pub controller_active: bool,
    pub current_velocity: Vec3,
    /// Frame duration in seconds.
    pub delta_time: f32,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            up: Vec3::Y,
            head_forward: -Vec3::Z,
            controller_forward: -Vec3::Z,
            left_controller_position: Vec3::ZERO,
            right_controller_position: Vec3::ZERO,
            joystick: Vec2::ZERO,
            button_pressed: false,
            controller_active: true,
            current_velocity: Vec3::ZERO,
            delta_time: 1.0 / 90.0,
        }
    }
}

/// Borrowed view of the devices needed to sample a frame.
pub struct DeviceSet<'a> {
    pub head: &'a dyn TrackedNode,
    pub left: Option<&'a dyn TrackedNode>,
    pub right: Option<&'a dyn TrackedNode>,
    pub controller: &'a dyn ControllerInput,
}

impl DeviceSet<'_> {
    /// Node of the selected flight hand, if present.
    pub fn flight_hand(&self, side: ControllerSide) -> Option<&dyn TrackedNode> {
        match side {
            ControllerSide::Left => self.left,
            ControllerSide::Right => self.right,
        }
    }
}

fn node_position(node: Option<&dyn TrackedNode>) -> Vec3 {
    node.map_or(Vec3::ZERO, |n| n.position())
}

/// Samples every device once into a snapshot for this frame.
///
/// [`FlightRig::devices`](crate::rig::FlightRig::devices) only hands out a
/// set whose flight hand (and, for body bearing, other hand) is present; an
/// unused missing hand samples as the origin.
pub fn sample(
    devices: &DeviceSet<'_>,
    params: &FlightParameters,
    up: Vec3,
    current_velocity: Vec3,
    delta_time: f32,
) -> FrameInputs {
    let controller_forward = devices
        .flight_hand(params.controller)
        .map_or(Vec3::ZERO, |n| n.forward());

    FrameInputs {
        up: up.normalize_or_zero(),
        head_forward: devices.head.forward(),
        controller_forward,
        left_controller_position: node_position(devices.left),
        right_controller_position: node_position(devices.right),
        joystick: devices.controller.axis(&params.flight_stick).clamp_axis(),
        button_pressed: devices.controller.is_button_pressed(&params.flight_button),
        controller_active: devices.controller.is_active(),
        current_velocity,
        delta_time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight_shared::tracking::{SharedController, SharedNode};

    #[test]
    fn sample_reads_selected_hand() {
        let head = SharedNode::new(Vec3::X, Vec3::new(0.0, 1.7, 0.0));
        let left = SharedNode::new(-Vec3::Z, Vec3::new(-0.3, 1.0, 0.0));
        let right = SharedNode::new(Vec3::Y, Vec3::new(0.3, 1.0, 0.0));
        let ctrl = SharedController::new("by_button", "primary");
        ctrl.set_axis(Vec2::new(0.25, -1.0));
        ctrl.set_button(true);

        let devices = DeviceSet {
            head: &head,
            left: Some(&left),
            right: Some(&right),
            controller: &ctrl,
        };
        let params = FlightParameters {
            controller: ControllerSide::Right,
            ..Default::default()
        };
        let inputs = sample(&devices, &params, Vec3::Y, Vec3::X, 0.5);

        assert_eq!(inputs.head_forward, Vec3::X);
        assert_eq!(inputs.controller_forward, Vec3::Y);
        assert_eq!(inputs.left_controller_position, Vec3::new(-0.3, 1.0, 0.0));
        assert_eq!(inputs.right_controller_position, Vec3::new(0.3, 1.0, 0.0));
        assert_eq!(inputs.joystick, Vec2::new(0.25, -1.0));
        assert!(inputs.button_pressed);
        assert!(inputs.controller_active);
        assert_eq!(inputs.current_velocity, Vec3::X);
        assert_eq!(inputs.delta_time, 0.5);
    }

    #[test]
    fn missing_hand_samples_as_zero() {
        let head = SharedNode::default();
        let ctrl = SharedController::new("by_button", "primary");
        let devices = DeviceSet {
            head: &head,
            left: None,
            right: None,
            controller: &ctrl,
        };
        let inputs = sample(&devices, &FlightParameters::default(), Vec3::Y, Vec3::ZERO, 0.1);
        assert_eq!(inputs.controller_forward, Vec3::ZERO);
        assert_eq!(inputs.left_controller_position, Vec3::ZERO);
    }
}
