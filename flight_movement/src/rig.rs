//! Injected collaborators.
//!
//! A `FlightRig` holds the devices the host hands to the provider at setup.
//! Any of them may be missing; the provider then stays inactive and
//! `configuration_warning` explains what is wrong.

use std::sync::Arc;

use flight_shared::{
    config::{BearingSource, ControllerSide, FlightParameters},
    tracking::{ControllerInput, TrackedNode},
};

use crate::input::DeviceSet;

/// Head, both hands and the flight controller's input.
#[derive(Clone, Default)]
pub struct FlightRig {
    head: Option<Arc<dyn TrackedNode>>,
    left: Option<Arc<dyn TrackedNode>>,
    right: Option<Arc<dyn TrackedNode>>,
    controller: Option<Arc<dyn ControllerInput>>,
}

impl FlightRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_head(mut self, head: impl TrackedNode + 'static) -> Self {
        self.head = Some(Arc::new(head));
        self
    }

    pub fn with_left_hand(mut self, node: impl TrackedNode + 'static) -> Self {
        self.left = Some(Arc::new(node));
        self
    }

    pub fn with_right_hand(mut self, node: impl TrackedNode + 'static) -> Self {
        self.right = Some(Arc::new(node));
        self
    }

    /// Input of the controller selected by `FlightParameters::controller`.
    pub fn with_controller(mut self, input: impl ControllerInput + 'static) -> Self {
        self.controller = Some(Arc::new(input));
        self
    }

    fn hand(&self, side: ControllerSide) -> Option<&Arc<dyn TrackedNode>> {
        match side {
            ControllerSide::Left => self.left.as_ref(),
            ControllerSide::Right => self.right.as_ref(),
        }
    }

    /// Borrows the devices for one frame. `None` when the head, the
    /// controller input, the flight hand or (body bearing) the other hand is
    /// missing.
    pub fn devices(&self, params: &FlightParameters) -> Option<DeviceSet<'_>> {
        self.hand(params.controller)?;
        if params.bearing == BearingSource::Body {
            self.hand(params.controller.opposite())?;
        }
        Some(DeviceSet {
            head: self.head.as_deref()?,
            left: self.left.as_deref(),
            right: self.right.as_deref(),
            controller: self.controller.as_deref()?,
        })
    }

    /// Setup-time diagnostic. Returns one line per problem, or `None` when
    /// the rig can drive flight with `params`.
    pub fn configuration_warning(&self, params: &FlightParameters) -> Option<String> {
        let mut problems = Vec::new();

        if self.head.is_none() {
            problems.push("Unable to find head node".to_string());
        }
        if self.hand(params.controller).is_none() {
            problems.push(format!(
                "Unable to find {} controller node",
                side_name(params.controller)
            ));
        }
        if self.controller.is_none() {
            problems.push("Unable to find flight controller input".to_string());
        }
        if params.bearing == BearingSource::Body && self.hand(params.controller.opposite()).is_none()
        {
            problems.push(format!(
                "Body bearing requires the {} controller node",
                side_name(params.controller.opposite())
            ));
        }
        if let Err(e) = params.validate() {
            problems.push(format!("Invalid flight parameters: {}", e));
        }

        if problems.is_empty() {
            None
        } else {
            Some(problems.join("\n"))
        }
    }
}

fn side_name(side: ControllerSide) -> &'static str {
    match side {
        ControllerSide::Left => "left",
        ControllerSide::Right => "right",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight_shared::tracking::{SharedController, SharedNode};

    fn full_rig() -> FlightRig {
        FlightRig::new()
            .with_head(SharedNode::default())
            .with_left_hand(SharedNode::default())
            .with_right_hand(SharedNode::default())
            .with_controller(SharedController::new("by_button", "primary"))
    }

    #[test]
    fn complete_rig_is_valid() {
        let rig = full_rig();
        assert_eq!(rig.configuration_warning(&FlightParameters::default()), None);
        assert!(rig.devices(&FlightParameters::default()).is_some());
    }

    #[test]
    fn empty_rig_reports_every_missing_device() {
        let warning = FlightRig::new()
            .configuration_warning(&FlightParameters::default())
            .unwrap();
        assert!(warning.contains("head node"));
        assert!(warning.contains("left controller node"));
        assert!(warning.contains("flight controller input"));
        assert!(FlightRig::new()
            .devices(&FlightParameters::default())
            .is_none());
    }

    #[test]
    fn body_bearing_needs_both_hands() {
        let rig = FlightRig::new()
            .with_head(SharedNode::default())
            .with_right_hand(SharedNode::default())
            .with_controller(SharedController::new("by_button", "primary"));
        let params = FlightParameters {
            controller: ControllerSide::Right,
            bearing: BearingSource::Body,
            ..Default::default()
        };
        assert_eq!(
            rig.configuration_warning(&params).as_deref(),
            Some("Body bearing requires the left controller node")
        );
        assert!(rig.devices(&params).is_none());
        let controller_bearing = FlightParameters {
            bearing: BearingSource::Controller,
            ..params
        };
        assert!(rig.devices(&controller_bearing).is_some());
    }

    #[test]
    fn invalid_parameters_are_reported() {
        let params = FlightParameters {
            speed_scale: -1.0,
            ..Default::default()
        };
        let warning = full_rig().configuration_warning(&params).unwrap();
        assert!(warning.starts_with("Invalid flight parameters: speed_scale"));
    }
}
