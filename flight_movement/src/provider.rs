//! Flight movement provider.
//!
//! Wraps the kinematic model in a two-state activation machine:
//! - a rising edge on the flight button toggles `Inactive` <-> `Active`;
//! - a disabled host, an untracked controller or a missing device forces
//!   `Inactive` in the same frame and skips the velocity computation;
//! - every transition queues exactly one `FlightEvent`.
//!
//! The host calls [`FlightProvider::physics_movement`] once per physics
//! tick, before any other movement providers.

use flight_shared::{
    config::FlightParameters,
    event::{EventQueue, FlightEvent},
    math::Vec3,
    physics::DisplacementResolver,
};
use tracing::{debug, info, warn};

use crate::{
    input::{self, FrameInputs},
    kinematics,
    rig::FlightRig,
};

/// Activation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlightActivity {
    #[default]
    Inactive,
    Active,
}

/// Mutable per-session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightState {
    pub activity: FlightActivity,
    /// Button state seen by the last toggle check.
    pub was_button_pressed: bool,
}

impl FlightState {
    pub fn is_active(&self) -> bool {
        self.activity == FlightActivity::Active
    }
}

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementOutcome {
    /// Body velocity after this provider ran.
    pub velocity: Vec3,
    /// Movement is complete for the frame; later providers must not run.
    pub consumed: bool,
}

impl MovementOutcome {
    fn pass(velocity: Vec3) -> Self {
        Self {
            velocity,
            consumed: false,
        }
    }
}

/// Per-frame flight velocity provider.
pub struct FlightProvider {
    params: FlightParameters,
    rig: FlightRig,
    state: FlightState,
    events: EventQueue,
    up: Vec3,
    /// Parameters failed validation; the provider never flies.
    misconfigured: bool,
}

impl FlightProvider {
    /// Creates an inactive provider. Configuration problems are logged and
    /// leave the provider inert rather than failing.
    pub fn new(params: FlightParameters, rig: FlightRig) -> Self {
        if let Some(warning) = rig.configuration_warning(&params) {
            warn!(%warning, "Flight provider misconfigured");
        }
        let misconfigured = params.validate().is_err();
        Self {
            params,
            rig,
            state: FlightState::default(),
            events: EventQueue::default(),
            up: Vec3::Y,
            misconfigured,
        }
    }

    pub fn params(&self) -> &FlightParameters {
        &self.params
    }

    pub fn state(&self) -> FlightState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Sets the player's up axis used by the flight basis.
    pub fn set_up_axis(&mut self, up: Vec3) {
        self.up = up.normalize_or_zero();
    }

    /// See [`FlightRig::configuration_warning`].
    pub fn configuration_warning(&self) -> Option<String> {
        self.rig.configuration_warning(&self.params)
    }

    /// Forces the activation state. Queues an event only on a real change.
    pub fn set_active(&mut self, active: bool) {
        let next = if active {
            FlightActivity::Active
        } else {
            FlightActivity::Inactive
        };
        if next == self.state.activity {
            return;
        }
        self.state.activity = next;
        match next {
            FlightActivity::Active => {
                info!("Flight started");
                self.events.push(FlightEvent::Started);
            }
            FlightActivity::Inactive => {
                info!("Flight finished");
                self.events.push(FlightEvent::Finished);
            }
        }
    }

    /// Drains queued transition events.
    pub fn drain_events(&mut self) -> Vec<FlightEvent> {
        self.events.drain()
    }

    /// Samples the rig and runs one frame.
    pub fn physics_movement(
        &mut self,
        delta_time: f32,
        current_velocity: Vec3,
        disabled: bool,
        resolver: &mut dyn DisplacementResolver,
    ) -> MovementOutcome {
        let inputs = self.rig.devices(&self.params).map(|devices| {
            input::sample(&devices, &self.params, self.up, current_velocity, delta_time)
        });
        match inputs {
            Some(inputs) => self.update(&inputs, disabled, resolver),
            None => {
                self.set_active(false);
                MovementOutcome::pass(current_velocity)
            }
        }
    }

    /// Runs one frame against an already sampled snapshot.
    pub fn update(
        &mut self,
        inputs: &FrameInputs,
        disabled: bool,
        resolver: &mut dyn DisplacementResolver,
    ) -> MovementOutcome {
        if self.misconfigured {
            self.set_active(false);
            return MovementOutcome::pass(inputs.current_velocity);
        }
        if disabled || !inputs.controller_active {
            if self.is_active() && !inputs.controller_active {
                debug!("Flight controller lost tracking");
            }
            self.set_active(false);
            return MovementOutcome::pass(inputs.current_velocity);
        }

        let pressed = inputs.button_pressed;
        if pressed && !self.state.was_button_pressed {
            self.set_active(!self.is_active());
        }
        self.state.was_button_pressed = pressed;

        if !self.is_active() {
            return MovementOutcome::pass(inputs.current_velocity);
        }

        let velocity = kinematics::flight_velocity(&self.params, inputs);
        if self.params.exclusive {
            let applied = resolver.resolve(velocity, inputs.delta_time);
            return MovementOutcome {
                velocity: applied,
                consumed: true,
            };
        }
        MovementOutcome::pass(velocity)
    }
}
