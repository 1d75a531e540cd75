//! Headless host loop.
//!
//! Drives a `FlightProvider` the way an engine would: sample devices, run the
//! provider, and if it did not consume the frame apply gravity and move the
//! body through the resolver. Device input comes from a fixed pilot script
//! so runs are reproducible.

use std::time::Duration;

use anyhow::Context;
use flight_shared::{
    config::SimConfig,
    event::FlightEvent,
    math::{Vec2, Vec3},
    physics::{DisplacementResolver, GroundPlaneResolver},
    tracking::{SharedController, SharedNode},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::{provider::FlightProvider, rig::FlightRig};

/// Gravity applied by the host when flight leaves the frame unconsumed.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

const HEAD_HEIGHT: f32 = 1.7;
const HAND_HEIGHT: f32 = 1.1;
const HAND_SPREAD: f32 = 0.35;
const MIN_FRAME_PERIOD: Duration = Duration::from_nanos(1);

/// Device handles the pilot script writes to.
struct SimDevices {
    head: SharedNode,
    left: SharedNode,
    right: SharedNode,
    controller: SharedController,
}

impl SimDevices {
    fn new(button: &str, stick: &str) -> Self {
        Self {
            head: SharedNode::new(-Vec3::Z, Vec3::new(0.0, HEAD_HEIGHT, 0.0)),
            left: SharedNode::new(-Vec3::Z, Vec3::new(-HAND_SPREAD, HAND_HEIGHT, 0.0)),
            right: SharedNode::new(-Vec3::Z, Vec3::new(HAND_SPREAD, HAND_HEIGHT, 0.0)),
            controller: SharedController::new(button, stick),
        }
    }

    fn rig(&self) -> FlightRig {
        FlightRig::new()
            .with_head(self.head.clone())
            .with_left_hand(self.left.clone())
            .with_right_hand(self.right.clone())
            .with_controller(self.controller.clone())
    }

    /// Places the head and hands around the body origin.
    fn follow(&self, body: Vec3) {
        self.head.set_position(body + Vec3::new(0.0, HEAD_HEIGHT, 0.0));
        self.left
            .set_position(body + Vec3::new(-HAND_SPREAD, HAND_HEIGHT, 0.0));
        self.right
            .set_position(body + Vec3::new(HAND_SPREAD, HAND_HEIGHT, 0.0));
    }
}

/// Pilot script, expressed as fractions of the run:
/// toggle on, climb forward, level off, strafe, coast, toggle off.
fn drive(devices: &SimDevices, frame: u32, ticks: u32) {
    let t = frame as f32 / ticks.max(1) as f32;

    let pressed = (0.02..0.05).contains(&t) || (0.90..0.93).contains(&t);
    devices.controller.set_button(pressed);

    let stick = if (0.05..0.60).contains(&t) {
        Vec2::new(0.0, 1.0)
    } else if (0.60..0.80).contains(&t) {
        Vec2::new(1.0, 0.0)
    } else {
        Vec2::ZERO
    };
    devices.controller.set_axis(stick);

    let aim = if (0.05..0.30).contains(&t) {
        // Pointing roughly 20 degrees above the horizon.
        Vec3::new(0.0, 0.34, -0.94)
    } else {
        -Vec3::Z
    };
    devices.left.set_forward(aim);
    devices.right.set_forward(aim);
}

/// Summary of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub frames: u32,
    pub active_frames: u32,
    pub consumed_frames: u32,
    pub max_speed: f32,
    pub final_velocity: Vec3,
    pub final_position: Vec3,
    /// Frame index and event, in emission order.
    pub events: Vec<(u32, FlightEvent)>,
}

/// Runs `cfg.ticks` frames. With `realtime`, frames are paced at
/// `cfg.tick_hz`; otherwise they run back to back.
pub async fn run(cfg: &SimConfig, realtime: bool) -> anyhow::Result<SimReport> {
    cfg.flight.validate().context("invalid flight parameters")?;

    let dt = cfg.delta_time();
    let devices = SimDevices::new(&cfg.flight.flight_button, &cfg.flight.flight_stick);
    let mut provider = FlightProvider::new(cfg.flight.clone(), devices.rig());
    let mut resolver =
        GroundPlaneResolver::new(Vec3::new(0.0, cfg.ground_height, 0.0), cfg.ground_height);
    let mut velocity = Vec3::ZERO;

    let mut report = SimReport {
        frames: 0,
        active_frames: 0,
        consumed_frames: 0,
        max_speed: 0.0,
        final_velocity: Vec3::ZERO,
        final_position: resolver.position,
        events: Vec::new(),
    };

    let mut pacing = realtime.then(|| {
        // Very high tick rates round to a zero period, which interval rejects.
        let period = Duration::from_secs_f32(dt).max(MIN_FRAME_PERIOD);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval
    });

    for frame in 0..cfg.ticks {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }

        devices.follow(resolver.position);
        drive(&devices, frame, cfg.ticks);

        let outcome = provider.physics_movement(dt, velocity, false, &mut resolver);
        velocity = if outcome.consumed {
            report.consumed_frames += 1;
            outcome.velocity
        } else {
            resolver.resolve(outcome.velocity + GRAVITY * dt, dt)
        };

        if provider.is_active() {
            report.active_frames += 1;
        }
        for event in provider.drain_events() {
            info!(frame, ?event, "Flight event");
            report.events.push((frame, event));
        }
        report.max_speed = report.max_speed.max(velocity.len());
        report.frames += 1;

        if frame % cfg.tick_hz.max(1) == 0 {
            debug!(
                frame,
                speed = velocity.len(),
                height = resolver.position.y,
                "Frame"
            );
        }
    }

    report.final_velocity = velocity;
    report.final_position = resolver.position;
    Ok(report)
}
