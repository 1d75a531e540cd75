//! Reference-frame flight model.
//!
//! Pure per-frame velocity pipeline:
//! 1. pitch: vertical tilt of the pitch source, along the up axis
//! 2. bearing: horizontal facing of the bearing source
//! 3. basis: `forward = normalize(normalize(bearing) + pitch)`, `side = forward × up`
//! 4. heading from the stick (`y` forward/back, `x` strafe)
//! 5. drag, traction toward `heading * speed_scale`, acceleration
//! 6. optional guidance toward `forward`
//!
//! Every function here is total; degenerate directions collapse to zero
//! instead of producing NaN.

use flight_shared::{
    config::{BearingSource, FlightParameters, PitchSource},
    math::{Vec2, Vec3},
};

use crate::input::FrameInputs;

/// Flight direction and its strafe axis for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightBasis {
    pub forward: Vec3,
    pub side: Vec3,
}

/// Vertical component of the pitch source's facing, along `up`.
///
/// `forward` vectors are look directions (the negated back axis of the
/// source's basis), so `forward · up` equals `-back.y` for a +Y up axis.
/// Looking up yields a vector along `+up`, looking down along `-up`.
pub fn pitch_vector(pitch: PitchSource, inputs: &FrameInputs) -> Vec3 {
    let source = match pitch {
        PitchSource::Head => inputs.head_forward,
        PitchSource::Controller => inputs.controller_forward,
    };
    inputs.up * source.dot(inputs.up)
}

/// Horizontal facing of the bearing source. Not normalized except in body
/// mode.
pub fn bearing_vector(bearing: BearingSource, inputs: &FrameInputs) -> Vec3 {
    match bearing {
        BearingSource::Head => inputs.head_forward.project_horizontal(inputs.up),
        BearingSource::Controller => inputs.controller_forward.project_horizontal(inputs.up),
        BearingSource::Body => {
            let left_to_right = (inputs.right_controller_position
                - inputs.left_controller_position)
                .project_horizontal(inputs.up);
            left_to_right
                .normalize_or_zero()
                .rotate_quarter_turn(inputs.up)
        }
    }
}

/// Blends the un-normalized pitch onto the normalized bearing.
pub fn flight_basis(bearing: Vec3, pitch: Vec3, up: Vec3) -> FlightBasis {
    let forward = (bearing.normalize_or_zero() + pitch).normalize_or_zero();
    FlightBasis {
        forward,
        side: forward.cross(up),
    }
}

pub fn heading(basis: &FlightBasis, stick: Vec2) -> Vec3 {
    basis.forward * stick.y + basis.side * stick.x
}

/// Drag, traction toward the commanded speed, then acceleration.
pub fn integrate(velocity: Vec3, heading: Vec3, params: &FlightParameters, dt: f32) -> Vec3 {
    let mut v = velocity * (1.0 - params.drag * dt);
    // lerp clamps the factor, so large traction snaps without overshoot.
    v = v.lerp(heading * params.speed_scale, params.speed_traction * dt);
    v += heading * (params.acceleration_scale * dt);
    v
}

/// Steers `velocity` toward `forward` while keeping its speed.
pub fn apply_guidance(velocity: Vec3, forward: Vec3, guidance: f32, dt: f32) -> Vec3 {
    if guidance <= 0.0 {
        return velocity;
    }
    let velocity_forward = forward * velocity.len();
    velocity.lerp(velocity_forward, guidance * dt)
}

/// Runs the whole pipeline and returns the candidate velocity for the frame.
pub fn flight_velocity(params: &FlightParameters, inputs: &FrameInputs) -> Vec3 {
    let pitch = pitch_vector(params.pitch, inputs);
    let bearing = bearing_vector(params.bearing, inputs);
    let basis = flight_basis(bearing, pitch, inputs.up);
    let heading = heading(&basis, inputs.joystick);

    let v = integrate(
        inputs.current_velocity,
        heading,
        params,
        inputs.delta_time,
    );
    apply_guidance(v, basis.forward, params.guidance, inputs.delta_time)
}
