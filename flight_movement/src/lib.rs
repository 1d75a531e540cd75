//! `flight_movement`
//!
//! Reference-frame flight for a VR player body:
//! - Device sampling into per-frame snapshots
//! - The pure kinematic velocity model
//! - Activation state machine with edge-triggered toggle
//! - A headless host loop for scripted runs

pub mod input;
pub mod kinematics;
pub mod provider;
pub mod rig;
pub mod sim;

pub use provider::{FlightProvider, MovementOutcome};
pub use rig::FlightRig;
