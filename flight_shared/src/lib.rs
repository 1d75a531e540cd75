//! `flight_shared`
//!
//! Shared libraries used by the flight movement provider and its hosts.
//!
//! Design goals:
//! - Deterministic, total math (no NaN from degenerate input).
//! - Clear separation of concerns (math, config, events, devices, physics).
//! - Traits for abstraction and dependency injection.
//! - No `unsafe`.

pub mod config;
pub mod event;
pub mod math;
pub mod physics;
pub mod tracking;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::config::*;
    pub use crate::event::*;
    pub use crate::math::*;
    pub use crate::physics::*;
    pub use crate::tracking::*;
}
