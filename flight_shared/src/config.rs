//! Configuration system.
//!
//! Loads flight configuration from JSON strings (file IO left to app).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which hand controller drives flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControllerSide {
    #[default]
    Left,
    Right,
}

impl ControllerSide {
    /// The other hand.
    pub fn opposite(self) -> Self {
        match self {
            ControllerSide::Left => ControllerSide::Right,
            ControllerSide::Right => ControllerSide::Left,
        }
    }
}

/// Reference whose vertical tilt defines climb and dive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PitchSource {
    Head,
    #[default]
    Controller,
}

/// Reference whose horizontal facing defines the flight direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BearingSource {
    Head,
    #[default]
    Controller,
    /// Torso facing inferred from the line between both hands.
    Body,
}

/// Tunable flight parameters. Immutable for the lifetime of a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightParameters {
    /// Controller that toggles and steers flight.
    pub controller: ControllerSide,
    /// Button action that toggles flight.
    pub flight_button: String,
    /// Axis action that steers flight.
    pub flight_stick: String,
    pub pitch: PitchSource,
    pub bearing: BearingSource,
    /// Target speed reached at full stick deflection.
    pub speed_scale: f32,
    /// Rate at which velocity is pulled toward the target speed.
    pub speed_traction: f32,
    /// Acceleration applied along the heading, per second.
    pub acceleration_scale: f32,
    /// Fraction of velocity lost per second.
    pub drag: f32,
    /// Rate at which velocity is steered toward the flight direction.
    pub guidance: f32,
    /// Flight owns the body's displacement for the frame.
    pub exclusive: bool,
}

impl Default for FlightParameters {
    fn default() -> Self {
        Self {
            controller: ControllerSide::Left,
            flight_button: default_flight_button(),
            flight_stick: default_flight_stick(),
            pitch: PitchSource::Controller,
            bearing: BearingSource::Controller,
            speed_scale: 5.0,
            speed_traction: 3.0,
            acceleration_scale: 0.0,
            drag: 0.1,
            guidance: 0.0,
            exclusive: true,
        }
    }
}

fn default_flight_button() -> String {
    "by_button".to_string()
}

fn default_flight_stick() -> String {
    "primary".to_string()
}

impl FlightParameters {
    /// Parses parameters from JSON. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Checks that every rate is a non-negative finite number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rates = [
            ("speed_scale", self.speed_scale),
            ("speed_traction", self.speed_traction),
            ("acceleration_scale", self.acceleration_scale),
            ("drag", self.drag),
            ("guidance", self.guidance),
        ];
        for (field, value) in rates {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if self.flight_button.is_empty() {
            return Err(ConfigError::EmptyAction {
                field: "flight_button",
            });
        }
        if self.flight_stick.is_empty() {
            return Err(ConfigError::EmptyAction {
                field: "flight_stick",
            });
        }
        Ok(())
    }
}

/// Root configuration for the headless simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fixed simulation tick rate.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// Number of frames to simulate.
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    /// Height of the ground plane used by the exclusive-mode resolver.
    #[serde(default)]
    pub ground_height: f32,
    #[serde(default)]
    pub flight: FlightParameters,
}

fn default_tick_hz() -> u32 {
    90
}

fn default_ticks() -> u32 {
    360
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            ticks: default_ticks(),
            ground_height: 0.0,
            flight: FlightParameters::default(),
        }
    }
}

impl SimConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Fixed frame duration in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_hz.max(1) as f32
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Negative { field: &'static str, value: f32 },
    NotFinite { field: &'static str },
    EmptyAction { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            ConfigError::NotFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::EmptyAction { field } => write!(f, "{} must name an action", field),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(FlightParameters::default().validate(), Ok(()));
    }

    #[test]
    fn partial_json_takes_defaults() {
        let params =
            FlightParameters::from_json_str(r#"{ "bearing": "body", "exclusive": false }"#)
                .unwrap();
        assert_eq!(params.bearing, BearingSource::Body);
        assert!(!params.exclusive);
        assert_eq!(params.speed_scale, 5.0);
        assert_eq!(params.flight_stick, "primary");
    }

    #[test]
    fn negative_drag_rejected() {
        let params = FlightParameters {
            drag: -0.5,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::Negative {
                field: "drag",
                value: -0.5
            })
        );
    }

    #[test]
    fn nan_guidance_rejected() {
        let params = FlightParameters {
            guidance: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::NotFinite { field: "guidance" })
        );
    }

    #[test]
    fn sim_config_from_json() {
        let cfg = SimConfig::from_json_str(r#"{ "tick_hz": 60, "flight": { "drag": 0.2 } }"#)
            .unwrap();
        assert_eq!(cfg.tick_hz, 60);
        assert_eq!(cfg.ticks, 360);
        assert_eq!(cfg.flight.drag, 0.2);
        assert!((cfg.delta_time() - 1.0 / 60.0).abs() < 1.0e-7);
    }
}
