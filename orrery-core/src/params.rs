//! Simulation parameters
//!
//! The clamp thresholds, softening and merge factor are stability heuristics
//! tuned for render-scale scenes, not physical constants.

use crate::error::SimError;
use std::fmt;
use std::str::FromStr;

/// Process-wide simulation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    pub gravity_base: f64,       // base gravitational constant
    pub gravity_multiplier: f64, // user-controlled G multiplier
    pub speed_multiplier: f64,   // scales frame time fed to the accumulator
    pub softening_sq: f64,       // epsilon^2 added to r^2
    pub max_acceleration: f64,   // acceleration ceiling
    pub max_speed: f64,          // speed ceiling
    pub merge_factor: f64,       // merge when distance < (r_a + r_b) * factor
    pub radius_scale: f64,       // k in radius = k * mass^(1/3)
    pub fixed_dt: f64,           // sub-step duration
    pub max_substeps: u32,       // sub-step cap per advance call
    pub max_frame_dt: f64,       // frame delta clamp
    pub potential_regularizer: f64, // delta in the sampled potential
    pub redshift_scale: f64,     // 1 / c^2 for the cosmetic redshift
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity_base: 40.0,
            gravity_multiplier: 1.0,
            speed_multiplier: 1.0,
            softening_sq: 2.0,
            max_acceleration: 800.0,
            max_speed: 200.0,
            merge_factor: 0.5,
            radius_scale: 0.7,
            fixed_dt: 1.0 / 120.0,
            max_substeps: 8,
            max_frame_dt: 0.05,
            potential_regularizer: 2.0,
            redshift_scale: 1.0e-4,
        }
    }
}

impl SimParams {
    /// Effective gravitational constant
    pub fn gravity(&self) -> f64 {
        self.gravity_base * self.gravity_multiplier
    }

    /// Radius derived from mass; the only way a body radius is ever produced
    pub fn radius_for_mass(&self, mass: f64) -> f64 {
        self.radius_scale * mass.cbrt()
    }

    /// Circular orbit speed at distance `r` around a central `mass`
    pub fn circular_speed(&self, mass: f64, r: f64) -> f64 {
        (self.gravity() * mass / r).sqrt()
    }

    /// Check every field, as `set` does for the tunable knobs
    pub fn validate(&self) -> Result<(), SimError> {
        let finite = [
            ("gravity_base", self.gravity_base),
            ("gravity", self.gravity_multiplier),
            ("speed", self.speed_multiplier),
            ("redshift_scale", self.redshift_scale),
        ];
        let positive = [
            ("softening", self.softening_sq),
            ("max_acceleration", self.max_acceleration),
            ("max_speed", self.max_speed),
            ("merge_factor", self.merge_factor),
            ("radius_scale", self.radius_scale),
            ("fixed_dt", self.fixed_dt),
            ("max_frame_dt", self.max_frame_dt),
            ("potential_regularizer", self.potential_regularizer),
        ];

        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimError::invalid_parameter(name, value));
            }
        }
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid_parameter(name, value));
            }
        }
        if self.max_substeps == 0 {
            return Err(SimError::invalid_parameter("max_substeps", 0.0));
        }
        Ok(())
    }

    /// Validate and store a value for one of the tunable knobs
    pub fn set(&mut self, param: Parameter, value: f64) -> Result<(), SimError> {
        if !value.is_finite() {
            return Err(SimError::invalid_parameter(param.name(), value));
        }
        // Multipliers accept any finite value, the remaining knobs must stay positive
        if param.requires_positive() && value <= 0.0 {
            return Err(SimError::invalid_parameter(param.name(), value));
        }

        match param {
            Parameter::GravityMultiplier => self.gravity_multiplier = value,
            Parameter::SpeedMultiplier => self.speed_multiplier = value,
            Parameter::MaxAcceleration => self.max_acceleration = value,
            Parameter::MaxSpeed => self.max_speed = value,
            Parameter::Softening => self.softening_sq = value,
            Parameter::MergeFactor => self.merge_factor = value,
        }
        Ok(())
    }

    pub fn get(&self, param: Parameter) -> f64 {
        match param {
            Parameter::GravityMultiplier => self.gravity_multiplier,
            Parameter::SpeedMultiplier => self.speed_multiplier,
            Parameter::MaxAcceleration => self.max_acceleration,
            Parameter::MaxSpeed => self.max_speed,
            Parameter::Softening => self.softening_sq,
            Parameter::MergeFactor => self.merge_factor,
        }
    }
}

/// Knobs that can be changed while the simulation is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    GravityMultiplier,
    SpeedMultiplier,
    MaxAcceleration,
    MaxSpeed,
    Softening,
    MergeFactor,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::GravityMultiplier,
        Parameter::SpeedMultiplier,
        Parameter::MaxAcceleration,
        Parameter::MaxSpeed,
        Parameter::Softening,
        Parameter::MergeFactor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Parameter::GravityMultiplier => "gravity",
            Parameter::SpeedMultiplier => "speed",
            Parameter::MaxAcceleration => "max_acceleration",
            Parameter::MaxSpeed => "max_speed",
            Parameter::Softening => "softening",
            Parameter::MergeFactor => "merge_factor",
        }
    }

    fn requires_positive(self) -> bool {
        !matches!(
            self,
            Parameter::GravityMultiplier | Parameter::SpeedMultiplier
        )
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognised parameter name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown parameter '{0}'")]
pub struct UnknownParameter(pub String);

impl FromStr for Parameter {
    type Err = UnknownParameter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownParameter(s.to_string()))
    }
}
