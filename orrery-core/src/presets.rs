//! Procedural body generators
//!
//! All randomness lives here, behind a seeded ChaCha RNG. The physics step
//! never draws random numbers.

use crate::body::BodySpec;
use crate::params::SimParams;
use glam::DVec3;
use rand::Rng;
use rand_chacha::ChaChaRng;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

pub const CENTRAL_MASS: f64 = 300.0;

/// Planet table entry: (mass, orbital distance, y offset)
type PlanetRow = (f64, f64, f64);

const SOLAR_PLANETS: [PlanetRow; 8] = [
    (2.0, 12.0, 0.0),
    (5.0, 18.0, 1.0),
    (6.0, 25.0, -0.5),
    (3.0, 32.0, 0.8),
    (40.0, 45.0, -1.0),
    (30.0, 58.0, 1.5),
    (15.0, 72.0, -0.3),
    (15.0, 88.0, 0.5),
];

const COMPACT_PLANETS: [(f64, f64); 5] = [(8.0, 14.0), (12.0, 20.0), (10.0, 27.0), (18.0, 34.0), (6.0, 42.0)];

/// Slightly sub-circular orbits make the compact preset precess visibly
const COMPACT_SPEED_FACTOR: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Heavy central body with eight planets on circular orbits
    Solar,
    /// Heavy central body with five tightly packed, slightly eccentric planets
    Compact,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Solar => "solar",
            Preset::Compact => "compact",
        }
    }

    pub fn generate(self, rng: &mut ChaChaRng, params: &SimParams) -> Vec<BodySpec> {
        match self {
            Preset::Solar => solar_system(rng, params),
            Preset::Compact => compact_system(rng, params),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}' (expected 'solar' or 'compact')")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solar" => Ok(Preset::Solar),
            "compact" => Ok(Preset::Compact),
            other => Err(UnknownPreset(other.to_string())),
        }
    }
}

/// Body at `dist` from the origin, angle `angle` in the XZ plane, moving
/// tangentially at `speed`
pub fn orbiter(mass: f64, dist: f64, angle: f64, y: f64, speed: f64) -> BodySpec {
    let (sin, cos) = angle.sin_cos();
    BodySpec::new(
        mass,
        DVec3::new(cos * dist, y, sin * dist),
        DVec3::new(-sin, 0.0, cos) * speed,
    )
}

pub fn solar_system(rng: &mut ChaChaRng, params: &SimParams) -> Vec<BodySpec> {
    let mut specs = vec![BodySpec::at_rest(CENTRAL_MASS, DVec3::ZERO)];
    for (mass, dist, y) in SOLAR_PLANETS {
        let speed = params.circular_speed(CENTRAL_MASS, dist);
        let angle = rng.random_range(0.0..TAU);
        specs.push(orbiter(mass, dist, angle, y, speed));
    }
    specs
}

pub fn compact_system(rng: &mut ChaChaRng, params: &SimParams) -> Vec<BodySpec> {
    let mut specs = vec![BodySpec::at_rest(CENTRAL_MASS, DVec3::ZERO)];
    for (mass, dist) in COMPACT_PLANETS {
        let speed = params.circular_speed(CENTRAL_MASS, dist) * COMPACT_SPEED_FACTOR;
        let angle = rng.random_range(0.0..TAU);
        let y = rng.random_range(-2.0..2.0);
        specs.push(orbiter(mass, dist, angle, y, speed));
    }
    specs
}

/// A loosely orbiting body somewhere in the inner system
pub fn random_orbiter(rng: &mut ChaChaRng, mass: f64) -> BodySpec {
    let angle = rng.random_range(0.0..TAU);
    let dist = rng.random_range(10.0..35.0);
    let y = rng.random_range(-5.0..5.0);
    let (sin, cos) = f64::sin_cos(angle);
    let tangent = DVec3::new(-sin, rng.random_range(-0.3..0.3), cos);
    let speed = rng.random_range(2.0..8.0);
    BodySpec::new(
        mass,
        DVec3::new(cos * dist, y, sin * dist),
        tangent * speed,
    )
}
