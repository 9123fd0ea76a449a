use glam::DVec3;
use std::fmt;

/// Stable body identity, assigned monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A massive sphere in the simulation
///
/// Only the store can build one, so `radius` always matches `mass`.
#[derive(Debug, Clone)]
pub struct Body {
    id: BodyId,
    mass: f64,
    radius: f64,
    pub pos: DVec3,
    pub vel: DVec3,
    pub acc: DVec3, // recomputed every sub-step
}

impl Body {
    pub(crate) fn new(id: BodyId, mass: f64, radius: f64, pos: DVec3, vel: DVec3) -> Self {
        Self {
            id,
            mass,
            radius,
            pos,
            vel,
            acc: DVec3::ZERO,
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn momentum(&self) -> DVec3 {
        self.vel * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Change mass and re-derive the radius in one step
    pub(crate) fn set_mass(&mut self, mass: f64, radius: f64) {
        self.mass = mass;
        self.radius = radius;
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            id: self.id,
            mass: self.mass,
            position: self.pos,
            velocity: self.vel,
            radius: self.radius,
        }
    }
}

/// Creation request for a new body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub mass: f64,
    pub position: DVec3,
    pub velocity: DVec3,
}

impl BodySpec {
    pub fn new(mass: f64, position: DVec3, velocity: DVec3) -> Self {
        Self {
            mass,
            position,
            velocity,
        }
    }

    /// A body at rest
    pub fn at_rest(mass: f64, position: DVec3) -> Self {
        Self::new(mass, position, DVec3::ZERO)
    }
}

/// Read-only copy of a body handed to rendering and UI code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub mass: f64,
    pub position: DVec3,
    pub velocity: DVec3,
    pub radius: f64,
}

impl BodySnapshot {
    pub fn momentum(&self) -> DVec3 {
        self.velocity * self.mass
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }
}
