//! Conservation diagnostics for the current body set

use crate::body::Body;
use crate::params::SimParams;
use glam::DVec3;

/// Energy and momentum totals at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub body_count: usize,
    pub total_mass: f64,
    pub kinetic_energy: f64,
    pub potential_energy: f64,
    pub total_momentum: DVec3,
}

impl EnergyReport {
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy + self.potential_energy
    }
}

pub fn total_momentum(bodies: &[Body]) -> DVec3 {
    bodies.iter().map(Body::momentum).sum()
}

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// Pairwise potential energy under the same softened law as the dynamics
pub fn potential_energy(bodies: &[Body], params: &SimParams) -> f64 {
    let g = params.gravity();
    let mut pe = 0.0;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let r2 = a.pos.distance_squared(b.pos) + params.softening_sq;
            pe -= g * a.mass() * b.mass() / r2.sqrt();
        }
    }
    pe
}

pub fn energy_report(bodies: &[Body], params: &SimParams) -> EnergyReport {
    EnergyReport {
        body_count: bodies.len(),
        total_mass: bodies.iter().map(Body::mass).sum(),
        kinetic_energy: kinetic_energy(bodies),
        potential_energy: potential_energy(bodies, params),
        total_momentum: total_momentum(bodies),
    }
}
