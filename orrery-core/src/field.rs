//! Softened pairwise gravity
//!
//! Every body's acceleration is overwritten on each call. The acceleration
//! clamp applied afterwards is a stability valve for very close encounters
//! and can momentarily break exact force symmetry.

use crate::body::Body;
use crate::params::SimParams;
use glam::DVec3;

/// Acceleration that a body of mass `other_mass` at `d` (relative to the
/// receiver) induces, using the softened law
pub fn pairwise_acceleration(d: DVec3, other_mass: f64, g: f64, softening_sq: f64) -> DVec3 {
    let r2 = d.length_squared() + softening_sq;
    let r = r2.sqrt();
    // Dividing by the softened distance keeps coincident bodies finite
    d * (g * other_mass / (r2 * r))
}

/// Recompute the acceleration of every body from all others
pub fn compute_accelerations(bodies: &mut [Body], params: &SimParams) {
    for b in bodies.iter_mut() {
        b.acc = DVec3::ZERO;
    }

    let n = bodies.len();
    if n < 2 {
        return;
    }

    let g = params.gravity();
    let eps2 = params.softening_sq;

    // Each unordered pair once, written back to both sides
    for i in 0..n {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let bi = &mut head[i];
        for bj in tail.iter_mut() {
            let d = bj.pos - bi.pos;
            let r2 = d.length_squared() + eps2;
            let r = r2.sqrt();
            let f = g / r2;
            let unit = d / r;

            bi.acc += unit * (f * bj.mass());
            bj.acc -= unit * (f * bi.mass());
        }
    }

    clamp_accelerations(bodies, params.max_acceleration);
}

/// Rescale any acceleration above `max` down to `max`, keeping its direction
pub fn clamp_accelerations(bodies: &mut [Body], max: f64) {
    for b in bodies.iter_mut() {
        b.acc = clamp_length(b.acc, max);
    }
}

/// Rescale a vector whose length exceeds `max` back onto the ceiling
pub(crate) fn clamp_length(v: DVec3, max: f64) -> DVec3 {
    let len = v.length();
    if len > max {
        v * (max / len)
    } else {
        v
    }
}
