//! Fixed-step leapfrog integration and frame-time accumulation
//!
//! `leapfrog_step` advances by exactly one sub-step in kick-drift-kick form.
//! `FrameClock` banks variable frame time and spends it in fixed sub-steps.

use crate::body::Body;
use crate::field::{clamp_length, compute_accelerations};
use crate::params::SimParams;

/// Advance all bodies by one fixed step `h` using velocity-Verlet
///
/// Expects `acc` to hold the accelerations at the current positions. On
/// return `acc` holds the accelerations at the new positions, ready for the
/// next step.
pub fn leapfrog_step(bodies: &mut [Body], params: &SimParams, h: f64) {
    if bodies.is_empty() {
        return;
    }
    let half_h = 0.5 * h;

    // Kick: v_n+1/2 = v_n + a_n * h/2
    for b in bodies.iter_mut() {
        b.vel += b.acc * half_h;
    }

    // Drift: x_n+1 = x_n + v_n+1/2 * h
    for b in bodies.iter_mut() {
        b.pos += b.vel * h;
    }

    // a_n+1 at the new positions
    compute_accelerations(bodies, params);

    // Kick: v_n+1 = v_n+1/2 + a_n+1 * h/2, then the speed ceiling
    for b in bodies.iter_mut() {
        b.vel += b.acc * half_h;
        b.vel = clamp_length(b.vel, params.max_speed);
    }
}

/// Result of spending one frame's worth of time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTick {
    pub substeps: u32,
    pub capped: bool, // the sub-step cap was hit and the backlog dropped
}

/// Sub-step accumulator decoupling simulation rate from frame rate
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banked simulation time not yet consumed by a sub-step
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// Bank `frame_dt` and run `sub_step` once per whole fixed step
    ///
    /// Negative or NaN frame times count as zero. When the per-call cap is
    /// reached the accumulator is dropped instead of carried over.
    pub fn advance<F>(&mut self, frame_dt: f64, params: &SimParams, mut sub_step: F) -> ClockTick
    where
        F: FnMut(f64),
    {
        let frame_dt = if frame_dt.is_nan() {
            0.0
        } else {
            frame_dt.min(params.max_frame_dt).max(0.0)
        };
        self.accumulator += frame_dt * params.speed_multiplier;

        let h = params.fixed_dt;
        let mut tick = ClockTick::default();
        if h <= 0.0 {
            return tick;
        }

        while self.accumulator >= h && tick.substeps < params.max_substeps {
            sub_step(h);
            self.accumulator -= h;
            tick.substeps += 1;
        }

        if tick.substeps >= params.max_substeps {
            self.accumulator = 0.0;
            tick.capped = true;
        }

        // A negative speed multiplier must not bank a debt
        if self.accumulator < 0.0 {
            self.accumulator = 0.0;
        }

        tick
    }
}
