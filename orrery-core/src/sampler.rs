//! Scalar fields sampled for visualization
//!
//! Everything here is read-only and independent of the stepping rate. The
//! regularizer `potential_regularizer` is separate from the dynamics
//! softening because these values only shape visuals.

use crate::body::{Body, BodyId};
use crate::params::SimParams;
use glam::DVec3;

/// Vertical scale of the curvature surface
const CURVATURE_DEPTH: f64 = 0.15;
/// Keeps the surface shallow directly under a body
const CURVATURE_FLOOR: f64 = 10.0;

/// Gravitational potential magnitude at `point`: sum of G*m / (dist + delta)
pub fn potential_at(bodies: &[Body], params: &SimParams, point: DVec3) -> f64 {
    potential_excluding(bodies, params, point, None)
}

fn potential_excluding(
    bodies: &[Body],
    params: &SimParams,
    point: DVec3,
    skip: Option<BodyId>,
) -> f64 {
    let g = params.gravity();
    let delta = params.potential_regularizer;
    bodies
        .iter()
        .filter(|b| Some(b.id()) != skip)
        .map(|b| g * b.mass() / (point.distance(b.pos) + delta))
        .sum()
}

/// Cosmetic redshift-like shift for a body, from the potential of all others
///
/// Purely decorative; nothing in the dynamics reads it.
pub fn redshift_estimate(bodies: &[Body], params: &SimParams, id: BodyId) -> Option<f64> {
    let body = bodies.iter().find(|b| b.id() == id)?;
    Some(potential_excluding(bodies, params, body.pos, Some(id)) * params.redshift_scale)
}

/// Height of the rubber-sheet surface at plane point (x, z); always <= 0
pub fn curvature_dip_at(bodies: &[Body], params: &SimParams, x: f64, z: f64) -> f64 {
    let g = params.gravity();
    let dip: f64 = bodies
        .iter()
        .map(|b| {
            let dx = x - b.pos.x;
            let dz = z - b.pos.z;
            let r2 = dx * dx + dz * dz + params.softening_sq;
            g * b.mass() / (r2 * 0.5 + CURVATURE_FLOOR)
        })
        .sum();
    -dip * CURVATURE_DEPTH
}

/// Curvature surface heights on a square grid centred on the origin
#[derive(Debug, Clone, PartialEq)]
pub struct CurvatureGrid {
    pub size: f64,
    pub segments: usize,
    pub heights: Vec<f64>, // row-major, (segments + 1)^2 vertices
}

impl CurvatureGrid {
    /// Vertices per side
    pub fn side(&self) -> usize {
        self.segments + 1
    }

    /// Plane coordinates (x, z) of vertex (row, col)
    pub fn coords(&self, row: usize, col: usize) -> (f64, f64) {
        let step = if self.segments == 0 {
            0.0
        } else {
            self.size / self.segments as f64
        };
        let half = 0.5 * self.size;
        (col as f64 * step - half, row as f64 * step - half)
    }

    pub fn height(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.side() || col >= self.side() {
            return None;
        }
        self.heights.get(row * self.side() + col).copied()
    }

    /// Deepest point of the grid
    pub fn min_height(&self) -> f64 {
        self.heights.iter().copied().fold(0.0, f64::min)
    }
}

/// Sample `curvature_dip_at` over a `size` x `size` grid with `segments`
/// cells per side
pub fn sample_curvature_grid(
    bodies: &[Body],
    params: &SimParams,
    size: f64,
    segments: usize,
) -> CurvatureGrid {
    let mut grid = CurvatureGrid {
        size,
        segments,
        heights: Vec::with_capacity((segments + 1) * (segments + 1)),
    };
    for row in 0..grid.side() {
        for col in 0..grid.side() {
            let (x, z) = grid.coords(row, col);
            grid.heights.push(curvature_dip_at(bodies, params, x, z));
        }
    }
    grid
}
