//! The simulation facade
//!
//! `Simulation` is the only way to change physics state from outside. It
//! owns the parameters, the body store and the frame clock, and hands out
//! plain snapshots.

use crate::body::{BodyId, BodySnapshot, BodySpec};
use crate::collisions::{resolve_collisions, MergeEvent};
use crate::diagnostics::{energy_report, EnergyReport};
use crate::error::SimError;
use crate::field::compute_accelerations;
use crate::integrator::{leapfrog_step, FrameClock};
use crate::params::{Parameter, SimParams};
use crate::presets::{random_orbiter, Preset};
use crate::sampler::{self, CurvatureGrid};
use crate::store::BodyStore;
use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

/// What one `advance` call did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub substeps: u32,
    pub capped: bool,
    pub merges: Vec<MergeEvent>,
}

impl StepReport {
    /// True when the body set changed and held snapshots are out of date
    pub fn topology_changed(&self) -> bool {
        !self.merges.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Simulation {
    params: SimParams,
    store: BodyStore,
    clock: FrameClock,
    elapsed: f64,
    paused: bool,
    // Stored accelerations no longer match the body set or G
    forces_stale: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::from_valid(SimParams::default())
    }

    /// Start from custom parameters, rejecting any that fail validation
    pub fn with_params(params: SimParams) -> Result<Self, SimError> {
        params.validate()?;
        Ok(Self::from_valid(params))
    }

    fn from_valid(params: SimParams) -> Self {
        Self {
            params,
            store: BodyStore::new(),
            clock: FrameClock::new(),
            elapsed: 0.0,
            paused: false,
            forces_stale: true,
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Add a body; invalid specs are rejected before touching the store
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, SimError> {
        let id = self.store.add(spec, &self.params)?;
        self.forces_stale = true;
        Ok(id)
    }

    /// Remove a body; absent ids are a no-op. Returns whether a body was removed.
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        let removed = self.store.remove(id).is_some();
        if removed {
            self.forces_stale = true;
        }
        removed
    }

    /// Remove every body; ids handed out so far are never reissued
    pub fn clear(&mut self) {
        self.store.clear();
        self.clock.reset();
        self.forces_stale = true;
    }

    pub fn set_gravity_multiplier(&mut self, value: f64) -> Result<(), SimError> {
        self.set_parameter(Parameter::GravityMultiplier, value)
    }

    pub fn set_speed_multiplier(&mut self, value: f64) -> Result<(), SimError> {
        self.set_parameter(Parameter::SpeedMultiplier, value)
    }

    pub fn set_parameter(&mut self, param: Parameter, value: f64) -> Result<(), SimError> {
        self.params.set(param, value)?;
        if matches!(
            param,
            Parameter::GravityMultiplier | Parameter::Softening | Parameter::MaxAcceleration
        ) {
            self.forces_stale = true;
        }
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance by one frame's worth of wall-clock time
    ///
    /// Runs zero or more fixed sub-steps, each followed by one collision
    /// pass. A paused simulation does nothing.
    pub fn advance(&mut self, frame_dt: f64) -> StepReport {
        let mut report = StepReport::default();
        if self.paused {
            return report;
        }

        let Self {
            params,
            store,
            clock,
            elapsed,
            forces_stale,
            ..
        } = self;
        let params = &*params;

        let tick = clock.advance(frame_dt, params, |h| {
            let merges = substep(params, store, forces_stale, elapsed, h);
            report.merges.extend(merges);
        });

        report.substeps = tick.substeps;
        report.capped = tick.capped;
        if tick.capped {
            log::debug!(
                "sub-step cap of {} reached, dropping banked time",
                self.params.max_substeps
            );
        }
        log::trace!(
            "advance({:.4}): {} sub-steps, {} merges, {} bodies",
            frame_dt,
            report.substeps,
            report.merges.len(),
            self.store.len()
        );
        report
    }

    /// Run exactly one fixed sub-step
    ///
    /// Ignores the pause flag and the speed multiplier and leaves the frame
    /// accumulator untouched.
    pub fn step_once(&mut self) -> StepReport {
        let merges = substep(
            &self.params,
            &mut self.store,
            &mut self.forces_stale,
            &mut self.elapsed,
            self.params.fixed_dt,
        );
        StepReport {
            substeps: 1,
            capped: false,
            merges,
        }
    }

    /// Independent copy of all live bodies
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.store.snapshot()
    }

    pub fn body(&self, id: BodyId) -> Option<BodySnapshot> {
        self.store.get(id).map(|b| b.snapshot())
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.store.contains(id)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Simulated time consumed so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn potential_at(&self, point: DVec3) -> f64 {
        sampler::potential_at(self.store.as_slice(), &self.params, point)
    }

    pub fn redshift_estimate(&self, id: BodyId) -> Option<f64> {
        sampler::redshift_estimate(self.store.as_slice(), &self.params, id)
    }

    /// Redshift estimate for every live body, in snapshot order
    pub fn redshifts(&self) -> Vec<(BodyId, f64)> {
        self.store
            .iter()
            .filter_map(|b| self.redshift_estimate(b.id()).map(|z| (b.id(), z)))
            .collect()
    }

    pub fn curvature_grid(&self, size: f64, segments: usize) -> CurvatureGrid {
        sampler::sample_curvature_grid(self.store.as_slice(), &self.params, size, segments)
    }

    pub fn diagnostics(&self) -> EnergyReport {
        energy_report(self.store.as_slice(), &self.params)
    }

    /// Add the bodies of a seeded preset
    pub fn load_preset(&mut self, preset: Preset, seed: u64) -> Result<Vec<BodyId>, SimError> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let specs = preset.generate(&mut rng, &self.params);
        let ids = specs
            .into_iter()
            .map(|spec| self.add_body(spec))
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("loaded preset '{}' (seed {}): {} bodies", preset, seed, ids.len());
        Ok(ids)
    }

    /// Add one loosely orbiting body of the given mass
    pub fn add_random_body(&mut self, mass: f64, seed: u64) -> Result<BodyId, SimError> {
        let mut rng = ChaChaRng::seed_from_u64(seed);
        self.add_body(random_orbiter(&mut rng, mass))
    }
}

/// One leapfrog sub-step followed by a collision pass
fn substep(
    params: &SimParams,
    store: &mut BodyStore,
    forces_stale: &mut bool,
    elapsed: &mut f64,
    h: f64,
) -> Vec<MergeEvent> {
    if *forces_stale {
        compute_accelerations(store.as_mut_slice(), params);
        *forces_stale = false;
    }
    leapfrog_step(store.as_mut_slice(), params, h);
    *elapsed += h;

    let merges = resolve_collisions(store, params);
    if !merges.is_empty() {
        *forces_stale = true;
    }
    merges
}
