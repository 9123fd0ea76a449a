//! Owned collection of simulated bodies

use crate::body::{Body, BodyId, BodySnapshot, BodySpec};
use crate::error::SimError;
use crate::params::SimParams;

/// Body store with monotonic id allocation
///
/// Bodies are kept in insertion order, which is also the order the pairwise
/// loops visit them in.
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    next_id: u64,
}

impl BodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a spec and insert it with a fresh id and mass-derived radius
    pub fn add(&mut self, spec: BodySpec, params: &SimParams) -> Result<BodyId, SimError> {
        if !(spec.mass.is_finite() && spec.mass > 0.0) {
            return Err(SimError::InvalidMass(spec.mass));
        }
        if !spec.position.is_finite() {
            return Err(SimError::NonFiniteVector { name: "position" });
        }
        if !spec.velocity.is_finite() {
            return Err(SimError::NonFiniteVector { name: "velocity" });
        }

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(
            id,
            spec.mass,
            params.radius_for_mass(spec.mass),
            spec.position,
            spec.velocity,
        ));
        Ok(id)
    }

    /// Remove a body by id, returning it if it was present
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.index_of(id)?;
        Some(self.bodies.remove(idx))
    }

    /// Drop every body; the id counter is kept so ids are never reissued
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.iter().position(|b| b.id() == id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access for the integrator and field; mass and radius stay private
    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.bodies.iter().map(Body::snapshot).collect()
    }

    /// Id that the next insert will receive
    pub fn next_id(&self) -> BodyId {
        BodyId(self.next_id)
    }
}
