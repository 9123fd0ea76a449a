//! Overlap detection and inelastic merging
//!
//! One bounded pass per sub-step. A body that takes part in a merge (either
//! side) sits out the rest of the pass, so chains of merges resolve over
//! successive sub-steps instead of recursing.

use crate::body::{Body, BodyId};
use crate::params::SimParams;
use crate::store::BodyStore;
use glam::DVec3;
use std::collections::HashSet;

/// Two bodies found overlapping in the current pass
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionCandidate {
    pub body_a: BodyId,
    pub body_b: BodyId,
    pub separation: f64,
    pub threshold: f64,
}

/// Outcome of a single merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeEvent {
    pub survivor: BodyId,
    pub absorbed: BodyId,
    pub mass: f64,
    pub position: DVec3,
    pub velocity: DVec3,
}

/// Distance below which two bodies merge
pub fn merge_threshold(a: &Body, b: &Body, merge_factor: f64) -> f64 {
    (a.radius() + b.radius()) * merge_factor
}

/// Scan all unordered pairs and collect overlapping ones, closest first
///
/// Equal separations keep scan order so the result is deterministic.
pub fn detect_collisions(bodies: &[Body], merge_factor: f64) -> Vec<CollisionCandidate> {
    let mut found = Vec::new();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let separation = a.pos.distance(b.pos);
            let threshold = merge_threshold(a, b, merge_factor);
            if separation < threshold {
                found.push(CollisionCandidate {
                    body_a: a.id(),
                    body_b: b.id(),
                    separation,
                    threshold,
                });
            }
        }
    }
    found.sort_by(|x, y| x.separation.total_cmp(&y.separation));
    found
}

/// Combined state of two merging bodies: (mass, position, velocity)
///
/// Mass adds exactly, velocity is the momentum-weighted mean and position
/// the mass-weighted centroid.
pub fn merged_state(a: &Body, b: &Body) -> (f64, DVec3, DVec3) {
    let mass = a.mass() + b.mass();
    let velocity = (a.momentum() + b.momentum()) / mass;
    let position = (a.pos * a.mass() + b.pos * b.mass()) / mass;
    (mass, position, velocity)
}

/// Detect and merge overlapping bodies, lighter into heavier
///
/// With equal masses the body earlier in the store (the older one) survives.
pub fn resolve_collisions(store: &mut BodyStore, params: &SimParams) -> Vec<MergeEvent> {
    let candidates = detect_collisions(store.as_slice(), params.merge_factor);
    if candidates.is_empty() {
        return Vec::new();
    }

    let mut consumed: HashSet<BodyId> = HashSet::new();
    let mut events = Vec::new();

    for c in candidates {
        if consumed.contains(&c.body_a) || consumed.contains(&c.body_b) {
            continue;
        }
        let (Some(ia), Some(ib)) = (store.index_of(c.body_a), store.index_of(c.body_b)) else {
            continue;
        };

        let bodies = store.as_slice();
        // body_a always precedes body_b in the store, so ties go to body_a
        let (big, small) = if bodies[ib].mass() > bodies[ia].mass() {
            (ib, ia)
        } else {
            (ia, ib)
        };

        let (mass, position, velocity) = merged_state(&bodies[big], &bodies[small]);
        let radius = params.radius_for_mass(mass);
        let survivor = bodies[big].id();
        let absorbed = bodies[small].id();

        let survivor_body = &mut store.as_mut_slice()[big];
        survivor_body.set_mass(mass, radius);
        survivor_body.pos = position;
        survivor_body.vel = velocity;
        store.remove(absorbed);

        log::debug!(
            "merged {} into {}: mass {:.3}, radius {:.3}",
            absorbed,
            survivor,
            mass,
            radius
        );

        consumed.insert(survivor);
        consumed.insert(absorbed);
        events.push(MergeEvent {
            survivor,
            absorbed,
            mass,
            position,
            velocity,
        });
    }

    events
}
