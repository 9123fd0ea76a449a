//! Tests for overlap detection and momentum-conserving merges

use glam::DVec3;
use orrery_core::collisions::{detect_collisions, merged_state, resolve_collisions};
use orrery_core::tests::test_helpers::{
    approx_eq, approx_eq_vec, run_substeps, snapshot_mass, snapshot_momentum,
};
use orrery_core::{BodySpec, BodyStore, SimParams, Simulation};

#[test]
fn test_equal_masses_merge_after_one_substep() {
    let mut sim = Simulation::new();
    let a = sim
        .add_body(BodySpec::new(10.0, DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0)))
        .unwrap();
    let b = sim
        .add_body(BodySpec::new(
            10.0,
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 3.0, 0.0),
        ))
        .unwrap();

    let before = sim.snapshot();
    let report = sim.advance(sim.params().fixed_dt * 1.000_001);
    assert_eq!(report.substeps, 1);
    assert_eq!(report.merges.len(), 1);
    assert!(report.topology_changed());

    let after = sim.snapshot();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].mass, 20.0);

    // The older body wins the tie
    assert_eq!(after[0].id, a);
    assert!(!sim.contains(b));

    let expected_velocity = snapshot_momentum(&before) / 20.0;
    assert!(approx_eq_vec(after[0].velocity, expected_velocity, 1e-9));
    assert!(approx_eq_vec(after[0].velocity, DVec3::new(0.0, 1.5, 1.0), 1e-9));
    assert!(approx_eq(after[0].radius, 0.7 * 20f64.cbrt(), 1e-12));
}

#[test]
fn test_lighter_body_is_absorbed() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    let light = store
        .add(BodySpec::new(2.0, DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)), &params)
        .unwrap();
    let heavy = store
        .add(BodySpec::at_rest(30.0, DVec3::new(0.5, 0.0, 0.0)), &params)
        .unwrap();

    let events = resolve_collisions(&mut store, &params);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].survivor, heavy);
    assert_eq!(events[0].absorbed, light);

    let survivor = store.get(heavy).expect("heavier body survives");
    assert_eq!(survivor.mass(), 32.0);
    assert!(approx_eq_vec(survivor.vel, DVec3::new(8.0 / 32.0, 0.0, 0.0), 1e-12));
    // Mass-weighted centroid
    assert!(approx_eq_vec(survivor.pos, DVec3::new(15.0 / 32.0, 0.0, 0.0), 1e-12));
    assert!(approx_eq(survivor.radius(), params.radius_for_mass(32.0), 1e-12));
    assert!(store.get(light).is_none());
}

#[test]
fn test_touching_is_not_enough_to_merge() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    let r = params.radius_for_mass(10.0);
    store.add(BodySpec::at_rest(10.0, DVec3::ZERO), &params).unwrap();
    // Surfaces touch at 2r, merge factor 0.5 needs centres closer than r
    store
        .add(BodySpec::at_rest(10.0, DVec3::new(1.5 * r, 0.0, 0.0)), &params)
        .unwrap();

    assert!(detect_collisions(store.as_slice(), params.merge_factor).is_empty());
    assert!(resolve_collisions(&mut store, &params).is_empty());
    assert_eq!(store.len(), 2);
}

#[test]
fn test_merge_conserves_mass_and_momentum() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    store
        .add(
            BodySpec::new(7.5, DVec3::new(1.0, 2.0, 3.0), DVec3::new(-1.0, 4.0, 0.25)),
            &params,
        )
        .unwrap();
    store
        .add(
            BodySpec::new(2.5, DVec3::new(1.2, 2.1, 3.0), DVec3::new(6.0, -2.0, 1.0)),
            &params,
        )
        .unwrap();

    let (a, b) = (&store.as_slice()[0], &store.as_slice()[1]);
    let (mass, _, velocity) = merged_state(a, b);
    let p_before = a.momentum() + b.momentum();
    assert_eq!(mass, a.mass() + b.mass());
    assert!(approx_eq_vec(velocity * mass, p_before, 1e-12));

    let snapshot_before = store.snapshot();
    resolve_collisions(&mut store, &params);
    let snapshot_after = store.snapshot();
    assert_eq!(snapshot_after.len(), 1);
    assert_eq!(snapshot_mass(&snapshot_after), snapshot_mass(&snapshot_before));
    assert!(approx_eq_vec(
        snapshot_momentum(&snapshot_after),
        snapshot_momentum(&snapshot_before),
        1e-12
    ));
}

#[test]
fn test_chained_merges_are_deferred() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    // Three coincident-ish bodies: only one merge may happen per pass
    store.add(BodySpec::at_rest(5.0, DVec3::ZERO), &params).unwrap();
    store
        .add(BodySpec::at_rest(4.0, DVec3::new(0.1, 0.0, 0.0)), &params)
        .unwrap();
    store
        .add(BodySpec::at_rest(3.0, DVec3::new(0.2, 0.0, 0.0)), &params)
        .unwrap();

    let first = resolve_collisions(&mut store, &params);
    assert_eq!(first.len(), 1);
    assert_eq!(store.len(), 2);

    let second = resolve_collisions(&mut store, &params);
    assert_eq!(second.len(), 1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.as_slice()[0].mass(), 12.0);
}

#[test]
fn test_independent_pairs_merge_in_same_pass() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    store.add(BodySpec::at_rest(5.0, DVec3::ZERO), &params).unwrap();
    store
        .add(BodySpec::at_rest(5.0, DVec3::new(0.2, 0.0, 0.0)), &params)
        .unwrap();
    store
        .add(BodySpec::at_rest(5.0, DVec3::new(50.0, 0.0, 0.0)), &params)
        .unwrap();
    store
        .add(BodySpec::at_rest(5.0, DVec3::new(50.3, 0.0, 0.0)), &params)
        .unwrap();

    let events = resolve_collisions(&mut store, &params);
    assert_eq!(events.len(), 2);
    // Closest pair first
    assert!(approx_eq(events[0].position.x, 0.1, 1e-12));
    assert_eq!(store.len(), 2);
}

#[test]
fn test_absorbed_ids_are_never_reused() {
    let mut sim = Simulation::new();
    let a = sim.add_body(BodySpec::at_rest(10.0, DVec3::ZERO)).unwrap();
    let b = sim
        .add_body(BodySpec::at_rest(1.0, DVec3::new(0.3, 0.0, 0.0)))
        .unwrap();
    run_substeps(&mut sim, 1);
    assert!(sim.contains(a));
    assert!(!sim.contains(b));

    let c = sim
        .add_body(BodySpec::at_rest(1.0, DVec3::new(40.0, 0.0, 0.0)))
        .unwrap();
    assert!(c > b);
    assert_ne!(c, a);
}
