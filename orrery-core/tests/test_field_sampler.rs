//! Tests for the visualization fields: potential, redshift, curvature surface

use approx::assert_relative_eq;
use glam::DVec3;
use orrery_core::sampler::{curvature_dip_at, potential_at, sample_curvature_grid};
use orrery_core::tests::test_helpers::approx_eq;
use orrery_core::{BodySpec, BodyStore, SimParams, Simulation};

fn two_mass_store(params: &SimParams) -> BodyStore {
    let mut store = BodyStore::new();
    store
        .add(BodySpec::at_rest(100.0, DVec3::new(-5.0, 0.0, 0.0)), params)
        .unwrap();
    store
        .add(BodySpec::at_rest(20.0, DVec3::new(5.0, 0.0, 0.0)), params)
        .unwrap();
    store
}

#[test]
fn test_potential_sums_regularized_terms() {
    let params = SimParams::default();
    let store = two_mass_store(&params);
    let g = params.gravity();
    let delta = params.potential_regularizer;

    let value = potential_at(store.as_slice(), &params, DVec3::ZERO);
    let expected = g * 100.0 / (5.0 + delta) + g * 20.0 / (5.0 + delta);
    assert_relative_eq!(value, expected, max_relative = 1e-12);
}

#[test]
fn test_potential_is_finite_on_top_of_a_body() {
    let params = SimParams::default();
    let store = two_mass_store(&params);
    let value = potential_at(store.as_slice(), &params, DVec3::new(-5.0, 0.0, 0.0));
    assert!(value.is_finite());
    assert!(value > potential_at(store.as_slice(), &params, DVec3::new(0.0, 30.0, 0.0)));
}

#[test]
fn test_empty_field_is_zero() {
    let params = SimParams::default();
    let store = BodyStore::new();
    assert_eq!(potential_at(store.as_slice(), &params, DVec3::ONE), 0.0);
    assert_eq!(curvature_dip_at(store.as_slice(), &params, 1.0, 2.0), 0.0);
}

#[test]
fn test_redshift_excludes_the_body_itself() {
    let mut sim = Simulation::new();
    let heavy = sim
        .add_body(BodySpec::at_rest(100.0, DVec3::new(-5.0, 0.0, 0.0)))
        .unwrap();
    let light = sim
        .add_body(BodySpec::at_rest(20.0, DVec3::new(5.0, 0.0, 0.0)))
        .unwrap();
    let params = sim.params().clone();
    let g = params.gravity();
    let delta = params.potential_regularizer;

    let z_light = sim.redshift_estimate(light).unwrap();
    let z_heavy = sim.redshift_estimate(heavy).unwrap();
    assert_relative_eq!(
        z_light,
        g * 100.0 / (10.0 + delta) * params.redshift_scale,
        max_relative = 1e-12
    );
    // The light body sits deeper in the other's well
    assert!(z_light > z_heavy);

    let all = sim.redshifts();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1], (light, z_light));
}

#[test]
fn test_redshift_of_missing_or_lonely_body() {
    let mut sim = Simulation::new();
    let only = sim.add_body(BodySpec::at_rest(50.0, DVec3::ZERO)).unwrap();
    assert_eq!(sim.redshift_estimate(only), Some(0.0));

    sim.remove_body(only);
    assert_eq!(sim.redshift_estimate(only), None);
}

#[test]
fn test_sampling_does_not_disturb_dynamics() {
    let mut sampled = Simulation::new();
    let mut plain = Simulation::new();
    for sim in [&mut sampled, &mut plain] {
        sim.load_preset(orrery_core::Preset::Solar, 3).unwrap();
    }

    for frame in 0..120 {
        if frame % 3 == 0 {
            sampled.potential_at(DVec3::new(frame as f64, 0.0, 0.0));
            sampled.redshifts();
            sampled.curvature_grid(100.0, 8);
        }
        sampled.advance(1.0 / 60.0);
        plain.advance(1.0 / 60.0);
    }
    assert_eq!(sampled.snapshot(), plain.snapshot());
}

#[test]
fn test_curvature_dip_deepest_under_mass() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    store.add(BodySpec::at_rest(300.0, DVec3::ZERO), &params).unwrap();

    let center = curvature_dip_at(store.as_slice(), &params, 0.0, 0.0);
    let off = curvature_dip_at(store.as_slice(), &params, 20.0, 0.0);
    assert!(center < off && off < 0.0);

    // -0.15 * G * m / (0.5 * eps^2 + 10)
    let expected = -0.15 * params.gravity() * 300.0 / (0.5 * params.softening_sq + 10.0);
    assert!(approx_eq(center, expected, 1e-9));
}

#[test]
fn test_curvature_grid_layout() {
    let params = SimParams::default();
    let mut store = BodyStore::new();
    store.add(BodySpec::at_rest(300.0, DVec3::ZERO), &params).unwrap();

    let grid = sample_curvature_grid(store.as_slice(), &params, 100.0, 4);
    assert_eq!(grid.side(), 5);
    assert_eq!(grid.heights.len(), 25);
    assert_eq!(grid.coords(0, 0), (-50.0, -50.0));
    assert_eq!(grid.coords(2, 2), (0.0, 0.0));
    assert_eq!(grid.height(2, 2), Some(grid.min_height()));
    assert_eq!(grid.height(5, 0), None);

    // Symmetric about a body at the origin
    assert_eq!(grid.height(0, 1), grid.height(1, 0));
}
