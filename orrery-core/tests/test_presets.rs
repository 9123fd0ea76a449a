//! Tests for the seeded body generators

use glam::DVec3;
use orrery_core::presets::{random_orbiter, CENTRAL_MASS};
use orrery_core::tests::test_helpers::approx_eq;
use orrery_core::{Preset, SimParams, Simulation};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

#[test]
fn test_solar_preset_layout() {
    let params = SimParams::default();
    let mut rng = ChaChaRng::seed_from_u64(7);
    let specs = Preset::Solar.generate(&mut rng, &params);

    assert_eq!(specs.len(), 9);
    assert_eq!(specs[0].mass, CENTRAL_MASS);
    assert_eq!(specs[0].position, DVec3::ZERO);

    // Earth-like entry: mass 6 at distance 25 on a circular-speed orbit
    let earth = specs[3];
    assert_eq!(earth.mass, 6.0);
    let planar = DVec3::new(earth.position.x, 0.0, earth.position.z);
    assert!(approx_eq(planar.length(), 25.0, 1e-9));
    assert!(approx_eq(earth.position.y, -0.5, 1e-12));
    assert!(approx_eq(
        earth.velocity.length(),
        params.circular_speed(CENTRAL_MASS, 25.0),
        1e-9
    ));
    // Tangential: velocity perpendicular to the radius
    assert!(planar.dot(earth.velocity).abs() < 1e-9);
}

#[test]
fn test_compact_preset_is_sub_circular() {
    let params = SimParams::default();
    let mut rng = ChaChaRng::seed_from_u64(7);
    let specs = Preset::Compact.generate(&mut rng, &params);

    assert_eq!(specs.len(), 6);
    for spec in &specs[1..] {
        let planar = DVec3::new(spec.position.x, 0.0, spec.position.z);
        let circular = params.circular_speed(CENTRAL_MASS, planar.length());
        assert!(approx_eq(spec.velocity.length(), 0.95 * circular, 1e-9));
        assert!(spec.position.y.abs() <= 2.0);
    }
}

#[test]
fn test_same_seed_same_bodies() {
    let params = SimParams::default();
    let a = Preset::Solar.generate(&mut ChaChaRng::seed_from_u64(5), &params);
    let b = Preset::Solar.generate(&mut ChaChaRng::seed_from_u64(5), &params);
    assert_eq!(a, b);
}

#[test]
fn test_random_orbiter_ranges() {
    let mut rng = ChaChaRng::seed_from_u64(99);
    for _ in 0..100 {
        let spec = random_orbiter(&mut rng, 4.0);
        assert_eq!(spec.mass, 4.0);
        let planar = DVec3::new(spec.position.x, 0.0, spec.position.z).length();
        assert!(planar > 10.0 - 1e-9 && planar < 35.0 + 1e-9);
        assert!(spec.position.y.abs() <= 5.0);
        assert!(spec.velocity.length() >= 2.0);
    }
}

#[test]
fn test_preset_names_parse() {
    assert_eq!("solar".parse::<Preset>(), Ok(Preset::Solar));
    assert_eq!("compact".parse::<Preset>(), Ok(Preset::Compact));
    assert!("galaxy".parse::<Preset>().is_err());
    assert_eq!(Preset::Compact.to_string(), "compact");
}

#[test]
fn test_random_body_through_facade() {
    let mut sim = Simulation::new();
    let id = sim.add_random_body(3.0, 1234).unwrap();
    let body = sim.body(id).unwrap();
    assert_eq!(body.mass, 3.0);
    assert!(sim.add_random_body(0.0, 1).is_err());
}
