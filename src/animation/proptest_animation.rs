//! Property-based tests for the animation step using proptest.
//!
//! These tests verify that angular state depends only on accumulated
//! `rate × speed × time`, not on frame batching or body order.

use std::f64::consts::{PI, TAU};

use proptest::prelude::*;

use super::advance_bodies;
use crate::bodies::{CelestialBody, OrbitRegistry};
use crate::types::{MAX_SPEED, MIN_SPEED, SimulationSpeed};

/// Smallest absolute distance between two angles (radians), in [0, π].
fn angle_distance(a: f64, b: f64) -> f64 {
    let mut d = (a - b).rem_euclid(TAU);
    if d > PI {
        d = TAU - d;
    }
    d.abs()
}

fn registry_of(bodies: Vec<CelestialBody>) -> OrbitRegistry {
    OrbitRegistry::from_bodies(bodies).unwrap()
}

fn test_bodies(rev: f64, spin: f64) -> Vec<CelestialBody> {
    vec![
        CelestialBody::star("Sun", 10.0, 0.004),
        CelestialBody::planet("Inner", 1.0, 40.0, spin, rev),
        CelestialBody::planet("Outer", 2.0, 90.0, spin * 0.5, rev * 0.25),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// After n frames at speed s the angles equal n·rate·s modulo 2π.
    #[test]
    fn prop_angles_accumulate_linearly(
        rev in -0.1f64..0.1,
        spin in -0.1f64..0.1,
        speed in 0.0f64..8.0,
        frames in 0usize..500,
    ) {
        let mut registry = registry_of(test_bodies(rev, spin));
        for _ in 0..frames {
            advance_bodies(&mut registry, speed, 1.0);
        }

        for body in registry.all() {
            let n = frames as f64;
            let expected_orbit = (n * body.revolution_rate * speed).rem_euclid(TAU);
            let expected_spin = (n * body.self_rotation_rate * speed).rem_euclid(TAU);
            prop_assert!(angle_distance(body.angles.orbit, expected_orbit) < 1e-9);
            prop_assert!(angle_distance(body.angles.spin, expected_spin) < 1e-9);
            prop_assert!((0.0..TAU).contains(&body.angles.orbit));
            prop_assert!((0.0..TAU).contains(&body.angles.spin));
        }
    }

    /// One big step matches many small ones.
    #[test]
    fn prop_batching_is_irrelevant(
        rev in -0.1f64..0.1,
        spin in -0.1f64..0.1,
        speed in 0.0f64..8.0,
        frames in 1usize..300,
    ) {
        let mut stepped = registry_of(test_bodies(rev, spin));
        let mut batched = registry_of(test_bodies(rev, spin));

        for _ in 0..frames {
            advance_bodies(&mut stepped, speed, 1.0);
        }
        advance_bodies(&mut batched, speed, frames as f64);

        for (a, b) in stepped.all().zip(batched.all()) {
            prop_assert!(angle_distance(a.angles.orbit, b.angles.orbit) < 1e-9);
            prop_assert!(angle_distance(a.angles.spin, b.angles.spin) < 1e-9);
        }
    }

    /// Registration order does not change any body's trajectory.
    #[test]
    fn prop_body_order_is_irrelevant(
        rev in -0.1f64..0.1,
        spin in -0.1f64..0.1,
        frames in 0usize..200,
    ) {
        let mut forward = registry_of(test_bodies(rev, spin));
        let mut reversed_bodies = test_bodies(rev, spin);
        reversed_bodies.reverse();
        let mut reversed = registry_of(reversed_bodies);

        for _ in 0..frames {
            advance_bodies(&mut forward, 1.0, 1.0);
            advance_bodies(&mut reversed, 1.0, 1.0);
        }

        for body in forward.all() {
            let twin = reversed.get(&body.name).unwrap();
            prop_assert_eq!(body.angles, twin.angles);
        }
    }

    /// Zero speed never moves anything, however many frames run.
    #[test]
    fn prop_zero_speed_is_stasis(
        rev in -0.1f64..0.1,
        spin in -0.1f64..0.1,
        warmup in 0usize..50,
        frames in 0usize..500,
    ) {
        let mut registry = registry_of(test_bodies(rev, spin));
        for _ in 0..warmup {
            advance_bodies(&mut registry, 1.0, 1.0);
        }
        let before: Vec<_> = registry.all().map(|b| b.angles).collect();

        for _ in 0..frames {
            advance_bodies(&mut registry, 0.0, 1.0);
        }

        let after: Vec<_> = registry.all().map(|b| b.angles).collect();
        prop_assert_eq!(before, after);
    }

    /// k increases followed by k decreases return to the starting speed.
    #[test]
    fn prop_speed_steps_are_inverse(k in 0usize..=6) {
        let mut speed = SimulationSpeed::default();
        for _ in 0..k {
            speed.increase();
        }
        for _ in 0..k {
            speed.decrease();
        }
        prop_assert!((speed.multiplier - 1.0).abs() < 1e-12);
    }

    /// Any sequence of presses keeps the speed within bounds and positive.
    #[test]
    fn prop_speed_stays_in_bounds(presses in proptest::collection::vec(any::<bool>(), 0..100)) {
        let mut speed = SimulationSpeed::default();
        for faster in presses {
            if faster {
                speed.increase();
            } else {
                speed.decrease();
            }
            prop_assert!(speed.multiplier >= MIN_SPEED);
            prop_assert!(speed.multiplier <= MAX_SPEED);
        }
    }
}
