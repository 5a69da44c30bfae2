//! Property-based tests for particle emission using proptest
//!
//! These tests check emission invariants across random shapes and settings:
//! - Volume emitters only place particles inside the surface
//! - Without overlap, no two particles are closer than the spacing
//! - One-shot emitters emit once
//! - Point emitters follow the rate and the cap

use std::sync::Arc;

use gridfluid::{
    BoundingBox, Frame, ImplicitSurface, ParticleEmitter, ParticleSystem, ParticleSystemData2, ParticleSystemData3,
    PointEmitterSettings, PointParticleEmitter, SpatialVector, TestSphere, Vec2, Vec3, VolumeEmitterSettings,
    VolumeParticleEmitter,
};
use proptest::prelude::*;

// Emission domain is the unit square / cube
const OVERLAP_SLACK: f32 = 1e-3;

fn min_pairwise_distance<P: SpatialVector>(points: &[P]) -> f32 {
    let mut min = f32::INFINITY;
    for (a, pa) in points.iter().enumerate() {
        for pb in &points[a + 1..] {
            min = min.min(pa.distance_squared(*pb).sqrt());
        }
    }
    min
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every particle lies strictly inside the disc and the emission bounds
    #[test]
    fn prop_disc_emission_stays_inside(
        cx in 0.3f32..0.7,
        cy in 0.3f32..0.7,
        radius in 0.1f32..0.4,
        spacing in 0.05f32..0.2,
        jitter in 0.0f32..1.0,
        seed in any::<u64>(),
    ) {
        let disc = TestSphere::new(Vec2::new(cx, cy), radius);
        let surface: Arc<dyn ImplicitSurface<Vec2>> = Arc::new(disc);
        let bounds = BoundingBox::new(Vec2::ZERO, Vec2::ONE);
        let settings = VolumeEmitterSettings { spacing, jitter, seed, ..Default::default() };
        let mut emitter = VolumeParticleEmitter::from_settings(surface, bounds, &settings);

        let mut particles = ParticleSystemData2::new();
        emitter.emit(&Frame::default(), &mut particles);

        for p in particles.positions() {
            prop_assert!(disc.signed_distance(*p) < 0.0, "particle {:?} outside disc", p);
            prop_assert!(bounds.expanded(1e-5).contains(*p), "particle {:?} outside bounds", p);
        }
    }

    /// Without overlap, repeated jittered emission never packs closer than the spacing
    #[test]
    fn prop_no_overlap_over_repeated_calls(
        radius in 0.15f32..0.3,
        spacing in 0.08f32..0.2,
        jitter in 0.0f32..1.0,
        calls in 1usize..4,
        seed in any::<u64>(),
    ) {
        let surface: Arc<dyn ImplicitSurface<Vec3>> = Arc::new(TestSphere::new(Vec3::splat(0.5), radius));
        let settings = VolumeEmitterSettings {
            spacing,
            jitter,
            seed,
            is_one_shot: false,
            ..Default::default()
        };
        let mut emitter =
            VolumeParticleEmitter::from_settings(surface, BoundingBox::new(Vec3::ZERO, Vec3::ONE), &settings);

        let mut particles = ParticleSystemData3::new();
        let mut frame = Frame::default();
        for _ in 0..calls {
            emitter.emit(&frame, &mut particles);
            frame.advance();
        }

        let min = min_pairwise_distance(particles.positions());
        prop_assert!(
            min >= spacing * (1.0 - OVERLAP_SLACK),
            "closest pair {} below spacing {}",
            min,
            spacing
        );
    }

    /// A one-shot emitter adds nothing after its first call
    #[test]
    fn prop_one_shot_emits_once(
        radius in 0.1f32..0.4,
        spacing in 0.05f32..0.2,
        allow_overlapping in any::<bool>(),
        extra_calls in 1usize..5,
    ) {
        let surface: Arc<dyn ImplicitSurface<Vec2>> = Arc::new(TestSphere::new(Vec2::splat(0.5), radius));
        let settings = VolumeEmitterSettings { spacing, allow_overlapping, ..Default::default() };
        let mut emitter =
            VolumeParticleEmitter::from_settings(surface, BoundingBox::new(Vec2::ZERO, Vec2::ONE), &settings);

        let mut particles = ParticleSystemData2::new();
        let mut frame = Frame::default();
        emitter.emit(&frame, &mut particles);
        let first = particles.number_of_particles();

        for _ in 0..extra_calls {
            frame.advance();
            emitter.emit(&frame, &mut particles);
        }
        prop_assert_eq!(particles.number_of_particles(), first);
        prop_assert_eq!(emitter.number_of_emitted_particles(), first);
    }

    /// After k one-second frames a point emitter holds min(k * rate, cap) particles
    #[test]
    fn prop_point_emitter_rate_and_cap(
        rate in 1usize..50,
        cap in 1usize..200,
        frames in 1u32..8,
        spread in 0.0f32..180.0,
        seed in any::<u64>(),
    ) {
        let mut emitter = PointParticleEmitter::from_settings(&PointEmitterSettings {
            origin: Vec3::ZERO,
            direction: Vec3::Y,
            speed: 2.0,
            spread_angle_in_degrees: spread,
            max_new_particles_per_second: rate,
            max_number_of_particles: cap,
            seed,
        });

        let mut particles = ParticleSystemData3::new();
        let mut frame = Frame::new(1, 1.0);
        for k in 1..=frames as usize {
            emitter.emit(&frame, &mut particles);
            prop_assert_eq!(particles.number_of_particles(), (k * rate).min(cap));
            frame.advance();
        }

        let cos_limit = (0.5 * spread).to_radians().cos();
        for v in particles.velocities() {
            prop_assert!(v.normalize().dot(Vec3::Y) >= cos_limit - 1e-4);
        }
    }
}
