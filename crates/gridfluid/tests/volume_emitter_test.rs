//! Volume emitter tests
//!
//! Interior placement, overlap rejection across calls, one-shot behaviour,
//! the particle cap, and reproducibility.

use std::sync::Arc;

use gridfluid::{
    BoundingBox, Frame, ImplicitSurface, ParticleEmitter, ParticleSystem, ParticleSystemData2,
    ParticleSystemData3, SpatialVector, TestBox, TestFloor, TestSphere, Vec2, Vec3, VolumeEmitterSettings,
    VolumeParticleEmitter, VolumeParticleEmitter2, VolumeParticleEmitter3,
};

const SPACING: f32 = 0.1;

fn min_pairwise_distance<P: SpatialVector>(points: &[P]) -> f32 {
    let mut min = f32::INFINITY;
    for (a, pa) in points.iter().enumerate() {
        for pb in &points[a + 1..] {
            min = min.min(pa.distance_squared(*pb).sqrt());
        }
    }
    min
}

fn sphere_emitter(settings: &VolumeEmitterSettings<Vec3>) -> VolumeParticleEmitter3 {
    let sphere: Arc<dyn ImplicitSurface<Vec3>> = Arc::new(TestSphere::new(Vec3::splat(0.5), 0.4));
    VolumeParticleEmitter::from_settings(sphere, BoundingBox::new(Vec3::ZERO, Vec3::ONE), settings)
}

fn disc_emitter(settings: &VolumeEmitterSettings<Vec2>) -> VolumeParticleEmitter2 {
    let disc: Arc<dyn ImplicitSurface<Vec2>> = Arc::new(TestSphere::new(Vec2::splat(0.5), 0.4));
    VolumeParticleEmitter::from_settings(disc, BoundingBox::new(Vec2::ZERO, Vec2::ONE), settings)
}

#[test]
fn test_all_particles_inside_surface() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        jitter: 1.0,
        seed: 11,
        ..Default::default()
    };
    let mut emitter = sphere_emitter(&settings);
    let mut particles = ParticleSystemData3::new();
    emitter.emit(&Frame::default(), &mut particles);

    assert!(particles.number_of_particles() > 100);
    let sphere = TestSphere::new(Vec3::splat(0.5), 0.4);
    for p in particles.positions() {
        assert!(sphere.signed_distance(*p) < 0.0, "particle {:?} outside", p);
    }
}

#[test]
fn test_no_overlap_across_calls() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        jitter: 0.5,
        is_one_shot: false,
        seed: 3,
        ..Default::default()
    };
    let mut emitter = disc_emitter(&settings);
    let mut particles = ParticleSystemData2::new();

    let mut counts = Vec::new();
    let mut frame = Frame::default();
    for _ in 0..3 {
        emitter.emit(&frame, &mut particles);
        counts.push(particles.number_of_particles());
        frame.advance();
    }

    // Later calls only fill gaps left by jitter
    assert!(counts[0] > 0);
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    let min = min_pairwise_distance(particles.positions());
    assert!(min >= SPACING * (1.0 - 1e-3), "closest pair {} < spacing", min);
}

#[test]
fn test_existing_particles_block_candidates() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        ..Default::default()
    };
    let mut emitter = disc_emitter(&settings);
    let mut particles = ParticleSystemData2::new();
    particles.spawn_at(Vec2::new(0.52, 0.47));
    emitter.emit(&Frame::default(), &mut particles);

    let blocker = particles.positions()[0];
    assert!(particles.positions()[1..]
        .iter()
        .all(|p| p.distance(blocker) >= SPACING * (1.0 - 1e-3)));
}

#[test]
fn test_overlapping_allowed_repeats_lattice() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        is_one_shot: false,
        allow_overlapping: true,
        ..Default::default()
    };
    let mut emitter = disc_emitter(&settings);
    let mut particles = ParticleSystemData2::new();
    emitter.emit(&Frame::default(), &mut particles);
    let first = particles.number_of_particles();
    emitter.emit(&Frame::default(), &mut particles);
    assert_eq!(particles.number_of_particles(), 2 * first);
}

#[test]
fn test_one_shot_is_idempotent() {
    let mut emitter = sphere_emitter(&VolumeEmitterSettings::default());
    let mut particles = ParticleSystemData3::new();
    emitter.emit(&Frame::default(), &mut particles);
    let once = particles.number_of_particles();
    assert!(once > 0);

    let mut frame = Frame::default();
    for _ in 0..4 {
        frame.advance();
        emitter.emit(&frame, &mut particles);
    }
    assert_eq!(particles.number_of_particles(), once);
    assert!(emitter.state().one_shot_completed);
    assert_eq!(emitter.number_of_emitted_particles(), once);
}

#[test]
fn test_cap_holds_across_calls() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        is_one_shot: false,
        allow_overlapping: true,
        max_number_of_particles: 50,
        ..Default::default()
    };
    let mut emitter = disc_emitter(&settings);
    let mut particles = ParticleSystemData2::new();
    for _ in 0..3 {
        emitter.emit(&Frame::default(), &mut particles);
        assert!(particles.number_of_particles() <= 50);
    }
    assert_eq!(particles.number_of_particles(), 50);
}

#[test]
fn test_disjoint_bounds_emit_nothing() {
    let solid: Arc<dyn ImplicitSurface<Vec2>> = Arc::new(TestBox::new(Vec2::ZERO, Vec2::ONE));
    let mut emitter = VolumeParticleEmitter::new(solid, BoundingBox::new(Vec2::splat(2.0), Vec2::splat(3.0)), SPACING);
    let mut particles = ParticleSystemData2::new();
    emitter.emit(&Frame::default(), &mut particles);
    assert_eq!(particles.number_of_particles(), 0);
    assert!(emitter.state().one_shot_completed);
}

#[test]
fn test_unbounded_surface_uses_bounds() {
    let water: Arc<dyn ImplicitSurface<Vec3>> = Arc::new(TestFloor::new(0.25));
    let bounds = BoundingBox::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.5));
    let mut emitter = VolumeParticleEmitter::new(water, bounds, SPACING);
    let mut particles = ParticleSystemData3::new();
    emitter.emit(&Frame::default(), &mut particles);

    assert!(particles.number_of_particles() > 0);
    for p in particles.positions() {
        assert!(p.y < 0.25);
        assert!(bounds.expanded(1e-5).contains(*p));
    }
}

#[test]
fn test_same_seed_same_positions() {
    let settings = VolumeEmitterSettings {
        spacing: SPACING,
        jitter: 0.8,
        seed: 42,
        ..Default::default()
    };
    let run = || {
        let mut emitter = disc_emitter(&settings);
        let mut particles = ParticleSystemData2::new();
        emitter.emit(&Frame::default(), &mut particles);
        particles.positions().to_vec()
    };
    let a = run();
    assert!(!a.is_empty());
    assert_eq!(a, run());
}
