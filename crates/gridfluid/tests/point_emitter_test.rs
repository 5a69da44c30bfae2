//! Point emitter tests
//!
//! Rate limiting, the particle cap, and the shape of the emission cone.

use gridfluid::{
    Frame, ParticleEmitter, ParticleEmitterSet, ParticleSystem, ParticleSystemData2, ParticleSystemData3,
    PointEmitterSettings, PointParticleEmitter, PointParticleEmitter2, PointParticleEmitter3, SequenceSampler,
    Vec2, Vec3,
};

/// 2-D emitter at the origin shooting up: speed 3, 15 degree spread, 4/s, cap 18
fn fountain() -> PointParticleEmitter2 {
    PointParticleEmitter::from_settings(&PointEmitterSettings {
        origin: Vec2::ZERO,
        direction: Vec2::new(0.0, 1.0),
        speed: 3.0,
        spread_angle_in_degrees: 15.0,
        max_new_particles_per_second: 4,
        max_number_of_particles: 18,
        seed: 0,
    })
}

#[test]
fn test_counts_follow_rate_then_cap() {
    let mut emitter = fountain();
    let mut particles = ParticleSystemData2::new();
    let mut frame = Frame::new(1, 1.0);

    let mut counts = Vec::new();
    for _ in 0..5 {
        emitter.emit(&frame, &mut particles);
        counts.push(particles.number_of_particles());
        frame.advance();
    }

    assert_eq!(counts, vec![4, 8, 12, 16, 18]);
    assert_eq!(emitter.number_of_emitted_particles(), 18);

    // Cap holds on later frames
    emitter.emit(&frame, &mut particles);
    assert_eq!(particles.number_of_particles(), 18);
}

#[test]
fn test_particles_start_at_origin_with_exact_speed() {
    let mut emitter = fountain();
    let mut particles = ParticleSystemData2::new();
    let mut frame = Frame::new(1, 1.0);
    for _ in 0..5 {
        emitter.emit(&frame, &mut particles);
        frame.advance();
    }

    let max_angle = 15f32.to_radians();
    for (position, velocity) in particles.positions().iter().zip(particles.velocities()) {
        assert_eq!(*position, Vec2::ZERO);
        assert!((velocity.length() - 3.0).abs() < 1e-5, "speed {}", velocity.length());
        let cos = velocity.normalize().dot(Vec2::Y);
        assert!(cos >= max_angle.cos() - 1e-6, "direction {:?} outside cone", velocity);
    }
}

#[test]
fn test_cone_edges_with_scripted_sampler() {
    let mut emitter = fountain();
    // u = 0 and u -> 1 rotate by -spread/2 and +spread/2
    emitter.set_sampler(Box::new(SequenceSampler::new(vec![0.0, 1.0])));
    let mut particles = ParticleSystemData2::new();
    emitter.emit(&Frame::new(0, 0.5), &mut particles);
    assert_eq!(particles.number_of_particles(), 2);

    let half = 7.5f32.to_radians();
    for velocity in particles.velocities() {
        let angle = velocity.normalize().dot(Vec2::Y).clamp(-1.0, 1.0).acos();
        assert!((angle - half).abs() < 1e-3, "angle {}", angle.to_degrees());
    }
    assert!(particles.velocities()[0].x * particles.velocities()[1].x < 0.0);
}

#[test]
fn test_3d_cone_spread() {
    let mut emitter = PointParticleEmitter3::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -2.0), 5.0, 40.0);
    emitter.set_max_new_particles_per_second(200);
    let mut particles = ParticleSystemData3::new();
    emitter.emit(&Frame::new(0, 1.0), &mut particles);

    assert_eq!(particles.number_of_particles(), 200);
    let limit = 20f32.to_radians().cos();
    for velocity in particles.velocities() {
        assert!((velocity.length() - 5.0).abs() < 1e-4);
        assert!(velocity.normalize().dot(Vec3::NEG_Z) >= limit - 1e-5);
    }
}

#[test]
fn test_same_seed_same_velocities() {
    let run = || {
        let mut emitter = fountain();
        let mut particles = ParticleSystemData2::new();
        emitter.emit(&Frame::new(1, 1.0), &mut particles);
        particles.velocities().to_vec()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_emitter_set_drives_all_members() {
    let mut set: ParticleEmitterSet<Vec2> = ParticleEmitterSet::new();
    set.add_emitter(Box::new(fountain()));
    let mut second = fountain();
    second.set_origin(Vec2::new(5.0, 0.0));
    set.add_emitter(Box::new(second));

    let mut particles = ParticleSystemData2::new();
    set.emit(&Frame::new(1, 1.0), &mut particles);
    assert_eq!(particles.number_of_particles(), 8);
    assert_eq!(particles.positions()[4], Vec2::new(5.0, 0.0));

    set.set_enabled(false);
    set.emit(&Frame::new(2, 1.0), &mut particles);
    assert_eq!(particles.number_of_particles(), 8);
}
