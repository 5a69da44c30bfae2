//! Fill Container - headless walkthrough of the kernel
//!
//! Fills the bottom of a box with particles, sprays a fountain on top, then
//! runs one viscosity step and one pressure projection on a velocity grid
//! with the same water level.
//!
//! Run with: RUST_LOG=debug cargo run --example fill_container --release

use std::sync::Arc;

use gridfluid::grid::build_markers;
use gridfluid::{
    max_stable_coefficient, BoundingBox, CellType, FaceCenteredGrid3, ForwardEulerDiffusionSolver, Frame,
    GridDiffusionSolver, GridPressureSolver, ImplicitSurface, JacobiPressureSolver, ParticleEmitter,
    ParticleEmitterSet, ParticleSystem, ParticleSystemData3, PointEmitterSettings, PointParticleEmitter, SdfPair,
    TestBox, TestFloor, Vec3, VolumeEmitterSettings, VolumeParticleEmitter,
};

// Container and grid
const RESOLUTION: usize = 16;
const CELL_SIZE: f32 = 1.0 / RESOLUTION as f32;
const WATER_LEVEL: f32 = 0.4;
const DT: f32 = 1.0 / 60.0;
const GRAVITY: f32 = -9.81;

// Emission
const PARTICLE_SPACING: f32 = 0.5 * CELL_SIZE;
const FOUNTAIN_FRAMES: u32 = 30;

fn main() {
    env_logger::init();

    // Walls: everything outside the unit box is solid
    let container = TestBox::new(Vec3::ZERO, Vec3::ONE);
    let walls = move |p: Vec3| -container.signed_distance(p);
    let water = TestFloor::new(WATER_LEVEL);

    // ========== Emission ==========

    let pool: Arc<dyn ImplicitSurface<Vec3>> = Arc::new(water);
    let pool_emitter = VolumeParticleEmitter::from_settings(
        pool,
        BoundingBox::new(Vec3::ZERO, Vec3::ONE),
        &VolumeEmitterSettings {
            spacing: PARTICLE_SPACING,
            jitter: 0.3,
            seed: 7,
            ..Default::default()
        },
    );
    let fountain = PointParticleEmitter::from_settings(&PointEmitterSettings {
        origin: Vec3::new(0.5, 0.9, 0.5),
        direction: Vec3::NEG_Y,
        speed: 1.5,
        spread_angle_in_degrees: 30.0,
        max_new_particles_per_second: 600,
        max_number_of_particles: 400,
        seed: 7,
    });

    let mut emitters: ParticleEmitterSet<Vec3> = ParticleEmitterSet::new();
    emitters.add_emitter(Box::new(pool_emitter));
    emitters.add_emitter(Box::new(fountain));

    let mut particles = ParticleSystemData3::new();
    let mut frame = Frame::new(0, DT);
    for _ in 0..FOUNTAIN_FRAMES {
        emitters.emit(&frame, &mut particles);
        frame.advance();
    }
    log::info!(
        "Emitted {} particles over {} frames",
        particles.number_of_particles(),
        FOUNTAIN_FRAMES
    );

    // ========== Grid step ==========

    let sdfs: SdfPair<'_, Vec3> = SdfPair::new(&walls, &water);
    let mut velocity = FaceCenteredGrid3::new((RESOLUTION, RESOLUTION, RESOLUTION), CELL_SIZE, Vec3::ZERO);
    // Falling water with a gentle swirl
    velocity.fill_with(|p| Vec3::new(0.5 - p.y, GRAVITY * DT, p.x - 0.5));

    let mut viscous = velocity.clone();
    let viscosity = 0.25 * max_stable_coefficient(CELL_SIZE, DT, 3);
    ForwardEulerDiffusionSolver::new().solve_face_centered(&velocity, viscosity, DT, &mut viscous, &sdfs);

    let mut solver = JacobiPressureSolver::new(10_000, 1e-2);
    let mut boundary = GridPressureSolver::<Vec3>::suggested_boundary_condition_solver(&solver);
    boundary.update_collider(&walls, viscous.cell_lattice());
    boundary.constrain_velocity_default(&mut viscous);

    let markers = build_markers(viscous.cell_lattice(), &sdfs);
    let fluid_divergence = |grid: &FaceCenteredGrid3| {
        (0..markers.len())
            .filter(|&c| markers[c] == CellType::Fluid)
            .map(|c| grid.divergence_at(c).abs())
            .fold(0.0, f32::max)
    };

    let before = fluid_divergence(&viscous);
    let mut projected = viscous.clone();
    match solver.solve(&viscous, DT, &mut projected, &sdfs) {
        Ok(report) => {
            let after = fluid_divergence(&projected);
            log::info!(
                "Projection: {} iterations, residual {:.2e}, max |div| {:.3e} -> {:.3e}",
                report.iterations,
                report.residual,
                before,
                after
            );
        }
        Err(err) => log::error!("Projection failed: {}", err),
    }
}
