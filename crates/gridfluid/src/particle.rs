//! Particle storage that emitters append to.

use glam::{Vec2, Vec3};

use crate::vector::SpatialVector;

/// Append-only particle buffer seen by emitters.
pub trait ParticleSystem<P> {
    fn number_of_particles(&self) -> usize;

    fn positions(&self) -> &[P];

    fn velocities(&self) -> &[P];

    fn positions_mut(&mut self) -> &mut [P];

    fn velocities_mut(&mut self) -> &mut [P];

    /// Append particles; both slices must have the same length.
    fn add_particles(&mut self, positions: &[P], velocities: &[P]);

    fn add_particle(&mut self, position: P, velocity: P) {
        self.add_particles(&[position], &[velocity]);
    }
}

/// Structure-of-arrays particle collection.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystemData<P> {
    positions: Vec<P>,
    velocities: Vec<P>,
}

pub type ParticleSystemData2 = ParticleSystemData<Vec2>;
pub type ParticleSystemData3 = ParticleSystemData<Vec3>;

impl<P: SpatialVector> ParticleSystemData<P> {
    /// Create an empty particle collection.
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            velocities: Vec::new(),
        }
    }

    /// Add a particle with the given position and velocity.
    pub fn spawn(&mut self, position: P, velocity: P) {
        self.positions.push(position);
        self.velocities.push(velocity);
    }

    /// Add a stationary particle.
    pub fn spawn_at(&mut self, position: P) {
        self.spawn(position, P::ZERO);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<P: SpatialVector> ParticleSystem<P> for ParticleSystemData<P> {
    fn number_of_particles(&self) -> usize {
        self.positions.len()
    }

    fn positions(&self) -> &[P] {
        &self.positions
    }

    fn velocities(&self) -> &[P] {
        &self.velocities
    }

    fn positions_mut(&mut self) -> &mut [P] {
        &mut self.positions
    }

    fn velocities_mut(&mut self) -> &mut [P] {
        &mut self.velocities
    }

    fn add_particles(&mut self, positions: &[P], velocities: &[P]) {
        assert_eq!(
            positions.len(),
            velocities.len(),
            "positions and velocities must have the same length"
        );
        self.positions.extend_from_slice(positions);
        self.velocities.extend_from_slice(velocities);
    }
}
