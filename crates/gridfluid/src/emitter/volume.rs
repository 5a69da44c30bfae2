//! Fill an implicit volume with particles.

use std::sync::Arc;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::ParticleEmitter;
use crate::animation::Frame;
use crate::constants::{DEFAULT_PARTICLE_SPACING, OVERLAP_TOLERANCE};
use crate::geometry::{BoundingBox, ImplicitSurface};
use crate::neighbor_search::PointHashGridSearcher;
use crate::particle::ParticleSystem;
use crate::point_generator::{DefaultPointGenerator, PointGenerator};
use crate::sampler::{PointSampler, SeededSampler};
use crate::serde_utils::{deserialize_vector, serialize_vector};
use crate::vector::SpatialVector;

/// Emission bookkeeping, only ever advanced by `emit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmissionState {
    /// Particles added over the emitter's lifetime.
    pub number_of_emitted_particles: usize,
    /// Set after the first `emit` of a one-shot emitter.
    pub one_shot_completed: bool,
}

/// Serializable emitter configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "P: SpatialVector", default)]
pub struct VolumeEmitterSettings<P> {
    pub spacing: f32,
    /// Fraction of half a spacing each candidate may move, in `[0, 1]`.
    pub jitter: f32,
    pub is_one_shot: bool,
    pub allow_overlapping: bool,
    pub max_number_of_particles: usize,
    #[serde(serialize_with = "serialize_vector", deserialize_with = "deserialize_vector")]
    pub initial_velocity: P,
    pub seed: u64,
}

impl<P: SpatialVector> Default for VolumeEmitterSettings<P> {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_PARTICLE_SPACING,
            jitter: 0.0,
            is_one_shot: true,
            allow_overlapping: false,
            max_number_of_particles: usize::MAX,
            initial_velocity: P::ZERO,
            seed: 0,
        }
    }
}

/// Emits particles on a point lattice inside an implicit surface.
///
/// Each `emit`:
/// 1. clips `bounds` to the surface's bounding box,
/// 2. walks the point generator over that region at `spacing`,
/// 3. jitters each candidate by up to `0.5 * jitter * spacing`,
/// 4. keeps candidates strictly inside the surface and, unless overlapping
///    is allowed, at least `spacing` away from every existing particle,
/// 5. stops at `max_number_of_particles` over the emitter's lifetime.
pub struct VolumeParticleEmitter<P> {
    surface: Arc<dyn ImplicitSurface<P>>,
    bounds: BoundingBox<P>,
    spacing: f32,
    jitter: f32,
    is_one_shot: bool,
    allow_overlapping: bool,
    max_number_of_particles: usize,
    initial_velocity: P,
    point_generator: Arc<dyn PointGenerator<P>>,
    sampler: Box<dyn PointSampler>,
    state: EmissionState,
    enabled: bool,
}

pub type VolumeParticleEmitter2 = VolumeParticleEmitter<Vec2>;
pub type VolumeParticleEmitter3 = VolumeParticleEmitter<Vec3>;

impl<P: DefaultPointGenerator> VolumeParticleEmitter<P> {
    /// One-shot, non-overlapping emitter with no jitter and no cap.
    pub fn new(surface: Arc<dyn ImplicitSurface<P>>, bounds: BoundingBox<P>, spacing: f32) -> Self {
        Self::from_settings(
            surface,
            bounds,
            &VolumeEmitterSettings {
                spacing,
                ..Default::default()
            },
        )
    }

    pub fn from_settings(
        surface: Arc<dyn ImplicitSurface<P>>,
        bounds: BoundingBox<P>,
        settings: &VolumeEmitterSettings<P>,
    ) -> Self {
        assert!(settings.spacing > 0.0, "spacing must be positive, got {}", settings.spacing);
        Self {
            surface,
            bounds,
            spacing: settings.spacing,
            jitter: settings.jitter.clamp(0.0, 1.0),
            is_one_shot: settings.is_one_shot,
            allow_overlapping: settings.allow_overlapping,
            max_number_of_particles: settings.max_number_of_particles,
            initial_velocity: settings.initial_velocity,
            point_generator: P::default_point_generator(),
            sampler: Box::new(SeededSampler::new(settings.seed)),
            state: EmissionState::default(),
            enabled: true,
        }
    }
}

impl<P: SpatialVector> VolumeParticleEmitter<P> {
    // ========== Configuration ==========

    pub fn surface(&self) -> &Arc<dyn ImplicitSurface<P>> {
        &self.surface
    }

    pub fn set_surface(&mut self, surface: Arc<dyn ImplicitSurface<P>>) {
        self.surface = surface;
    }

    pub fn bounds(&self) -> &BoundingBox<P> {
        &self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox<P>) {
        self.bounds = bounds;
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        assert!(spacing > 0.0, "spacing must be positive, got {}", spacing);
        self.spacing = spacing;
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Clamped to `[0, 1]`.
    pub fn set_jitter(&mut self, jitter: f32) {
        self.jitter = jitter.clamp(0.0, 1.0);
    }

    pub fn is_one_shot(&self) -> bool {
        self.is_one_shot
    }

    pub fn set_is_one_shot(&mut self, is_one_shot: bool) {
        self.is_one_shot = is_one_shot;
    }

    pub fn allow_overlapping(&self) -> bool {
        self.allow_overlapping
    }

    pub fn set_allow_overlapping(&mut self, allow_overlapping: bool) {
        self.allow_overlapping = allow_overlapping;
    }

    pub fn max_number_of_particles(&self) -> usize {
        self.max_number_of_particles
    }

    pub fn set_max_number_of_particles(&mut self, max_number_of_particles: usize) {
        self.max_number_of_particles = max_number_of_particles;
    }

    pub fn initial_velocity(&self) -> P {
        self.initial_velocity
    }

    pub fn set_initial_velocity(&mut self, initial_velocity: P) {
        self.initial_velocity = initial_velocity;
    }

    pub fn point_generator(&self) -> &Arc<dyn PointGenerator<P>> {
        &self.point_generator
    }

    pub fn set_point_generator(&mut self, point_generator: Arc<dyn PointGenerator<P>>) {
        self.point_generator = point_generator;
    }

    /// Replace the random source used for jitter.
    pub fn set_sampler(&mut self, sampler: Box<dyn PointSampler>) {
        self.sampler = sampler;
    }

    pub fn state(&self) -> EmissionState {
        self.state
    }

    pub fn number_of_emitted_particles(&self) -> usize {
        self.state.number_of_emitted_particles
    }

    // ========== Emission ==========

    /// Region candidates are drawn from: `bounds`, clipped to the surface.
    fn emission_region(&self) -> BoundingBox<P> {
        match self.surface.bounding_box() {
            Some(surface_bounds) => self.bounds.intersect(&surface_bounds),
            None => self.bounds,
        }
    }

    /// Accepted positions for this call, at most `budget` of them.
    fn collect_positions(&mut self, existing: &[P], budget: usize) -> Vec<P> {
        let region = self.emission_region();
        if region.is_empty() {
            log::debug!("Volume emitter region is empty, nothing to emit");
            return Vec::new();
        }

        let spacing = self.spacing;
        let jitter_radius = 0.5 * self.jitter * spacing;
        let overlap_radius = spacing * (1.0 - OVERLAP_TOLERANCE);
        let mut searcher = (!self.allow_overlapping)
            .then(|| PointHashGridSearcher::build(2.0 * spacing, existing));

        let surface = Arc::clone(&self.surface);
        let generator = Arc::clone(&self.point_generator);
        let sampler: &mut dyn PointSampler = self.sampler.as_mut();

        let mut accepted = Vec::new();
        let mut rejected = 0usize;
        generator.for_each_point(&region, spacing, &mut |candidate| {
            if accepted.len() >= budget {
                return false;
            }
            let point = if jitter_radius > 0.0 {
                candidate + P::random_direction(&mut *sampler) * jitter_radius
            } else {
                candidate
            };

            if surface.signed_distance(point) >= 0.0 {
                rejected += 1;
                return true;
            }
            if let Some(searcher) = searcher.as_mut() {
                if searcher.has_nearby_point(point, overlap_radius) {
                    rejected += 1;
                    return true;
                }
                searcher.add(point);
            }

            accepted.push(point);
            accepted.len() < budget
        });

        log::trace!("Volume emitter rejected {} candidates", rejected);
        accepted
    }
}

impl<P: SpatialVector> ParticleEmitter<P> for VolumeParticleEmitter<P> {
    fn emit(&mut self, _frame: &Frame, particles: &mut dyn ParticleSystem<P>) {
        if !self.enabled || (self.is_one_shot && self.state.one_shot_completed) {
            return;
        }

        let budget = self
            .max_number_of_particles
            .saturating_sub(self.state.number_of_emitted_particles);
        let positions = if budget > 0 {
            self.collect_positions(particles.positions(), budget)
        } else {
            Vec::new()
        };

        if !positions.is_empty() {
            let velocities = vec![self.initial_velocity; positions.len()];
            particles.add_particles(&positions, &velocities);
        }
        self.state.number_of_emitted_particles += positions.len();
        if self.is_one_shot {
            self.state.one_shot_completed = true;
        }

        log::debug!(
            "Volume emitter added {} particles ({} total)",
            positions.len(),
            self.state.number_of_emitted_particles
        );
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
