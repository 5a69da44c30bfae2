//! Particle emitters.
//!
//! An emitter appends particles to a [`ParticleSystem`] once per frame.
//! Emission never fails: requests that cannot be satisfied (empty region,
//! cap reached, disabled emitter) simply add nothing.

mod point;
mod volume;

pub use point::{PointEmitterSettings, PointParticleEmitter, PointParticleEmitter2, PointParticleEmitter3};
pub use volume::{
    EmissionState, VolumeEmitterSettings, VolumeParticleEmitter, VolumeParticleEmitter2,
    VolumeParticleEmitter3,
};

use crate::animation::Frame;
use crate::particle::ParticleSystem;

/// Something that adds particles to a particle system each frame.
pub trait ParticleEmitter<P>: Send {
    /// Append this frame's particles.
    fn emit(&mut self, frame: &Frame, particles: &mut dyn ParticleSystem<P>);

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// Several emitters driven as one, in insertion order.
pub struct ParticleEmitterSet<P> {
    emitters: Vec<Box<dyn ParticleEmitter<P>>>,
    enabled: bool,
}

impl<P> ParticleEmitterSet<P> {
    pub fn new() -> Self {
        Self {
            emitters: Vec::new(),
            enabled: true,
        }
    }

    pub fn add_emitter(&mut self, emitter: Box<dyn ParticleEmitter<P>>) {
        self.emitters.push(emitter);
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn emitters_mut(&mut self) -> &mut [Box<dyn ParticleEmitter<P>>] {
        &mut self.emitters
    }
}

impl<P> Default for ParticleEmitterSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> ParticleEmitter<P> for ParticleEmitterSet<P> {
    fn emit(&mut self, frame: &Frame, particles: &mut dyn ParticleSystem<P>) {
        if !self.enabled {
            return;
        }
        for emitter in &mut self.emitters {
            emitter.emit(frame, particles);
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
