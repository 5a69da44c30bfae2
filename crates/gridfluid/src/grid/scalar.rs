//! Cell-centred scalar field.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use super::{GridSize, Lattice};
use crate::vector::SpatialVector;

/// One `f32` per sample of a lattice.
///
/// Built with [`ScalarGrid::new`] the samples sit at cell centres,
/// `origin + (i + 0.5) * spacing`.
#[derive(Clone, Debug)]
pub struct ScalarGrid<P> {
    lattice: Lattice<P>,
    data: Vec<f32>,
}

pub type ScalarGrid2 = ScalarGrid<Vec2>;
pub type ScalarGrid3 = ScalarGrid<Vec3>;

impl<P: SpatialVector> ScalarGrid<P> {
    /// Cell-centred grid of `resolution` cells whose lower corner is `origin`.
    pub fn new(resolution: impl Into<GridSize>, spacing: f32, origin: P) -> Self {
        let lattice = Lattice::new(resolution.into(), spacing, origin + P::splat(0.5 * spacing));
        Self::from_lattice(lattice)
    }

    /// Zero-filled grid on an explicit lattice.
    pub fn from_lattice(lattice: Lattice<P>) -> Self {
        Self {
            data: vec![0.0; lattice.sample_count()],
            lattice,
        }
    }

    pub fn lattice(&self) -> &Lattice<P> {
        &self.lattice
    }

    pub fn resolution(&self) -> GridSize {
        self.lattice.size()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at sample `(i, j, k)`.
    pub fn value_at(&self, i: usize, j: usize, k: usize) -> f32 {
        self.data[self.lattice.index_of(i, j, k)]
    }

    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f32) {
        let idx = self.lattice.index_of(i, j, k);
        self.data[idx] = value;
    }

    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Set every sample from a function of its world position.
    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(P) -> f32 + Send + Sync,
    {
        let lattice = self.lattice;
        self.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, value)| *value = f(lattice.position_at(idx)));
    }

    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
