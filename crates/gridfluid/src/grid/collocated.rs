//! Cell-centred vector field with every component stored at the same point.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use super::{GridSize, Lattice};
use crate::vector::SpatialVector;

#[derive(Clone, Debug)]
pub struct CollocatedVectorGrid<P> {
    lattice: Lattice<P>,
    data: Vec<P>,
}

pub type CollocatedVectorGrid2 = CollocatedVectorGrid<Vec2>;
pub type CollocatedVectorGrid3 = CollocatedVectorGrid<Vec3>;

impl<P: SpatialVector> CollocatedVectorGrid<P> {
    pub fn new(resolution: impl Into<GridSize>, spacing: f32, origin: P) -> Self {
        let lattice = Lattice::new(resolution.into(), spacing, origin + P::splat(0.5 * spacing));
        Self::from_lattice(lattice)
    }

    pub fn from_lattice(lattice: Lattice<P>) -> Self {
        Self {
            data: vec![P::ZERO; lattice.sample_count()],
            lattice,
        }
    }

    pub fn lattice(&self) -> &Lattice<P> {
        &self.lattice
    }

    pub fn resolution(&self) -> GridSize {
        self.lattice.size()
    }

    pub fn data(&self) -> &[P] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn value_at(&self, i: usize, j: usize, k: usize) -> P {
        self.data[self.lattice.index_of(i, j, k)]
    }

    pub fn set(&mut self, i: usize, j: usize, k: usize, value: P) {
        let idx = self.lattice.index_of(i, j, k);
        self.data[idx] = value;
    }

    pub fn fill(&mut self, value: P) {
        self.data.fill(value);
    }

    pub fn fill_with<F>(&mut self, f: F)
    where
        F: Fn(P) -> P + Send + Sync,
    {
        let lattice = self.lattice;
        self.data
            .par_iter_mut()
            .enumerate()
            .for_each(|(idx, value)| *value = f(lattice.position_at(idx)));
    }

    /// Component-wise sum over all samples.
    pub fn sum(&self) -> P {
        self.data.iter().fold(P::ZERO, |acc, v| acc + *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collocated_fill_and_sum() {
        let mut grid = CollocatedVectorGrid2::new((2, 2), 1.0, Vec2::ZERO);
        grid.fill_with(|p| p);
        assert_eq!(grid.value_at(1, 0, 0), Vec2::new(1.5, 0.5));
        assert_eq!(grid.sum(), Vec2::new(4.0, 4.0));
        grid.fill(Vec2::X);
        assert_eq!(grid.sum(), Vec2::new(4.0, 0.0));
    }
}
