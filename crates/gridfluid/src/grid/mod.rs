//! Structured grid storage for diffusion and pressure projection.
//!
//! Every field layout sits on a [`Lattice`]: a box of samples with uniform
//! spacing, addressed by a flat index `k * nx * ny + j * nx + i`. 2-D grids
//! are the `z = 1` slice of the same layout.
//!
//! - [`ScalarGrid`]: one `f32` per cell centre
//! - [`CollocatedVectorGrid`]: one vector per cell centre
//! - [`FaceCenteredGrid`]: MAC layout, one scalar component per axis stored
//!   on the faces normal to that axis

mod collocated;
mod face_centered;
mod scalar;

pub use collocated::{CollocatedVectorGrid, CollocatedVectorGrid2, CollocatedVectorGrid3};
pub use face_centered::{FaceCenteredGrid, FaceCenteredGrid2, FaceCenteredGrid3};
pub use scalar::{ScalarGrid, ScalarGrid2, ScalarGrid3};

use std::ops::{Add, Mul, Sub};

use glam::{Vec2, Vec3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::geometry::{ScalarField, SdfPair};
use crate::vector::SpatialVector;

/// Sample classification used to mask grid operations.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum CellType {
    /// Inside a collider (boundary SDF negative)
    Solid,
    /// Inside the liquid
    Fluid,
    /// Open atmosphere
    #[default]
    Air,
}

/// Sample counts along each axis. 2-D sizes have `z == 1`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl GridSize {
    pub const fn new2(x: usize, y: usize) -> Self {
        Self { x, y, z: 1 }
    }

    pub const fn new3(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of samples.
    pub fn count(&self) -> usize {
        self.x * self.y * self.z
    }

    pub fn get(&self, axis: usize) -> usize {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Copy with one more sample along `axis` (face count of a cell grid).
    pub fn grown_along(&self, axis: usize) -> Self {
        let mut size = *self;
        match axis {
            0 => size.x += 1,
            1 => size.y += 1,
            _ => size.z += 1,
        }
        size
    }
}

impl From<(usize, usize)> for GridSize {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new2(x, y)
    }
}

impl From<(usize, usize, usize)> for GridSize {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Self::new3(x, y, z)
    }
}

/// Sample layout shared by every grid field: size, spacing, and the world
/// position of sample `(0, 0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lattice<P> {
    size: GridSize,
    spacing: f32,
    origin: P,
}

impl<P: SpatialVector> Lattice<P> {
    pub fn new(size: GridSize, spacing: f32, origin: P) -> Self {
        assert!(spacing > 0.0, "spacing must be positive, got {}", spacing);
        assert!(
            P::DIMENSION == 3 || size.z == 1,
            "2-D lattice must have z == 1, got {:?}",
            size
        );
        Self {
            size,
            spacing,
            origin,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// World position of the first sample.
    pub fn origin(&self) -> P {
        self.origin
    }

    pub fn sample_count(&self) -> usize {
        self.size.count()
    }

    /// Flat index of sample `(i, j, k)`.
    #[inline]
    pub fn index_of(&self, i: usize, j: usize, k: usize) -> usize {
        k * self.size.x * self.size.y + j * self.size.x + i
    }

    /// Inverse of [`Lattice::index_of`].
    #[inline]
    pub fn coords_of(&self, idx: usize) -> [usize; 3] {
        let layer = self.size.x * self.size.y;
        let k = idx / layer;
        let rem = idx % layer;
        [rem % self.size.x, rem / self.size.x, k]
    }

    /// World position of the sample at `idx`.
    pub fn position_at(&self, idx: usize) -> P {
        let coords = self.coords_of(idx);
        let origin = self.origin;
        let spacing = self.spacing;
        P::from_fn(|axis| origin.component(axis) + coords[axis] as f32 * spacing)
    }

    /// Backward and forward neighbours of `idx` along `axis`, `None` past the
    /// lattice edge.
    #[inline]
    pub fn neighbors_of(&self, idx: usize, axis: usize) -> (Option<usize>, Option<usize>) {
        let coords = self.coords_of(idx);
        let stride = match axis {
            0 => 1,
            1 => self.size.x,
            _ => self.size.x * self.size.y,
        };
        let backward = (coords[axis] > 0).then(|| idx - stride);
        let forward = (coords[axis] + 1 < self.size.get(axis)).then(|| idx + stride);
        (backward, forward)
    }
}

/// Value stored per sample: `f32` for scalars, the vector type for
/// collocated vector fields.
pub trait FieldValue:
    Copy + Send + Sync + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    const ZERO: Self;
}

impl FieldValue for f32 {
    const ZERO: Self = 0.0;
}

impl FieldValue for Vec2 {
    const ZERO: Self = Vec2::ZERO;
}

impl FieldValue for Vec3 {
    const ZERO: Self = Vec3::ZERO;
}

/// Classify one point against the SDF pair: solid wins over fluid.
#[inline]
pub fn classify<P: SpatialVector>(position: P, sdfs: &SdfPair<'_, P>) -> CellType {
    if sdfs.boundary.sample(position) < 0.0 {
        CellType::Solid
    } else if sdfs.fluid.sample(position) < 0.0 {
        CellType::Fluid
    } else {
        CellType::Air
    }
}

/// One marker per lattice sample, evaluated at the sample positions.
pub fn build_markers<P: SpatialVector>(lattice: &Lattice<P>, sdfs: &SdfPair<'_, P>) -> Vec<CellType> {
    (0..lattice.sample_count())
        .into_par_iter()
        .map(|idx| classify(lattice.position_at(idx), sdfs))
        .collect()
}

/// Solid markers from a single collider field (no fluid mask).
pub fn build_solid_markers<P: SpatialVector>(
    lattice: &Lattice<P>,
    collider: &dyn ScalarField<P>,
) -> Vec<bool> {
    (0..lattice.sample_count())
        .into_par_iter()
        .map(|idx| collider.sample(lattice.position_at(idx)) < 0.0)
        .collect()
}
