//! Explicit diffusion of grid fields.
//!
//! One forward-Euler step of `dq/dt = mu * laplacian(q)`, restricted to fluid
//! samples:
//!
//! ```text
//! dest[p] = source[p] + dt * mu * sum_n (source[n] - source[p]) / dx^2   (fluid p)
//! dest[p] = source[p]                                                    (solid / air p)
//! ```
//!
//! Neighbours `n` are the 4 (2-D) or 6 (3-D) axis neighbours. A solid
//! neighbour, or one past the lattice edge, takes the centre value, so no
//! flux crosses walls. Air neighbours follow [`AirBoundary`].

use rayon::prelude::*;

use crate::geometry::SdfPair;
use crate::grid::{
    build_markers, CellType, CollocatedVectorGrid, FaceCenteredGrid, FieldValue, Lattice, ScalarGrid,
};
use crate::vector::SpatialVector;

/// Largest coefficient for which one explicit step stays stable:
/// `dx^2 / (2 * dim * dt)`.
pub fn max_stable_coefficient(spacing: f32, dt: f32, dimension: usize) -> f32 {
    spacing * spacing / (2.0 * dimension as f32 * dt)
}

/// How an air neighbour enters the Laplacian of a fluid sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AirBoundary {
    /// Air samples contribute their own source value, as any other sample.
    #[default]
    Stencil,
    /// Air samples take the centre value: no flux leaves the fluid.
    ZeroFlux,
}

/// Time-advances grid fields by diffusion under an SDF mask.
///
/// `dest` must share the resolution of `source`; it is overwritten.
pub trait GridDiffusionSolver<P> {
    fn solve_scalar(
        &self,
        source: &ScalarGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut ScalarGrid<P>,
        sdfs: &SdfPair<'_, P>,
    );

    fn solve_collocated(
        &self,
        source: &CollocatedVectorGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut CollocatedVectorGrid<P>,
        sdfs: &SdfPair<'_, P>,
    );

    /// Each axis component is diffused on its own, with markers evaluated at
    /// that component's face positions.
    fn solve_face_centered(
        &self,
        source: &FaceCenteredGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut FaceCenteredGrid<P>,
        sdfs: &SdfPair<'_, P>,
    );
}

/// Forward-Euler diffusion.
///
/// The step is only stable for `coefficient < max_stable_coefficient(dx, dt, dim)`;
/// larger values are computed anyway (and logged at debug level).
#[derive(Clone, Copy, Debug, Default)]
pub struct ForwardEulerDiffusionSolver {
    pub air_boundary: AirBoundary,
}

impl ForwardEulerDiffusionSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_air_boundary(air_boundary: AirBoundary) -> Self {
        Self { air_boundary }
    }

    fn step<P, T>(
        &self,
        lattice: &Lattice<P>,
        source: &[T],
        coefficient: f32,
        dt: f32,
        dest: &mut [T],
        sdfs: &SdfPair<'_, P>,
    ) where
        P: SpatialVector,
        T: FieldValue,
    {
        assert_eq!(source.len(), dest.len(), "dest must match source resolution");

        let spacing = lattice.spacing();
        let limit = max_stable_coefficient(spacing, dt, P::DIMENSION);
        if coefficient >= limit {
            log::debug!(
                "Diffusion coefficient {} exceeds stable limit {} (dx {}, dt {})",
                coefficient,
                limit,
                spacing,
                dt
            );
        }

        let markers = build_markers(lattice, sdfs);
        let scale = coefficient * dt / (spacing * spacing);
        let air_boundary = self.air_boundary;

        dest.par_iter_mut().enumerate().for_each(|(idx, out)| {
            let center = source[idx];
            if markers[idx] != CellType::Fluid {
                *out = center;
                return;
            }

            let neighbor_value = |neighbor: Option<usize>| match neighbor {
                None => center,
                Some(n) => match (markers[n], air_boundary) {
                    (CellType::Solid, _) | (CellType::Air, AirBoundary::ZeroFlux) => center,
                    _ => source[n],
                },
            };

            let mut laplacian = T::ZERO;
            for axis in 0..P::DIMENSION {
                let (backward, forward) = lattice.neighbors_of(idx, axis);
                laplacian = laplacian + (neighbor_value(backward) - center) + (neighbor_value(forward) - center);
            }
            *out = center + laplacian * scale;
        });
    }
}

impl<P: SpatialVector + FieldValue> GridDiffusionSolver<P> for ForwardEulerDiffusionSolver {
    fn solve_scalar(
        &self,
        source: &ScalarGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut ScalarGrid<P>,
        sdfs: &SdfPair<'_, P>,
    ) {
        self.step(source.lattice(), source.data(), coefficient, dt, dest.data_mut(), sdfs);
    }

    fn solve_collocated(
        &self,
        source: &CollocatedVectorGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut CollocatedVectorGrid<P>,
        sdfs: &SdfPair<'_, P>,
    ) {
        self.step(source.lattice(), source.data(), coefficient, dt, dest.data_mut(), sdfs);
    }

    fn solve_face_centered(
        &self,
        source: &FaceCenteredGrid<P>,
        coefficient: f32,
        dt: f32,
        dest: &mut FaceCenteredGrid<P>,
        sdfs: &SdfPair<'_, P>,
    ) {
        for (src, dst) in source.components().iter().zip(dest.components_mut()) {
            self.step(src.lattice(), src.data(), coefficient, dt, dst.data_mut(), sdfs);
        }
    }
}
