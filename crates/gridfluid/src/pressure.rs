//! Pressure projection.
//!
//! A pressure solver takes a face-centred velocity field and returns one with
//! (near) zero divergence inside the fluid, subject to:
//! - no flow through solid faces (boundary SDF negative) or domain walls,
//! - zero pressure in air cells (fluid SDF non-negative).
//!
//! [`JacobiPressureSolver`] solves
//!
//! ```text
//! sum_n (p_n - p_c) / dx^2 = div(u*)_c / dt      (fluid cells c)
//! u = u* - dt * grad(p)                          (faces next to fluid)
//! ```
//!
//! with solid and out-of-domain neighbours dropped from the stencil
//! (Neumann) and air neighbours fixed at `p = 0` (Dirichlet).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::boundary::{BlockedBoundaryConditionSolver, GridBoundaryConditionSolver};
use crate::constants::{DEFAULT_PRESSURE_ITERATIONS, DEFAULT_PRESSURE_TOLERANCE, JACOBI_DAMPING};
use crate::error::{PressureResult, PressureSolverError};
use crate::geometry::SdfPair;
use crate::grid::{build_markers, CellType, FaceCenteredGrid};
use crate::vector::SpatialVector;

/// Outcome of a converged pressure solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureSolveReport {
    pub iterations: usize,
    /// Max-norm residual of the Poisson equation over fluid cells.
    pub residual: f32,
}

/// Projects a velocity field onto its divergence-free part.
pub trait GridPressureSolver<P>: Send {
    /// Write the projected `input` into `output` (same resolution).
    fn solve(
        &mut self,
        input: &FaceCenteredGrid<P>,
        dt: f32,
        output: &mut FaceCenteredGrid<P>,
        sdfs: &SdfPair<'_, P>,
    ) -> PressureResult<PressureSolveReport>;

    /// Boundary-condition solver that matches this solver's treatment of
    /// solid cells.
    fn suggested_boundary_condition_solver(&self) -> Box<dyn GridBoundaryConditionSolver<P>>;
}

/// Stencil of one fluid cell: neighbour cells in the system and the
/// diagonal weight (fluid plus air neighbours).
#[derive(Clone, Debug, Default)]
struct CellStencil {
    fluid_neighbors: Vec<usize>,
    diagonal: f32,
}

/// Damped Jacobi iteration on cell-centred pressure.
///
/// Pressure from the previous solve is kept as the initial guess when the
/// resolution is unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JacobiPressureSolver {
    pub max_iterations: usize,
    pub tolerance: f32,
    /// Relaxation weight in `(0, 1]`.
    pub damping: f32,
    #[serde(skip)]
    pressure: Vec<f32>,
}

impl Default for JacobiPressureSolver {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_PRESSURE_ITERATIONS,
            tolerance: DEFAULT_PRESSURE_TOLERANCE,
            damping: JACOBI_DAMPING,
            pressure: Vec::new(),
        }
    }
}

impl JacobiPressureSolver {
    pub fn new(max_iterations: usize, tolerance: f32) -> Self {
        Self {
            max_iterations,
            tolerance,
            ..Default::default()
        }
    }

    /// Cell-centred pressure from the last solve (zero outside fluid).
    pub fn pressure(&self) -> &[f32] {
        &self.pressure
    }

    fn is_blocked(markers: &[CellType], (back, front): (Option<usize>, Option<usize>)) -> bool {
        match (back, front) {
            (Some(b), Some(f)) => markers[b] == CellType::Solid || markers[f] == CellType::Solid,
            _ => true,
        }
    }

    /// Divergence of `input / dt` per fluid cell, blocked faces read as zero.
    fn rhs<P: SpatialVector>(input: &FaceCenteredGrid<P>, markers: &[CellType], dt: f32) -> Vec<f32> {
        let cells = input.cell_lattice();
        let inv_dx = 1.0 / cells.spacing();
        (0..cells.sample_count())
            .into_par_iter()
            .map(|c| {
                if markers[c] != CellType::Fluid {
                    return 0.0;
                }
                let mut div = 0.0;
                for axis in 0..P::DIMENSION {
                    let (back_face, front_face) = input.faces_of_cell(c, axis);
                    let (back_cell, front_cell) = cells.neighbors_of(c, axis);
                    let data = input.component(axis).data();
                    if !Self::is_blocked(markers, (Some(c), front_cell)) {
                        div += data[front_face];
                    }
                    if !Self::is_blocked(markers, (back_cell, Some(c))) {
                        div -= data[back_face];
                    }
                }
                div * inv_dx / dt
            })
            .collect()
    }

    fn stencils<P: SpatialVector>(input: &FaceCenteredGrid<P>, markers: &[CellType]) -> Vec<CellStencil> {
        let cells = input.cell_lattice();
        let inv_dx2 = 1.0 / (cells.spacing() * cells.spacing());
        (0..cells.sample_count())
            .into_par_iter()
            .map(|c| {
                let mut stencil = CellStencil::default();
                if markers[c] != CellType::Fluid {
                    return stencil;
                }
                for axis in 0..P::DIMENSION {
                    let (back, front) = cells.neighbors_of(c, axis);
                    for n in [back, front].into_iter().flatten() {
                        match markers[n] {
                            CellType::Solid => {}
                            CellType::Air => stencil.diagonal += inv_dx2,
                            CellType::Fluid => {
                                stencil.diagonal += inv_dx2;
                                stencil.fluid_neighbors.push(n);
                            }
                        }
                    }
                }
                stencil
            })
            .collect()
    }

    /// Max-norm of `sum_n w (p_n - p_c) - rhs_c` over fluid cells.
    fn residual(pressure: &[f32], stencils: &[CellStencil], rhs: &[f32], inv_dx2: f32) -> f32 {
        stencils
            .par_iter()
            .enumerate()
            .filter(|(_, s)| s.diagonal > 0.0)
            .map(|(c, s)| {
                let neighbors: f32 = s.fluid_neighbors.iter().map(|&n| pressure[n]).sum();
                (inv_dx2 * neighbors - s.diagonal * pressure[c] - rhs[c]).abs()
            })
            .reduce(|| 0.0, f32::max)
    }

    /// Iterate until the residual drops below tolerance.
    fn iterate(&mut self, stencils: &[CellStencil], rhs: &[f32], inv_dx2: f32) -> PressureResult<PressureSolveReport> {
        let damping = self.damping;
        let mut next = self.pressure.clone();

        for iteration in 0..self.max_iterations {
            let residual = Self::residual(&self.pressure, stencils, rhs, inv_dx2);
            if residual <= self.tolerance {
                return Ok(PressureSolveReport { iterations: iteration, residual });
            }

            let pressure = &self.pressure;
            next.par_iter_mut().enumerate().for_each(|(c, p)| {
                let s = &stencils[c];
                if s.diagonal <= 0.0 {
                    *p = 0.0;
                    return;
                }
                let neighbors: f32 = s.fluid_neighbors.iter().map(|&n| pressure[n]).sum();
                let jacobi = (inv_dx2 * neighbors - rhs[c]) / s.diagonal;
                *p = (1.0 - damping) * pressure[c] + damping * jacobi;
            });
            std::mem::swap(&mut self.pressure, &mut next);
        }

        let residual = Self::residual(&self.pressure, stencils, rhs, inv_dx2);
        if residual <= self.tolerance {
            Ok(PressureSolveReport {
                iterations: self.max_iterations,
                residual,
            })
        } else {
            Err(PressureSolverError::NotConverged {
                iterations: self.max_iterations,
                residual,
                tolerance: self.tolerance,
            })
        }
    }

    /// `output = input - dt * grad(p)` on faces next to fluid, zero on blocked faces.
    fn apply_pressure_gradient<P: SpatialVector>(
        &self,
        input: &FaceCenteredGrid<P>,
        markers: &[CellType],
        dt: f32,
        output: &mut FaceCenteredGrid<P>,
    ) {
        let scale = dt / input.spacing();
        let pressure = &self.pressure;
        for axis in 0..P::DIMENSION {
            let sides: Vec<(Option<usize>, Option<usize>)> = (0..input.component(axis).data().len())
                .map(|face| input.cells_of_face(face, axis))
                .collect();
            let src = input.component(axis).data();
            output
                .component_mut(axis)
                .data_mut()
                .par_iter_mut()
                .enumerate()
                .for_each(|(face, out)| {
                    let (back, front) = sides[face];
                    if Self::is_blocked(markers, (back, front)) {
                        *out = 0.0;
                        return;
                    }
                    // Not blocked, so both cells exist
                    let (b, f) = (back.unwrap_or_default(), front.unwrap_or_default());
                    if markers[b] == CellType::Fluid || markers[f] == CellType::Fluid {
                        *out = src[face] - scale * (pressure[f] - pressure[b]);
                    } else {
                        *out = src[face];
                    }
                });
        }
    }
}

impl<P: SpatialVector> GridPressureSolver<P> for JacobiPressureSolver {
    fn solve(
        &mut self,
        input: &FaceCenteredGrid<P>,
        dt: f32,
        output: &mut FaceCenteredGrid<P>,
        sdfs: &SdfPair<'_, P>,
    ) -> PressureResult<PressureSolveReport> {
        if input.resolution() != output.resolution() {
            return Err(PressureSolverError::ResolutionMismatch {
                expected: input.resolution(),
                actual: output.resolution(),
            });
        }

        let cells = input.cell_lattice();
        let markers = build_markers(cells, sdfs);
        let inv_dx2 = 1.0 / (cells.spacing() * cells.spacing());

        if self.pressure.len() != cells.sample_count() {
            self.pressure = vec![0.0; cells.sample_count()];
        }
        for (p, marker) in self.pressure.iter_mut().zip(&markers) {
            if *marker != CellType::Fluid {
                *p = 0.0;
            }
        }

        let rhs = Self::rhs(input, &markers, dt);
        let stencils = Self::stencils(input, &markers);

        match self.iterate(&stencils, &rhs, inv_dx2) {
            Ok(report) => {
                log::debug!(
                    "Pressure converged in {} iterations (residual {:.3e})",
                    report.iterations,
                    report.residual
                );
                self.apply_pressure_gradient(input, &markers, dt, output);
                Ok(report)
            }
            Err(err) => {
                log::warn!("{}", err);
                Err(err)
            }
        }
    }

    fn suggested_boundary_condition_solver(&self) -> Box<dyn GridBoundaryConditionSolver<P>> {
        Box::new(BlockedBoundaryConditionSolver::new())
    }
}
