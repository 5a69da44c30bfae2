//! Error types.
//!
//! Emission and diffusion never fail (they saturate silently); only
//! pressure solvers report errors.

use thiserror::Error;

use crate::grid::GridSize;

/// Result alias for pressure solves.
pub type PressureResult<T> = Result<T, PressureSolverError>;

/// Failure modes a pressure solver surfaces to its caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PressureSolverError {
    /// The iteration cap was reached with the residual still above tolerance.
    #[error("pressure solve did not converge after {iterations} iterations (residual {residual:.3e}, tolerance {tolerance:.3e})")]
    NotConverged {
        iterations: usize,
        residual: f32,
        tolerance: f32,
    },

    /// Input and output velocity grids do not share a resolution.
    #[error("velocity grid resolution mismatch: input {expected:?}, output {actual:?}")]
    ResolutionMismatch { expected: GridSize, actual: GridSize },
}
