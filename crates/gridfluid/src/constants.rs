//! Numerical constants shared by emitters and solvers.

/// Sentinel distance used by the default SDFs.
///
/// The default boundary field is `+MAX_SDF` (no solid anywhere) and the
/// default fluid field is `-MAX_SDF` (fluid everywhere).
pub const MAX_SDF: f32 = f32::MAX;

/// Relative slack on the overlap radius.
///
/// Lattice neighbours sit exactly one spacing apart; without slack, rounding
/// would reject about half of them.
pub const OVERLAP_TOLERANCE: f32 = 1e-4;

/// Jacobi relaxation weight.
///
/// Undamped Jacobi does not damp the checkerboard mode of a closed
/// (all-Neumann) domain; 2/3 does.
pub const JACOBI_DAMPING: f32 = 2.0 / 3.0;

/// Default iteration cap for the Jacobi pressure solver.
pub const DEFAULT_PRESSURE_ITERATIONS: usize = 10_000;

/// Default residual tolerance for the Jacobi pressure solver.
pub const DEFAULT_PRESSURE_TOLERANCE: f32 = 1e-4;

/// Default number of face layers filled by velocity extrapolation.
pub const DEFAULT_EXTRAPOLATION_DEPTH: usize = 5;

/// Default particle spacing for emitter settings.
pub const DEFAULT_PARTICLE_SPACING: f32 = 0.1;

/// Relative slack removed from a point emitter's target before rounding up.
///
/// Frame intervals are f32, so `n * dt * rate` lands a few ulps above the
/// intended integer for intervals like `1/60`.
pub const RATE_ROUNDING_SLACK: f64 = 1e-6;
