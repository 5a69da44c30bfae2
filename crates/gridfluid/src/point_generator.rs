//! Candidate point lattices for volumetric emission.
//!
//! Generators walk a bounding box at a given spacing and hand each point to a
//! callback; returning `false` from the callback stops the walk.

use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::geometry::BoundingBox;
use crate::vector::SpatialVector;

/// Produces candidate points covering a region.
pub trait PointGenerator<P>: Send + Sync {
    /// Visit points inside `bounds` until the callback returns `false`.
    fn for_each_point(&self, bounds: &BoundingBox<P>, spacing: f32, callback: &mut dyn FnMut(P) -> bool);

    /// Collect every point inside `bounds`.
    fn generate(&self, bounds: &BoundingBox<P>, spacing: f32) -> Vec<P> {
        let mut points = Vec::new();
        self.for_each_point(bounds, spacing, &mut |point| {
            points.push(point);
            true
        });
        points
    }
}

/// The lattice an emitter uses when none is configured.
pub trait DefaultPointGenerator: SpatialVector {
    fn default_point_generator() -> Arc<dyn PointGenerator<Self>>;
}

impl DefaultPointGenerator for Vec2 {
    fn default_point_generator() -> Arc<dyn PointGenerator<Self>> {
        Arc::new(TrianglePointGenerator)
    }
}

/// Body-centred points sit `sqrt(3)/2 * spacing` from their corner
/// neighbours. With overlapping disallowed the emitter's spacing test keeps
/// whichever of the two cubic sub-lattices it accepts a point from first and
/// rejects the other, so a non-overlapping fill without jitter is simple
/// cubic at `spacing`. Both sub-lattices survive only when overlapping is
/// allowed.
impl DefaultPointGenerator for Vec3 {
    fn default_point_generator() -> Arc<dyn PointGenerator<Self>> {
        Arc::new(BccLatticePointGenerator)
    }
}

/// Number of lattice steps of size `step` (starting at `offset`) that fit in `extent`.
#[inline]
fn steps_within(extent: f32, offset: f32, step: f32) -> usize {
    if extent < offset {
        0
    } else {
        ((extent - offset) / step).floor() as usize + 1
    }
}

/// Regular grid with one point every `spacing` along each axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridPointGenerator;

impl<P: SpatialVector> PointGenerator<P> for GridPointGenerator {
    fn for_each_point(&self, bounds: &BoundingBox<P>, spacing: f32, callback: &mut dyn FnMut(P) -> bool) {
        if spacing <= 0.0 || bounds.is_empty() {
            return;
        }
        let mut counts = [1usize; 3];
        for (axis, count) in counts.iter_mut().enumerate().take(P::DIMENSION) {
            *count = steps_within(bounds.extent(axis), 0.0, spacing);
        }

        for k in 0..counts[2] {
            for j in 0..counts[1] {
                for i in 0..counts[0] {
                    let steps = [i, j, k];
                    let point = P::from_fn(|axis| {
                        bounds.lower.component(axis) + steps[axis] as f32 * spacing
                    });
                    if !callback(point) {
                        return;
                    }
                }
            }
        }
    }
}

/// 2-D hexagonal packing: rows `spacing * sqrt(3) / 2` apart, odd rows
/// shifted by half a spacing, so every neighbour is exactly `spacing` away.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrianglePointGenerator;

impl PointGenerator<Vec2> for TrianglePointGenerator {
    fn for_each_point(&self, bounds: &BoundingBox<Vec2>, spacing: f32, callback: &mut dyn FnMut(Vec2) -> bool) {
        if spacing <= 0.0 || bounds.is_empty() {
            return;
        }
        let half_spacing = 0.5 * spacing;
        let row_spacing = spacing * 3f32.sqrt() * 0.5;
        let size = bounds.size();

        let rows = steps_within(size.y, 0.0, row_spacing);
        for j in 0..rows {
            let offset = if j % 2 == 1 { half_spacing } else { 0.0 };
            let y = bounds.lower.y + j as f32 * row_spacing;
            for i in 0..steps_within(size.x, offset, spacing) {
                let x = bounds.lower.x + offset + i as f32 * spacing;
                if !callback(Vec2::new(x, y)) {
                    return;
                }
            }
        }
    }
}

/// 3-D body-centred cubic lattice: square layers `spacing / 2` apart,
/// alternate layers shifted by half a spacing in x and y.
#[derive(Debug, Clone, Copy, Default)]
pub struct BccLatticePointGenerator;

impl PointGenerator<Vec3> for BccLatticePointGenerator {
    fn for_each_point(&self, bounds: &BoundingBox<Vec3>, spacing: f32, callback: &mut dyn FnMut(Vec3) -> bool) {
        if spacing <= 0.0 || bounds.is_empty() {
            return;
        }
        let half_spacing = 0.5 * spacing;
        let size = bounds.size();

        let layers = steps_within(size.z, 0.0, half_spacing);
        for k in 0..layers {
            let offset = if k % 2 == 1 { half_spacing } else { 0.0 };
            let z = bounds.lower.z + k as f32 * half_spacing;
            for j in 0..steps_within(size.y, offset, spacing) {
                let y = bounds.lower.y + offset + j as f32 * spacing;
                for i in 0..steps_within(size.x, offset, spacing) {
                    let x = bounds.lower.x + offset + i as f32 * spacing;
                    if !callback(Vec3::new(x, y, z)) {
                        return;
                    }
                }
            }
        }
    }
}
