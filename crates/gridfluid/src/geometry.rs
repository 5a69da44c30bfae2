//! Geometry collaborators: bounding boxes, implicit surfaces, scalar fields.
//!
//! Sign convention everywhere in the crate: a signed distance is negative
//! inside the shape and positive outside.

use glam::{Vec2, Vec3};

use crate::constants::MAX_SDF;
use crate::vector::SpatialVector;

/// Axis-aligned box given by its lower and upper corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<P> {
    pub lower: P,
    pub upper: P,
}

pub type BoundingBox2 = BoundingBox<Vec2>;
pub type BoundingBox3 = BoundingBox<Vec3>;

impl<P: SpatialVector> BoundingBox<P> {
    /// Box spanning two arbitrary corner points.
    pub fn new(a: P, b: P) -> Self {
        Self {
            lower: a.component_min(b),
            upper: a.component_max(b),
        }
    }

    /// Box of half-size `half_extent` centred on `center`.
    pub fn from_center(center: P, half_extent: P) -> Self {
        Self::new(center - half_extent, center + half_extent)
    }

    pub fn size(&self) -> P {
        self.upper - self.lower
    }

    /// Extent along one axis (negative when the box is empty on that axis).
    pub fn extent(&self, axis: usize) -> f32 {
        self.upper.component(axis) - self.lower.component(axis)
    }

    pub fn center(&self) -> P {
        (self.lower + self.upper) * 0.5
    }

    /// True when the box has no volume left on some axis.
    pub fn is_empty(&self) -> bool {
        (0..P::DIMENSION).any(|axis| self.extent(axis) < 0.0)
    }

    pub fn contains(&self, point: P) -> bool {
        (0..P::DIMENSION).all(|axis| {
            let c = point.component(axis);
            c >= self.lower.component(axis) && c <= self.upper.component(axis)
        })
    }

    /// Overlap of two boxes; may come out empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            lower: self.lower.component_max(other.lower),
            upper: self.upper.component_min(other.upper),
        }
    }

    /// Grow (or shrink, for negative `delta`) every face by `delta`.
    pub fn expanded(&self, delta: f32) -> Self {
        Self {
            lower: self.lower - P::splat(delta),
            upper: self.upper + P::splat(delta),
        }
    }
}

/// Volume described by a signed distance function.
pub trait ImplicitSurface<P>: Send + Sync {
    /// Signed distance to the surface, negative inside.
    fn signed_distance(&self, point: P) -> f32;

    fn is_inside(&self, point: P) -> bool {
        self.signed_distance(point) < 0.0
    }

    /// Tight bounds of the inside region, `None` for unbounded shapes.
    fn bounding_box(&self) -> Option<BoundingBox<P>> {
        None
    }
}

/// Scalar quantity sampled at arbitrary points.
///
/// Any `Fn(P) -> f32 + Send + Sync` closure is a scalar field.
pub trait ScalarField<P>: Send + Sync {
    fn sample(&self, point: P) -> f32;
}

impl<P, F> ScalarField<P> for F
where
    F: Fn(P) -> f32 + Send + Sync,
{
    fn sample(&self, point: P) -> f32 {
        self(point)
    }
}

/// Field with the same value everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantScalarField {
    pub value: f32,
}

impl ConstantScalarField {
    pub const fn new(value: f32) -> Self {
        Self { value }
    }
}

impl<P> ScalarField<P> for ConstantScalarField {
    fn sample(&self, _point: P) -> f32 {
        self.value
    }
}

static NO_BOUNDARY: ConstantScalarField = ConstantScalarField::new(MAX_SDF);
static FULL_FLUID: ConstantScalarField = ConstantScalarField::new(-MAX_SDF);

/// The two signed distance fields that mask every grid operation.
///
/// * `boundary` negative means the point is inside a solid.
/// * `fluid` negative means the point is inside the liquid; positive means
///   atmosphere.
#[derive(Clone, Copy)]
pub struct SdfPair<'a, P> {
    pub boundary: &'a dyn ScalarField<P>,
    pub fluid: &'a dyn ScalarField<P>,
}

impl<'a, P: SpatialVector> SdfPair<'a, P> {
    pub fn new(boundary: &'a dyn ScalarField<P>, fluid: &'a dyn ScalarField<P>) -> Self {
        Self { boundary, fluid }
    }

    /// Solid boundary with the whole domain full of fluid.
    pub fn with_boundary(boundary: &'a dyn ScalarField<P>) -> Self {
        Self {
            boundary,
            fluid: &FULL_FLUID,
        }
    }

    /// Free surface with no solids.
    pub fn with_fluid(fluid: &'a dyn ScalarField<P>) -> Self {
        Self {
            boundary: &NO_BOUNDARY,
            fluid,
        }
    }
}

impl<P: SpatialVector> Default for SdfPair<'static, P> {
    fn default() -> Self {
        Self {
            boundary: &NO_BOUNDARY,
            fluid: &FULL_FLUID,
        }
    }
}
