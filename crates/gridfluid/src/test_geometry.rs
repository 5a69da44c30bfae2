//! Simple analytic shapes for driving emitters and solvers in isolation.
//!
//! - `TestSphere`: disc (2-D) or ball (3-D)
//! - `TestBox`: solid axis-aligned box
//! - `TestFloor`: everything below a horizontal plane
//!
//! Each shape is both an [`ImplicitSurface`] (for emitters) and a
//! [`ScalarField`] (for SDF masks), with negative values inside.

use crate::geometry::{BoundingBox, ImplicitSurface, ScalarField};
use crate::vector::SpatialVector;

/// Disc / ball of the given radius.
#[derive(Debug, Clone, Copy)]
pub struct TestSphere<P> {
    pub center: P,
    pub radius: f32,
}

impl<P: SpatialVector> TestSphere<P> {
    pub fn new(center: P, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl<P: SpatialVector> ImplicitSurface<P> for TestSphere<P> {
    fn signed_distance(&self, point: P) -> f32 {
        (point - self.center).length() - self.radius
    }

    fn bounding_box(&self) -> Option<BoundingBox<P>> {
        Some(BoundingBox::from_center(self.center, P::splat(self.radius)))
    }
}

impl<P: SpatialVector> ScalarField<P> for TestSphere<P> {
    fn sample(&self, point: P) -> f32 {
        self.signed_distance(point)
    }
}

/// Solid axis-aligned box.
#[derive(Debug, Clone, Copy)]
pub struct TestBox<P> {
    pub bounds: BoundingBox<P>,
}

impl<P: SpatialVector> TestBox<P> {
    pub fn new(lower: P, upper: P) -> Self {
        Self {
            bounds: BoundingBox::new(lower, upper),
        }
    }
}

impl<P: SpatialVector> ImplicitSurface<P> for TestBox<P> {
    fn signed_distance(&self, point: P) -> f32 {
        // Standard box SDF: exact outside, distance to nearest face inside.
        let center = self.bounds.center();
        let half = self.bounds.size() * 0.5;
        let q = P::from_fn(|axis| (point.component(axis) - center.component(axis)).abs())
            - half;
        let outside = q.component_max(P::ZERO).length();
        let inside = (0..P::DIMENSION)
            .map(|axis| q.component(axis))
            .fold(f32::NEG_INFINITY, f32::max)
            .min(0.0);
        outside + inside
    }

    fn bounding_box(&self) -> Option<BoundingBox<P>> {
        Some(self.bounds)
    }
}

impl<P: SpatialVector> ScalarField<P> for TestBox<P> {
    fn sample(&self, point: P) -> f32 {
        self.signed_distance(point)
    }
}

/// Everything below height `y` (axis 1) is inside.
#[derive(Debug, Clone, Copy)]
pub struct TestFloor {
    pub y: f32,
}

impl TestFloor {
    pub fn new(y: f32) -> Self {
        Self { y }
    }
}

impl<P: SpatialVector> ImplicitSurface<P> for TestFloor {
    fn signed_distance(&self, point: P) -> f32 {
        point.component(1) - self.y
    }
}

impl<P: SpatialVector> ScalarField<P> for TestFloor {
    fn sample(&self, point: P) -> f32 {
        point.component(1) - self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_sphere_sdf() {
        let sphere = TestSphere::new(Vec3::new(1.0, 0.0, 0.0), 0.5);
        assert!((sphere.signed_distance(Vec3::new(1.0, 0.0, 0.0)) + 0.5).abs() < 1e-6);
        assert!((sphere.signed_distance(Vec3::new(2.0, 0.0, 0.0)) - 0.5).abs() < 1e-6);
        let bbox = sphere.bounding_box().unwrap();
        assert_eq!(bbox.lower, Vec3::new(0.5, -0.5, -0.5));
    }

    #[test]
    fn test_box_sdf_inside_and_outside() {
        let solid = TestBox::new(Vec2::ZERO, Vec2::new(2.0, 1.0));
        // Centre: nearest face is 0.5 away (top/bottom)
        assert!((solid.signed_distance(Vec2::new(1.0, 0.5)) + 0.5).abs() < 1e-6);
        // Straight out of the right face
        assert!((solid.signed_distance(Vec2::new(3.0, 0.5)) - 1.0).abs() < 1e-6);
        // Diagonal from the corner
        let corner = solid.signed_distance(Vec2::new(3.0, 2.0));
        assert!((corner - 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_floor_is_unbounded() {
        let floor = TestFloor::new(1.0);
        assert!(ImplicitSurface::<Vec3>::bounding_box(&floor).is_none());
        assert!(ImplicitSurface::<Vec2>::is_inside(&floor, Vec2::new(5.0, 0.5)));
        assert!(!ImplicitSurface::<Vec2>::is_inside(&floor, Vec2::new(5.0, 1.5)));
    }
}
