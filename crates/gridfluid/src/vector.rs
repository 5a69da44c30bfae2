//! Dimension-generic vector operations.
//!
//! Every emitter, grid and solver in the crate is written once against
//! [`SpatialVector`] and instantiated for `Vec2` and `Vec3`.

use std::f32::consts::TAU;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Sub};

use glam::{Vec2, Vec3};

use crate::sampler::PointSampler;

/// A point or direction in 2-D or 3-D space.
pub trait SpatialVector:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f32, Output = Self>
    + AddAssign
{
    /// Number of axes (2 or 3).
    const DIMENSION: usize;

    /// The zero vector.
    const ZERO: Self;

    /// Vector with every component set to `value`.
    fn splat(value: f32) -> Self;

    /// Build a vector from a per-axis function.
    fn from_fn(f: impl FnMut(usize) -> f32) -> Self;

    /// Component along `axis` (0 = x, 1 = y, 2 = z).
    fn component(self, axis: usize) -> f32;

    fn dot(self, other: Self) -> f32;

    fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    fn length_squared(self) -> f32 {
        self.dot(self)
    }

    fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self * (1.0 / len)
        } else {
            Self::ZERO
        }
    }

    /// Per-axis minimum.
    fn component_min(self, other: Self) -> Self {
        Self::from_fn(|axis| self.component(axis).min(other.component(axis)))
    }

    /// Per-axis maximum.
    fn component_max(self, other: Self) -> Self {
        Self::from_fn(|axis| self.component(axis).max(other.component(axis)))
    }

    /// Unit vector uniformly distributed on the circle / sphere.
    fn random_direction(sampler: &mut dyn PointSampler) -> Self;

    /// Unit vector uniformly distributed inside the cone of `half_angle`
    /// radians around the unit vector `axis`.
    fn sample_cone(axis: Self, half_angle: f32, sampler: &mut dyn PointSampler) -> Self;
}

impl SpatialVector for Vec2 {
    const DIMENSION: usize = 2;
    const ZERO: Self = Vec2::ZERO;

    fn splat(value: f32) -> Self {
        Vec2::splat(value)
    }

    fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        Vec2::new(f(0), f(1))
    }

    #[inline]
    fn component(self, axis: usize) -> f32 {
        self[axis]
    }

    #[inline]
    fn dot(self, other: Self) -> f32 {
        Vec2::dot(self, other)
    }

    fn random_direction(sampler: &mut dyn PointSampler) -> Self {
        let angle = TAU * sampler.next_uniform();
        Vec2::new(angle.cos(), angle.sin())
    }

    fn sample_cone(axis: Self, half_angle: f32, sampler: &mut dyn PointSampler) -> Self {
        // In 2-D the cone is an arc: rotate the axis by a uniform angle.
        let angle = (2.0 * sampler.next_uniform() - 1.0) * half_angle;
        let (sin, cos) = angle.sin_cos();
        Vec2::new(cos * axis.x - sin * axis.y, sin * axis.x + cos * axis.y)
    }
}

impl SpatialVector for Vec3 {
    const DIMENSION: usize = 3;
    const ZERO: Self = Vec3::ZERO;

    fn splat(value: f32) -> Self {
        Vec3::splat(value)
    }

    fn from_fn(mut f: impl FnMut(usize) -> f32) -> Self {
        Vec3::new(f(0), f(1), f(2))
    }

    #[inline]
    fn component(self, axis: usize) -> f32 {
        self[axis]
    }

    #[inline]
    fn dot(self, other: Self) -> f32 {
        Vec3::dot(self, other)
    }

    fn random_direction(sampler: &mut dyn PointSampler) -> Self {
        let z = 1.0 - 2.0 * sampler.next_uniform();
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = TAU * sampler.next_uniform();
        Vec3::new(r * phi.cos(), r * phi.sin(), z)
    }

    fn sample_cone(axis: Self, half_angle: f32, sampler: &mut dyn PointSampler) -> Self {
        // Uniform over the spherical cap: cos(theta) uniform in [cos(half_angle), 1].
        let cos_theta = 1.0 - (1.0 - half_angle.cos()) * sampler.next_uniform();
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = TAU * sampler.next_uniform();
        let (tangent, bitangent) = axis.any_orthonormal_pair();
        (tangent * phi.cos() + bitangent * phi.sin()) * sin_theta + axis * cos_theta
    }
}
