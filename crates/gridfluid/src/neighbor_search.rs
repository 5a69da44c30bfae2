//! Hash-grid point searcher for the emitter's overlap test.
//!
//! Points are bucketed by `floor(p / bucket_size)`; a radius query visits the
//! buckets overlapping the query ball. With `bucket_size >= 2 * radius` that
//! is at most 2 buckets per axis.

use rustc_hash::FxHashMap;

use crate::vector::SpatialVector;

type BucketKey = [i64; 3];

#[derive(Clone, Debug)]
pub struct PointHashGridSearcher<P> {
    bucket_size: f32,
    points: Vec<P>,
    buckets: FxHashMap<BucketKey, Vec<usize>>,
}

impl<P: SpatialVector> PointHashGridSearcher<P> {
    pub fn new(bucket_size: f32) -> Self {
        assert!(bucket_size > 0.0, "bucket_size must be positive, got {}", bucket_size);
        Self {
            bucket_size,
            points: Vec::new(),
            buckets: FxHashMap::default(),
        }
    }

    /// Searcher pre-filled with `points`.
    pub fn build(bucket_size: f32, points: &[P]) -> Self {
        let mut searcher = Self::new(bucket_size);
        searcher.points.reserve(points.len());
        for &point in points {
            searcher.add(point);
        }
        searcher
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn key_of(&self, point: P) -> BucketKey {
        let mut key = [0i64; 3];
        for (axis, slot) in key.iter_mut().enumerate().take(P::DIMENSION) {
            *slot = (point.component(axis) / self.bucket_size).floor() as i64;
        }
        key
    }

    pub fn add(&mut self, point: P) {
        let key = self.key_of(point);
        let idx = self.points.len();
        self.points.push(point);
        self.buckets.entry(key).or_default().push(idx);
    }

    /// Visit every stored point strictly closer than `radius` to `origin`,
    /// until the callback returns `false`.
    pub fn for_each_nearby_point(&self, origin: P, radius: f32, mut callback: impl FnMut(usize, P) -> bool) {
        let lower = self.key_of(origin - P::splat(radius));
        let upper = self.key_of(origin + P::splat(radius));
        let radius_sq = radius * radius;

        for kz in lower[2]..=upper[2] {
            for ky in lower[1]..=upper[1] {
                for kx in lower[0]..=upper[0] {
                    let Some(bucket) = self.buckets.get(&[kx, ky, kz]) else {
                        continue;
                    };
                    for &idx in bucket {
                        let point = self.points[idx];
                        if point.distance_squared(origin) < radius_sq && !callback(idx, point) {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// True if any stored point is strictly closer than `radius`.
    pub fn has_nearby_point(&self, origin: P, radius: f32) -> bool {
        let mut found = false;
        self.for_each_nearby_point(origin, radius, |_, _| {
            found = true;
            false
        });
        found
    }
}
