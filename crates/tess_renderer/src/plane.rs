//! Infinite plane primitive.

use crate::{HitRecord, Hittable, Material, Ray};
use tess_math::{Interval, Vec3};

/// An infinite plane through `point` with the given normal.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material,
        }
    }
}

impl Hittable for Plane {
    fn trace(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());
        // Parallel rays and degenerate normals never hit
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        if !Interval::FORWARD.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}
