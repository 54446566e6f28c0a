//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{HitRecord, Hittable, Material, Ray};
use tess_math::{Interval, Vec3};

/// A single triangle with its own material.
#[derive(Debug, Clone)]
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: face_normal(v0, v1, v2),
            material,
        }
    }
}

impl Hittable for Triangle {
    fn trace(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let t = intersect(ray, self.v0, self.v1, self.v2)?;
        Some(HitRecord::new(ray, t, self.normal, &self.material))
    }
}

/// Unit normal of the triangle, following counter-clockwise winding.
pub(crate) fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
    (v1 - v0).cross(v2 - v0).normalize_or_zero()
}

/// Möller-Trumbore intersection. Returns the ray parameter of the hit.
pub(crate) fn intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    Interval::FORWARD.surrounds(t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facing_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, -2.0),
            Vec3::new(1.0, -1.0, -2.0),
            Vec3::new(0.0, 1.0, -2.0),
            Material::default(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let triangle = facing_triangle();
        let rec = triangle.trace(&ray).expect("ray should hit");

        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(facing_triangle().trace(&ray).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(facing_triangle().trace(&ray).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let sliver = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, Material::default());
        let ray = Ray::new(Vec3::new(0.5, 0.0, 1.0), Vec3::NEG_Z);
        assert!(sliver.trace(&ray).is_none());
    }
}
