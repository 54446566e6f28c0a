//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use tess_math::Vec3;

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Distance along the ray, in units of the ray direction's length
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, facing against the ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a hit at `t`, flipping `outward_normal` so it faces the ray.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let normal = if ray.direction().dot(outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            t,
            p: ray.at(t),
            normal,
            material,
        }
    }
}

/// Trait for scene objects that can be traced by rays.
///
/// Implementations report their own nearest hit in front of the ray origin,
/// or `None` when the ray misses (including degenerate rays or geometry).
pub trait Hittable: Send + Sync {
    fn trace(&self, ray: &Ray) -> Option<HitRecord<'_>>;
}
