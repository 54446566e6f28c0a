//! Per-sample pixel evaluation: primary ray, nearest hit, fixed-light shading.

use std::sync::Arc;

use crate::{Camera, Color, HitRecord, Hittable, Ray};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tess_math::{Interval, Vec3};

/// Direction the single light travels in (normalized before use).
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(-1.0, -1.0, 1.0);

/// Constant light floor added to every lit surface.
pub const AMBIENT: f32 = 0.1;

/// Find the closest hit among `objects`.
///
/// Ties keep the object that comes first in the slice. Hits at a NaN or
/// infinite distance never win.
pub fn nearest_hit<'a>(objects: &'a [Arc<dyn Hittable>], ray: &Ray) -> Option<HitRecord<'a>> {
    let mut closest: Option<HitRecord<'a>> = None;
    let mut closest_t = f32::INFINITY;

    for object in objects {
        if let Some(hit) = object.trace(ray) {
            if hit.t < closest_t {
                closest_t = hit.t;
                closest = Some(hit);
            }
        }
    }

    closest
}

/// Light intensity for a surface normal, clamped to [0, 1].
pub fn light_intensity(normal: Vec3) -> f32 {
    let facing = normal.dot(-LIGHT_DIRECTION.normalize()).max(0.0);
    Interval::UNIT.clamp(facing + AMBIENT)
}

/// Shade a hit with the fixed directional light.
pub fn shade(hit: &HitRecord<'_>) -> Color {
    hit.material.color() * light_intensity(hit.normal)
}

/// Evaluates color samples for single pixels of one frame.
pub struct PixelSampler<'a> {
    camera: &'a dyn Camera,
    objects: &'a [Arc<dyn Hittable>],
    jitter: bool,
}

impl<'a> PixelSampler<'a> {
    pub fn new(camera: &'a dyn Camera, objects: &'a [Arc<dyn Hittable>], jitter: bool) -> Self {
        Self {
            camera,
            objects,
            jitter,
        }
    }

    /// Color of one sample for pixel (x, y). Misses are black.
    ///
    /// Without jitter every sample of a pixel uses the same center ray.
    pub fn sample(&self, x: u32, y: u32, sample_index: u32) -> Color {
        let ray = if self.jitter {
            let (dx, dy) = jitter_offset(x, y, sample_index);
            self.camera.ray_at(x as f32 + 0.5 + dx, y as f32 + 0.5 + dy)
        } else {
            self.camera.get_ray(x, y)
        };

        match nearest_hit(self.objects, &ray) {
            Some(hit) => shade(&hit),
            None => Color::ZERO,
        }
    }
}

/// Sub-pixel offset in [-0.5, 0.5)², a pure function of pixel and sample.
fn jitter_offset(x: u32, y: u32, sample_index: u32) -> (f32, f32) {
    let seed = (((y as u64) << 32) | x as u64)
        ^ (sample_index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = StdRng::seed_from_u64(seed);
    (rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, PinholeCamera, Sphere};

    /// Reports a hit at a fixed distance for every ray.
    struct Wall {
        distance: f32,
        normal: Vec3,
        material: Material,
    }

    impl Wall {
        fn new(distance: f32, color: Color) -> Self {
            Self {
                distance,
                normal: -LIGHT_DIRECTION.normalize(),
                material: Material::new(color),
            }
        }
    }

    impl Hittable for Wall {
        fn trace(&self, ray: &Ray) -> Option<HitRecord<'_>> {
            Some(HitRecord {
                t: self.distance,
                p: ray.at(self.distance),
                normal: self.normal,
                material: &self.material,
            })
        }
    }

    struct Nothing;

    impl Hittable for Nothing {
        fn trace(&self, _ray: &Ray) -> Option<HitRecord<'_>> {
            None
        }
    }

    const RED: Color = Vec3::new(1.0, 0.0, 0.0);
    const BLUE: Color = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn test_nearest_hit_prefers_smaller_distance() {
        let ray = Ray::default();

        // Far object listed first
        let objects: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(Wall::new(5.0, BLUE)),
            Arc::new(Nothing),
            Arc::new(Wall::new(2.0, RED)),
        ];
        let hit = nearest_hit(&objects, &ray).expect("should hit");
        assert_eq!(hit.t, 2.0);
        assert_eq!(hit.material.color(), RED);
    }

    #[test]
    fn test_nearest_hit_tie_keeps_first() {
        let ray = Ray::default();
        let objects: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(Wall::new(3.0, RED)),
            Arc::new(Wall::new(3.0, BLUE)),
        ];
        let hit = nearest_hit(&objects, &ray).expect("should hit");
        assert_eq!(hit.material.color(), RED);
    }

    #[test]
    fn test_nearest_hit_skips_nan_distance() {
        let ray = Ray::default();
        let objects: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(Wall::new(f32::NAN, BLUE)),
            Arc::new(Wall::new(2.0, RED)),
        ];
        let hit = nearest_hit(&objects, &ray).expect("should hit");
        assert_eq!(hit.t, 2.0);
        assert_eq!(hit.material.color(), RED);

        let only_nan: Vec<Arc<dyn Hittable>> = vec![Arc::new(Wall::new(f32::NAN, BLUE))];
        assert!(nearest_hit(&only_nan, &ray).is_none());
    }

    #[test]
    fn test_nearest_hit_empty_scene() {
        let objects: Vec<Arc<dyn Hittable>> = Vec::new();
        assert!(nearest_hit(&objects, &Ray::default()).is_none());
    }

    #[test]
    fn test_overlapping_spheres_shade_nearer_color() {
        let camera = PinholeCamera::new(9, 9);
        let objects: Vec<Arc<dyn Hittable>> = vec![
            Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 2.0, Material::new(BLUE))),
            Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -4.0), 1.0, Material::new(RED))),
        ];
        let sampler = PixelSampler::new(&camera, &objects, false);

        // Center pixel: red sphere surface at t=3, blue at t=4
        let color = sampler.sample(4, 4, 0);
        assert!(color.x > 0.0);
        assert_eq!(color.y, 0.0);
        assert_eq!(color.z, 0.0);
    }

    #[test]
    fn test_light_intensity_facing_is_one() {
        assert_eq!(light_intensity(-LIGHT_DIRECTION.normalize()), 1.0);
    }

    #[test]
    fn test_light_intensity_perpendicular_is_ambient() {
        let perpendicular = Vec3::new(1.0, -1.0, 0.0).normalize();
        assert!((light_intensity(perpendicular) - AMBIENT).abs() < 1e-6);
    }

    #[test]
    fn test_light_intensity_opposite_is_ambient() {
        assert_eq!(light_intensity(LIGHT_DIRECTION.normalize()), AMBIENT);
    }

    #[test]
    fn test_light_intensity_stays_in_unit_range() {
        for normal in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z] {
            let i = light_intensity(normal);
            assert!((0.0..=1.0).contains(&i), "intensity {} for {:?}", i, normal);
        }
    }

    #[test]
    fn test_shade_scales_material_color() {
        let material = Material::new(Color::new(0.5, 0.25, 1.0));
        let hit = HitRecord {
            t: 1.0,
            p: Vec3::ZERO,
            normal: LIGHT_DIRECTION.normalize(),
            material: &material,
        };
        let color = shade(&hit);
        assert!((color - Color::new(0.05, 0.025, 0.1)).length() < 1e-6);
    }

    #[test]
    fn test_miss_is_black() {
        let camera = PinholeCamera::new(4, 4);
        let objects: Vec<Arc<dyn Hittable>> = vec![Arc::new(Nothing)];
        let sampler = PixelSampler::new(&camera, &objects, false);
        assert_eq!(sampler.sample(1, 1, 0), Color::ZERO);
    }

    #[test]
    fn test_jitter_is_deterministic_and_bounded() {
        for sample in 0..16 {
            let (dx, dy) = jitter_offset(3, 7, sample);
            assert_eq!((dx, dy), jitter_offset(3, 7, sample));
            assert!((-0.5..0.5).contains(&dx));
            assert!((-0.5..0.5).contains(&dy));
        }
        assert_ne!(jitter_offset(3, 7, 0), jitter_offset(3, 7, 1));
    }
}
