//! Camera trait and a pinhole implementation for ray generation.

use crate::Ray;
use tess_math::Vec3;

/// Something that can produce primary rays for image pixels.
pub trait Camera: Send + Sync {
    /// Ray through a continuous film position, in pixel units with (0, 0)
    /// at the top-left corner of the image.
    fn ray_at(&self, film_x: f32, film_y: f32) -> Ray;

    /// Ray through the center of pixel (x, y).
    fn get_ray(&self, x: u32, y: u32) -> Ray {
        self.ray_at(x as f32 + 0.5, y as f32 + 0.5)
    }
}

/// Pinhole camera looking from `look_from` toward `look_at`.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    image_width: u32,
    image_height: u32,

    // Camera positioning
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32, // Vertical field of view in degrees

    // Cached computed values (set by update())
    viewport_upper_left: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl PinholeCamera {
    /// Create a camera at the origin looking down -Z with a 90° field of view.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        let mut camera = Self {
            image_width,
            image_height,
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            viewport_upper_left: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
        };
        camera.update();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f32) -> Self {
        self.vfov = vfov;
        self.update();
        self
    }

    /// Recompute the viewport after any parameter change.
    fn update(&mut self) {
        // Zero-sized images still get a finite viewport
        let width = self.image_width.max(1) as f32;
        let height = self.image_height.max(1) as f32;

        // Viewport on the plane one unit in front of the camera
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (width / height);

        // Camera basis vectors
        let w = (self.look_from - self.look_at).normalize_or_zero();
        let u = self.vup.cross(w).normalize_or_zero();
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        self.pixel_delta_u = viewport_u / width;
        self.pixel_delta_v = viewport_v / height;
        self.viewport_upper_left = self.look_from - w - viewport_u / 2.0 - viewport_v / 2.0;
    }
}

impl Camera for PinholeCamera {
    fn ray_at(&self, film_x: f32, film_y: f32) -> Ray {
        let film_point =
            self.viewport_upper_left + film_x * self.pixel_delta_u + film_y * self.pixel_delta_v;
        Ray::new(self.look_from, film_point - self.look_from)
    }
}
