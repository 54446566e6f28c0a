//! Surface material and color conversions.

use tess_math::{Interval, Vec3};

/// Color type alias (linear RGB, 0-1)
pub type Color = Vec3;

/// Opaque black, the background every render starts from.
pub const OPAQUE_BLACK: u32 = 0xFF00_0000;

/// A flat-colored surface material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    color: Color,
}

impl Material {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// The surface color as a float vector.
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::ONE)
    }
}

/// Pack a color into opaque `0xAARRGGBB`, clamping each channel to [0, 1].
pub fn color_to_argb(color: Color) -> u32 {
    let channel = |c: f32| (255.0 * Interval::UNIT.clamp(c)) as u32;
    OPAQUE_BLACK | (channel(color.x) << 16) | (channel(color.y) << 8) | channel(color.z)
}

/// Unpack the RGB channels of an `0xAARRGGBB` value.
pub fn argb_to_color(argb: u32) -> Color {
    let channel = |shift: u32| ((argb >> shift) & 0xFF) as f32 / 255.0;
    Color::new(channel(16), channel(8), channel(0))
}
