//! Fixed-size ARGB pixel store.

/// A 2D grid of packed `0xAARRGGBB` pixels in row-major order.
///
/// Not synchronized: the renderer wraps it in a mutex and serializes writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    /// Create a framebuffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set every pixel to `argb`.
    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    /// Set the pixel at (x, y).
    ///
    /// Panics if (x, y) is outside the framebuffer.
    pub fn set_pixel(&mut self, x: u32, y: u32, argb: u32) {
        let index = self.index(x, y);
        self.pixels[index] = argb;
    }

    /// Get the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[self.index(x, y)]
    }

    /// All pixels, row-major.
    pub fn raw_data(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} framebuffer",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

/// Reorder packed ARGB pixels into an RGBA byte stream.
pub fn argb_to_rgba8(pixels: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * 4);
    for &argb in pixels {
        let [a, r, g, b] = argb.to_be_bytes();
        bytes.extend_from_slice(&[r, g, b, a]);
    }
    bytes
}
