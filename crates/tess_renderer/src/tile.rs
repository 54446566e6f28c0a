//! Tile-based rendering.
//!
//! Divides the image into a `tiles_per_row` × `tiles_per_row` grid of tiles
//! that are rendered independently and in parallel.

use std::sync::{Mutex, PoisonError};

use crate::sampler::PixelSampler;
use crate::{color_to_argb, Color, Framebuffer, RenderConfig};
use serde::Deserialize;

/// Two initial samples closer than this count as converged.
/// Smaller than one 8-bit quantization step.
pub const ADAPTIVE_THRESHOLD: f32 = 1e-3;

/// A rectangular region of the image, max bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl TileBounds {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..self.max_x).contains(&x) && (self.min_y..self.max_y).contains(&y)
    }

    pub fn overlaps(&self, other: &TileBounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// How tiles split an image whose size isn't a multiple of `tiles_per_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgePolicy {
    /// Every tile gets `size / tiles_per_row` pixels; the remainder is never
    /// rendered and keeps the background color.
    Truncate,
    /// Tile edges are spread proportionally so the grid covers every pixel.
    #[default]
    Cover,
}

impl EdgePolicy {
    pub fn tile_bounds(
        self,
        image_width: u32,
        image_height: u32,
        tiles_per_row: u32,
        tile_index: usize,
    ) -> TileBounds {
        match self {
            EdgePolicy::Truncate => tile_bounds(image_width, image_height, tiles_per_row, tile_index),
            EdgePolicy::Cover => {
                covering_tile_bounds(image_width, image_height, tiles_per_row, tile_index)
            }
        }
    }
}

fn grid_cell(tiles_per_row: u32, tile_index: usize) -> (u64, u64) {
    let tiles_per_row = tiles_per_row as u64;
    let tile_index = tile_index as u64;
    (tile_index / tiles_per_row, tile_index % tiles_per_row)
}

/// Bounds of tile `tile_index` with truncating division.
///
/// Each tile spans `size / tiles_per_row` pixels starting at
/// `column * size / tiles_per_row`, so `size % tiles_per_row` columns (and
/// rows) fall outside every tile. Panics if `tiles_per_row` is zero.
pub fn tile_bounds(
    image_width: u32,
    image_height: u32,
    tiles_per_row: u32,
    tile_index: usize,
) -> TileBounds {
    let (row, column) = grid_cell(tiles_per_row, tile_index);
    let start = |cell: u64, size: u32| (cell * size as u64 / tiles_per_row as u64) as u32;

    let min_x = start(column, image_width);
    let min_y = start(row, image_height);
    TileBounds {
        min_x,
        min_y,
        max_x: min_x + image_width / tiles_per_row,
        max_y: min_y + image_height / tiles_per_row,
    }
}

/// Bounds of tile `tile_index` such that the whole grid covers the image
/// exactly. Tile sizes differ by at most one pixel.
pub fn covering_tile_bounds(
    image_width: u32,
    image_height: u32,
    tiles_per_row: u32,
    tile_index: usize,
) -> TileBounds {
    let (row, column) = grid_cell(tiles_per_row, tile_index);
    let edge = |cell: u64, size: u32| (cell * size as u64 / tiles_per_row as u64) as u32;

    TileBounds {
        min_x: edge(column, image_width),
        min_y: edge(row, image_height),
        max_x: edge(column + 1, image_width),
        max_y: edge(row + 1, image_height),
    }
}

/// Render every pixel of `bounds` and commit it to `framebuffer`.
///
/// Pixels are processed row-major. Each pixel takes two samples; if they
/// agree within [`ADAPTIVE_THRESHOLD`] and adaptive sampling is on, the
/// pixel is done, otherwise sampling continues up to `samples_per_pixel`.
/// The framebuffer lock is taken once per pixel write.
///
/// Returns the number of samples taken.
pub fn render_tile(
    bounds: &TileBounds,
    sampler: &PixelSampler<'_>,
    config: &RenderConfig,
    framebuffer: &Mutex<Framebuffer>,
) -> u64 {
    let samples_per_pixel = config.samples_per_pixel;
    let initial = samples_per_pixel.min(2);
    let mut samples: Vec<Color> = Vec::with_capacity(samples_per_pixel as usize);
    let mut taken = 0u64;

    for y in bounds.min_y..bounds.max_y {
        for x in bounds.min_x..bounds.max_x {
            samples.clear();
            samples.extend((0..initial).map(|i| sampler.sample(x, y, i)));

            if needs_more_samples(&samples, config.adaptive) {
                samples.extend((initial..samples_per_pixel).map(|i| sampler.sample(x, y, i)));
            }

            taken += samples.len() as u64;
            let argb = color_to_argb(mean(&samples));

            framebuffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_pixel(x, y, argb);
        }
    }

    taken
}

/// Whether a pixel needs samples beyond the initial pair.
fn needs_more_samples(initial: &[Color], adaptive: bool) -> bool {
    if !adaptive {
        return true;
    }
    match initial {
        [first, second, ..] => first.distance(*second) > ADAPTIVE_THRESHOLD,
        _ => false,
    }
}

fn mean(samples: &[Color]) -> Color {
    if samples.is_empty() {
        return Color::ZERO;
    }
    samples.iter().copied().sum::<Color>() / samples.len() as f32
}
