//! Render orchestration.
//!
//! Clears the framebuffer, splits the frame into tiles, and renders the
//! tiles in parallel with rayon, blocking until the whole frame is written.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::output::{writer_for_path, ImageWriter};
use crate::sampler::PixelSampler;
use crate::tile::{render_tile, EdgePolicy};
use crate::{Camera, Framebuffer, Hittable, OutputError, RenderError, OPAQUE_BLACK};
use rayon::prelude::*;
use serde::Deserialize;

/// Render configuration.
///
/// Read-only for the duration of a render pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum samples per pixel
    pub samples_per_pixel: u32,
    /// Stop after two samples when they agree
    pub adaptive: bool,
    /// The frame is split into `tiles_per_row²` tiles
    pub tiles_per_row: u32,
    /// Offset each sample within its pixel so repeated samples can differ
    pub jitter: bool,
    pub edge_policy: EdgePolicy,
    /// Fill color (`0xAARRGGBB`) for pixels no tile renders. Always
    /// written opaque.
    pub background: u32,
    /// Worker thread count; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 8,
            adaptive: true,
            tiles_per_row: 8,
            jitter: false,
            edge_policy: EdgePolicy::default(),
            background: OPAQUE_BLACK,
            threads: None,
        }
    }
}

impl RenderConfig {
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    pub fn with_tiles_per_row(mut self, tiles_per_row: u32) -> Self {
        self.tiles_per_row = tiles_per_row;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_edge_policy(mut self, edge_policy: EdgePolicy) -> Self {
        self.edge_policy = edge_policy;
        self
    }

    pub fn with_background(mut self, argb: u32) -> Self {
        self.background = argb | OPAQUE_BLACK;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Check the values a render can't run with.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.tiles_per_row == 0 {
            return Err(RenderError::ZeroTilesPerRow);
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::ZeroSamples);
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_per_row as usize * self.tiles_per_row as usize
    }
}

/// Summary of a finished render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub tiles: usize,
    /// Pixels covered by some tile
    pub pixels: u64,
    /// Total samples taken across all pixels
    pub samples: u64,
    pub elapsed: Duration,
}

impl RenderStats {
    pub fn samples_per_pixel(&self) -> f64 {
        if self.pixels == 0 {
            0.0
        } else {
            self.samples as f64 / self.pixels as f64
        }
    }
}

/// Tile-parallel renderer owning the framebuffer and the scene objects.
pub struct Renderer {
    framebuffer: Mutex<Framebuffer>,
    objects: Vec<Arc<dyn Hittable>>,
    config: RenderConfig,
    rendering: AtomicBool,
}

/// Clears the in-progress flag when a render pass ends, including by panic.
struct RenderingGuard<'a>(&'a AtomicBool);

impl Drop for RenderingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Renderer {
    /// Create a renderer with the default configuration.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: Mutex::new(Framebuffer::new(width, height)),
            objects: Vec::new(),
            config: RenderConfig::default(),
            rendering: AtomicBool::new(false),
        }
    }

    pub fn with_config(width: u32, height: u32, config: RenderConfig) -> Result<Self, RenderError> {
        let mut renderer = Self::new(width, height);
        renderer.set_config(config)?;
        Ok(renderer)
    }

    pub fn set_config(&mut self, config: RenderConfig) -> Result<(), RenderError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Add a scene object. Objects can't change while a render runs.
    pub fn add_renderable(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    pub fn renderable_count(&self) -> usize {
        self.objects.len()
    }

    pub fn width(&self) -> u32 {
        self.lock_framebuffer().width()
    }

    pub fn height(&self) -> u32 {
        self.lock_framebuffer().height()
    }

    /// Copy of the current framebuffer contents.
    pub fn framebuffer(&self) -> Framebuffer {
        self.lock_framebuffer().clone()
    }

    pub fn into_framebuffer(self) -> Framebuffer {
        self.framebuffer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Render the scene as seen by `camera` into the framebuffer.
    ///
    /// Returns once every tile has been written. A second call while a
    /// render is running fails with [`RenderError::AlreadyRendering`].
    pub fn render(&self, camera: &dyn Camera) -> Result<RenderStats, RenderError> {
        if self.rendering.swap(true, Ordering::AcqRel) {
            return Err(RenderError::AlreadyRendering);
        }
        let _guard = RenderingGuard(&self.rendering);

        let start = Instant::now();
        let config = &self.config;

        let (width, height) = {
            let mut framebuffer = self.lock_framebuffer();
            framebuffer.fill(config.background | OPAQUE_BLACK);
            (framebuffer.width(), framebuffer.height())
        };

        let tiles_per_row = config.tiles_per_row;
        let tile_count = config.tile_count();
        if tiles_per_row > width || tiles_per_row > height {
            log::warn!(
                "{} tiles per row on a {}x{} image leaves some tiles empty",
                tiles_per_row,
                width,
                height
            );
        }
        log::info!(
            "Rendering {}x{}: {} objects, {} tiles, up to {} spp{}",
            width,
            height,
            self.objects.len(),
            tile_count,
            config.samples_per_pixel,
            if config.adaptive { " (adaptive)" } else { "" }
        );

        let sampler = PixelSampler::new(camera, &self.objects, config.jitter);
        let finished_tiles = AtomicUsize::new(0);
        let pixels = AtomicU64::new(0);
        let samples = AtomicU64::new(0);

        let render_all = || {
            (0..tile_count).into_par_iter().for_each(|tile_index| {
                let bounds = config
                    .edge_policy
                    .tile_bounds(width, height, tiles_per_row, tile_index);
                log::debug!("Tile {} -> {:?}", tile_index, bounds);

                let taken = render_tile(&bounds, &sampler, config, &self.framebuffer);
                pixels.fetch_add(bounds.pixel_count(), Ordering::Relaxed);
                samples.fetch_add(taken, Ordering::Relaxed);

                let done = finished_tiles.fetch_add(1, Ordering::AcqRel) + 1;
                log::info!("Progress: {:.1}%", 100.0 * done as f32 / tile_count as f32);
            })
        };

        match config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(render_all),
            None => render_all(),
        }

        let stats = RenderStats {
            tiles: finished_tiles.into_inner(),
            pixels: pixels.into_inner(),
            samples: samples.into_inner(),
            elapsed: start.elapsed(),
        };
        log::info!(
            "Rendered in {:?} ({} samples, {:.2} per pixel)",
            stats.elapsed,
            stats.samples,
            stats.samples_per_pixel()
        );

        Ok(stats)
    }

    /// Write the framebuffer to `path`, picking the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let path = path.as_ref();
        let writer = writer_for_path(path)?;
        self.save_with(writer.as_ref(), path)
    }

    /// Write the framebuffer to `path` with an explicit writer.
    pub fn save_with(&self, writer: &dyn ImageWriter, path: impl AsRef<Path>) -> Result<(), OutputError> {
        let framebuffer = self.lock_framebuffer();
        writer.write(
            path.as_ref(),
            framebuffer.raw_data(),
            framebuffer.width(),
            framebuffer.height(),
        )
    }

    fn lock_framebuffer(&self) -> MutexGuard<'_, Framebuffer> {
        self.framebuffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
