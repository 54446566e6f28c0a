use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use tess_renderer::EdgePolicy;
use tess_scene::SceneDescription;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EdgeArg {
    /// Leave the remainder strip at the background color
    Truncate,
    /// Spread the remainder so every pixel is rendered
    Cover,
}

impl From<EdgeArg> for EdgePolicy {
    fn from(edge: EdgeArg) -> Self {
        match edge {
            EdgeArg::Truncate => EdgePolicy::Truncate,
            EdgeArg::Cover => EdgePolicy::Cover,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "tessera")]
#[command(about = "Tile-parallel CPU ray tracer")]
pub struct Args {
    /// Scene description (JSON); renders the built-in demo scene if omitted
    pub scene: Option<PathBuf>,

    /// Output image, format taken from the extension (.tga or .png)
    #[arg(short, long, default_value = "render.tga")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Maximum samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Tiles per row; the frame is split into tiles² tiles
    #[arg(short, long)]
    pub tiles: Option<u32>,

    /// Always take every sample instead of stopping early on converged pixels
    #[arg(long)]
    pub no_adaptive: bool,

    /// Offset samples inside each pixel
    #[arg(long)]
    pub jitter: bool,

    /// How tiles treat image sizes that aren't a multiple of --tiles
    #[arg(long, value_enum)]
    pub edge_policy: Option<EdgeArg>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of a scene description.
    pub fn apply_overrides(&self, scene: &mut SceneDescription) {
        if let Some(width) = self.width {
            scene.width = width;
        }
        if let Some(height) = self.height {
            scene.height = height;
        }

        let render = &mut scene.render;
        if let Some(samples) = self.samples {
            render.samples_per_pixel = samples;
        }
        if let Some(tiles) = self.tiles {
            render.tiles_per_row = tiles;
        }
        if self.no_adaptive {
            render.adaptive = false;
        }
        if self.jitter {
            render.jitter = true;
        }
        if let Some(edge) = self.edge_policy {
            render.edge_policy = edge.into();
        }
        if self.threads.is_some() {
            render.threads = self.threads;
        }
    }
}
