//! Error types for rendering and image output.

use thiserror::Error;

/// Errors raised by render configuration and the render orchestrator.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("tiles_per_row must be at least 1")]
    ZeroTilesPerRow,

    #[error("samples_per_pixel must be at least 1")]
    ZeroSamples,

    #[error("A render is already in progress on this renderer")]
    AlreadyRendering,

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors that can occur while writing an image file.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Pixel data has {actual} entries, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Image {width}x{height} is too large for this format")]
    TooLarge { width: u32, height: u32 },
}
