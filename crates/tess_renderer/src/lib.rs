//! Tessera renderer - tile-parallel CPU ray tracing.
//!
//! The [`Renderer`] splits the frame into a grid of tiles, renders them in
//! parallel with rayon, and writes each pixel into a shared, mutex-guarded
//! [`Framebuffer`]. Pixels are shaded by a single fixed directional light
//! against the nearest hit over a linear scan of the scene objects.

mod camera;
mod error;
mod framebuffer;
mod hittable;
mod material;
mod mesh;
mod plane;
mod renderer;
mod sphere;
mod triangle;

pub mod output;
pub mod sampler;
pub mod tile;

pub use camera::{Camera, PinholeCamera};
pub use error::{OutputError, RenderError};
pub use framebuffer::Framebuffer;
pub use hittable::{HitRecord, Hittable};
pub use material::{argb_to_color, color_to_argb, Color, Material, OPAQUE_BLACK};
pub use mesh::Mesh;
pub use output::{ImageWriter, PngWriter, TgaWriter};
pub use plane::Plane;
pub use renderer::{RenderConfig, RenderStats, Renderer};
pub use sphere::Sphere;
pub use tile::{EdgePolicy, TileBounds};
pub use triangle::Triangle;

/// Re-export Vec3 and common math types from tess_math
pub use tess_math::{Interval, Ray, Vec3};
