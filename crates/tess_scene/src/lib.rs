//! Tessera scene loading.
//!
//! Turns JSON scene descriptions (and the OBJ meshes they reference) into
//! a camera, render settings, and scene objects for `tess_renderer`.

mod description;
mod error;
mod obj;

pub use description::{CameraDescription, ColorDescription, ObjectDescription, Scene, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use obj::load_obj;
