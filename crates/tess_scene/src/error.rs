use std::path::PathBuf;

use tess_renderer::RenderError;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load OBJ {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("No geometry found in {0}")]
    EmptyMesh(PathBuf),

    #[error("Invalid color {0:?}, expected \"#RRGGBB\"")]
    InvalidColor(String),

    #[error("Invalid render settings: {0}")]
    Render(#[from] RenderError),
}

pub type SceneResult<T> = Result<T, SceneError>;
