//! JSON scene descriptions.
//!
//! A scene file names the image size, the camera, the render settings, and
//! a list of objects:
//!
//! ```json
//! {
//!   "width": 320, "height": 240,
//!   "camera": { "look_from": [0, 1, 3], "look_at": [0, 0, -3], "fov": 60 },
//!   "render": { "samples_per_pixel": 8, "tiles_per_row": 8 },
//!   "objects": [
//!     { "type": "sphere", "center": [0, 0, -3], "radius": 1, "color": "#cc3322" },
//!     { "type": "plane", "point": [0, -1, 0], "normal": [0, 1, 0], "color": [0.8, 0.8, 0.8] }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::obj::load_obj;
use crate::{SceneError, SceneResult};
use serde::Deserialize;
use tess_math::Vec3;
use tess_renderer::{
    Color, Hittable, Material, PinholeCamera, Plane, RenderConfig, Renderer, Sphere, Triangle,
};

/// Top-level scene file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraDescription {
    pub look_from: [f32; 3],
    pub look_at: [f32; 3],
    pub up: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            up: [0.0, 1.0, 0.0],
            fov: 90.0,
        }
    }
}

/// Either `[r, g, b]` floats in 0-1 or a `"#RRGGBB"` string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorDescription {
    Rgb([f32; 3]),
    Hex(String),
}

impl ColorDescription {
    pub fn to_color(&self) -> SceneResult<Color> {
        match self {
            ColorDescription::Rgb(rgb) => Ok(Color::from_array(*rgb)),
            ColorDescription::Hex(hex) => parse_hex_color(hex),
        }
    }
}

fn parse_hex_color(hex: &str) -> SceneResult<Color> {
    let invalid = || SceneError::InvalidColor(hex.to_string());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 {
        return Err(invalid());
    }
    let rgb = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Ok(tess_renderer::argb_to_color(rgb))
}

fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum ObjectDescription {
    Sphere {
        center: [f32; 3],
        radius: f32,
        color: ColorDescription,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        color: ColorDescription,
    },
    Triangle {
        vertices: [[f32; 3]; 3],
        color: ColorDescription,
    },
    /// OBJ file, relative paths resolved against the scene file's directory
    Mesh {
        path: PathBuf,
        color: ColorDescription,
        #[serde(default = "default_scale")]
        scale: f32,
        #[serde(default)]
        translate: [f32; 3],
    },
}

impl ObjectDescription {
    fn build(&self, base_dir: &Path) -> SceneResult<Arc<dyn Hittable>> {
        let object: Arc<dyn Hittable> = match self {
            ObjectDescription::Sphere {
                center,
                radius,
                color,
            } => {
                if *radius <= 0.0 {
                    log::warn!("Sphere at {:?} has non-positive radius {}", center, radius);
                }
                Arc::new(Sphere::new(
                    Vec3::from_array(*center),
                    *radius,
                    Material::new(color.to_color()?),
                ))
            }
            ObjectDescription::Plane {
                point,
                normal,
                color,
            } => Arc::new(Plane::new(
                Vec3::from_array(*point),
                Vec3::from_array(*normal),
                Material::new(color.to_color()?),
            )),
            ObjectDescription::Triangle { vertices, color } => Arc::new(Triangle::new(
                Vec3::from_array(vertices[0]),
                Vec3::from_array(vertices[1]),
                Vec3::from_array(vertices[2]),
                Material::new(color.to_color()?),
            )),
            ObjectDescription::Mesh {
                path,
                color,
                scale,
                translate,
            } => Arc::new(load_obj(
                base_dir.join(path),
                Material::new(color.to_color()?),
                *scale,
                Vec3::from_array(*translate),
            )?),
        };
        Ok(object)
    }
}

/// A scene ready to render.
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub camera: PinholeCamera,
    pub config: RenderConfig,
    pub objects: Vec<Arc<dyn Hittable>>,
}

impl Scene {
    /// Load and build a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        SceneDescription::from_path(path)?.build(path.parent().unwrap_or(Path::new(".")))
    }

    /// Move the objects into a configured renderer.
    pub fn into_renderer(self) -> SceneResult<(Renderer, PinholeCamera)> {
        let mut renderer = Renderer::with_config(self.width, self.height, self.config)?;
        for object in self.objects {
            renderer.add_renderable(object);
        }
        Ok((renderer, self.camera))
    }
}

impl SceneDescription {
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Built-in scene used when no scene file is given.
    pub fn demo() -> Self {
        let sphere = |center: [f32; 3], radius: f32, rgb: [f32; 3]| ObjectDescription::Sphere {
            center,
            radius,
            color: ColorDescription::Rgb(rgb),
        };

        Self {
            width: 640,
            height: 480,
            camera: CameraDescription {
                look_from: [0.0, 1.5, 4.0],
                look_at: [0.0, 0.0, -4.0],
                up: [0.0, 1.0, 0.0],
                fov: 50.0,
            },
            render: RenderConfig::default(),
            objects: vec![
                ObjectDescription::Plane {
                    point: [0.0, -1.0, 0.0],
                    normal: [0.0, 1.0, 0.0],
                    color: ColorDescription::Rgb([0.6, 0.6, 0.6]),
                },
                sphere([-2.2, 0.0, -5.0], 1.0, [0.9, 0.3, 0.2]),
                sphere([0.0, 0.0, -4.0], 1.0, [0.3, 0.8, 0.3]),
                sphere([2.2, 0.0, -5.0], 1.0, [0.2, 0.4, 0.9]),
                ObjectDescription::Triangle {
                    vertices: [[-1.5, -1.0, -7.0], [1.5, -1.0, -7.0], [0.0, 2.0, -7.0]],
                    color: ColorDescription::Rgb([0.9, 0.8, 0.2]),
                },
            ],
        }
    }

    /// Validate the settings and build every object.
    pub fn build(&self, base_dir: &Path) -> SceneResult<Scene> {
        self.render.validate()?;

        let camera = PinholeCamera::new(self.width, self.height)
            .with_position(
                Vec3::from_array(self.camera.look_from),
                Vec3::from_array(self.camera.look_at),
                Vec3::from_array(self.camera.up),
            )
            .with_fov(self.camera.fov);

        let objects = self
            .objects
            .iter()
            .map(|object| object.build(base_dir))
            .collect::<SceneResult<Vec<_>>>()?;
        log::info!("Built scene with {} objects", objects.len());

        Ok(Scene {
            width: self.width,
            height: self.height,
            camera,
            config: self.render.clone(),
            objects,
        })
    }
}
