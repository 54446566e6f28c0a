//! OBJ mesh loading.

use std::path::Path;

use crate::{SceneError, SceneResult};
use tess_math::Vec3;
use tess_renderer::{Material, Mesh};

/// Load every model in an OBJ file into one triangle mesh.
///
/// Positions are scaled, then translated.
pub fn load_obj(
    path: impl AsRef<Path>,
    material: Material,
    scale: f32,
    translate: Vec3,
) -> SceneResult<Mesh> {
    let path = path.as_ref();
    log::info!("Loading mesh from: {:?}", path);

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )
    .map_err(|source| SceneError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for model in &models {
        let base = positions.len() as u32;
        positions.extend(
            model
                .mesh
                .positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2]) * scale + translate),
        );
        indices.extend(model.mesh.indices.iter().map(|&i| base + i));
    }

    if indices.is_empty() {
        return Err(SceneError::EmptyMesh(path.to_path_buf()));
    }

    let mesh = Mesh::new(positions, indices, material);
    log::info!(
        "Loaded {} vertices, {} triangles from {} models",
        mesh.vertex_count(),
        mesh.triangle_count(),
        models.len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tess_renderer::{Hittable, Ray};

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("tess_obj_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).expect("write temp obj");
        path
    }

    const QUAD: &str = "\
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
f 1 2 3 4
";

    #[test]
    fn test_load_quad_is_triangulated() {
        let path = write_temp("quad.obj", QUAD);
        let mesh = load_obj(&path, Material::default(), 1.0, Vec3::ZERO);
        std::fs::remove_file(&path).ok();

        let mesh = mesh.expect("load quad");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_transform_is_applied() {
        let path = write_temp("moved.obj", QUAD);
        let mesh = load_obj(&path, Material::default(), 2.0, Vec3::new(0.0, 0.0, -5.0));
        std::fs::remove_file(&path).ok();
        let mesh = mesh.expect("load quad");

        // Scaled quad spans [-2, 2]; a ray at x = 1.5 still hits it at z = -5
        let ray = Ray::new(Vec3::new(1.5, 0.0, 0.0), Vec3::NEG_Z);
        let hit = mesh.trace(&ray).map(|rec| rec.t);
        assert!(matches!(hit, Some(t) if (t - 5.0).abs() < 1e-5));
    }

    #[test]
    fn test_missing_file() {
        let result = load_obj("/definitely/not/here.obj", Material::default(), 1.0, Vec3::ZERO);
        assert!(matches!(result, Err(SceneError::Obj { .. })));
    }

    #[test]
    fn test_file_without_faces() {
        let path = write_temp("points.obj", "v 0 0 0\nv 1 0 0\n");
        let result = load_obj(&path, Material::default(), 1.0, Vec3::ZERO);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(SceneError::EmptyMesh(_))));
    }
}
