//! Indexed triangle mesh sharing a single material.

use crate::triangle::{face_normal, intersect};
use crate::{HitRecord, Hittable, Material, Ray};
use tess_math::Vec3;

/// A triangle mesh. Every three indices form one triangle.
///
/// Traced by a linear scan over its triangles.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    normals: Vec<Vec3>,
    material: Material,
}

impl Mesh {
    /// Build a mesh. Trailing indices that don't form a full triangle and
    /// triangles referencing missing vertices are dropped.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, material: Material) -> Self {
        let vertex_count = positions.len();
        let mut kept = Vec::with_capacity(indices.len());
        let mut dropped = 0usize;
        for tri in indices.chunks_exact(3) {
            if tri.iter().all(|&i| (i as usize) < vertex_count) {
                kept.extend_from_slice(tri);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("Dropped {} triangles with out-of-range indices", dropped);
        }

        let normals = kept
            .chunks_exact(3)
            .map(|tri| {
                face_normal(
                    positions[tri[0] as usize],
                    positions[tri[1] as usize],
                    positions[tri[2] as usize],
                )
            })
            .collect();

        Self {
            positions,
            indices: kept,
            normals,
            material,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.normals.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn vertex(&self, index: u32) -> Vec3 {
        self.positions[index as usize]
    }
}

impl Hittable for Mesh {
    fn trace(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        let mut closest: Option<(f32, Vec3)> = None;

        for (tri, normal) in self.indices.chunks_exact(3).zip(&self.normals) {
            let Some(t) = intersect(ray, self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])) else {
                continue;
            };
            if closest.map_or(true, |(best, _)| t < best) {
                closest = Some((t, *normal));
            }
        }

        closest.map(|(t, normal)| HitRecord::new(ray, t, normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two stacked quads facing +Z at z = -2 and z = -4.
    fn two_quads() -> Mesh {
        let mut positions = Vec::new();
        for z in [-2.0, -4.0] {
            positions.extend([
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(-1.0, 1.0, z),
            ]);
        }
        // Far quad listed first so the scan must pick by distance
        let indices = vec![4, 5, 6, 4, 6, 7, 0, 1, 2, 0, 2, 3];
        Mesh::new(positions, indices, Material::default())
    }

    #[test]
    fn test_mesh_picks_nearest_triangle() {
        let mesh = two_quads();
        assert_eq!(mesh.triangle_count(), 4);

        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::NEG_Z);
        let rec = mesh.trace(&ray).expect("ray should hit the mesh");
        assert!((rec.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_miss() {
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(two_quads().trace(&ray).is_none());
    }

    #[test]
    fn test_invalid_indices_are_dropped() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::new(positions, vec![0, 1, 2, 0, 1, 9, 2], Material::default());

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }
}
