use std::any::Any;

use glam::Vec3;

use super::{Representation, RepresentationKind};
use crate::geometry::{points_from_flat, uv_sphere, TriangleMesh};
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// One merged mesh of spheres, one per coordinate.
///
/// A single template sphere is instanced on the CPU so the whole set is
/// one renderable and one draw.
#[derive(Debug)]
pub struct SphereRepresentation {
    mesh: SharedRenderable,
    count: usize,
}

impl SphereRepresentation {
    /// Spheres at flattened `coordinates`. Missing radii fall back to the
    /// configured default; `resolution` defaults to the configured value.
    #[must_use]
    pub fn new(
        coordinates: &[f32],
        radii: Option<&[f32]>,
        resolution: Option<u32>,
        options: &RepresentationOptions,
    ) -> Self {
        let centers = points_from_flat(coordinates);
        let radii = radii.unwrap_or_default();
        if !radii.is_empty() && radii.len() < centers.len() {
            log::warn!(
                "{} radii for {} spheres, using {} for the rest",
                radii.len(),
                centers.len(),
                options.sphere_radius
            );
        }
        let resolution = resolution.unwrap_or(options.sphere_resolution);
        let template = uv_sphere(1.0, resolution, resolution);

        let mut mesh = TriangleMesh::default();
        for (i, &center) in centers.iter().enumerate() {
            let radius = radii.get(i).copied().unwrap_or(options.sphere_radius);
            mesh.append_transformed(&template, |p: Vec3| p * radius + center);
        }
        mesh.compute_face_normals();
        mesh.compute_vertex_normals();

        let material = Material::MeshBasic {
            color: rgb(options.sphere_color),
            wireframe: true,
        };
        Self {
            mesh: Renderable::new(Geometry::Mesh(mesh), material).shared(),
            count: centers.len(),
        }
    }

    /// Number of spheres.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether there are no spheres.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Merged mesh renderable.
    #[must_use]
    pub fn mesh(&self) -> &SharedRenderable {
        &self.mesh
    }
}

impl Representation for SphereRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::Spheres
    }

    fn renderables(&self) -> Vec<SharedRenderable> {
        vec![self.mesh.clone()]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChemviewError;
    use crate::representation::{RepresentationUpdate, UpdateField};

    #[test]
    fn instances_template_per_center() {
        let rep = SphereRepresentation::new(
            &[0.0, 0.0, 0.0, 10.0, 0.0, 0.0],
            Some(&[1.0, 2.0]),
            Some(8),
            &RepresentationOptions::default(),
        );
        assert_eq!(rep.len(), 2);
        let template = uv_sphere(1.0, 8, 8);
        let renderable = rep.mesh().borrow();
        let Geometry::Mesh(mesh) = renderable.geometry() else {
            panic!("spheres should be a mesh");
        };
        let per = template.vertex_count();
        assert_eq!(mesh.vertex_count(), 2 * per);
        assert_eq!(mesh.triangle_count(), 2 * template.triangle_count());
        for p in &mesh.positions[..per] {
            assert!((p.length() - 1.0).abs() < 1e-4);
        }
        for p in &mesh.positions[per..] {
            assert!(((*p - Vec3::new(10.0, 0.0, 0.0)).length() - 2.0).abs() < 1e-4);
        }
        assert!(mesh.triangles[template.triangle_count()..]
            .iter()
            .flatten()
            .all(|&i| i as usize >= per));
    }

    #[test]
    fn merged_mesh_has_vertex_normals() {
        let rep = SphereRepresentation::new(
            &[0.0, 0.0, 0.0, 4.0, 0.0, 0.0],
            None,
            Some(8),
            &RepresentationOptions::default(),
        );
        let renderable = rep.mesh().borrow();
        let Geometry::Mesh(mesh) = renderable.geometry() else {
            panic!("spheres should be a mesh");
        };
        assert_eq!(mesh.normals.len(), mesh.positions.len());
    }

    #[test]
    fn rejects_updates() {
        let mut rep = SphereRepresentation::new(
            &[0.0, 0.0, 0.0],
            None,
            None,
            &RepresentationOptions::default(),
        );
        assert!(rep.update(&RepresentationUpdate::default()).is_ok());
        let err = rep
            .update(&RepresentationUpdate::coordinates(vec![1.0, 2.0, 3.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            ChemviewError::UnsupportedUpdate {
                kind: RepresentationKind::Spheres,
                field: UpdateField::Coordinates,
            }
        ));
    }

    #[test]
    fn missing_radius_uses_default() {
        let options = RepresentationOptions::default();
        let rep = SphereRepresentation::new(&[0.0, 0.0, 0.0], None, None, &options);
        let renderable = rep.mesh().borrow();
        let Geometry::Mesh(mesh) = renderable.geometry() else {
            panic!("spheres should be a mesh");
        };
        let max = mesh.positions.iter().map(|p| p.length()).fold(0.0_f32, f32::max);
        assert!((max - options.sphere_radius).abs() < 1e-4);
    }
}
