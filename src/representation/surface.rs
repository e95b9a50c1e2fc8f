use std::any::Any;

use super::{Representation, RepresentationKind, SurfaceStyle};
use crate::geometry::TriangleMesh;
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// Triangle surface, shaded or drawn as a wireframe.
#[derive(Debug)]
pub struct SurfaceRepresentation {
    mesh: SharedRenderable,
    style: SurfaceStyle,
}

impl SurfaceRepresentation {
    /// Build from flattened vertices and triangle indices.
    ///
    /// Coincident vertices are merged before normals are computed, so
    /// surfaces exported with per-face vertices still shade smoothly.
    #[must_use]
    pub fn new(
        vertices: &[f32],
        faces: &[u32],
        style: SurfaceStyle,
        options: &RepresentationOptions,
    ) -> Self {
        let mut mesh = TriangleMesh::from_flat(vertices, faces);
        let merged = mesh.merge_vertices();
        if merged > 0 {
            log::debug!("surface: merged {merged} duplicate vertices");
        }
        mesh.compute_face_normals();
        mesh.compute_vertex_normals();

        let color = rgb(options.surface_color);
        let material = match style {
            SurfaceStyle::Solid => Material::MeshPhong {
                color,
                specular: [1.0, 1.0, 1.0],
                emissive: [0.0, 0.0, 0.0],
                shininess: 1.0,
                wireframe: false,
            },
            SurfaceStyle::Wireframe => Material::MeshBasic {
                color,
                wireframe: true,
            },
        };

        Self {
            mesh: Renderable::new(Geometry::Mesh(mesh), material).shared(),
            style,
        }
    }

    /// Drawing style.
    #[must_use]
    pub fn style(&self) -> SurfaceStyle {
        self.style
    }

    /// Mesh renderable.
    #[must_use]
    pub fn mesh(&self) -> &SharedRenderable {
        &self.mesh
    }
}

impl Representation for SurfaceRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::Surface
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
    use crate::representation::RepresentationUpdate;

    // Two triangles of a unit square with the shared edge duplicated.
    const VERTS: [f32; 18] = [
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    ];
    const FACES: [u32; 6] = [0, 1, 2, 3, 4, 5];

    #[test]
    fn merges_and_shades() {
        let rep = SurfaceRepresentation::new(
            &VERTS,
            &FACES,
            SurfaceStyle::Solid,
            &RepresentationOptions::default(),
        );
        let renderable = rep.mesh().borrow();
        let Geometry::Mesh(mesh) = renderable.geometry() else {
            panic!("surface should be a mesh");
        };
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.normals.len(), 4);
        assert!(mesh.normals.iter().all(|n| (n.z.abs() - 1.0).abs() < 1e-5));
        assert!(matches!(renderable.material(), Material::MeshPhong { .. }));
    }

    #[test]
    fn wireframe_is_default_style() {
        let rep = SurfaceRepresentation::new(
            &VERTS,
            &FACES,
            SurfaceStyle::default(),
            &RepresentationOptions::default(),
        );
        assert!(matches!(
            rep.mesh().borrow().material(),
            Material::MeshBasic { wireframe: true, .. }
        ));
    }

    #[test]
    fn rejects_updates() {
        let mut rep = SurfaceRepresentation::new(
            &VERTS,
            &FACES,
            SurfaceStyle::Wireframe,
            &RepresentationOptions::default(),
        );
        assert!(rep.update(&RepresentationUpdate::default()).is_ok());
        let err = rep
            .update(&RepresentationUpdate::coordinates(vec![0.0; 3]))
            .unwrap_err();
        assert!(matches!(err, ChemviewError::UnsupportedUpdate { .. }));
    }
}
