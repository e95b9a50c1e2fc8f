use std::any::Any;

use super::{check_update, Representation, RepresentationKind, RepresentationUpdate, UpdateField};
use crate::error::ChemviewError;
use crate::geometry::{tube, SplineCurve, TriangleMesh};
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// Tube of constant radius swept along a smooth curve.
#[derive(Debug)]
pub struct SmoothTubeRepresentation {
    mesh: SharedRenderable,
    radius: f32,
    resolution: u32,
    radial_segments: u32,
}

impl SmoothTubeRepresentation {
    /// Tube through flattened `coordinates`. The first entry of `colors`
    /// replaces the base color; highlights keep their configured tint.
    #[must_use]
    pub fn new(
        coordinates: &[f32],
        radius: f32,
        colors: Option<&[u32]>,
        resolution: Option<u32>,
        options: &RepresentationOptions,
    ) -> Self {
        let resolution = resolution.unwrap_or(options.tube_resolution).max(1);
        let radial_segments = options.tube_radial_segments.max(3);
        let color = colors
            .and_then(|c| c.first().copied())
            .unwrap_or(options.tube_color);
        let material = Material::MeshPhong {
            color: rgb(color),
            specular: rgb(options.tube_specular),
            emissive: rgb(options.tube_emissive),
            shininess: options.tube_shininess,
            wireframe: false,
        };
        let mesh = build(coordinates, radius, resolution, radial_segments);
        Self {
            mesh: Renderable::new(Geometry::Mesh(mesh), material).shared(),
            radius,
            resolution,
            radial_segments,
        }
    }

    /// Tube radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Mesh renderable.
    #[must_use]
    pub fn mesh(&self) -> &SharedRenderable {
        &self.mesh
    }
}

fn build(coordinates: &[f32], radius: f32, resolution: u32, radial_segments: u32) -> TriangleMesh {
    let curve = SplineCurve::from_flat(coordinates);
    let segments = resolution as usize * curve.control_points().len();
    tube(&curve, segments, radius, radial_segments as usize, false)
}

impl Representation for SmoothTubeRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::SmoothTube
    }

    fn renderables(&self) -> Vec<SharedRenderable> {
        vec![self.mesh.clone()]
    }

    fn supported_updates(&self) -> &'static [UpdateField] {
        &[UpdateField::Coordinates]
    }

    fn update(&mut self, update: &RepresentationUpdate) -> Result<(), ChemviewError> {
        check_update(self.kind(), self.supported_updates(), update)?;
        let Some(coordinates) = &update.coordinates else {
            return Ok(());
        };
        let rebuilt = build(coordinates, self.radius, self.resolution, self.radial_segments);
        let mut renderable = self.mesh.borrow_mut();
        if let Geometry::Mesh(mesh) = renderable.geometry_mut() {
            if mesh.vertex_count() == rebuilt.vertex_count() {
                // Same topology: only the vertices move.
                mesh.positions = rebuilt.positions;
                mesh.normals = rebuilt.normals;
            } else {
                *mesh = rebuilt;
            }
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(rep: &SmoothTubeRepresentation) -> TriangleMesh {
        match rep.mesh().borrow().geometry() {
            Geometry::Mesh(m) => m.clone(),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    const LINE: [f32; 9] = [0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 10.0, 0.0, 0.0];

    #[test]
    fn ring_layout() {
        let rep = SmoothTubeRepresentation::new(
            &LINE,
            0.5,
            None,
            None,
            &RepresentationOptions::default(),
        );
        let m = mesh(&rep);
        // 4 * 3 segments, 13 rings of 8.
        assert_eq!(m.vertex_count(), 13 * 8);
        assert_eq!(m.triangle_count(), 12 * 8 * 2);
        for p in &m.positions {
            let radial = (p.y * p.y + p.z * p.z).sqrt();
            assert!((radial - 0.5).abs() < 1e-3);
        }
        assert!(matches!(
            rep.mesh().borrow().material(),
            Material::MeshPhong { shininess, .. } if (shininess - 100.0).abs() < 1e-6
        ));
    }

    #[test]
    fn update_moves_vertices_in_place() {
        let mut rep = SmoothTubeRepresentation::new(
            &LINE,
            0.5,
            None,
            None,
            &RepresentationOptions::default(),
        );
        let before = mesh(&rep);
        let shifted: Vec<f32> = LINE
            .chunks(3)
            .flat_map(|p| [p[0], p[1] + 3.0, p[2]])
            .collect();
        rep.update(&RepresentationUpdate::coordinates(shifted)).unwrap();
        let after = mesh(&rep);
        assert_eq!(after.triangles, before.triangles);
        for (a, b) in after.positions.iter().zip(&before.positions) {
            assert!((a.y - b.y - 3.0).abs() < 1e-3);
        }
    }

    #[test]
    fn update_with_more_points_rebuilds() {
        let mut rep = SmoothTubeRepresentation::new(
            &LINE,
            0.5,
            None,
            Some(2),
            &RepresentationOptions::default(),
        );
        let mut longer = LINE.to_vec();
        longer.extend_from_slice(&[15.0, 0.0, 0.0]);
        rep.update(&RepresentationUpdate::coordinates(longer)).unwrap();
        let m = mesh(&rep);
        assert_eq!(m.vertex_count(), 9 * 8);
        assert_eq!(m.triangle_count(), 8 * 8 * 2);
    }
}
