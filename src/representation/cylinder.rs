use std::any::Any;

use glam::{Mat4, Quat, Vec3};

use super::{Representation, RepresentationKind};
use crate::geometry::cylinder;
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// Capped cylinder between two points.
///
/// The mesh is built along +Y around the origin and placed with the model
/// transform, so the geometry itself never depends on the endpoints.
#[derive(Debug)]
pub struct CylinderRepresentation {
    mesh: SharedRenderable,
    start: Vec3,
    end: Vec3,
}

impl CylinderRepresentation {
    /// Cylinder of `radius` from `start` to `end`.
    #[must_use]
    pub fn new(
        start: [f32; 3],
        end: [f32; 3],
        radius: f32,
        color: Option<u32>,
        options: &RepresentationOptions,
    ) -> Self {
        let (start, end) = (Vec3::from(start), Vec3::from(end));
        let delta = end - start;
        let length = delta.length();
        let axis = if length > f32::EPSILON {
            delta / length
        } else {
            log::warn!("cylinder endpoints coincide, drawing a flat disc");
            Vec3::Y
        };

        let mut renderable = Renderable::new(
            Geometry::Mesh(cylinder(
                radius,
                radius,
                length,
                options.cylinder_radial_segments,
            )),
            Material::MeshBasic {
                color: rgb(color.unwrap_or(options.cylinder_color)),
                wireframe: false,
            },
        );
        renderable.set_transform(Mat4::from_rotation_translation(
            Quat::from_rotation_arc(Vec3::Y, axis),
            start + delta * 0.5,
        ));

        Self {
            mesh: renderable.shared(),
            start,
            end,
        }
    }

    /// Start and end points.
    #[must_use]
    pub fn endpoints(&self) -> (Vec3, Vec3) {
        (self.start, self.end)
    }

    /// Mesh renderable.
    #[must_use]
    pub fn mesh(&self) -> &SharedRenderable {
        &self.mesh
    }
}

impl Representation for CylinderRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::Cylinder
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
    fn caps_land_on_endpoints() {
        let start = [1.0, 2.0, 3.0];
        let end = [4.0, 6.0, 3.0];
        let rep = CylinderRepresentation::new(
            start,
            end,
            0.5,
            None,
            &RepresentationOptions::default(),
        );
        let renderable = rep.mesh().borrow();
        let transform = renderable.transform();
        let half = 2.5;
        let bottom = transform.transform_point3(Vec3::new(0.0, -half, 0.0));
        let top = transform.transform_point3(Vec3::new(0.0, half, 0.0));
        assert!((bottom - Vec3::from(start)).length() < 1e-4);
        assert!((top - Vec3::from(end)).length() < 1e-4);
        assert_eq!(
            renderable.material(),
            Material::MeshBasic {
                color: [1.0, 1.0, 0.0],
                wireframe: false
            }
        );
    }

    #[test]
    fn given_color_wins() {
        let rep = CylinderRepresentation::new(
            [0.0; 3],
            [0.0, 0.0, 1.0],
            1.0,
            Some(0xFF_00_00),
            &RepresentationOptions::default(),
        );
        assert_eq!(
            rep.mesh().borrow().material(),
            Material::MeshBasic {
                color: [1.0, 0.0, 0.0],
                wireframe: false
            }
        );
    }

    #[test]
    fn rejects_updates() {
        let mut rep = CylinderRepresentation::new(
            [0.0; 3],
            [0.0, 2.0, 0.0],
            0.5,
            None,
            &RepresentationOptions::default(),
        );
        assert!(rep.update(&RepresentationUpdate::default()).is_ok());
        let err = rep
            .update(&RepresentationUpdate::default().with_sizes(vec![1.0]))
            .unwrap_err();
        assert!(matches!(
            err,
            ChemviewError::UnsupportedUpdate {
                kind: RepresentationKind::Cylinder,
                field: UpdateField::Sizes,
            }
        ));
    }
}
