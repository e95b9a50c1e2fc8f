use std::any::Any;

use glam::Vec3;

use super::{Representation, RepresentationKind};
use crate::geometry::box_edges;
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// Outline of an axis-aligned box, handy for bounding boxes.
#[derive(Debug)]
pub struct BoxRepresentation {
    lines: SharedRenderable,
}

impl BoxRepresentation {
    /// Box spanning two opposite corners.
    #[must_use]
    pub fn new(
        start: [f32; 3],
        end: [f32; 3],
        color: Option<u32>,
        options: &RepresentationOptions,
    ) -> Self {
        let edges = box_edges(Vec3::from(start), Vec3::from(end));
        let material = Material::LineBasic {
            color: rgb(color.unwrap_or(options.box_color)),
        };
        Self {
            lines: Renderable::new(Geometry::LineSegments(edges), material).shared(),
        }
    }

    /// Edge segments renderable.
    #[must_use]
    pub fn lines(&self) -> &SharedRenderable {
        &self.lines
    }
}

impl Representation for BoxRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::Box
    }

    fn renderables(&self) -> Vec<SharedRenderable> {
        vec![self.lines.clone()]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_edges_in_given_color() {
        let rep = BoxRepresentation::new(
            [0.0, 0.0, 0.0],
            [1.0, 2.0, 3.0],
            Some(0x00_FF_00),
            &RepresentationOptions::default(),
        );
        let lines = rep.lines().borrow();
        assert_eq!(lines.geometry().vertex_count(), 24);
        assert_eq!(
            lines.material(),
            Material::LineBasic {
                color: [0.0, 1.0, 0.0]
            }
        );
    }
}
