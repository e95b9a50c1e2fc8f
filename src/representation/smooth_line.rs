use std::any::Any;

use glam::Vec3;

use super::{check_update, Representation, RepresentationKind, RepresentationUpdate, UpdateField};
use crate::error::ChemviewError;
use crate::geometry::SplineCurve;
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, Renderable, SharedRenderable};
use crate::util::color::rgb;

/// Smooth curve through a list of points, drawn as one polyline.
#[derive(Debug)]
pub struct SmoothLineRepresentation {
    line: SharedRenderable,
    resolution: u32,
}

impl SmoothLineRepresentation {
    /// Curve through flattened `coordinates`, sampled `resolution` times per
    /// control point. The first entry of `colors` sets the line color.
    #[must_use]
    pub fn new(
        coordinates: &[f32],
        colors: Option<&[u32]>,
        resolution: Option<u32>,
        options: &RepresentationOptions,
    ) -> Self {
        let resolution = resolution.unwrap_or(options.smooth_line_resolution).max(1);
        let color = colors
            .and_then(|c| c.first().copied())
            .unwrap_or(options.smooth_line_color);
        let line = Renderable::new(
            Geometry::LineStrip(sample(coordinates, resolution)),
            Material::LineBasic { color: rgb(color) },
        )
        .shared();
        Self { line, resolution }
    }

    /// Samples per control point.
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Polyline renderable.
    #[must_use]
    pub fn line(&self) -> &SharedRenderable {
        &self.line
    }
}

/// `resolution * n + 1` curve samples through the `n` points.
fn sample(coordinates: &[f32], resolution: u32) -> Vec<Vec3> {
    let curve = SplineCurve::from_flat(coordinates);
    let n = curve.control_points().len();
    if n == 0 {
        return Vec::new();
    }
    curve.points(resolution as usize * n)
}

impl Representation for SmoothLineRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::SmoothLine
    }

    fn renderables(&self) -> Vec<SharedRenderable> {
        vec![self.line.clone()]
    }

    fn supported_updates(&self) -> &'static [UpdateField] {
        &[UpdateField::Coordinates]
    }

    fn update(&mut self, update: &RepresentationUpdate) -> Result<(), ChemviewError> {
        check_update(self.kind(), self.supported_updates(), update)?;
        if let Some(coordinates) = &update.coordinates {
            let samples = sample(coordinates, self.resolution);
            if let Geometry::LineStrip(v) = self.line.borrow_mut().geometry_mut() {
                *v = samples;
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

    fn vertices(rep: &SmoothLineRepresentation) -> Vec<Vec3> {
        match rep.line().borrow().geometry() {
            Geometry::LineStrip(v) => v.clone(),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn samples_per_control_point() {
        let rep = SmoothLineRepresentation::new(
            &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 2.0, 0.0, 0.0],
            None,
            Some(4),
            &RepresentationOptions::default(),
        );
        let v = vertices(&rep);
        assert_eq!(v.len(), 13);
        assert!(v[0].length() < 1e-6);
        assert!((v[12] - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((v[6] - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn coordinate_update_refits() {
        let mut rep = SmoothLineRepresentation::new(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            Some(&[0x00_00_FF]),
            None,
            &RepresentationOptions::default(),
        );
        assert_eq!(
            rep.line().borrow().material(),
            Material::LineBasic { color: [0.0, 0.0, 1.0] }
        );
        assert_eq!(vertices(&rep).len(), 33);
        rep.update(&RepresentationUpdate::coordinates(vec![
            0.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 10.0, 0.0,
        ]))
        .unwrap();
        let v = vertices(&rep);
        assert_eq!(v.len(), 49);
        assert!((v[48] - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn sizes_are_unsupported() {
        let mut rep = SmoothLineRepresentation::new(
            &[0.0; 6],
            None,
            None,
            &RepresentationOptions::default(),
        );
        let update = RepresentationUpdate::default().with_sizes(vec![1.0]);
        assert!(rep.update(&update).is_err());
    }
}
