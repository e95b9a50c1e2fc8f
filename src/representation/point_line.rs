use std::any::Any;

use glam::Vec3;

use super::{check_update, Representation, RepresentationKind, RepresentationUpdate, UpdateField};
use crate::error::ChemviewError;
use crate::geometry::points_from_flat;
use crate::options::RepresentationOptions;
use crate::scene::{Geometry, Material, PointCloud, Renderable, SharedRenderable};
use crate::util::color::{per_item, rgb};

/// Coordinates drawn as round points, optionally joined by bond lines.
///
/// The number of points is fixed at construction. Coordinate updates move
/// the points and the bond endpoints together.
#[derive(Debug)]
pub struct PointLineRepresentation {
    points: SharedRenderable,
    lines: SharedRenderable,
    bonds: Vec<[u32; 2]>,
    default_size: f32,
}

impl PointLineRepresentation {
    /// Build from flattened coordinates with optional bond pairs, packed
    /// colors and sizes.
    #[must_use]
    pub fn new(
        coordinates: &[f32],
        bonds: Option<&[[u32; 2]]>,
        colors: Option<&[u32]>,
        sizes: Option<&[f32]>,
        options: &RepresentationOptions,
    ) -> Self {
        let positions = points_from_flat(coordinates);
        let count = positions.len();
        let colors = per_item(colors, count, options.point_color);
        let sizes = fit_sizes(sizes.unwrap_or_default(), count, options.point_size);

        let given = bonds.unwrap_or_default();
        let bonds: Vec<[u32; 2]> = given
            .iter()
            .copied()
            .filter(|pair| pair.iter().all(|&i| (i as usize) < count))
            .collect();
        let dropped = given.len() - bonds.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} bonds with out-of-range indices");
        }

        let segments = bond_segments(&positions, &bonds);
        let points = Renderable::new(
            Geometry::Points(PointCloud {
                positions,
                colors,
                sizes,
            }),
            Material::PointSprite {
                scale: options.point_scale,
            },
        )
        .shared();
        let lines = Renderable::new(
            Geometry::LineSegments(segments),
            Material::LineBasic {
                color: rgb(options.bond_color),
            },
        )
        .shared();

        Self {
            points,
            lines,
            bonds,
            default_size: options.point_size,
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.borrow().geometry().vertex_count()
    }

    /// Whether there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bond pairs that survived validation.
    #[must_use]
    pub fn bonds(&self) -> &[[u32; 2]] {
        &self.bonds
    }

    /// Point cloud renderable.
    #[must_use]
    pub fn points(&self) -> &SharedRenderable {
        &self.points
    }

    /// Bond segments renderable.
    #[must_use]
    pub fn lines(&self) -> &SharedRenderable {
        &self.lines
    }

    fn set_coordinates(&mut self, coordinates: &[f32]) {
        let incoming = points_from_flat(coordinates);
        let mut points = self.points.borrow_mut();
        let Geometry::Points(cloud) = points.geometry_mut() else {
            return;
        };
        if incoming.len() > cloud.positions.len() {
            log::warn!(
                "{} coordinates for {} points, ignoring the rest",
                incoming.len(),
                cloud.positions.len()
            );
        }
        for (slot, p) in cloud.positions.iter_mut().zip(incoming) {
            *slot = p;
        }
        let segments = bond_segments(&cloud.positions, &self.bonds);
        drop(points);

        if let Geometry::LineSegments(v) = self.lines.borrow_mut().geometry_mut() {
            *v = segments;
        }
    }

    fn set_sizes(&mut self, sizes: &[f32]) {
        let mut points = self.points.borrow_mut();
        if let Geometry::Points(cloud) = points.geometry_mut() {
            cloud.sizes = fit_sizes(sizes, cloud.positions.len(), self.default_size);
        }
    }
}

/// Pad with `fallback` or truncate so there is exactly one size per point.
fn fit_sizes(sizes: &[f32], count: usize, fallback: f32) -> Vec<f32> {
    if !sizes.is_empty() && sizes.len() != count {
        log::warn!("{} sizes for {count} points", sizes.len());
    }
    (0..count)
        .map(|i| sizes.get(i).copied().unwrap_or(fallback))
        .collect()
}

fn bond_segments(positions: &[Vec3], bonds: &[[u32; 2]]) -> Vec<Vec3> {
    bonds
        .iter()
        .flat_map(|&[a, b]| [positions[a as usize], positions[b as usize]])
        .collect()
}

impl Representation for PointLineRepresentation {
    fn kind(&self) -> RepresentationKind {
        RepresentationKind::Points
    }

    fn renderables(&self) -> Vec<SharedRenderable> {
        vec![self.points.clone(), self.lines.clone()]
    }

    fn supported_updates(&self) -> &'static [UpdateField] {
        &[UpdateField::Coordinates, UpdateField::Sizes]
    }

    fn update(&mut self, update: &RepresentationUpdate) -> Result<(), ChemviewError> {
        check_update(self.kind(), self.supported_updates(), update)?;
        if let Some(coordinates) = &update.coordinates {
            self.set_coordinates(coordinates);
        }
        if let Some(sizes) = &update.sizes {
            self.set_sizes(sizes);
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
    use crate::scene::Scene;

    fn cloud(rep: &PointLineRepresentation) -> PointCloud {
        match rep.points().borrow().geometry() {
            Geometry::Points(cloud) => cloud.clone(),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    fn segments(rep: &PointLineRepresentation) -> Vec<Vec3> {
        match rep.lines().borrow().geometry() {
            Geometry::LineSegments(v) => v.clone(),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    fn two_points() -> PointLineRepresentation {
        PointLineRepresentation::new(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            Some(&[[0, 1]]),
            None,
            None,
            &RepresentationOptions::default(),
        )
    }

    #[test]
    fn two_points_one_bond() {
        let rep = two_points();
        let mut scene = Scene::new();
        rep.add_to_scene(&mut scene);
        assert_eq!(scene.len(), 2);

        let cloud = cloud(&rep);
        assert_eq!(cloud.positions, [Vec3::ZERO, Vec3::X]);
        assert!(cloud.sizes.iter().all(|&s| (s - 0.15).abs() < 1e-6));
        assert!(cloud.colors.iter().all(|&c| c == [1.0, 1.0, 1.0]));
        assert_eq!(segments(&rep), [Vec3::ZERO, Vec3::X]);

        rep.remove_from_scene(&mut scene);
        assert!(scene.is_empty());
    }

    #[test]
    fn coordinate_update_moves_points_and_bonds() {
        let mut rep = two_points();
        let rev = rep.points().borrow().revision();
        rep.update(&RepresentationUpdate::coordinates(vec![0.0, 1.0, 0.0, 0.0, 0.0, 2.0]))
            .unwrap();
        assert_eq!(cloud(&rep).positions, [Vec3::Y, Vec3::new(0.0, 0.0, 2.0)]);
        assert_eq!(segments(&rep), [Vec3::Y, Vec3::new(0.0, 0.0, 2.0)]);
        assert!(rep.points().borrow().revision() > rev);
    }

    #[test]
    fn coordinate_update_keeps_colors_and_sizes() {
        let mut rep = PointLineRepresentation::new(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            None,
            Some(&[0xFF_00_00, 0x00_FF_00]),
            Some(&[0.4, 0.9]),
            &RepresentationOptions::default(),
        );
        let before = cloud(&rep);
        rep.update(&RepresentationUpdate::coordinates(vec![3.0, 0.0, 0.0, 0.0, 3.0, 0.0]))
            .unwrap();
        let after = cloud(&rep);
        assert_eq!(after.positions, [Vec3::new(3.0, 0.0, 0.0), Vec3::new(0.0, 3.0, 0.0)]);
        assert_eq!(after.colors, before.colors);
        assert_eq!(after.colors, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert_eq!(after.sizes, [0.4, 0.9]);
    }

    #[test]
    fn sizes_update_leaves_positions() {
        let mut rep = two_points();
        rep.update(&RepresentationUpdate {
            sizes: Some(vec![0.5, 0.7]),
            ..RepresentationUpdate::default()
        })
        .unwrap();
        let cloud = cloud(&rep);
        assert_eq!(cloud.sizes, [0.5, 0.7]);
        assert_eq!(cloud.positions, [Vec3::ZERO, Vec3::X]);
    }

    #[test]
    fn point_count_is_fixed() {
        let mut rep = two_points();
        rep.update(&RepresentationUpdate::coordinates(vec![5.0; 9])).unwrap();
        assert_eq!(rep.len(), 2);
        rep.update(&RepresentationUpdate::default().with_sizes(vec![2.0])).unwrap();
        assert_eq!(cloud(&rep).sizes, [2.0, 0.15]);
    }

    #[test]
    fn out_of_range_bonds_are_skipped() {
        let rep = PointLineRepresentation::new(
            &[0.0; 6],
            Some(&[[0, 1], [1, 7]]),
            Some(&[0xFF_00_00]),
            Some(&[0.3, 0.4]),
            &RepresentationOptions::default(),
        );
        assert_eq!(rep.bonds(), [[0, 1]]);
        let cloud = cloud(&rep);
        assert_eq!(cloud.colors[0], [1.0, 0.0, 0.0]);
        assert_eq!(cloud.colors[1], [1.0, 1.0, 1.0]);
    }

    #[test]
    fn no_bonds_means_no_segments() {
        let rep = PointLineRepresentation::new(
            &[0.0; 3],
            None,
            None,
            None,
            &RepresentationOptions::default(),
        );
        assert!(segments(&rep).is_empty());
    }
}
