//! CPU-side geometry builders.
//!
//! Pure `Vec3` → mesh transforms with no GPU dependencies: indexed triangle
//! meshes with vertex merging and normals, parametric primitives (UV
//! sphere, capped cylinder, box outline), Catmull-Rom curves and tubes swept
//! along them.

mod cylinder;
mod mesh;
mod outline;
mod sphere;
mod spline;
mod tube;

use glam::Vec3;

pub use cylinder::cylinder;
pub use mesh::TriangleMesh;
pub use outline::box_edges;
pub use sphere::uv_sphere;
pub use spline::SplineCurve;
pub use tube::{tube, TubeFrame};

/// Split a flattened `[x0, y0, z0, x1, ...]` array into points. A trailing
/// partial triple is ignored.
#[must_use]
pub fn points_from_flat(coordinates: &[f32]) -> Vec<Vec3> {
    if coordinates.len() % 3 != 0 {
        log::warn!(
            "coordinate array length {} is not a multiple of 3",
            coordinates.len()
        );
    }
    coordinates
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect()
}

/// Arithmetic mean of a point set, `None` when empty.
#[must_use]
pub fn centroid(points: &[Vec3]) -> Option<Vec3> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().copied().sum::<Vec3>() / points.len() as f32)
}

/// Largest distance from `center` to any point (0 for an empty set).
#[must_use]
pub fn bounding_radius(points: &[Vec3], center: Vec3) -> f32 {
    points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_arrays_split_into_triples() {
        let points = points_from_flat(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(points, vec![Vec3::new(0.0, 1.0, 2.0), Vec3::new(3.0, 4.0, 5.0)]);
    }

    #[test]
    fn centroid_and_radius() {
        let points = [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.0)];
        let c = centroid(&points).unwrap();
        assert!((c - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
        assert!((bounding_radius(&points, c) - 2.0).abs() < 1e-6);
        assert!(centroid(&[]).is_none());
    }
}
