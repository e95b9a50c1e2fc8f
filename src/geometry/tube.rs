use std::f32::consts::TAU;

use glam::Vec3;

use super::{SplineCurve, TriangleMesh};

/// A sample along a curve with an orthonormal frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeFrame {
    /// Position on the curve.
    pub position: Vec3,
    /// Unit tangent.
    pub tangent: Vec3,
    /// First cross-section axis.
    pub normal: Vec3,
    /// Second cross-section axis (`tangent × normal`).
    pub binormal: Vec3,
}

impl TubeFrame {
    /// Frames at `segments + 1` arc-length-uniform samples of `curve`.
    #[must_use]
    pub fn along(curve: &SplineCurve, segments: usize) -> Vec<Self> {
        let mut frames: Vec<Self> = (0..=segments)
            .map(|i| {
                let u = i as f32 / segments.max(1) as f32;
                let tangent = curve.tangent_at(u);
                Self {
                    position: curve.point_at(u),
                    tangent: if tangent == Vec3::ZERO { Vec3::Z } else { tangent },
                    normal: Vec3::ZERO,
                    binormal: Vec3::ZERO,
                }
            })
            .collect();
        rotation_minimizing(&mut frames);
        frames
    }
}

/// Tube of circular cross-section swept along `curve`.
///
/// `segments` rings of `radial_segments` vertices are placed at
/// arc-length-uniform positions; with `closed` the last ring connects back
/// to the first.
#[must_use]
pub fn tube(
    curve: &SplineCurve,
    segments: usize,
    radius: f32,
    radial_segments: usize,
    closed: bool,
) -> TriangleMesh {
    if segments == 0 || radial_segments == 0 || curve.control_points().is_empty() {
        return TriangleMesh::default();
    }
    let frames = TubeFrame::along(curve, segments);

    let mut positions = Vec::with_capacity(frames.len() * radial_segments);
    let mut normals = Vec::with_capacity(positions.capacity());
    for frame in &frames {
        for j in 0..radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let offset = frame.normal * (-v.cos()) + frame.binormal * v.sin();
            positions.push(frame.position + offset * radius);
            normals.push(offset.normalize_or_zero());
        }
    }

    let ring = |i: usize, j: usize| (i * radial_segments + j % radial_segments) as u32;
    let mut triangles = Vec::with_capacity(segments * radial_segments * 2);
    for i in 0..segments {
        let ip = if closed { (i + 1) % segments } else { i + 1 };
        for j in 0..radial_segments {
            let a = ring(i, j);
            let b = ring(ip, j);
            let c = ring(ip, j + 1);
            let d = ring(i, j + 1);
            triangles.push([a, b, d]);
            triangles.push([b, c, d]);
        }
    }

    let mut mesh = TriangleMesh::new(positions, triangles);
    mesh.normals = normals;
    mesh
}

/// Rotation minimizing frames via the double reflection method
/// (Wang et al. 2008). Only tangents and positions need to be set on input.
fn rotation_minimizing(frames: &mut [TubeFrame]) {
    let Some(first) = frames.first_mut() else {
        return;
    };
    let t0 = first.tangent;
    let arbitrary = if t0.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    first.normal = t0.cross(arbitrary).normalize();
    first.binormal = t0.cross(first.normal).normalize();

    for i in 0..frames.len() - 1 {
        let current = frames[i];
        let next = &mut frames[i + 1];

        let v1 = next.position - current.position;
        let c1 = v1.dot(v1);
        if c1 < 1e-10 {
            next.normal = current.normal;
            next.binormal = current.binormal;
            continue;
        }

        let r_l = current.normal - (2.0 / c1) * v1.dot(current.normal) * v1;
        let t_l = current.tangent - (2.0 / c1) * v1.dot(current.tangent) * v1;

        let v2 = next.tangent - t_l;
        let c2 = v2.dot(v2);
        let r_next = if c2 < 1e-10 {
            r_l
        } else {
            r_l - (2.0 / c2) * v2.dot(r_l) * v2
        };

        let t = next.tangent;
        next.normal = (r_next - t * t.dot(r_next)).normalize();
        next.binormal = t.cross(next.normal).normalize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> SplineCurve {
        SplineCurve::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)])
    }

    #[test]
    fn ring_and_face_counts() {
        let mesh = tube(&straight(), 8, 0.5, 8, false);
        assert_eq!(mesh.vertex_count(), 9 * 8);
        assert_eq!(mesh.triangle_count(), 8 * 8 * 2);
    }

    #[test]
    fn vertices_sit_at_the_radius() {
        let mesh = tube(&straight(), 4, 0.5, 8, false);
        for p in &mesh.positions {
            assert!((Vec3::new(p.x, p.y, 0.0).length() - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn frames_stay_orthonormal_on_a_bend() {
        let curve = SplineCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 1.0),
            Vec3::new(0.0, 3.0, 2.0),
        ]);
        for f in TubeFrame::along(&curve, 32) {
            assert!(f.normal.dot(f.tangent).abs() < 1e-3);
            assert!(f.binormal.dot(f.tangent).abs() < 1e-3);
            assert!((f.normal.length() - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn empty_curve_gives_empty_mesh() {
        let mesh = tube(&SplineCurve::new(Vec::new()), 4, 1.0, 8, false);
        assert_eq!(mesh.vertex_count(), 0);
    }
}
