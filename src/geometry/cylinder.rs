use std::f32::consts::TAU;

use glam::Vec3;

use super::TriangleMesh;

/// Capped cylinder centred on the origin with its axis along +Y.
///
/// The side wall has its own ring vertices with radial normals; each cap
/// has a centre vertex plus a ring with flat ±Y normals, so lighting stays
/// crisp at the rims.
#[must_use]
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
) -> TriangleMesh {
    let radial = radial_segments.max(3);
    let half = height * 0.5;
    let slope = if height > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };
    let ring = |x: u32| {
        let angle = x as f32 / radial as f32 * TAU;
        (angle.sin(), angle.cos())
    };

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut triangles = Vec::new();

    // Side wall: top ring then bottom ring.
    for (y, r) in [(half, radius_top), (-half, radius_bottom)] {
        for x in 0..=radial {
            let (s, c) = ring(x);
            positions.push(Vec3::new(r * s, y, r * c));
            normals.push(Vec3::new(s, slope, c).normalize());
        }
    }
    let row = radial + 1;
    for x in 0..radial {
        let v1 = x;
        let v2 = row + x;
        let v3 = row + x + 1;
        let v4 = x + 1;
        triangles.push([v1, v2, v4]);
        triangles.push([v2, v3, v4]);
    }

    // Caps
    for (y, r, up) in [(half, radius_top, true), (-half, radius_bottom, false)] {
        if r <= 0.0 {
            continue;
        }
        let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        normals.push(normal);
        for x in 0..=radial {
            let (s, c) = ring(x);
            positions.push(Vec3::new(r * s, y, r * c));
            normals.push(normal);
        }
        for x in 0..radial {
            let a = center + 1 + x;
            let b = a + 1;
            triangles.push(if up { [center, a, b] } else { [center, b, a] });
        }
    }

    let mut mesh = TriangleMesh::new(positions, triangles);
    mesh.normals = normals;
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_the_requested_height() {
        let mesh = cylinder(0.5, 0.5, 4.0, 16);
        let (min, max) = mesh.positions.iter().fold(
            (f32::MAX, f32::MIN),
            |(lo, hi), p| (lo.min(p.y), hi.max(p.y)),
        );
        assert_eq!((min, max), (-2.0, 2.0));
        // side + 2 caps
        assert_eq!(mesh.triangle_count(), 32 + 16 + 16);
    }

    #[test]
    fn wall_vertices_sit_on_the_radius() {
        let mesh = cylinder(0.75, 0.75, 1.0, 8);
        for p in &mesh.positions[..18] {
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 0.75).abs() < 1e-5);
        }
    }

    #[test]
    fn cap_triangles_face_outward() {
        let mut mesh = cylinder(1.0, 1.0, 2.0, 8);
        mesh.compute_face_normals();
        let caps = &mesh.face_normals[16..];
        assert!(caps[..8].iter().all(|n| (*n - Vec3::Y).length() < 1e-5));
        assert!(caps[8..].iter().all(|n| (*n - Vec3::NEG_Y).length() < 1e-5));
    }

    #[test]
    fn cone_skips_the_degenerate_cap() {
        let mesh = cylinder(0.0, 1.0, 2.0, 8);
        assert_eq!(mesh.triangle_count(), 16 + 8);
    }
}
