use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::TriangleMesh;

/// Latitude/longitude sphere centred on the origin.
///
/// Rows run from the +Y pole to the -Y pole; every row repeats its first
/// vertex at the seam so the grid is `(height + 1) * (width + 1)`. Pole rows
/// emit one triangle per cell, interior rows two. Normals are exact.
#[must_use]
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> TriangleMesh {
    let width = width_segments.max(3);
    let height = height_segments.max(2);
    let row = width + 1;

    let mut positions = Vec::with_capacity((row * (height + 1)) as usize);
    let mut normals = Vec::with_capacity(positions.capacity());
    for y in 0..=height {
        let theta = y as f32 / height as f32 * PI;
        for x in 0..=width {
            let phi = x as f32 / width as f32 * TAU;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            positions.push(normal * radius);
            normals.push(normal);
        }
    }

    let mut triangles = Vec::with_capacity((width * height * 2) as usize);
    for y in 0..height {
        for x in 0..width {
            let v1 = y * row + x + 1;
            let v2 = y * row + x;
            let v3 = (y + 1) * row + x;
            let v4 = (y + 1) * row + x + 1;
            if y == 0 {
                triangles.push([v1, v3, v4]);
            } else if y == height - 1 {
                triangles.push([v1, v2, v3]);
            } else {
                triangles.push([v1, v2, v4]);
                triangles.push([v2, v3, v4]);
            }
        }
    }

    let mut mesh = TriangleMesh::new(positions, triangles);
    mesh.normals = normals;
    mesh
}
