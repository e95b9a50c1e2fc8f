//! CPU-side draw data: what a renderable turns into before upload.
//!
//! Kept free of wgpu types so the conversion can be checked without a
//! device.

use std::borrow::Cow;

use super::uniforms::{MeshVertex, ObjectUniform, PointInstance};
use crate::geometry::TriangleMesh;
use crate::scene::{Geometry, Material, PointCloud, Renderable};

/// Which pipeline draws a renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawKind {
    /// Instanced point sprites.
    Points,
    /// Disjoint line segments.
    Lines,
    /// Connected polyline.
    LineStrip,
    /// Filled triangles.
    Mesh,
    /// Triangle edges.
    Wireframe,
}

/// Bytes and counts ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDraw {
    /// Pipeline to use.
    pub kind: DrawKind,
    /// Vertex or instance buffer contents.
    pub vertices: Vec<u8>,
    /// Index buffer contents; empty for non-indexed draws.
    pub indices: Vec<u32>,
    /// Instances for points, vertices for lines, indices for meshes.
    pub count: u32,
    /// Object uniform.
    pub uniform: ObjectUniform,
}

impl PreparedDraw {
    /// Convert a renderable's geometry and material.
    #[must_use]
    pub fn from_renderable(renderable: &Renderable) -> Self {
        let uniform = ObjectUniform::from_renderable(renderable);
        match renderable.geometry() {
            Geometry::Points(cloud) => {
                let instances = point_instances(cloud);
                Self {
                    kind: DrawKind::Points,
                    count: instances.len() as u32,
                    vertices: bytemuck::cast_slice(&instances).to_vec(),
                    indices: Vec::new(),
                    uniform,
                }
            }
            Geometry::LineSegments(v) | Geometry::LineStrip(v) => {
                let kind = if matches!(renderable.geometry(), Geometry::LineStrip(_)) {
                    DrawKind::LineStrip
                } else {
                    DrawKind::Lines
                };
                let positions: Vec<[f32; 3]> = v.iter().map(|p| p.to_array()).collect();
                Self {
                    kind,
                    count: positions.len() as u32,
                    vertices: bytemuck::cast_slice(&positions).to_vec(),
                    indices: Vec::new(),
                    uniform,
                }
            }
            Geometry::Mesh(mesh) => {
                let wireframe = matches!(
                    renderable.material(),
                    Material::MeshBasic { wireframe: true, .. }
                        | Material::MeshPhong { wireframe: true, .. }
                );
                let (kind, indices) = if wireframe {
                    (DrawKind::Wireframe, mesh.wireframe_indices())
                } else {
                    (DrawKind::Mesh, mesh.indices())
                };
                let vertices = mesh_vertices(mesh);
                Self {
                    kind,
                    count: indices.len() as u32,
                    vertices: bytemuck::cast_slice(&vertices).to_vec(),
                    indices,
                    uniform,
                }
            }
        }
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn point_instances(cloud: &PointCloud) -> Vec<PointInstance> {
    cloud
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| PointInstance {
            position: p.to_array(),
            size: cloud.sizes.get(i).copied().unwrap_or(0.0),
            color: cloud.colors.get(i).copied().unwrap_or([1.0; 3]),
            _pad: 0.0,
        })
        .collect()
}

fn mesh_vertices(mesh: &TriangleMesh) -> Vec<MeshVertex> {
    let mesh: Cow<'_, TriangleMesh> = if mesh.normals.len() == mesh.positions.len() {
        Cow::Borrowed(mesh)
    } else {
        let mut owned = mesh.clone();
        owned.compute_vertex_normals();
        Cow::Owned(owned)
    };
    mesh.positions
        .iter()
        .zip(&mesh.normals)
        .map(|(p, n)| MeshVertex {
            position: p.to_array(),
            normal: n.to_array(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn triangle() -> TriangleMesh {
        TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]])
    }

    #[test]
    fn points_become_instances() {
        let r = Renderable::new(
            Geometry::Points(PointCloud {
                positions: vec![Vec3::ZERO, Vec3::X],
                colors: vec![[1.0, 0.0, 0.0]],
                sizes: vec![0.5, 0.25],
            }),
            Material::PointSprite { scale: 150.0 },
        );
        let draw = PreparedDraw::from_renderable(&r);
        assert_eq!(draw.kind, DrawKind::Points);
        assert_eq!(draw.count, 2);
        let instances: Vec<PointInstance> = bytemuck::pod_collect_to_vec(&draw.vertices);
        assert_eq!(instances[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(instances[1].size, 0.25);
        assert_eq!(instances[1].color, [1.0; 3]);
    }

    #[test]
    fn strip_and_segments() {
        let strip = Renderable::new(
            Geometry::LineStrip(vec![Vec3::ZERO, Vec3::X, Vec3::Y]),
            Material::LineBasic { color: [1.0; 3] },
        );
        let draw = PreparedDraw::from_renderable(&strip);
        assert_eq!(draw.kind, DrawKind::LineStrip);
        assert_eq!(draw.count, 3);
        assert_eq!(draw.vertices.len(), 36);

        let segments = Renderable::new(
            Geometry::LineSegments(vec![Vec3::ZERO, Vec3::X]),
            Material::LineBasic { color: [1.0; 3] },
        );
        assert_eq!(PreparedDraw::from_renderable(&segments).kind, DrawKind::Lines);
    }

    #[test]
    fn wireframe_uses_edge_indices() {
        let r = Renderable::new(
            Geometry::Mesh(triangle()),
            Material::MeshBasic {
                color: [1.0; 3],
                wireframe: true,
            },
        );
        let draw = PreparedDraw::from_renderable(&r);
        assert_eq!(draw.kind, DrawKind::Wireframe);
        assert_eq!(draw.count, 6);
    }

    #[test]
    fn missing_normals_are_computed() {
        let r = Renderable::new(
            Geometry::Mesh(triangle()),
            Material::MeshBasic {
                color: [1.0; 3],
                wireframe: false,
            },
        );
        let draw = PreparedDraw::from_renderable(&r);
        assert_eq!(draw.kind, DrawKind::Mesh);
        assert_eq!(draw.indices, [0, 1, 2]);
        let vertices: Vec<MeshVertex> = bytemuck::pod_collect_to_vec(&draw.vertices);
        assert_eq!(vertices.len(), 3);
        assert!(vertices
            .iter()
            .all(|v| (Vec3::from(v.normal).length() - 1.0).abs() < 1e-5));
    }
}
