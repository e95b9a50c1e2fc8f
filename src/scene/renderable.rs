use std::{cell::RefCell, rc::Rc};

use glam::{Mat4, Vec3};

use crate::geometry::TriangleMesh;

/// Per-point attributes of a point cloud.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Point centres.
    pub positions: Vec<Vec3>,
    /// Linear RGB per point.
    pub colors: Vec<[f32; 3]>,
    /// Size per point, scaled by depth when drawn.
    pub sizes: Vec<f32>,
}

/// Geometry a renderable draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Screen-facing round point sprites.
    Points(PointCloud),
    /// Disjoint segments, two consecutive vertices per segment.
    LineSegments(Vec<Vec3>),
    /// One connected polyline.
    LineStrip(Vec<Vec3>),
    /// Indexed triangles.
    Mesh(TriangleMesh),
}

impl Geometry {
    /// Number of vertices (points for a point cloud).
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Points(cloud) => cloud.positions.len(),
            Self::LineSegments(v) | Self::LineStrip(v) => v.len(),
            Self::Mesh(mesh) => mesh.vertex_count(),
        }
    }
}

/// Surface appearance of a renderable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Round sprites colored per point; `scale` converts size to pixels at
    /// unit depth.
    PointSprite {
        /// Size-to-pixel factor.
        scale: f32,
    },
    /// Unlit single-color lines.
    LineBasic {
        /// Line color.
        color: [f32; 3],
    },
    /// Unlit single-color mesh.
    MeshBasic {
        /// Mesh color.
        color: [f32; 3],
        /// Draw triangle edges instead of filled faces.
        wireframe: bool,
    },
    /// Blinn-Phong shaded mesh.
    MeshPhong {
        /// Diffuse color.
        color: [f32; 3],
        /// Specular highlight color.
        specular: [f32; 3],
        /// Self-illumination added regardless of lights.
        emissive: [f32; 3],
        /// Specular exponent.
        shininess: f32,
        /// Draw triangle edges instead of filled faces.
        wireframe: bool,
    },
}

/// A drawable object: geometry, material and model transform.
///
/// Every mutation goes through a setter that bumps the revision, which is
/// how the GPU backend learns that its buffers are stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    geometry: Geometry,
    material: Material,
    transform: Mat4,
    revision: u64,
}

/// Owning handle held by representations.
pub type SharedRenderable = Rc<RefCell<Renderable>>;

impl Renderable {
    /// Renderable with an identity transform.
    #[must_use]
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Mat4::IDENTITY,
            revision: 0,
        }
    }

    /// Wrap in a shared handle.
    #[must_use]
    pub fn shared(self) -> SharedRenderable {
        Rc::new(RefCell::new(self))
    }

    /// Current geometry.
    #[must_use]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Mutable geometry; marks the renderable dirty.
    pub fn geometry_mut(&mut self) -> &mut Geometry {
        self.revision += 1;
        &mut self.geometry
    }

    /// Current material.
    #[must_use]
    pub fn material(&self) -> Material {
        self.material
    }

    /// Replace the material; marks the renderable dirty.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.revision += 1;
    }

    /// Model-to-world transform.
    #[must_use]
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// Replace the model transform; marks the renderable dirty.
    pub fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.revision += 1;
    }

    /// Mutation counter.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
