use glam::{Mat4, Vec3};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::CameraOptions;

/// Which projection the camera renders with.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    /// Foreshortened view with a vertical field of view.
    #[default]
    Perspective,
    /// Parallel view sized to match the perspective view at the target.
    Orthographic,
}

/// Look-at camera with both projections available.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Active projection.
    pub projection: ProjectionKind,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the camera matrices and viewport metadata.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// World-to-view matrix, used for view-space depth.
    pub view: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Viewport size in physical pixels.
    pub viewport: [f32; 2],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

impl Camera {
    /// Camera at the configured position looking at the origin.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::from(options.position),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
            projection: options.projection,
        }
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection matrix for the active projection.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // Both *_rh builders use the [0,1] depth range wgpu expects.
        match self.projection {
            ProjectionKind::Perspective => Mat4::perspective_rh(
                self.fovy.to_radians(),
                self.aspect,
                self.znear,
                self.zfar,
            ),
            ProjectionKind::Orthographic => {
                let half_h = self.distance() * (self.fovy.to_radians() / 2.0).tan();
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(
                    -half_w, half_w, -half_h, half_h, self.znear, self.zfar,
                )
            }
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.view()
    }

    /// Unit vector from eye toward target.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Eye-to-target distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Update the aspect ratio from a viewport size. A zero height leaves
    /// the aspect unchanged.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            viewport: [1.0, 1.0],
            fovy: 45.0,
            _pad: 0.0,
        }
    }

    /// Update uniform fields from the given camera and viewport size.
    pub fn update(&mut self, camera: &Camera, width: u32, height: u32) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.view = camera.view().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.viewport = [width.max(1) as f32, height.max(1) as f32];
        self.fovy = camera.fovy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(projection: ProjectionKind) -> Camera {
        let mut options = CameraOptions::default();
        options.projection = projection;
        Camera::from_options(&options, 2.0)
    }

    #[test]
    fn uniform_is_sixteen_byte_aligned() {
        assert_eq!(size_of::<CameraUniform>(), 160);
    }

    #[test]
    fn target_projects_to_center() {
        for kind in [ProjectionKind::Perspective, ProjectionKind::Orthographic] {
            let cam = camera(kind);
            let clip = cam.build_matrix() * cam.target.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn orthographic_matches_perspective_at_target() {
        // A point on the target plane at the top edge of the perspective
        // frustum lands on the top edge of the orthographic one too.
        let persp = camera(ProjectionKind::Perspective);
        let ortho = camera(ProjectionKind::Orthographic);
        let half_h = persp.distance() * (persp.fovy.to_radians() / 2.0).tan();
        let edge = persp.target + persp.up * half_h;
        for cam in [persp, ortho] {
            let clip = cam.build_matrix() * edge.extend(1.0);
            assert!((clip.y / clip.w - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_height_keeps_aspect() {
        let mut cam = camera(ProjectionKind::Perspective);
        cam.set_viewport(800, 600);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
        cam.set_viewport(800, 0);
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }
}
