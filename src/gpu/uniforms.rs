//! CPU mirrors of the WGSL uniform and vertex structs.

use glam::Vec3;

use crate::scene::{Light, Material, Renderable, Scene};

/// Scene lighting and fog, shared by every pipeline.
/// NOTE: Must match WGSL struct layout exactly (64 bytes)
///
/// WGSL layout:
///   light_dir: vec3<f32>    (offset 0, align 16)
///   intensity: f32          (offset 12)
///   light_color: vec3<f32>  (offset 16)
///   fog_enabled: f32        (offset 28)
///   ambient: vec3<f32>      (offset 32)
///   fog_near: f32           (offset 44)
///   fog_color: vec3<f32>    (offset 48)
///   fog_far: f32            (offset 60)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Unit vector toward the directional light.
    pub light_dir: [f32; 3],
    /// Directional light intensity.
    pub intensity: f32,
    /// Directional light color.
    pub light_color: [f32; 3],
    /// 1.0 when fog is on.
    pub fog_enabled: f32,
    /// Summed ambient light.
    pub ambient: [f32; 3],
    /// Fog start distance.
    pub fog_near: f32,
    /// Fog color.
    pub fog_color: [f32; 3],
    /// Fog end distance.
    pub fog_far: f32,
}

impl LightingUniform {
    /// Collapse the scene's lights and fog into the uniform. Only the first
    /// directional light is used.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        let mut uniform = Self::zeroed_with_dir();
        let mut directional = false;
        let mut ambient = Vec3::ZERO;
        for light in scene.lights() {
            match *light {
                Light::Directional {
                    color,
                    intensity,
                    position,
                } if !directional => {
                    uniform.light_dir = position.normalize_or(Vec3::Z).to_array();
                    uniform.light_color = color;
                    uniform.intensity = intensity;
                    directional = true;
                }
                Light::Directional { .. } => {
                    log::warn!("only one directional light is supported");
                }
                Light::Ambient { color } => ambient += Vec3::from(color),
            }
        }
        uniform.ambient = ambient.to_array();
        if let Some(fog) = scene.fog() {
            uniform.fog_enabled = 1.0;
            uniform.fog_color = fog.color;
            uniform.fog_near = fog.near;
            uniform.fog_far = fog.far;
        }
        uniform
    }

    fn zeroed_with_dir() -> Self {
        Self {
            light_dir: [0.0, 0.0, 1.0],
            ..<Self as bytemuck::Zeroable>::zeroed()
        }
    }
}

/// Per-renderable transform and material.
/// NOTE: Must match WGSL `ObjectUniform` exactly (128 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Model-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Base color, alpha unused.
    pub color: [f32; 4],
    /// Specular color.
    pub specular: [f32; 4],
    /// Emissive color with shininess in `w`.
    pub emissive: [f32; 4],
    /// `x` = lit flag, `y` = point scale.
    pub params: [f32; 4],
}

impl ObjectUniform {
    /// Uniform for a renderable's current transform and material.
    #[must_use]
    pub fn from_renderable(renderable: &Renderable) -> Self {
        let model = renderable.transform().to_cols_array_2d();
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        match renderable.material() {
            Material::PointSprite { scale } => Self {
                model,
                color: [1.0; 4],
                specular: [0.0; 4],
                emissive: [0.0; 4],
                params: [0.0, scale, 0.0, 0.0],
            },
            Material::LineBasic { color } | Material::MeshBasic { color, .. } => Self {
                model,
                color: rgba(color),
                specular: [0.0; 4],
                emissive: [0.0; 4],
                params: [0.0; 4],
            },
            Material::MeshPhong {
                color,
                specular,
                emissive,
                shininess,
                ..
            } => Self {
                model,
                color: rgba(color),
                specular: rgba(specular),
                emissive: [emissive[0], emissive[1], emissive[2], shininess],
                params: [1.0, 0.0, 0.0, 0.0],
            },
        }
    }
}

/// One point sprite instance (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    /// Centre.
    pub position: [f32; 3],
    /// Size before depth scaling.
    pub size: f32,
    /// Linear RGB.
    pub color: [f32; 3],
    pub(crate) _pad: f32,
}

/// Mesh vertex: position and normal (24 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{DisplayOptions, LightingOptions};
    use crate::scene::Geometry;

    #[test]
    fn layouts_match_wgsl() {
        assert_eq!(size_of::<LightingUniform>(), 64);
        assert_eq!(size_of::<ObjectUniform>(), 128);
        assert_eq!(size_of::<PointInstance>(), 32);
        assert_eq!(size_of::<MeshVertex>(), 24);
    }

    #[test]
    fn lighting_from_default_scene() {
        let scene = Scene::with_options(&DisplayOptions::default(), &LightingOptions::default());
        let u = LightingUniform::from_scene(&scene);
        let dir = Vec3::from(u.light_dir);
        assert!((dir.length() - 1.0).abs() < 1e-5);
        assert!(dir.z < 0.0);
        assert!((u.intensity - 1.2).abs() < 1e-6);
        assert!((u.ambient[0] - 32.0 / 255.0).abs() < 1e-5);
        assert_eq!(u.fog_enabled, 1.0);
        assert!((u.fog_far - 200.0).abs() < 1e-6);
    }

    #[test]
    fn unlit_scene_has_no_fog() {
        let u = LightingUniform::from_scene(&Scene::new());
        assert_eq!(u.fog_enabled, 0.0);
        assert_eq!(u.ambient, [0.0; 3]);
    }

    #[test]
    fn phong_sets_lit_flag_and_shininess() {
        let r = Renderable::new(
            Geometry::LineStrip(Vec::new()),
            Material::MeshPhong {
                color: [0.5; 3],
                specular: [1.0; 3],
                emissive: [0.1; 3],
                shininess: 42.0,
                wireframe: false,
            },
        );
        let u = ObjectUniform::from_renderable(&r);
        assert_eq!(u.params[0], 1.0);
        assert_eq!(u.emissive[3], 42.0);
        assert_eq!(u.model, glam::Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn sprite_carries_scale() {
        let r = Renderable::new(
            Geometry::LineStrip(Vec::new()),
            Material::PointSprite { scale: 150.0 },
        );
        let u = ObjectUniform::from_renderable(&r);
        assert_eq!(u.params, [0.0, 150.0, 0.0, 0.0]);
    }
}
