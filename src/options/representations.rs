use serde::{Deserialize, Serialize};

/// Defaults used when a representation is built without an optional input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RepresentationOptions {
    /// Point size when no per-point sizes are given.
    pub point_size: f32,
    /// Point color (`0xRRGGBB`) when no per-point colors are given.
    pub point_color: u32,
    /// Screen-space scale applied to point sizes before dividing by depth.
    pub point_scale: f32,
    /// Bond line color.
    pub bond_color: u32,
    /// Surface color for both styles.
    pub surface_color: u32,
    /// Sphere color.
    pub sphere_color: u32,
    /// Radius used when a sphere has no radius entry.
    pub sphere_radius: f32,
    /// Angular resolution of the sphere template.
    pub sphere_resolution: u32,
    /// Box edge color.
    pub box_color: u32,
    /// Smooth line color when no colors are given.
    pub smooth_line_color: u32,
    /// Curve samples per control point for smooth lines.
    pub smooth_line_resolution: u32,
    /// Curve samples per control point for smooth tubes.
    pub tube_resolution: u32,
    /// Segments around a tube's circular cross-section.
    pub tube_radial_segments: u32,
    /// Tube base color when no colors are given.
    pub tube_color: u32,
    /// Tube specular highlight color.
    pub tube_specular: u32,
    /// Tube emissive color.
    pub tube_emissive: u32,
    /// Tube specular exponent.
    pub tube_shininess: f32,
    /// Cylinder color when none is given.
    pub cylinder_color: u32,
    /// Segments around a cylinder.
    pub cylinder_radial_segments: u32,
}

impl Default for RepresentationOptions {
    fn default() -> Self {
        Self {
            point_size: 0.15,
            point_color: 0xFF_FF_FF,
            point_scale: 150.0,
            bond_color: 0x00_00_FF,
            surface_color: 0xFF_FF_FF,
            sphere_color: 0x00_FF_FF,
            sphere_radius: 1.0,
            sphere_resolution: 16,
            box_color: 0xFF_FF_FF,
            smooth_line_color: 0xFF_00_00,
            smooth_line_resolution: 16,
            tube_resolution: 4,
            tube_radial_segments: 8,
            tube_color: 0x00_AB_B1,
            tube_specular: 0xA9_FC_FF,
            tube_emissive: 0x00_60_63,
            tube_shininess: 100.0,
            cylinder_color: 0xFF_FF_00,
            cylinder_radial_segments: 16,
        }
    }
}
