use glam::Vec3;

/// Light sources the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Parallel light shining from `position` toward the origin.
    Directional {
        /// Light color.
        color: [f32; 3],
        /// Color multiplier.
        intensity: f32,
        /// Where the light comes from.
        position: Vec3,
    },
    /// Flat light added to every lit surface.
    Ambient {
        /// Light color.
        color: [f32; 3],
    },
}

/// Linear depth fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    /// Color geometry fades toward.
    pub color: [f32; 3],
    /// Distance where fading starts.
    pub near: f32,
    /// Distance where geometry is fully fogged.
    pub far: f32,
}
