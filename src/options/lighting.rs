use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// One directional key light plus a flat ambient term.
pub struct LightingOptions {
    /// Directional light color as `0xRRGGBB`.
    #[schemars(skip)]
    pub directional_color: u32,
    /// Directional light intensity multiplier.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub directional_intensity: f32,
    /// Position of the directional light; it shines toward the origin.
    #[schemars(skip)]
    pub directional_position: [f32; 3],
    /// Ambient light color as `0xRRGGBB`.
    #[schemars(title = "Ambient")]
    pub ambient_color: u32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            directional_color: 0xFF_FF_FF,
            directional_intensity: 1.2,
            directional_position: [0.2, 0.2, -1.0],
            ambient_color: 0x20_20_20,
        }
    }
}
