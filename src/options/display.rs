use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Background and depth fog.
pub struct DisplayOptions {
    /// Clear color as `0xRRGGBB`. Fog fades toward the same color.
    #[schemars(title = "Background")]
    pub background: u32,
    /// Whether linear depth fog is applied to meshes and lines.
    #[schemars(title = "Fog")]
    pub fog: bool,
    /// Distance at which fog starts.
    #[schemars(title = "Fog Near", range(min = 0.0, max = 1000.0), extend("step" = 1.0))]
    pub fog_near: f32,
    /// Distance at which fog fully hides geometry.
    #[schemars(title = "Fog Far", range(min = 0.0, max = 2000.0), extend("step" = 1.0))]
    pub fog_far: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: 0x00_00_00,
            fog: true,
            fog_near: 10.0,
            fog_far: 200.0,
        }
    }
}
