use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Trackball controller tuning.
pub struct ControlsOptions {
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Disable rotation.
    #[schemars(title = "Lock Rotation")]
    pub no_rotate: bool,
    /// Disable zooming.
    #[schemars(title = "Lock Zoom")]
    pub no_zoom: bool,
    /// Disable panning.
    #[schemars(title = "Lock Pan")]
    pub no_pan: bool,
    /// Keep the cursor on the front hemisphere of the virtual ball.
    #[schemars(skip)]
    pub no_roll: bool,
    /// Apply motion immediately instead of easing out.
    #[schemars(title = "Static Moving")]
    pub static_moving: bool,
    /// Fraction of the remaining motion consumed per frame when easing.
    #[schemars(title = "Damping", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub dynamic_damping_factor: f32,
    /// Closest allowed camera-to-target distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest allowed camera-to-target distance.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Key code that turns a drag into a rotation while held.
    #[schemars(skip)]
    pub rotate_key: String,
    /// Key code that turns a drag into a zoom while held.
    #[schemars(skip)]
    pub zoom_key: String,
    /// Key code that turns a drag into a pan while held.
    #[schemars(skip)]
    pub pan_key: String,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 1.2,
            pan_speed: 0.8,
            no_rotate: false,
            no_zoom: false,
            no_pan: false,
            no_roll: false,
            static_moving: false,
            dynamic_damping_factor: 0.2,
            min_distance: 0.0,
            max_distance: f32::MAX,
            rotate_key: "KeyA".into(),
            zoom_key: "KeyS".into(),
            pan_key: "KeyD".into(),
        }
    }
}
