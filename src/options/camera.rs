use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::ProjectionKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 10.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Initial eye position; the camera looks at the origin.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Which of the two cameras starts active.
    #[schemars(title = "Projection")]
    pub projection: ProjectionKind,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 20.0,
            znear: 1.0,
            zfar: 800.0,
            position: [0.0, 0.0, -150.0],
            projection: ProjectionKind::Perspective,
        }
    }
}
