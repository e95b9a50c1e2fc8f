//! Camera and trackball controller.

/// Trackball orbit/zoom/pan controller.
pub mod controls;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use controls::{ScreenRect, TrackballControls};
pub use core::{Camera, CameraUniform, ProjectionKind};
