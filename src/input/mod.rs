//! Input handling: platform-agnostic event types the viewer forwards to
//! its trackball controller.

/// Platform-agnostic input events.
pub mod event;

pub use event::{InputEvent, MouseButton};
