//! wgpu backend.
//!
//! Provides device/surface initialization, growable buffers, shader
//! composition, the CPU-side draw preparation, and [`GpuRenderer`], the
//! [`SceneRenderer`](crate::viewer::SceneRenderer) that draws a scene.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Depth state, bind layout entries and the per-kind pipelines.
pub mod pipeline_util;
/// Renderable to vertex/index bytes conversion.
pub mod prepared;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Scene drawing with per-renderable buffer caching.
pub mod scene_renderer;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// CPU mirrors of the WGSL uniform and vertex structs.
pub mod uniforms;

pub use render_context::RenderContext;
pub use scene_renderer::GpuRenderer;
