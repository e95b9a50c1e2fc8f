//! Browser binding: a canvas-backed viewer driven from JavaScript.
//!
//! ```js
//! const viewer = await WebViewer.create(canvas);
//! viewer.add_representation("atoms", JSON.stringify({type: "points", coordinates}));
//! viewer.zoom_into(coordinates);
//! canvas.addEventListener("pointermove", (e) => viewer.pointer_move(e.offsetX, e.offsetY));
//! window.addEventListener("keydown", (e) => viewer.key_down(e.code, e.repeat));
//! (function frame() { viewer.animate(); requestAnimationFrame(frame); })();
//! ```

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::{
    camera::ProjectionKind,
    error::ChemviewError,
    gpu::{GpuRenderer, RenderContext},
    options::Options,
    representation::{RepresentationSpec, RepresentationUpdate},
    InputEvent, MouseButton, Viewer,
};

fn to_js(err: ChemviewError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Viewer bound to an HTML canvas.
#[wasm_bindgen]
pub struct WebViewer {
    viewer: Viewer<GpuRenderer>,
}

#[wasm_bindgen]
impl WebViewer {
    /// Initialize WebGL2/WebGPU on `canvas` with default options.
    pub async fn create(canvas: HtmlCanvasElement) -> Result<WebViewer, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let size = (canvas.width().max(1), canvas.height().max(1));
        let context = RenderContext::new(wgpu::SurfaceTarget::Canvas(canvas), size)
            .await
            .map_err(|e| to_js(e.into()))?;
        let renderer = GpuRenderer::new(context).map_err(to_js)?;
        let viewer = Viewer::new(renderer, Options::default(), size).map_err(to_js)?;
        Ok(Self { viewer })
    }

    /// Build a representation from its JSON description, add it under
    /// `id` and redraw.
    pub fn add_representation(&mut self, id: &str, json: &str) -> Result<(), JsValue> {
        let spec = RepresentationSpec::from_json(json).map_err(to_js)?;
        let representation = spec.build(&self.viewer.options().representations);
        self.viewer
            .add_representation(representation, id)
            .map_err(to_js)?;
        self.viewer.render().map_err(to_js)
    }

    /// Apply a JSON update (`coordinates`, `sizes`) and redraw.
    pub fn update_representation(&mut self, id: &str, json: &str) -> Result<(), JsValue> {
        let update = RepresentationUpdate::from_json(json).map_err(to_js)?;
        self.viewer
            .update_representation(id, &update)
            .map_err(to_js)?;
        self.viewer.render().map_err(to_js)
    }

    /// Remove the representation registered under `id`.
    pub fn remove_representation(&mut self, id: &str) -> Result<(), JsValue> {
        let _ = self.viewer.remove_representation(id).map_err(to_js)?;
        self.viewer.render().map_err(to_js)
    }

    /// Ids of every registered representation, sorted.
    pub fn representation_ids(&self) -> Vec<String> {
        self.viewer
            .representation_ids()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Frame a flat `[x, y, z, ...]` coordinate array.
    pub fn zoom_into(&mut self, coordinates: Vec<f32>) -> Result<(), JsValue> {
        self.viewer.zoom_into(&coordinates).map_err(to_js)
    }

    /// Replace all options from JSON.
    pub fn set_options(&mut self, json: &str) -> Result<(), JsValue> {
        let options: Options = serde_json::from_str(json).map_err(|e| to_js(e.into()))?;
        self.viewer.apply_options(options).map_err(to_js)
    }

    /// Switch between `"perspective"` and `"orthographic"`.
    pub fn set_projection(&mut self, name: &str) -> Result<(), JsValue> {
        let kind = match name {
            "perspective" => ProjectionKind::Perspective,
            "orthographic" => ProjectionKind::Orthographic,
            other => return Err(JsValue::from_str(&format!("unknown projection '{other}'"))),
        };
        self.viewer.set_projection(kind).map_err(to_js)
    }

    /// Track a canvas size change.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.viewer.resize(width, height).map_err(to_js)
    }

    /// Draw one frame.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.viewer.render().map_err(to_js)
    }

    /// Advance the controls; call once per `requestAnimationFrame`.
    /// Returns whether a frame was drawn.
    pub fn animate(&mut self) -> Result<bool, JsValue> {
        self.viewer.animate().map_err(to_js)
    }

    /// `pointerdown` with the DOM button index and canvas-relative position.
    pub fn pointer_down(&mut self, button: i16, x: f32, y: f32) {
        self.viewer.handle_input(&InputEvent::CursorMoved { x, y });
        self.viewer.handle_input(&InputEvent::MouseButton {
            button: MouseButton::from_dom(button),
            pressed: true,
        });
    }

    /// `pointermove` with canvas-relative position.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.viewer.handle_input(&InputEvent::CursorMoved { x, y });
    }

    /// `pointerup`.
    pub fn pointer_up(&mut self, button: i16) {
        self.viewer.handle_input(&InputEvent::MouseButton {
            button: MouseButton::from_dom(button),
            pressed: false,
        });
    }

    /// `wheel` with `deltaY` in pixels; positive scrolls toward the user.
    pub fn wheel(&mut self, delta_y: f32) {
        self.viewer.handle_input(&InputEvent::Scroll {
            delta: -delta_y / 100.0,
        });
    }

    /// `keydown` with the DOM `KeyboardEvent.code` and `repeat` flag.
    /// Auto-repeat presses are dropped.
    pub fn key_down(&mut self, code: &str, repeat: bool) {
        if repeat {
            return;
        }
        self.viewer.handle_input(&InputEvent::Key {
            code: code.to_owned(),
            pressed: true,
        });
    }

    /// `keyup` with the DOM `KeyboardEvent.code`.
    pub fn key_up(&mut self, code: &str) {
        self.viewer.handle_input(&InputEvent::Key {
            code: code.to_owned(),
            pressed: false,
        });
    }
}
