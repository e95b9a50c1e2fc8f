//! Standalone visualization window backed by winit.
//!
//! ```no_run
//! # use chemview::ViewerWindow;
//! ViewerWindow::new()
//!     .with_scene_path("scene.json")
//!     .with_title("Benzene")
//!     .run()
//!     .unwrap();
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::ChemviewError,
    gpu::{GpuRenderer, RenderContext},
    options::Options,
    representation::SceneDescription,
    util::frame_timing::FrameTiming,
    InputEvent, MouseButton, Viewer,
};

/// How often the smoothed frame rate is logged.
const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(5);

enum SceneSource {
    Path(PathBuf),
    Description(SceneDescription),
}

/// A standalone window that displays one scene description.
///
/// Configure with the `with_*` methods, then call [`run`](Self::run) to
/// enter the event loop.
pub struct ViewerWindow {
    scene: Option<SceneSource>,
    options: Options,
    title: String,
}

impl Default for ViewerWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerWindow {
    /// Empty window titled "Chemview" with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scene: None,
            options: Options::default(),
            title: "Chemview".into(),
        }
    }

    /// Load the scene from a JSON file when the window opens.
    #[must_use]
    pub fn with_scene_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scene = Some(SceneSource::Path(path.into()));
        self
    }

    /// Show an already parsed scene.
    #[must_use]
    pub fn with_scene(mut self, scene: SceneDescription) -> Self {
        self.scene = Some(SceneSource::Description(scene));
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Fails if the scene file cannot be read or parsed, or if the event
    /// loop cannot start.
    pub fn run(self) -> Result<(), ChemviewError> {
        let scene = match self.scene {
            Some(SceneSource::Path(path)) => Some(SceneDescription::load(&path)?),
            Some(SceneSource::Description(scene)) => Some(scene),
            None => None,
        };

        let event_loop = EventLoop::new().map_err(|e| ChemviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = WindowApp {
            window: None,
            viewer: None,
            scene,
            options: Some(self.options),
            title: self.title,
            timing: FrameTiming::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ChemviewError::Viewer(e.to_string()))
    }
}

/// Internal winit application handler.
struct WindowApp {
    window: Option<Arc<Window>>,
    viewer: Option<Viewer<GpuRenderer>>,
    scene: Option<SceneDescription>,
    options: Option<Options>,
    title: String,
    timing: FrameTiming,
}

fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl WindowApp {
    fn create_viewer(&mut self, window: Arc<Window>) -> Result<Viewer<GpuRenderer>, ChemviewError> {
        let size = viewport_size(window.inner_size());
        let context = pollster::block_on(RenderContext::new(window, size))?;
        let renderer = GpuRenderer::new(context)?;
        let options = self.options.take().unwrap_or_default();
        let mut viewer = Viewer::new(renderer, options, size)?;
        if let Some(scene) = self.scene.take() {
            scene.populate(&mut viewer)?;
        }
        Ok(viewer)
    }

    fn forward(&mut self, event: &InputEvent) {
        if let Some(viewer) = &mut self.viewer {
            viewer.handle_input(event);
        }
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(960, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        match self.create_viewer(window.clone()) {
            Ok(viewer) => self.viewer = Some(viewer),
            Err(e) => {
                log::error!("failed to initialize viewer: {e}");
                event_loop.exit();
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if self.window.is_none() || self.viewer.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                let (w, h) = viewport_size(size);
                if let Some(viewer) = &mut self.viewer {
                    if let Err(e) = viewer.resize(w, h) {
                        log::error!("render error: {e}");
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(viewer) = &mut self.viewer {
                    match viewer.animate() {
                        Ok(true) => self.timing.end_frame(),
                        Ok(false) => {}
                        Err(e) => log::error!("render error: {e}"),
                    }
                }
                if let Some(fps) = self.timing.report(FPS_REPORT_INTERVAL) {
                    log::debug!("{fps:.1} fps over {} frames", self.timing.frames());
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(&InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(&InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.forward(&InputEvent::Scroll { delta: lines });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if event.repeat {
                    return;
                }
                self.forward(&InputEvent::Key {
                    code: format!("{code:?}"),
                    pressed: event.state == ElementState::Pressed,
                });
            }

            _ => (),
        }
    }
}
