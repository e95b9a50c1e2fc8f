//! The viewer: scene, cameras, trackball controls and the representation
//! registry, drawn through a pluggable [`SceneRenderer`].
//!
//! The viewer never schedules frames itself. Hosts call [`Viewer::animate`]
//! once per display refresh (winit redraw or `requestAnimationFrame`) and
//! [`Viewer::render`] whenever they changed data behind its back.

use glam::{Vec2, Vec3};
use rustc_hash::FxHashMap;

use crate::camera::{Camera, ProjectionKind, TrackballControls};
use crate::error::ChemviewError;
use crate::geometry::{bounding_radius, centroid, points_from_flat};
use crate::input::InputEvent;
use crate::options::Options;
use crate::representation::{Representation, RepresentationUpdate};
use crate::scene::Scene;

/// Something that can draw a [`Scene`] from a [`Camera`].
pub trait SceneRenderer {
    /// Resize the render target.
    fn set_size(&mut self, width: u32, height: u32);

    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), ChemviewError>;
}

/// Interactive molecular viewer.
pub struct Viewer<R: SceneRenderer> {
    renderer: R,
    scene: Scene,
    perspective: Camera,
    orthographic: Camera,
    active: ProjectionKind,
    controls: TrackballControls,
    representations: FxHashMap<String, Box<dyn Representation>>,
    options: Options,
    size: (u32, u32),
    cursor: Vec2,
}

impl<R: SceneRenderer> Viewer<R> {
    /// Build the scene, cameras and controls from `options` and draw the
    /// first frame.
    pub fn new(mut renderer: R, options: Options, size: (u32, u32)) -> Result<Self, ChemviewError> {
        let (width, height) = size;
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };

        let scene = Scene::with_options(&options.display, &options.lighting);
        let perspective = Camera {
            projection: ProjectionKind::Perspective,
            ..Camera::from_options(&options.camera, aspect)
        };
        let orthographic = Camera {
            projection: ProjectionKind::Orthographic,
            ..perspective.clone()
        };
        let mut controls = TrackballControls::new(options.controls.clone());
        controls.handle_resize(width, height);
        renderer.set_size(width, height);

        let mut viewer = Self {
            renderer,
            scene,
            perspective,
            orthographic,
            active: options.camera.projection,
            controls,
            representations: FxHashMap::default(),
            options,
            size,
            cursor: Vec2::ZERO,
        };
        viewer.render()?;
        Ok(viewer)
    }

    // -- Representations --

    /// Attach a representation to the scene under `id`.
    pub fn add_representation(
        &mut self,
        representation: Box<dyn Representation>,
        id: &str,
    ) -> Result<(), ChemviewError> {
        if self.representations.contains_key(id) {
            return Err(ChemviewError::DuplicateRepresentation(id.to_owned()));
        }
        representation.add_to_scene(&mut self.scene);
        log::debug!("added {} representation '{id}'", representation.kind());
        let _ = self.representations.insert(id.to_owned(), representation);
        Ok(())
    }

    /// Representation registered under `id`.
    #[must_use]
    pub fn get_representation(&self, id: &str) -> Option<&dyn Representation> {
        let representation = self.representations.get(id)?;
        Some(representation.as_ref())
    }

    /// Mutable representation registered under `id`.
    pub fn get_representation_mut(&mut self, id: &str) -> Option<&mut dyn Representation> {
        let representation = self.representations.get_mut(id)?;
        Some(representation.as_mut())
    }

    /// Forward partial data to the representation under `id`.
    pub fn update_representation(
        &mut self,
        id: &str,
        update: &RepresentationUpdate,
    ) -> Result<(), ChemviewError> {
        self.representations
            .get_mut(id)
            .ok_or_else(|| ChemviewError::UnknownRepresentation(id.to_owned()))?
            .update(update)
    }

    /// Detach the representation under `id` and hand it back.
    pub fn remove_representation(
        &mut self,
        id: &str,
    ) -> Result<Box<dyn Representation>, ChemviewError> {
        let representation = self
            .representations
            .remove(id)
            .ok_or_else(|| ChemviewError::UnknownRepresentation(id.to_owned()))?;
        representation.remove_from_scene(&mut self.scene);
        log::debug!("removed {} representation '{id}'", representation.kind());
        Ok(representation)
    }

    /// Registered ids, sorted.
    #[must_use]
    pub fn representation_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.representations.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    // -- Frames --

    /// Draw the scene with the active camera.
    pub fn render(&mut self) -> Result<(), ChemviewError> {
        if self.controls.screen().is_empty() {
            self.controls.handle_resize(self.size.0, self.size.1);
        }
        self.scene.prune();
        let camera = match self.active {
            ProjectionKind::Perspective => &self.perspective,
            ProjectionKind::Orthographic => &self.orthographic,
        };
        self.renderer.render(&self.scene, camera)
    }

    /// One frame tick: advance the controls and redraw if the camera moved.
    /// Returns whether a frame was drawn.
    pub fn animate(&mut self) -> Result<bool, ChemviewError> {
        let (controls, camera) = self.controls_and_camera();
        let changed = controls.update(camera);
        if changed {
            self.render()?;
        }
        Ok(changed)
    }

    /// Frame `coordinates`: their centroid becomes the orbit target and the
    /// camera backs off along its current viewing direction until the
    /// bounding sphere fits the vertical field of view.
    pub fn zoom_into(&mut self, coordinates: &[f32]) -> Result<(), ChemviewError> {
        let points = points_from_flat(coordinates);
        let Some(center) = centroid(&points) else {
            return Ok(());
        };
        let radius = bounding_radius(&points, center);
        let fallback = Vec3::from(self.options.camera.position).normalize_or(Vec3::NEG_Z);

        let (controls, camera) = self.controls_and_camera();
        let distance = (radius + camera.znear) / (camera.fovy.to_radians() / 2.0).tan();
        let direction = (camera.eye - camera.target).normalize_or(fallback);
        camera.target = center;
        camera.eye = center + direction * distance;
        log::debug!("zoom: center {center}, radius {radius:.2}, distance {distance:.2}");

        if controls.update(camera) {
            self.render()?;
        }
        Ok(())
    }

    /// Track a new surface size and draw exactly one frame at it.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ChemviewError> {
        self.size = (width, height);
        self.renderer.set_size(width, height);
        self.controls.handle_resize(width, height);
        self.perspective.set_viewport(width, height);
        self.orthographic.set_viewport(width, height);
        self.render()
    }

    // -- Cameras --

    /// Switch between perspective and orthographic. The newly active
    /// camera takes over the pose of the old one.
    pub fn set_projection(&mut self, kind: ProjectionKind) -> Result<(), ChemviewError> {
        if kind == self.active {
            return Ok(());
        }
        self.switch_camera(kind);
        self.render()
    }

    fn switch_camera(&mut self, kind: ProjectionKind) {
        let (from, to) = match kind {
            ProjectionKind::Perspective => (&self.orthographic, &mut self.perspective),
            ProjectionKind::Orthographic => (&self.perspective, &mut self.orthographic),
        };
        to.eye = from.eye;
        to.target = from.target;
        to.up = from.up;
        self.active = kind;
    }

    /// Active projection.
    #[must_use]
    pub fn projection(&self) -> ProjectionKind {
        self.active
    }

    /// Active camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        match self.active {
            ProjectionKind::Perspective => &self.perspective,
            ProjectionKind::Orthographic => &self.orthographic,
        }
    }

    fn controls_and_camera(&mut self) -> (&mut TrackballControls, &mut Camera) {
        let camera = match self.active {
            ProjectionKind::Perspective => &mut self.perspective,
            ProjectionKind::Orthographic => &mut self.orthographic,
        };
        (&mut self.controls, camera)
    }

    // -- Input & options --

    /// Forward a pointer, wheel or key event to the trackball controls.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::CursorMoved { x, y } = event {
            self.cursor = Vec2::new(*x, *y);
        }
        let cursor = self.cursor;
        let (controls, camera) = self.controls_and_camera();
        match event {
            InputEvent::CursorMoved { x, y } => controls.pointer_move(camera, *x, *y),
            InputEvent::MouseButton { button, pressed } => {
                if *pressed {
                    controls.pointer_down(camera, *button, cursor.x, cursor.y);
                } else {
                    controls.pointer_up();
                }
            }
            InputEvent::Scroll { delta } => controls.wheel(*delta),
            InputEvent::Key { code, pressed } => {
                if *pressed {
                    controls.key_down(code);
                } else {
                    controls.key_up(code);
                }
            }
        }
    }

    /// Re-apply lighting, fog, background, camera and control settings.
    /// Camera poses are kept.
    pub fn apply_options(&mut self, options: Options) -> Result<(), ChemviewError> {
        self.scene.configure(&options.display, &options.lighting);
        self.controls.apply_options(options.controls.clone());
        for camera in [&mut self.perspective, &mut self.orthographic] {
            camera.fovy = options.camera.fovy;
            camera.znear = options.camera.znear;
            camera.zfar = options.camera.zfar;
        }
        if options.camera.projection != self.active {
            self.switch_camera(options.camera.projection);
        }
        self.options = options;
        self.render()
    }

    // -- Accessors --

    /// Options the viewer was built or last reconfigured with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene being drawn.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Trackball controls.
    #[must_use]
    pub fn controls(&self) -> &TrackballControls {
        &self.controls
    }

    /// Current surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The backend.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable backend access.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
