//! Render-side scene graph: a flat list of renderables plus lights, fog
//! and the clear color.
//!
//! The scene does not own its objects. Representations hold the strong
//! [`SharedRenderable`] handles and the scene keeps [`Weak`] references,
//! so dropping a representation can never leave a dangling draw.

mod light;
mod renderable;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use light::{Fog, Light};
pub use renderable::{Geometry, Material, PointCloud, Renderable, SharedRenderable};

use glam::Vec3;

use crate::options::{DisplayOptions, LightingOptions};
use crate::util::color::rgb;

/// Objects, lights and atmosphere the renderer draws each frame.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Weak<RefCell<Renderable>>>,
    lights: Vec<Light>,
    fog: Option<Fog>,
    background: [f32; 3],
}

impl Scene {
    /// Empty scene with no lights and a black background.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene lit and fogged according to the given options.
    #[must_use]
    pub fn with_options(display: &DisplayOptions, lighting: &LightingOptions) -> Self {
        let mut scene = Self::new();
        scene.configure(display, lighting);
        scene
    }

    /// Replace lights, fog and background from options.
    pub fn configure(&mut self, display: &DisplayOptions, lighting: &LightingOptions) {
        self.background = rgb(display.background);
        self.fog = display.fog.then(|| Fog {
            color: self.background,
            near: display.fog_near,
            far: display.fog_far,
        });
        self.lights = vec![
            Light::Directional {
                color: rgb(lighting.directional_color),
                intensity: lighting.directional_intensity,
                position: Vec3::from(lighting.directional_position),
            },
            Light::Ambient {
                color: rgb(lighting.ambient_color),
            },
        ];
    }

    /// Insert a renderable. Adding the same handle twice is a no-op.
    pub fn add(&mut self, object: &SharedRenderable) {
        if self.contains(object) {
            return;
        }
        self.objects.push(Rc::downgrade(object));
    }

    /// Remove a renderable; returns whether it was present.
    pub fn remove(&mut self, object: &SharedRenderable) -> bool {
        let before = self.objects.len();
        let target = Rc::downgrade(object);
        self.objects.retain(|weak| !weak.ptr_eq(&target));
        before != self.objects.len()
    }

    /// Whether the handle is currently in the scene.
    #[must_use]
    pub fn contains(&self, object: &SharedRenderable) -> bool {
        let target = Rc::downgrade(object);
        self.objects.iter().any(|weak| weak.ptr_eq(&target))
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.iter().filter(|weak| weak.strong_count() > 0).count()
    }

    /// Whether no live object remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = SharedRenderable> + '_ {
        self.objects.iter().filter_map(Weak::upgrade)
    }

    /// Drop references whose owners are gone.
    pub fn prune(&mut self) {
        self.objects.retain(|weak| weak.strong_count() > 0);
    }

    /// Active lights.
    #[must_use]
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Linear fog, if enabled.
    #[must_use]
    pub fn fog(&self) -> Option<Fog> {
        self.fog
    }

    /// Clear color.
    #[must_use]
    pub fn background(&self) -> [f32; 3] {
        self.background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> SharedRenderable {
        Renderable::new(
            Geometry::LineSegments(vec![Vec3::ZERO, Vec3::X]),
            Material::LineBasic { color: [1.0, 0.0, 0.0] },
        )
        .shared()
    }

    #[test]
    fn add_remove_contains() {
        let mut scene = Scene::new();
        let a = line();
        let b = line();
        scene.add(&a);
        scene.add(&a);
        scene.add(&b);
        assert_eq!(scene.len(), 2);
        assert!(scene.contains(&a));
        assert!(scene.remove(&a));
        assert!(!scene.remove(&a));
        assert!(!scene.contains(&a));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn dropped_owner_disappears() {
        let mut scene = Scene::new();
        let a = line();
        scene.add(&a);
        drop(a);
        assert!(scene.is_empty());
        assert_eq!(scene.objects().count(), 0);
        scene.prune();
        assert!(scene.objects.is_empty());
    }

    #[test]
    fn configure_from_options() {
        let mut display = DisplayOptions::default();
        display.background = 0xFF_00_00;
        let scene = Scene::with_options(&display, &LightingOptions::default());
        assert_eq!(scene.background(), [1.0, 0.0, 0.0]);
        let fog = scene.fog().unwrap();
        assert_eq!(fog.color, [1.0, 0.0, 0.0]);
        assert!((fog.far - 200.0).abs() < 1e-6);
        assert_eq!(scene.lights().len(), 2);

        display.fog = false;
        let scene = Scene::with_options(&display, &LightingOptions::default());
        assert!(scene.fog().is_none());
    }

    #[test]
    fn mutation_bumps_revision() {
        let r = line();
        let rev = r.borrow().revision();
        if let Geometry::LineSegments(v) = r.borrow_mut().geometry_mut() {
            v[1] = Vec3::Y;
        }
        assert!(r.borrow().revision() > rev);
    }
}
