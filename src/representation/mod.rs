//! Representations: adapters that turn numeric coordinate arrays into
//! renderables and keep them in sync with later data updates.
//!
//! Each variant owns its renderables. Adding it to a [`Scene`] only
//! registers weak references, so the representation stays the single
//! owner for its whole life.

mod box_outline;
mod cylinder;
mod point_line;
mod smooth_line;
mod smooth_tube;
mod spec;
mod sphere;
mod surface;

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use box_outline::BoxRepresentation;
pub use cylinder::CylinderRepresentation;
pub use point_line::PointLineRepresentation;
pub use smooth_line::SmoothLineRepresentation;
pub use smooth_tube::SmoothTubeRepresentation;
pub use spec::{RepresentationSpec, SceneDescription, SceneEntry, SurfaceStyle};
pub use sphere::SphereRepresentation;
pub use surface::SurfaceRepresentation;

use crate::error::ChemviewError;
use crate::scene::{Scene, SharedRenderable};

/// Which variant a representation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentationKind {
    /// Point sprites plus bond lines.
    Points,
    /// Triangle surface.
    Surface,
    /// Merged sphere mesh.
    Spheres,
    /// Axis-aligned box outline.
    Box,
    /// Smooth curve through points.
    SmoothLine,
    /// Tube swept along a smooth curve.
    SmoothTube,
    /// Single capped cylinder.
    Cylinder,
}

impl fmt::Display for RepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Points => "points",
            Self::Surface => "surface",
            Self::Spheres => "spheres",
            Self::Box => "box",
            Self::SmoothLine => "smooth_line",
            Self::SmoothTube => "smooth_tube",
            Self::Cylinder => "cylinder",
        };
        f.write_str(name)
    }
}

/// A field an update can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateField {
    /// New flattened coordinates.
    Coordinates,
    /// New per-point sizes.
    Sizes,
}

impl fmt::Display for UpdateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Coordinates => "coordinates",
            Self::Sizes => "sizes",
        })
    }
}

/// Partial data for [`Representation::update`]. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepresentationUpdate {
    /// Flattened `[x, y, z, ...]` coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f32>>,
    /// One size per point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<f32>>,
}

impl RepresentationUpdate {
    /// Update carrying new coordinates.
    #[must_use]
    pub fn coordinates(coordinates: impl Into<Vec<f32>>) -> Self {
        Self {
            coordinates: Some(coordinates.into()),
            ..Self::default()
        }
    }

    /// Add new sizes to the update.
    #[must_use]
    pub fn with_sizes(mut self, sizes: impl Into<Vec<f32>>) -> Self {
        self.sizes = Some(sizes.into());
        self
    }

    /// Parse an update from JSON.
    pub fn from_json(json: &str) -> Result<Self, ChemviewError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fields present in this update.
    pub fn fields(&self) -> impl Iterator<Item = UpdateField> {
        [
            self.coordinates.is_some().then_some(UpdateField::Coordinates),
            self.sizes.is_some().then_some(UpdateField::Sizes),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none()
    }
}

/// Fail on the first field `supported` does not list.
pub(crate) fn check_update(
    kind: RepresentationKind,
    supported: &[UpdateField],
    update: &RepresentationUpdate,
) -> Result<(), ChemviewError> {
    match update.fields().find(|field| !supported.contains(field)) {
        Some(field) => Err(ChemviewError::UnsupportedUpdate { kind, field }),
        None => Ok(()),
    }
}

/// A visual representation of numeric data.
pub trait Representation: Any {
    /// Which variant this is.
    fn kind(&self) -> RepresentationKind;

    /// Handles to every renderable this representation owns.
    fn renderables(&self) -> Vec<SharedRenderable>;

    /// Register all renderables with `scene`.
    fn add_to_scene(&self, scene: &mut Scene) {
        for renderable in self.renderables() {
            scene.add(&renderable);
        }
    }

    /// Unregister all renderables from `scene`.
    fn remove_from_scene(&self, scene: &mut Scene) {
        for renderable in self.renderables() {
            let _ = scene.remove(&renderable);
        }
    }

    /// Fields [`update`](Self::update) accepts.
    fn supported_updates(&self) -> &'static [UpdateField] {
        &[]
    }

    /// Apply partial data in place. Fields outside
    /// [`supported_updates`](Self::supported_updates) are rejected before
    /// anything changes.
    fn update(&mut self, update: &RepresentationUpdate) -> Result<(), ChemviewError> {
        check_update(self.kind(), self.supported_updates(), update)
    }

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_fields_in_order() {
        let update = RepresentationUpdate::coordinates(vec![0.0; 3]).with_sizes(vec![1.0]);
        let fields: Vec<_> = update.fields().collect();
        assert_eq!(fields, [UpdateField::Coordinates, UpdateField::Sizes]);
        assert!(RepresentationUpdate::default().is_empty());
    }

    #[test]
    fn update_from_json() {
        let update = RepresentationUpdate::from_json(r#"{"sizes": [0.5, 0.25]}"#).unwrap();
        assert_eq!(update.sizes.as_deref(), Some(&[0.5, 0.25][..]));
        assert!(update.coordinates.is_none());
        assert!(RepresentationUpdate::from_json(r#"{"colors": [1]}"#).is_err());
    }

    #[test]
    fn check_rejects_first_unsupported() {
        let update = RepresentationUpdate::coordinates(vec![0.0; 3]).with_sizes(vec![1.0]);
        let err = check_update(
            RepresentationKind::SmoothLine,
            &[UpdateField::Coordinates],
            &update,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ChemviewError::UnsupportedUpdate {
                kind: RepresentationKind::SmoothLine,
                field: UpdateField::Sizes,
            }
        ));
        assert!(check_update(RepresentationKind::Box, &[], &RepresentationUpdate::default()).is_ok());
    }

    #[test]
    fn kind_names() {
        assert_eq!(RepresentationKind::Spheres.to_string(), "spheres");
        assert_eq!(RepresentationKind::SmoothTube.to_string(), "smooth_tube");
    }
}
