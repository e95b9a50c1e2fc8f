//! Serializable descriptions of representations and whole scenes.
//!
//! Hosts that cannot call constructors directly (the browser bridge and
//! the standalone window) describe what to draw as JSON:
//!
//! ```json
//! {
//!   "representations": [
//!     { "id": "atoms", "type": "points", "coordinates": [0, 0, 0, 1, 0, 0],
//!       "bonds": [[0, 1]] },
//!     { "id": "cell", "type": "box", "start": [0, 0, 0], "end": [1, 1, 1] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BoxRepresentation, CylinderRepresentation, PointLineRepresentation, Representation,
    SmoothLineRepresentation, SmoothTubeRepresentation, SphereRepresentation,
    SurfaceRepresentation,
};
use crate::error::ChemviewError;
use crate::options::RepresentationOptions;
use crate::viewer::{SceneRenderer, Viewer};

/// How a surface is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceStyle {
    /// Shaded faces.
    Solid,
    /// Triangle edges only.
    #[default]
    Wireframe,
}

/// Constructor arguments for every representation variant, tagged by
/// `"type"`. Omitted optional fields take the configured defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RepresentationSpec {
    /// Point sprites with optional bonds.
    Points {
        /// Flattened coordinates.
        coordinates: Vec<f32>,
        /// Index pairs to connect.
        bonds: Option<Vec<[u32; 2]>>,
        /// Packed colors, one per point.
        colors: Option<Vec<u32>>,
        /// Sizes, one per point.
        sizes: Option<Vec<f32>>,
    },
    /// Triangle surface.
    Surface {
        /// Flattened vertex positions.
        vertices: Vec<f32>,
        /// Flattened triangle indices.
        faces: Vec<u32>,
        /// Drawing style.
        #[serde(default)]
        style: SurfaceStyle,
    },
    /// Spheres at each coordinate.
    Spheres {
        /// Flattened centres.
        coordinates: Vec<f32>,
        /// Radius per centre.
        radii: Option<Vec<f32>>,
        /// Template sphere resolution.
        resolution: Option<u32>,
    },
    /// Axis-aligned box outline.
    Box {
        /// First corner.
        start: [f32; 3],
        /// Opposite corner.
        end: [f32; 3],
        /// Packed edge color.
        color: Option<u32>,
    },
    /// Smooth polyline.
    SmoothLine {
        /// Flattened control points.
        coordinates: Vec<f32>,
        /// Packed colors; the first one is used.
        colors: Option<Vec<u32>>,
        /// Samples per control point.
        resolution: Option<u32>,
    },
    /// Smooth tube.
    SmoothTube {
        /// Flattened control points.
        coordinates: Vec<f32>,
        /// Tube radius.
        radius: f32,
        /// Packed colors; the first one is used.
        colors: Option<Vec<u32>>,
        /// Samples per control point.
        resolution: Option<u32>,
    },
    /// Capped cylinder.
    Cylinder {
        /// Bottom cap centre.
        start: [f32; 3],
        /// Top cap centre.
        end: [f32; 3],
        /// Radius.
        radius: f32,
        /// Packed color.
        color: Option<u32>,
    },
}

impl RepresentationSpec {
    /// Parse a single spec from JSON.
    pub fn from_json(json: &str) -> Result<Self, ChemviewError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Construct the representation this spec describes.
    #[must_use]
    pub fn build(&self, options: &RepresentationOptions) -> Box<dyn Representation> {
        match self {
            Self::Points {
                coordinates,
                bonds,
                colors,
                sizes,
            } => Box::new(PointLineRepresentation::new(
                coordinates,
                bonds.as_deref(),
                colors.as_deref(),
                sizes.as_deref(),
                options,
            )),
            Self::Surface {
                vertices,
                faces,
                style,
            } => Box::new(SurfaceRepresentation::new(vertices, faces, *style, options)),
            Self::Spheres {
                coordinates,
                radii,
                resolution,
            } => Box::new(SphereRepresentation::new(
                coordinates,
                radii.as_deref(),
                *resolution,
                options,
            )),
            Self::Box { start, end, color } => {
                Box::new(BoxRepresentation::new(*start, *end, *color, options))
            }
            Self::SmoothLine {
                coordinates,
                colors,
                resolution,
            } => Box::new(SmoothLineRepresentation::new(
                coordinates,
                colors.as_deref(),
                *resolution,
                options,
            )),
            Self::SmoothTube {
                coordinates,
                radius,
                colors,
                resolution,
            } => Box::new(SmoothTubeRepresentation::new(
                coordinates,
                *radius,
                colors.as_deref(),
                *resolution,
                options,
            )),
            Self::Cylinder {
                start,
                end,
                radius,
                color,
            } => Box::new(CylinderRepresentation::new(
                *start, *end, *radius, *color, options,
            )),
        }
    }

    /// Flattened coordinates that bound this representation.
    #[must_use]
    pub fn extent(&self) -> Vec<f32> {
        match self {
            Self::Points { coordinates, .. }
            | Self::Spheres { coordinates, .. }
            | Self::SmoothLine { coordinates, .. }
            | Self::SmoothTube { coordinates, .. } => coordinates.clone(),
            Self::Surface { vertices, .. } => vertices.clone(),
            Self::Box { start, end, .. } | Self::Cylinder { start, end, .. } => {
                start.iter().chain(end).copied().collect()
            }
        }
    }
}

/// A representation spec with the id it is registered under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Registry key.
    pub id: String,
    /// What to build.
    #[serde(flatten)]
    pub spec: RepresentationSpec,
}

/// Everything the standalone viewer needs to show a scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Representations in registration order.
    pub representations: Vec<SceneEntry>,
    /// Flattened coordinates to frame. When absent the camera frames
    /// every representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_into: Option<Vec<f32>>,
}

impl SceneDescription {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> Result<Self, ChemviewError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, ChemviewError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Coordinates the camera should frame.
    #[must_use]
    pub fn framing(&self) -> Vec<f32> {
        match &self.zoom_into {
            Some(coordinates) => coordinates.clone(),
            None => self
                .representations
                .iter()
                .flat_map(|entry| entry.spec.extent())
                .collect(),
        }
    }

    /// Build every representation into `viewer` and frame the result.
    ///
    /// Stops at the first id collision; earlier entries stay registered.
    pub fn populate<R: SceneRenderer>(&self, viewer: &mut Viewer<R>) -> Result<(), ChemviewError> {
        for entry in &self.representations {
            let representation = entry.spec.build(&viewer.options().representations);
            viewer.add_representation(representation, &entry.id)?;
        }
        log::info!("loaded {} representations", self.representations.len());
        viewer.zoom_into(&self.framing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representation::RepresentationKind;

    const SCENE: &str = r#"{
        "representations": [
            {"id": "atoms", "type": "points",
             "coordinates": [0, 0, 0, 1, 0, 0], "bonds": [[0, 1]]},
            {"id": "surf", "type": "surface",
             "vertices": [0, 0, 0, 1, 0, 0, 0, 1, 0], "faces": [0, 1, 2],
             "style": "solid"},
            {"id": "cell", "type": "box", "start": [0, 0, 0], "end": [2, 2, 2]},
            {"id": "trace", "type": "smooth_tube",
             "coordinates": [0, 0, 0, 1, 1, 1], "radius": 0.2},
            {"id": "axis", "type": "cylinder",
             "start": [0, 0, 0], "end": [0, 0, 1], "radius": 0.1, "color": 255}
        ]
    }"#;

    #[test]
    fn parses_tagged_entries() {
        let scene = SceneDescription::from_json(SCENE).unwrap();
        assert_eq!(scene.representations.len(), 5);
        assert_eq!(scene.representations[0].id, "atoms");
        assert!(matches!(
            &scene.representations[1].spec,
            RepresentationSpec::Surface {
                style: SurfaceStyle::Solid,
                ..
            }
        ));
        let kinds: Vec<_> = scene
            .representations
            .iter()
            .map(|e| e.spec.build(&RepresentationOptions::default()).kind())
            .collect();
        assert_eq!(
            kinds,
            [
                RepresentationKind::Points,
                RepresentationKind::Surface,
                RepresentationKind::Box,
                RepresentationKind::SmoothTube,
                RepresentationKind::Cylinder,
            ]
        );
    }

    #[test]
    fn surface_style_defaults_to_wireframe() {
        let spec =
            RepresentationSpec::from_json(r#"{"type": "surface", "vertices": [], "faces": []}"#)
                .unwrap();
        assert!(matches!(
            spec,
            RepresentationSpec::Surface {
                style: SurfaceStyle::Wireframe,
                ..
            }
        ));
    }

    #[test]
    fn unknown_type_is_parse_error() {
        let err = RepresentationSpec::from_json(r#"{"type": "ribbon"}"#).unwrap_err();
        assert!(matches!(err, ChemviewError::SceneParse(_)));
    }

    #[test]
    fn framing_falls_back_to_all_extents() {
        let scene = SceneDescription::from_json(SCENE).unwrap();
        // 6 + 9 + 6 + 6 + 6 floats.
        assert_eq!(scene.framing().len(), 33);

        let explicit = SceneDescription {
            zoom_into: Some(vec![1.0, 2.0, 3.0]),
            ..scene
        };
        assert_eq!(explicit.framing(), [1.0, 2.0, 3.0]);
    }
}
