//! Centralized viewer options with TOML preset support.
//!
//! Everything a viewer needs up front (camera placement, trackball
//! tuning, lights, fog, per-representation defaults) lives here so that a
//! [`Viewer`](crate::viewer::Viewer) is configured explicitly at
//! construction. Options serialize to/from TOML for view presets.

mod camera;
mod controls;
mod display;
mod lighting;
mod representations;

use std::path::Path;

pub use camera::CameraOptions;
pub use controls::ControlsOptions;
pub use display::DisplayOptions;
pub use lighting::LightingOptions;
pub use representations::RepresentationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ChemviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera placement and projection.
    pub camera: CameraOptions,
    /// Trackball controller tuning.
    pub controls: ControlsOptions,
    /// Directional and ambient light.
    pub lighting: LightingOptions,
    /// Background and fog.
    pub display: DisplayOptions,
    /// Defaults applied when a representation omits optional inputs.
    #[schemars(skip)]
    pub representations: RepresentationOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, ChemviewError> {
        toml::from_str(content)
            .map_err(|e| ChemviewError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChemviewError> {
        let content =
            std::fs::read_to_string(path).map_err(ChemviewError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChemviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChemviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChemviewError::Io)?;
        }
        std::fs::write(path, content).map_err(ChemviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::ProjectionKind;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
fovy = 35.0
projection = 'orthographic'

[controls]
static_moving = true
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 35.0);
        assert_eq!(opts.camera.projection, ProjectionKind::Orthographic);
        assert!(opts.controls.static_moving);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 1.0);
        assert_eq!(opts.controls.dynamic_damping_factor, 0.2);
        assert_eq!(opts.representations.point_size, 0.15);
    }

    #[test]
    fn malformed_toml_is_reported() {
        let err = Options::from_toml("[camera]\nfovy = 'wide'").unwrap_err();
        assert!(matches!(err, ChemviewError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("chemview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.display.background = 0x10_20_30;
        opts.save(&dir.join("dark.toml")).unwrap();
        Options::default().save(&dir.join("plain.toml")).unwrap();

        let loaded = Options::load(&dir.join("dark.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["dark", "plain"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("controls"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("display"));

        // Representation defaults are not exposed in the UI
        assert!(!props.contains_key("representations"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("position").is_none());
    }
}
