//! Crate-level error types.

use std::fmt;

use crate::{
    gpu::render_context::RenderContextError,
    representation::{RepresentationKind, UpdateField},
};

/// Errors produced by the chemview crate.
#[derive(Debug)]
pub enum ChemviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Swapchain frame acquisition failed.
    Surface(wgpu::SurfaceError),
    /// WGSL composition failed.
    Shader(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Representation spec or scene description could not be parsed.
    SceneParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// A representation is already registered under this id.
    DuplicateRepresentation(String),
    /// No representation is registered under this id.
    UnknownRepresentation(String),
    /// The representation does not accept this update field.
    UnsupportedUpdate {
        /// Variant that rejected the update.
        kind: RepresentationKind,
        /// First offending field.
        field: UpdateField,
    },
}

impl fmt::Display for ChemviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Surface(e) => write!(f, "surface error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::SceneParse(msg) => write!(f, "scene parse error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::DuplicateRepresentation(id) => {
                write!(f, "representation '{id}' is already registered")
            }
            Self::UnknownRepresentation(id) => {
                write!(f, "no representation registered as '{id}'")
            }
            Self::UnsupportedUpdate { kind, field } => {
                write!(f, "{kind} representation does not support updating {field}")
            }
        }
    }
}

impl std::error::Error for ChemviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for ChemviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<wgpu::SurfaceError> for ChemviewError {
    fn from(e: wgpu::SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<std::io::Error> for ChemviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ChemviewError {
    fn from(e: serde_json::Error) -> Self {
        Self::SceneParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_update_names_kind_and_field() {
        let err = ChemviewError::UnsupportedUpdate {
            kind: RepresentationKind::Spheres,
            field: UpdateField::Coordinates,
        };
        assert_eq!(
            err.to_string(),
            "spheres representation does not support updating coordinates"
        );
    }

    #[test]
    fn json_errors_become_scene_parse() {
        let Err(e) = serde_json::from_str::<u32>("not json") else {
            unreachable!("input is not JSON");
        };
        assert!(matches!(
            ChemviewError::from(e),
            ChemviewError::SceneParse(_)
        ));
    }
}
