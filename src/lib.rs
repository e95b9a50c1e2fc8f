// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! wgpu viewer for chemical structures built from raw numeric arrays.
//!
//! Chemview turns flattened coordinate, bond, face, radius and color arrays
//! into renderable geometry (point clouds with bonds, surfaces, sphere sets,
//! boxes, smooth lines and tubes, cylinders) and draws them in a scene with
//! a trackball-controlled camera.
//!
//! # Key entry points
//!
//! - [`viewer::Viewer`] - owns the scene, the camera pair, the trackball
//!   controls and the representation registry
//! - [`representation::Representation`] - the contract every
//!   representation variant implements
//! - [`representation::RepresentationSpec`] - JSON description of a
//!   representation, for hosts that only speak serialized data
//! - [`options::Options`] - runtime configuration (camera, controls,
//!   lighting, display, representation defaults)
//! - [`gpu::GpuRenderer`] - the wgpu backend behind
//!   [`viewer::SceneRenderer`]
//!
//! # Architecture
//!
//! Everything runs on one thread. Representations own their renderables
//! through `Rc<RefCell<_>>`; the [`scene::Scene`] only holds weak
//! references, so detaching a representation never frees its geometry.
//! The GPU backend caches buffers per renderable and re-uploads when a
//! renderable's revision changes.

pub mod camera;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod options;
pub mod representation;
pub mod scene;
pub mod util;
pub mod viewer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;
#[cfg(feature = "viewer")]
pub mod window;

pub use error::ChemviewError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use representation::{
    Representation, RepresentationKind, RepresentationSpec,
    RepresentationUpdate,
};
pub use viewer::{SceneRenderer, Viewer};
#[cfg(feature = "viewer")]
pub use window::ViewerWindow;
