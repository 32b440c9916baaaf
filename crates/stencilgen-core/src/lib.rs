//! stencilgen-core: stencil definition model, artifact emitter/parser, and I/O.
//!
//! This crate defines the **stable boundary** used across stencilgen crates:
//! - canonical data types (`Offset`, `WeightedOffset`, `StencilDefinition`),
//! - generation parameters and their validation (`GenParams`),
//! - the artifact emitter and the matching parser, and
//! - atomic file I/O for artifacts and JSON sidecars.
//!
//! Randomness lives in `stencilgen-sample`; nothing here draws numbers.
//!
//! ```
//! use stencilgen_core::{render_artifact, Offset, StencilDefinition};
//!
//! let def = StencilDefinition::from_parts(
//!     vec![Offset::from([2]), Offset::from([-3])],
//!     vec![0.4, 0.6],
//! )?;
//! assert!(render_artifact(&def).contains("args[1] * 0.6f32 + 0.0"));
//! # Ok::<(), stencilgen_core::StencilError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::expect_used))]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Artifact text rendering.
pub mod emit;
/// Error enum shared by all crates.
pub mod error;
/// Atomic artifact / JSON sidecar I/O.
pub mod io;
/// Generation parameters and validation.
pub mod params;
/// Artifact parser (inverse of `emit`).
pub mod parse;
/// Canonical stencil data types.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use emit::{format_weight, render_artifact, write_artifact, CONSTRUCTOR};
pub use error::{Result, StencilError};
pub use io::{
    read_artifact_file, read_record_json, write_artifact_file, write_record_json,
    DefinitionRecord,
};
pub use params::{capacity, GenParams, MAX_COUNT_LIMIT};
pub use parse::parse_artifact;
pub use types::*;
