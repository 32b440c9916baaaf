// crates/stencilgen-cli/src/profile.rs

//! TOML run profiles.
//!
//! ```toml
//! [params]
//! dimension = 2
//! max_count = 20
//! max_distance = 20
//! seed = 7
//!
//! [output]
//! artifact = "stencils/gen_2d.stencil"
//! definition = "stencils/gen_2d.json"
//! ```
//!
//! Every key is optional; command-line flags override profile values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stencilgen_core::GenParams;

/// Parsed profile file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    /// Generation parameters.
    pub params: GenParams,
    /// Destinations.
    pub output: OutputSection,
}

/// `[output]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Artifact path.
    pub artifact: Option<PathBuf>,
    /// Optional JSON sidecar path.
    pub definition: Option<PathBuf>,
}

impl Profile {
    /// Load a profile from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("read profile {}", path.display()))?;
        toml::from_str(&src).with_context(|| format!("parse profile {}", path.display()))
    }
}

/// Artifact path used when neither a flag nor the profile names one.
#[must_use]
pub fn default_artifact_path(dimension: usize) -> PathBuf {
    PathBuf::from(format!("gen_{dimension}d.stencil"))
}
