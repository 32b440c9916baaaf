//! Error type shared by the stencilgen crates.
//!
//! Every failure the generator can report maps to exactly one variant so
//! callers (and tests) can branch on the kind instead of parsing messages.
//! The CLI wraps these in `anyhow` context at its boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the library crates.
pub type Result<T, E = StencilError> = std::result::Result<T, E>;

/// Canonical error for generation, emission, parsing, and I/O.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StencilError {
    /// A generation parameter is out of range. Raised before any sampling.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in `GenParams`.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The sampler could not collect `requested` distinct offsets.
    #[error(
        "offset space exhausted: accepted {accepted} of {requested} offsets \
         (coordinate space holds {capacity}, gave up after {attempts} draws)"
    )]
    SpaceExhausted {
        /// Number of distinct offsets asked for.
        requested: usize,
        /// Number accepted before giving up.
        accepted: usize,
        /// Size of the coordinate space, saturated at `u128::MAX`.
        capacity: u128,
        /// Candidate draws spent on the offset that failed.
        attempts: u64,
    },

    /// Reading or writing an artifact failed.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        /// Path that was being read or written.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact text could not be parsed.
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        /// 1-based line.
        line: usize,
        /// 1-based column.
        column: usize,
        /// Human readable description.
        message: String,
    },

    /// A definition violates one of its structural invariants.
    #[error("invalid stencil definition: {0}")]
    InvalidDefinition(String),

    /// JSON sidecar (de)serialization failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl StencilError {
    /// Stable machine readable tag for the variant.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::SpaceExhausted { .. } => "space_exhausted",
            Self::Io { .. } => "io",
            Self::Parse { .. } => "parse",
            Self::InvalidDefinition(_) => "invalid_definition",
            Self::Json(_) => "json",
        }
    }

    /// Shorthand for [`StencilError::InvalidParameter`].
    pub fn invalid_param(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`StencilError::Io`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
