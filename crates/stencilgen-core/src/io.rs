//! File helpers for artifacts and JSON definition sidecars.
//!
//! Writes are atomic: content goes to a temporary file in the destination
//! directory and is renamed into place only once fully flushed, so a failed
//! run never leaves a partial artifact behind.

use std::fs;
use std::io::{BufReader, ErrorKind, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::emit::render_artifact;
use crate::error::{Result, StencilError};
use crate::params::GenParams;
use crate::parse::parse_artifact;
use crate::types::StencilDefinition;

/// JSON sidecar: the definition plus what produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    /// Seed actually used (drawn from entropy if none was configured).
    pub seed: u64,
    /// Parameters of the run.
    pub params: GenParams,
    /// The generated definition.
    pub definition: StencilDefinition,
}

/// Ensure the parent directory for a file exists (no-op if none).
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir).map_err(|e| StencilError::io(dir, e))?;
        }
    }
    Ok(())
}

/// Write `bytes` to `path` via temp file + rename.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StencilError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StencilError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StencilError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    Ok(())
}

/// Render and atomically write the artifact for `def`.
///
/// The definition is re-validated first; nothing is written if it fails.
pub fn write_artifact_file<P: AsRef<Path>>(path: P, def: &StencilDefinition) -> Result<()> {
    def.validate()?;
    write_atomic(path, render_artifact(def).as_bytes())
}

/// Read and parse an artifact file.
pub fn read_artifact_file<P: AsRef<Path>>(path: P) -> Result<StencilDefinition> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => StencilError::Parse {
            line: 1,
            column: 1,
            message: "artifact is not valid UTF-8".into(),
        },
        _ => StencilError::io(path, e),
    })?;
    parse_artifact(&src)
}

/// Atomically write a pretty-printed JSON sidecar.
pub fn write_record_json<P: AsRef<Path>>(path: P, rec: &DefinitionRecord) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(rec)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Read a JSON sidecar and re-check the definition's invariants.
pub fn read_record_json<P: AsRef<Path>>(path: P) -> Result<DefinitionRecord> {
    let path = path.as_ref();
    let f = fs::File::open(path).map_err(|e| StencilError::io(path, e))?;
    let rec: DefinitionRecord = serde_json::from_reader(BufReader::new(f))?;
    rec.definition.validate()?;
    Ok(rec)
}
