//! Artifact emitter: renders a [`StencilDefinition`] as the source text the
//! downstream stencil library `include!`s.
//!
//! Layout (byte-exact; no header, no trailing newline):
//!
//! ```text
//! Stencil::new(
//! [[2],[-3],],
//! |args: &[f32; 2]| {
//! args[0] * 0.4f32 + args[1] * 0.6f32 + 0.0
//! })
//! ```
//!
//! The consumer resolves weights by argument *position*, so the k-th offset
//! literal and `args[k]` are always emitted from the same entry.

use std::fmt;

use crate::types::StencilDefinition;

/// Constructor path invoked by the artifact.
pub const CONSTRUCTOR: &str = "Stencil::new";

/// Scalar type of the closure arguments and weight literals.
pub const SCALAR: &str = "f32";

/// Render the full artifact text.
#[must_use]
pub fn render_artifact(def: &StencilDefinition) -> String {
    let mut out = String::with_capacity(64 + def.len() * 32);
    // Writing into a String cannot fail.
    let _ = write_artifact(&mut out, def);
    out
}

/// Stream the artifact text into any `fmt::Write` sink.
pub fn write_artifact<W: fmt::Write>(w: &mut W, def: &StencilDefinition) -> fmt::Result {
    writeln!(w, "{CONSTRUCTOR}(")?;

    w.write_char('[')?;
    for off in def.offsets() {
        write!(w, "{off},")?;
    }
    w.write_str("],\n")?;

    writeln!(w, "|args: &[{SCALAR}; {}]| {{", def.len())?;
    for (i, weight) in def.weights().enumerate() {
        write!(w, "args[{i}] * {}{SCALAR} + ", format_weight(weight))?;
    }
    w.write_str("0.0\n})")
}

/// Shortest round-trip decimal for `weight`, always carrying a decimal point
/// so the literal reads as a float (`1.0f32`, not `1f32`).
#[must_use]
pub fn format_weight(weight: f32) -> String {
    let mut s = weight.to_string();
    if !s.contains(['.', 'e', 'E', 'N', 'n']) {
        s.push_str(".0");
    }
    s
}
