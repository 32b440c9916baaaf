//! Seeded random stencil generation.
//!
//! This crate provides the randomized half of stencilgen:
//!
//! - `rng`: per-run `StdRng` construction and seed resolution.
//! - `sampler`: bounded accept/reject sampling of distinct offsets.
//! - `partition`: exact unit-budget weight partitioning.
//! - `generator`: the pipeline tying the three together.
//!
//! There is no global RNG state: every entry point either takes a generator
//! explicitly or builds one from a seed it reports back.
//!
//! We intentionally avoid broad re-exports so callers use stable paths like
//! `stencilgen_sample::generator::generate_definition`.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::missing_errors_doc)]

/// End-to-end generation pipeline.
pub mod generator;
/// Unit-budget weight partitioning.
pub mod partition;
/// Seeded generator construction.
pub mod rng;
/// Distinct offset sampling.
pub mod sampler;
