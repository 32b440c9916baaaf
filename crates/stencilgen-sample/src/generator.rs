// crates/stencilgen-sample/src/generator.rs

//! End-to-end generation: validate → sample offsets → partition weights →
//! assemble a validated [`StencilDefinition`].
//!
//! Nothing is written here; callers persist the result only after it has
//! been fully built and validated in memory.

use rand::Rng;
use stencilgen_core::{GenParams, Result, StencilDefinition};
use tracing::info;

use crate::partition::partition_weights;
use crate::rng::seeded_rng;
use crate::sampler::OffsetSampler;

/// Outcome of one run.
#[derive(Clone, Debug, PartialEq)]
pub struct Generated {
    /// Seed actually used (so the run can be replayed).
    pub seed: u64,
    /// The definition.
    pub definition: StencilDefinition,
}

/// Run the pipeline with a generator seeded from `params.seed` (or entropy).
pub fn generate_definition(params: &GenParams) -> Result<Generated> {
    let (mut rng, seed) = seeded_rng(params.seed);
    info!(
        seed,
        dimension = params.dimension,
        max_count = params.max_count,
        max_distance = params.max_distance,
        "generating stencil definition"
    );
    let definition = generate_with_rng(params, &mut rng)?;
    Ok(Generated { seed, definition })
}

/// Run the pipeline against a caller-owned generator.
///
/// `params.seed` is ignored here; the caller's `rng` state is authoritative.
pub fn generate_with_rng<R: Rng + ?Sized>(
    params: &GenParams,
    rng: &mut R,
) -> Result<StencilDefinition> {
    let sampler = OffsetSampler::new(params)?;

    let count = match params.count {
        Some(n) => n,
        None => OffsetSampler::draw_count(rng, params.max_count),
    };
    info!(count, capacity = %sampler.capacity(), "sampling offsets");

    let offsets = sampler.sample(rng, count)?;
    let weights = partition_weights(rng, offsets.len());
    StencilDefinition::from_parts(offsets, weights)
}
