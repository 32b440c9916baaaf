// crates/stencilgen-sample/src/sampler.rs

//! Offset sampler: draws `N` and then `N` distinct offsets of dimension `D`.
//!
//! Candidates are `D` independent uniform integers in
//! `[-max_distance, max_distance)`; a candidate already present is rejected
//! and redrawn. Rejections are capped per offset so a request close to the
//! size of the coordinate space fails with `SpaceExhausted` instead of
//! spinning forever.

use std::collections::HashSet;

use rand::Rng;
use stencilgen_core::{capacity, GenParams, Offset, Result, StencilError};
use tracing::{debug, trace};

/// Bounded accept/reject sampler over the integer lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetSampler {
    dimension: usize,
    max_distance: i32,
    max_attempts: u64,
}

impl OffsetSampler {
    /// Sampler for `params`, after [`GenParams::validate`].
    ///
    /// This is the only validation on the generation path.
    pub fn new(params: &GenParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            dimension: params.dimension,
            max_distance: params.max_distance,
            max_attempts: params.max_attempts,
        })
    }

    /// Number of distinct offsets available.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u128 {
        capacity(self.dimension, self.max_distance)
    }

    /// Draw `N` uniformly from `[1, max_count)`.
    ///
    /// # Panics
    /// Panics if `max_count < 2`; [`GenParams::validate`] rules that out.
    pub fn draw_count<R: Rng + ?Sized>(rng: &mut R, max_count: usize) -> usize {
        rng.random_range(1..max_count)
    }

    /// One candidate offset.
    pub fn draw_offset<R: Rng + ?Sized>(&self, rng: &mut R) -> Offset {
        let d = self.max_distance;
        Offset::new(
            (0..self.dimension)
                .map(|_| rng.random_range(-d..d))
                .collect(),
        )
    }

    /// Collect exactly `count` distinct offsets, in acceptance order.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<Offset>> {
        let capacity = self.capacity();
        if count as u128 > capacity {
            return Err(StencilError::SpaceExhausted {
                requested: count,
                accepted: 0,
                capacity,
                attempts: 0,
            });
        }

        let mut accepted = Vec::new();
        let mut seen = HashSet::new();

        while accepted.len() < count {
            let mut rejected = 0u64;
            let offset = loop {
                let candidate = self.draw_offset(rng);
                if !seen.contains(&candidate) {
                    break candidate;
                }
                trace!(offset = %candidate, "rejected duplicate offset");
                rejected += 1;
                if rejected >= self.max_attempts {
                    return Err(StencilError::SpaceExhausted {
                        requested: count,
                        accepted: accepted.len(),
                        capacity,
                        attempts: rejected,
                    });
                }
            };

            debug!(index = accepted.len(), offset = %offset, rejected, "accepted offset");
            seen.insert(offset.clone());
            accepted.push(offset);
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn params(dimension: usize, max_distance: i32) -> GenParams {
        GenParams {
            dimension,
            max_distance,
            ..GenParams::default()
        }
    }

    #[test]
    fn fills_a_tiny_space_exactly() {
        let s = OffsetSampler::new(&params(1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut got = s.sample(&mut rng, 2).unwrap();
        got.sort_by_key(|o| o.coords().to_vec());
        assert_eq!(got, vec![Offset::from([-1]), Offset::from([0])]);
    }

    #[test]
    fn over_capacity_fails_fast() {
        let s = OffsetSampler::new(&params(1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        match s.sample(&mut rng, 5) {
            Err(StencilError::SpaceExhausted {
                requested,
                capacity,
                ..
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(capacity, 2);
            }
            other => panic!("expected SpaceExhausted, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_parameters() {
        assert_eq!(
            OffsetSampler::new(&params(0, 5)).unwrap_err().kind(),
            "invalid_parameter"
        );
        assert_eq!(
            OffsetSampler::new(&params(1, 0)).unwrap_err().kind(),
            "invalid_parameter"
        );
    }

    #[test]
    fn oversized_max_count_is_rejected_before_sampling() {
        let p = GenParams {
            dimension: 3,
            max_distance: i32::MAX,
            max_count: usize::MAX,
            seed: Some(1),
            ..GenParams::default()
        };
        assert_eq!(OffsetSampler::new(&p).unwrap_err().kind(), "invalid_parameter");
    }

    #[test]
    fn draw_count_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let n = OffsetSampler::draw_count(&mut rng, 3);
            assert!((1..3).contains(&n));
        }
    }
}
