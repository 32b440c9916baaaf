// crates/stencilgen-sample/src/partition.rs

//! Unit-budget weight partitioner.
//!
//! Walks the positions in order, keeping `consumed`:
//! - `remaining = 1 - consumed`
//! - the last position takes `remaining` outright,
//! - every other position draws uniformly from `[0, remaining]`.
//!
//! The total is exactly normalized with no renormalization pass. Earlier
//! positions draw from wider intervals, so the result is *not* uniform over
//! the simplex; existing corpora depend on this shape, keep it.

use rand::Rng;
use tracing::debug;

/// Partition the unit budget over `n` positions using `rng`.
pub fn partition_weights<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f32> {
    partition_with(n, |remaining| rng.random_range(0.0..=remaining))
}

/// Partition with an explicit draw: `draw(remaining)` must return a value in
/// `[0, remaining]`. It is not called for the final position.
pub fn partition_with<F>(n: usize, mut draw: F) -> Vec<f32>
where
    F: FnMut(f32) -> f32,
{
    let mut weights = Vec::new();
    let mut consumed = 0.0_f32;

    for i in 0..n {
        let remaining = (1.0 - consumed).max(0.0);
        let weight = if i + 1 == n {
            remaining
        } else {
            draw(remaining).clamp(0.0, remaining)
        };
        consumed += weight;
        debug!(index = i, weight, remaining, "assigned weight");
        weights.push(weight);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn last_position_absorbs_remainder() {
        let w = partition_with(2, |_| 0.4);
        assert_eq!(w, vec![0.4, 0.6]);
    }

    #[test]
    fn single_position_takes_everything() {
        assert_eq!(partition_with(1, |_| unreachable!()), vec![1.0]);
    }

    #[test]
    fn draws_see_the_shrinking_budget() {
        let mut seen = Vec::new();
        let w = partition_with(4, |remaining| {
            seen.push(remaining);
            remaining / 2.0
        });
        assert_eq!(seen, vec![1.0, 0.5, 0.25]);
        assert_eq!(w, vec![0.5, 0.25, 0.125, 0.125]);
    }

    #[test]
    fn out_of_range_draws_are_clamped() {
        let w = partition_with(3, |_| 2.0);
        assert_eq!(w, vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn seeded_partitions_are_normalized() {
        let mut rng = StdRng::seed_from_u64(99);
        for n in 1..40 {
            let w = partition_weights(&mut rng, n);
            assert_eq!(w.len(), n);
            assert!(w.iter().all(|x| (0.0..=1.0).contains(x)));
            let sum = w.iter().fold(0.0_f32, |a, x| a + x);
            assert!((sum - 1.0).abs() <= 1e-6, "n={n} sum={sum}");
        }
    }
}
