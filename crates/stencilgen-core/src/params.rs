//! Generation parameters and their up-front validation.
//!
//! Defaults reproduce the historical generator: up to 19 offsets, each
//! coordinate drawn from `[-20, 20)`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Default exclusive upper bound on the number of offsets.
pub const DEFAULT_MAX_COUNT: usize = 20;
/// Default exclusive bound on each coordinate's absolute value.
pub const DEFAULT_MAX_DISTANCE: i32 = 20;
/// Default ceiling on consecutive rejected draws for a single offset.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000;
/// Largest accepted `max_count`. Bounds `N` and therefore every buffer sized
/// from it.
pub const MAX_COUNT_LIMIT: usize = 1 << 16;

/// Knobs for one generation run.
///
/// All fields have defaults so partial TOML profiles deserialize cleanly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenParams {
    /// Components per offset (`D >= 1`).
    pub dimension: usize,
    /// Exclusive upper bound on `N`; `N` is drawn from `[1, max_count)`.
    pub max_count: usize,
    /// Coordinates are drawn from `[-max_distance, max_distance)`.
    pub max_distance: i32,
    /// Fix `N` instead of drawing it. Must still satisfy `1 <= N < max_count`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Seed for reproducible runs; `None` draws one from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Consecutive rejected candidates tolerated before `SpaceExhausted`.
    pub max_attempts: u64,
}

impl Default for GenParams {
    fn default() -> Self {
        Self {
            dimension: 1,
            max_count: DEFAULT_MAX_COUNT,
            max_distance: DEFAULT_MAX_DISTANCE,
            count: None,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GenParams {
    /// Defaults with the given dimensionality.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::default()
        }
    }

    /// Reject out-of-range parameters before any randomness is consumed.
    ///
    /// The sampler constructor in `stencilgen-sample` is the one call site on
    /// the generation path.
    pub fn validate(&self) -> Result<()> {
        if self.dimension < 1 {
            return Err(StencilError::invalid_param("dimension", "must be >= 1"));
        }
        if self.max_count < 2 {
            return Err(StencilError::invalid_param(
                "max_count",
                format!(
                    "must be >= 2 so that [1, max_count) is non-empty (got {})",
                    self.max_count
                ),
            ));
        }
        if self.max_count > MAX_COUNT_LIMIT {
            return Err(StencilError::invalid_param(
                "max_count",
                format!("must be <= {MAX_COUNT_LIMIT} (got {})", self.max_count),
            ));
        }
        if self.max_distance < 1 {
            return Err(StencilError::invalid_param(
                "max_distance",
                format!("must be >= 1 (got {})", self.max_distance),
            ));
        }
        if let Some(n) = self.count {
            if n == 0 || n >= self.max_count {
                return Err(StencilError::invalid_param(
                    "count",
                    format!("must lie in [1, {}) (got {n})", self.max_count),
                ));
            }
        }
        if self.max_attempts == 0 {
            return Err(StencilError::invalid_param("max_attempts", "must be >= 1"));
        }
        Ok(())
    }

    /// Number of distinct offsets the coordinate space can hold.
    #[must_use]
    pub fn capacity(&self) -> u128 {
        capacity(self.dimension, self.max_distance)
    }
}

/// `(2 * max_distance)^dimension`, saturating at `u128::MAX`.
///
/// Returns `0` for a non-positive `max_distance`.
#[must_use]
pub fn capacity(dimension: usize, max_distance: i32) -> u128 {
    let Ok(side) = u128::try_from(max_distance) else {
        return 0;
    };
    let side = side * 2;
    let Ok(exp) = u32::try_from(dimension) else {
        return if side <= 1 { side } else { u128::MAX };
    };
    side.checked_pow(exp).unwrap_or(u128::MAX)
}
