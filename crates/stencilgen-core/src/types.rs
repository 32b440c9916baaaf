//! Canonical stencil types shared across the workspace.
//!
//! A [`StencilDefinition`] is an *ordered* list of [`WeightedOffset`]s. The
//! order is load-bearing: the emitted closure refers to weights by argument
//! position, so position `i` in the offset list and `args[i]` must always
//! describe the same neighbor. Nothing here relies on map iteration order.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StencilError};

/// Allowed absolute deviation of the weight sum from `1.0`.
pub const WEIGHT_SUM_TOLERANCE: f32 = 1e-6;

/// Relative grid position: one signed component per axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Offset(Vec<i32>);

impl Offset {
    /// Wrap raw coordinates (no bounds check; the sampler enforces bounds).
    #[inline]
    #[must_use]
    pub fn new(coords: Vec<i32>) -> Self {
        Self(coords)
    }

    /// Number of axes `D`.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Coordinates in axis order.
    #[inline]
    #[must_use]
    pub fn coords(&self) -> &[i32] {
        &self.0
    }

    /// `true` if every component lies in `[-max_distance, max_distance)`.
    #[must_use]
    pub fn within(&self, max_distance: i32) -> bool {
        self.0.iter().all(|&c| c >= -max_distance && c < max_distance)
    }
}

impl From<Vec<i32>> for Offset {
    fn from(coords: Vec<i32>) -> Self {
        Self(coords)
    }
}

impl<const D: usize> From<[i32; D]> for Offset {
    fn from(coords: [i32; D]) -> Self {
        Self(coords.to_vec())
    }
}

/// Renders the coordinate-array literal, e.g. `[2]` or `[-4, 2]`.
impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str("]")
    }
}

/// One neighbor of the stencil together with its weight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedOffset {
    /// Neighbor position.
    pub offset: Offset,
    /// Contribution in `[0, 1]`.
    pub weight: f32,
}

impl WeightedOffset {
    /// Pair an offset with its weight.
    #[inline]
    #[must_use]
    pub fn new(offset: impl Into<Offset>, weight: f32) -> Self {
        Self {
            offset: offset.into(),
            weight,
        }
    }
}

/// Per-axis reach of a stencil: how far it looks in each direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisReach {
    /// Largest distance towards negative coordinates (`>= 0`).
    pub negative: i32,
    /// Largest distance towards positive coordinates (`>= 0`).
    pub positive: i32,
}

/// An immutable, validated stencil definition.
///
/// Constructed once by the generator (or the artifact parser) and only read
/// afterwards. Every constructor runs [`StencilDefinition::validate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StencilDefinition {
    dimension: usize,
    entries: Vec<WeightedOffset>,
}

impl StencilDefinition {
    /// Build from already paired entries.
    ///
    /// The dimension is taken from the first entry and all others must match.
    pub fn new(entries: Vec<WeightedOffset>) -> Result<Self> {
        let dimension = entries
            .first()
            .map(|e| e.offset.dimension())
            .ok_or_else(|| StencilError::InvalidDefinition("no offsets".into()))?;
        let def = Self { dimension, entries };
        def.validate()?;
        Ok(def)
    }

    /// Build from parallel offset/weight lists (positionally paired).
    pub fn from_parts(offsets: Vec<Offset>, weights: Vec<f32>) -> Result<Self> {
        if offsets.len() != weights.len() {
            return Err(StencilError::InvalidDefinition(format!(
                "{} offsets but {} weights",
                offsets.len(),
                weights.len()
            )));
        }
        Self::new(
            offsets
                .into_iter()
                .zip(weights)
                .map(|(offset, weight)| WeightedOffset { offset, weight })
                .collect(),
        )
    }

    /// Check every structural invariant:
    /// non-empty, uniform dimension `>= 1`, pairwise-distinct offsets,
    /// weights in `[0, 1]`, and weight sum within [`WEIGHT_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(StencilError::InvalidDefinition("no offsets".into()));
        }
        if self.dimension == 0 {
            return Err(StencilError::InvalidDefinition(
                "offsets have zero components".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for (i, e) in self.entries.iter().enumerate() {
            if e.offset.dimension() != self.dimension {
                return Err(StencilError::InvalidDefinition(format!(
                    "offset {i} {} has {} components, expected {}",
                    e.offset,
                    e.offset.dimension(),
                    self.dimension
                )));
            }
            if !seen.insert(&e.offset) {
                return Err(StencilError::InvalidDefinition(format!(
                    "offset {i} {} is a duplicate",
                    e.offset
                )));
            }
            if !(0.0..=1.0).contains(&e.weight) {
                return Err(StencilError::InvalidDefinition(format!(
                    "weight {i} = {} outside [0, 1]",
                    e.weight
                )));
            }
        }

        let sum = self.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(StencilError::InvalidDefinition(format!(
                "weights sum to {sum}, expected 1"
            )));
        }
        Ok(())
    }

    /// Number of axes `D`.
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of offsets `N` (always `>= 1`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a validated definition; provided for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in generation (= emission) order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[WeightedOffset] {
        &self.entries
    }

    /// Offsets in positional order.
    pub fn offsets(&self) -> impl Iterator<Item = &Offset> + '_ {
        self.entries.iter().map(|e| &e.offset)
    }

    /// Weights in positional order.
    pub fn weights(&self) -> impl Iterator<Item = f32> + '_ {
        self.entries.iter().map(|e| e.weight)
    }

    /// Weight total, accumulated in `f32` in positional order (the same
    /// order the partitioner consumed the budget in).
    #[must_use]
    pub fn weight_sum(&self) -> f32 {
        self.weights().fold(0.0_f32, |acc, w| acc + w)
    }

    /// Per-axis reach of the stencil.
    #[must_use]
    pub fn slopes(&self) -> Vec<AxisReach> {
        let mut out = vec![AxisReach::default(); self.dimension];
        for off in self.offsets() {
            for (reach, &c) in out.iter_mut().zip(off.coords()) {
                if c > 0 {
                    reach.positive = reach.positive.max(c);
                } else {
                    reach.negative = reach.negative.max(-c);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_literal_rendering() {
        assert_eq!(Offset::from([2]).to_string(), "[2]");
        assert_eq!(Offset::from([-4, 2]).to_string(), "[-4, 2]");
        assert_eq!(Offset::from([0, -1, 3]).to_string(), "[0, -1, 3]");
    }

    #[test]
    fn offset_bounds_are_half_open() {
        assert!(Offset::from([-5, 4]).within(5));
        assert!(!Offset::from([5]).within(5));
        assert!(!Offset::from([-6]).within(5));
    }

    #[test]
    fn rejects_duplicates() {
        let err = StencilDefinition::from_parts(
            vec![Offset::from([1, 1]), Offset::from([1, 1])],
            vec![0.5, 0.5],
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_definition");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_bad_sum_and_mixed_dimensions() {
        assert!(StencilDefinition::from_parts(vec![Offset::from([1])], vec![0.9]).is_err());
        assert!(StencilDefinition::from_parts(
            vec![Offset::from([1]), Offset::from([1, 2])],
            vec![0.5, 0.5]
        )
        .is_err());
        assert!(StencilDefinition::new(Vec::new()).is_err());
        assert!(StencilDefinition::from_parts(vec![Offset::from([1])], vec![]).is_err());
    }

    #[test]
    fn slopes_track_both_directions() {
        let def = StencilDefinition::from_parts(
            vec![Offset::from([1, 1]), Offset::from([-4, 2]), Offset::from([0, -3])],
            vec![0.5, 0.25, 0.25],
        )
        .unwrap();
        assert_eq!(
            def.slopes(),
            vec![
                AxisReach {
                    negative: 4,
                    positive: 1
                },
                AxisReach {
                    negative: 3,
                    positive: 2
                },
            ]
        );
    }
}
