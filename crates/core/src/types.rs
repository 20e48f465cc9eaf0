//! Validated domain types.
//!
//! A [`Policy`] is a probability distribution over the action space and a
//! [`Value`] is a position evaluation in [-1, 1]. Both enforce their
//! invariants on construction so downstream code never re-validates.

use crate::{EngineError, Result};

/// Tolerance when checking that a policy sums to one.
const POLICY_SUM_TOLERANCE: f32 = 1e-5;

/// Additive floor applied when normalizing raw visit counts, so that an
/// all-zero count vector divides safely instead of producing NaN.
const VISIT_FLOOR: f32 = 1e-10;

/// A probability distribution over actions: non-negative entries summing to
/// 1.0 (within tolerance).
#[derive(Clone, Debug, PartialEq)]
pub struct Policy(Vec<f32>);

impl Policy {
    /// Validates and wraps an existing distribution.
    pub fn new(probs: Vec<f32>) -> Result<Self> {
        if probs.is_empty() {
            return Err(EngineError::InvalidPolicy("empty policy".into()));
        }
        if probs.iter().any(|&p| p < 0.0) {
            return Err(EngineError::InvalidPolicy("negative entry".into()));
        }
        let sum: f32 = probs.iter().sum();
        if (sum - 1.0).abs() > POLICY_SUM_TOLERANCE {
            return Err(EngineError::InvalidPolicy(format!(
                "entries sum to {sum}, expected 1.0"
            )));
        }
        Ok(Self(probs))
    }

    /// Builds a training policy from raw visit counts.
    ///
    /// Counts are divided by their total plus a tiny floor, matching the
    /// normalization the training dump expects. With at least one nonzero
    /// count the result sums to 1.0 up to the floor; with none it is all
    /// zeros rather than NaN.
    pub fn from_visit_counts(counts: &[u32]) -> Self {
        let total: f32 = counts.iter().map(|&c| c as f32).sum::<f32>() + VISIT_FLOOR;
        Self(counts.iter().map(|&c| c as f32 / total).collect())
    }

    /// Uniform distribution over `num_actions` entries.
    pub fn uniform(num_actions: usize) -> Result<Self> {
        if num_actions == 0 {
            return Err(EngineError::InvalidPolicy("zero actions".into()));
        }
        Ok(Self(vec![1.0 / num_actions as f32; num_actions]))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get_or_zero(&self, index: usize) -> f32 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    /// Index of the largest entry; the first one wins on ties.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.0.iter().enumerate() {
            if p > self.0[best] {
                best = i;
            }
        }
        best
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl std::ops::Index<usize> for Policy {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

/// A position evaluation in [-1, 1], from the perspective of the player to
/// move: +1 winning, -1 losing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Value(f32);

impl Value {
    pub const WIN: Self = Self(1.0);
    pub const LOSS: Self = Self(-1.0);

    /// Validates the range.
    pub fn new(value: f32) -> Result<Self> {
        if !(-1.0..=1.0).contains(&value) {
            return Err(EngineError::InvalidValue(format!(
                "{value} outside [-1, 1]"
            )));
        }
        Ok(Self(value))
    }

    /// Clamps into range; use for values that may drift past the bounds by
    /// floating-point error.
    pub fn clamped(value: f32) -> Self {
        Self(value.clamp(-1.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// The same evaluation seen by the opponent.
    pub fn negate(self) -> Self {
        Self(-self.0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<Value> for f32 {
    fn from(v: Value) -> f32 {
        v.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_accepts_valid_distribution() {
        let policy = Policy::new(vec![0.25, 0.5, 0.25]).unwrap();
        assert_eq!(policy.len(), 3);
        assert!((policy.sum() - 1.0).abs() < POLICY_SUM_TOLERANCE);
    }

    #[test]
    fn policy_rejects_bad_input() {
        assert!(Policy::new(vec![]).is_err());
        assert!(Policy::new(vec![0.5, -0.1, 0.6]).is_err());
        assert!(Policy::new(vec![0.4, 0.4]).is_err());
    }

    #[test]
    fn policy_from_visit_counts_normalizes() {
        let policy = Policy::from_visit_counts(&[1, 2, 1]);
        assert!((policy[1] - 0.5).abs() < 1e-5);
        assert!((policy.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn policy_from_zero_visits_is_all_zeros() {
        let policy = Policy::from_visit_counts(&[0, 0, 0]);
        assert!(policy.as_slice().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn policy_argmax_prefers_first_on_tie() {
        let policy = Policy::new(vec![0.4, 0.4, 0.2]).unwrap();
        assert_eq!(policy.argmax(), 0);
    }

    #[test]
    fn value_range_is_enforced() {
        assert!(Value::new(0.7).is_ok());
        assert!(Value::new(1.2).is_err());
        assert!(Value::new(f32::NAN).is_err());
        assert_eq!(Value::clamped(-3.0).get(), -1.0);
    }

    #[test]
    fn value_negation_flips_perspective() {
        assert_eq!(Value::WIN.negate().get(), -1.0);
        assert_eq!(Value::new(0.25).unwrap().negate().get(), -0.25);
    }
}
