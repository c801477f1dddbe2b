//! Backward position cache.
//!
//! Entry `i` is where the object would have been `i` ticks before the target
//! if the motion were run in reverse one tick at a time. The verifier reads it
//! by tick index, so it is built in full before verification starts.

use crate::solvers::Delta;
use crate::traits::{Scalar, Steppable};
use serde::{Deserialize, Serialize};

/// How many ticks a run will examine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickBudget {
    /// Highest tick index that will be checked.
    pub max_ticks: usize,
    /// Ticks needed to reach back past the origin. `None` when the quotient
    /// is not finite.
    pub required: Option<u64>,
    /// `required` exceeded the ceiling and `max_ticks` was clamped.
    pub truncated: bool,
}

impl TickBudget {
    /// `ceil((range_max + leniency) / delta)`, evaluated at `T` and clamped to `ceiling`.
    pub fn compute<T: Scalar>(range_max: T, leniency: T, delta: &Delta<T>, ceiling: usize) -> Self {
        let quotient = ((range_max + leniency) / delta.value().abs()).ceil();
        let required = quotient
            .to_f64()
            .filter(|q| q.is_finite() && *q >= 0.0 && *q < u64::MAX as f64)
            .map(|q| q as u64);

        match required {
            Some(needed) if needed <= ceiling as u64 => TickBudget {
                max_ticks: needed as usize,
                required,
                truncated: false,
            },
            _ => TickBudget {
                max_ticks: ceiling,
                required,
                truncated: true,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackwardCache<T: Scalar> {
    entries: Vec<T>,
}

impl<T: Scalar> BackwardCache<T> {
    /// `cache[0] = target`, `cache[i] = cache[i - 1] - delta` for `i` in `1..=max_ticks`.
    pub fn build(target: T, delta: &Delta<T>, max_ticks: usize) -> Self {
        let backward = delta.backward();
        let mut entries = Vec::with_capacity(max_ticks + 1);
        let mut position = target;
        entries.push(position);
        for _ in 0..max_ticks {
            position = backward.step(position);
            entries.push(position);
        }
        log::debug!(
            "built backward cache of {} entries from {} ({})",
            entries.len(),
            target,
            T::NAME
        );
        Self { entries }
    }

    pub fn get(&self, ticks: usize) -> Option<T> {
        self.entries.get(ticks).copied()
    }

    pub fn target(&self) -> T {
        self.entries[0]
    }

    /// Highest valid tick index.
    pub fn max_ticks(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cache_starts_at_target_and_steps_back() {
        let delta = Delta::<f32>::from_value(1.5).unwrap();
        let cache = BackwardCache::build(10.0_f32, &delta, 4);
        assert_eq!(cache.as_slice(), &[10.0, 8.5, 7.0, 5.5, 4.0]);
        assert_eq!(cache.max_ticks(), 4);
        assert_eq!(cache.target(), 10.0);
        assert_eq!(cache.get(5), None);
    }

    #[test]
    fn zero_budget_holds_only_target() {
        let delta = Delta::<f32>::from_value(1.5).unwrap();
        let cache = BackwardCache::build(10.0_f32, &delta, 0);
        assert_eq!(cache.as_slice(), &[10.0]);
    }

    #[test]
    fn budget_covers_range_and_leniency() {
        let delta = Delta::<f32>::from_value(2.0).unwrap();
        let budget = TickBudget::compute(10.0_f32, 1.0, &delta, 100);
        assert_eq!(budget.max_ticks, 6);
        assert_eq!(budget.required, Some(6));
        assert!(!budget.truncated);
    }

    #[test]
    fn budget_clamps_to_ceiling() {
        let delta = Delta::<f32>::from_value(0.01).unwrap();
        let budget = TickBudget::compute(1.0e6_f32, 0.0, &delta, 1_000);
        assert_eq!(budget.max_ticks, 1_000);
        assert!(budget.truncated);
        assert!(budget.required.unwrap() > 1_000);
    }

    #[test]
    fn huge_delta_budget_is_zero_ticks() {
        let delta = Delta::<f32>::from_value(3.0e32).unwrap();
        let budget = TickBudget::compute(f32::from_bits(1), 0.0, &delta, 150_000);
        assert_eq!(budget.max_ticks, 0);
        assert!(!budget.truncated);
    }

    proptest! {
        #[test]
        fn cache_is_non_increasing(target in 0.0f32..1.0e6, delta in 1.0e-3f32..600.0) {
            let delta = Delta::from_value(delta).unwrap();
            let cache = BackwardCache::build(target, &delta, 512);
            for pair in cache.as_slice().windows(2) {
                prop_assert!(pair[1] <= pair[0]);
            }
        }
    }
}
