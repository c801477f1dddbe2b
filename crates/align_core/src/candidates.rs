//! ULP-adjacent portal candidates for one backward-cache entry.
//!
//! Reverse stepping rounds too, so the float it lands on may sit one bit
//! pattern away from a start that actually replays onto the target.

use crate::float_range::{bit_predecessor, bit_successor};
use crate::traits::Scalar;

/// Up to three candidates, nearest to the origin first.
#[derive(Debug, Clone)]
pub struct Candidates<T: Scalar> {
    slots: [Option<T>; 3],
    next: usize,
}

impl<T: Scalar> Candidates<T> {
    /// Previous, exact and next bit pattern of `entry`, skipping any that are
    /// negative or not a number. The previous pattern is skipped when `entry`
    /// has bit pattern zero.
    pub fn around(entry: T) -> Self {
        let keep = |value: Option<T>| value.filter(|v| *v >= T::zero());
        // Bit order is magnitude order for non-negative floats. Negative zero
        // is the only kept entry with a sign bit, and both its neighbours drop.
        let slots = [
            keep(bit_predecessor(entry)),
            keep(Some(entry)),
            keep(bit_successor(entry)),
        ];
        Self { slots, next: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

impl<T: Scalar> Iterator for Candidates<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.next < self.slots.len() {
            let slot = self.slots[self.next];
            self.next += 1;
            if slot.is_some() {
                return slot;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(values: Vec<f32>) -> Vec<u32> {
        values.into_iter().map(f32::to_bits).collect()
    }

    #[test]
    fn emits_three_neighbours_in_order() {
        let entry = 98.5_f32;
        let found: Vec<f32> = Candidates::around(entry).collect();
        let b = entry.to_bits();
        assert_eq!(bits(found), vec![b - 1, b, b + 1]);
    }

    #[test]
    fn zero_has_no_predecessor() {
        let found: Vec<f32> = Candidates::around(0.0_f32).collect();
        assert_eq!(bits(found), vec![0, 1]);
    }

    #[test]
    fn negative_entries_yield_nothing() {
        let candidates = Candidates::around(-0.25_f32);
        assert!(candidates.is_empty());
        assert_eq!(candidates.count(), 0);
    }

    #[test]
    fn negative_zero_keeps_only_itself() {
        // -0.0 - 1 bit is a NaN pattern and +1 bit is the smallest negative.
        let found: Vec<f32> = Candidates::around(-0.0_f32).collect();
        assert_eq!(bits(found), vec![0x8000_0000]);
    }

    #[test]
    fn double_width_neighbours() {
        let entry = 12.0_f64;
        let found: Vec<u64> = Candidates::around(entry).map(f64::to_bits).collect();
        let b = entry.to_bits();
        assert_eq!(found, vec![b - 1, b, b + 1]);
    }
}
