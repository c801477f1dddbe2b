use crate::types::Precision;
use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A floating-point width the search can run at.
///
/// Beyond ordinary arithmetic, the search needs to walk the IEEE-754 bit
/// pattern of a value to enumerate its neighbours. The bit accessors go
/// through `to_bits`/`from_bits`, never through a numeric cast.
pub trait Scalar:
    Float + FromPrimitive + ToPrimitive + FromStr + Debug + Display + Send + Sync + 'static
{
    /// Human readable name of the width ("f32", "f64").
    const NAME: &'static str;

    const PRECISION: Precision;

    /// Raw bit pattern, zero-extended to 64 bits.
    fn to_raw_bits(self) -> u64;

    /// Reinterprets a raw bit pattern. Bits above the type's width are ignored.
    fn from_raw_bits(bits: u64) -> Self;

    /// Exact bit identity. `0.0` and `-0.0` are distinct, `NaN` equals itself
    /// only when the payloads agree.
    fn bits_eq(self, other: Self) -> bool {
        self.to_raw_bits() == other.to_raw_bits()
    }

    /// Lossless widening for reporting.
    fn widen(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Scalar for f32 {
    const NAME: &'static str = "f32";
    const PRECISION: Precision = Precision::Single;

    fn to_raw_bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn from_raw_bits(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }
}

impl Scalar for f64 {
    const NAME: &'static str = "f64";
    const PRECISION: Precision = Precision::Double;

    fn to_raw_bits(self) -> u64 {
        self.to_bits()
    }

    fn from_raw_bits(bits: u64) -> Self {
        f64::from_bits(bits)
    }
}

/// A single-tick position update.
pub trait Steppable<T: Scalar> {
    /// Advances `position` by one tick.
    fn step(&self, position: T) -> T;

    /// Applies `step` `ticks` times in sequence.
    /// Each tick rounds on its own, so this is not `position + ticks * delta`.
    fn advance(&self, position: T, ticks: usize) -> T {
        let mut current = position;
        for _ in 0..ticks {
            current = self.step(current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bits_round_trip_preserves_signed_zero() {
        let neg_zero = -0.0_f32;
        assert_eq!(neg_zero.to_raw_bits(), 0x8000_0000);
        assert!(f32::from_raw_bits(neg_zero.to_raw_bits()).is_sign_negative());
        assert!(!neg_zero.bits_eq(0.0));
    }

    #[test]
    fn f32_ignores_high_bits() {
        let value = 1.5_f32;
        let bits = value.to_raw_bits() | 0xFFFF_FFFF_0000_0000;
        assert_eq!(f32::from_raw_bits(bits), value);
    }

    #[test]
    fn widen_is_exact_for_f32() {
        let value = 98.701_75_f32;
        assert_eq!(value.widen() as f32, value);
    }
}
