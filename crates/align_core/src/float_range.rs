//! Resolution of an on-screen decimal into the float neighbourhood it may stand for.
//!
//! A position shown with a handful of decimals is a lossy view of the float the
//! simulation actually holds. The resolver parses the text at the requested
//! width and brackets the result with its immediate bit-pattern neighbours.

use crate::error::{AlignError, Result};
use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange<T> {
    /// The value the text parses to at this width.
    pub canonical: T,
    /// Previous representable value, clamped to zero.
    pub min: T,
    /// Next representable value.
    pub max: T,
}

impl<T: Scalar> FloatRange<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Widened copy for reporting.
    pub fn widen(&self) -> FloatRange<f64> {
        FloatRange {
            canonical: self.canonical.widen(),
            min: self.min.widen(),
            max: self.max.widen(),
        }
    }
}

/// The float whose bit pattern is one above `value`'s.
pub fn bit_successor<T: Scalar>(value: T) -> Option<T> {
    value.to_raw_bits().checked_add(1).map(T::from_raw_bits)
}

/// The float whose bit pattern is one below `value`'s. `None` for bit pattern zero.
pub fn bit_predecessor<T: Scalar>(value: T) -> Option<T> {
    value.to_raw_bits().checked_sub(1).map(T::from_raw_bits)
}

/// Parses a displayed position and returns it with its neighbours.
///
/// Fails with `InvalidInput` for text that does not parse, is negative, or
/// does not land on a finite value at this width. `-0` is accepted and
/// normalised to `+0`.
pub fn resolve_display<T: Scalar>(text: &str) -> Result<FloatRange<T>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AlignError::invalid("position must not be empty"));
    }
    let parsed: T = trimmed
        .parse()
        .map_err(|_| AlignError::invalid(format!("'{trimmed}' is not a number")))?;
    if !parsed.is_finite() {
        return Err(AlignError::invalid(format!(
            "'{trimmed}' is not a finite {} value",
            T::NAME
        )));
    }
    if parsed < T::zero() {
        return Err(AlignError::invalid(format!(
            "position must not be negative, got '{trimmed}'"
        )));
    }
    let canonical = if parsed == T::zero() { T::zero() } else { parsed };

    let min = bit_predecessor(canonical)
        .filter(|v| *v >= T::zero())
        .unwrap_or_else(T::zero);
    let max = bit_successor(canonical).unwrap_or(canonical);
    if !max.is_finite() {
        return Err(AlignError::invalid(format!(
            "'{trimmed}' sits at the top of the {} range",
            T::NAME
        )));
    }

    log::debug!(
        "resolved '{}' to {} [{}, {}] ({})",
        trimmed,
        canonical,
        min,
        max,
        T::NAME
    );

    Ok(FloatRange { canonical, min, max })
}
