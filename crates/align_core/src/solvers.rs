use crate::error::{AlignError, Result};
use crate::traits::{Scalar, Steppable};

/// Per-tick movement, `speed / ticks_per_second`, computed at the run's width.
///
/// Both operands are brought to `T` before dividing so the quotient rounds
/// once, at `T`, the way the simulated engine computes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta<T: Scalar> {
    value: T,
}

impl<T: Scalar> Delta<T> {
    pub fn new(speed: f64, ticks_per_second: f64) -> Result<Self> {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(AlignError::invalid(format!(
                "ticks per second must be positive and finite, got {ticks_per_second}"
            )));
        }
        if !speed.is_finite() {
            return Err(AlignError::invalid(format!("speed must be finite, got {speed}")));
        }
        let narrow = |value: f64, what: &str| {
            T::from_f64(value).ok_or_else(|| {
                AlignError::invalid(format!("{what} {value} is not representable as {}", T::NAME))
            })
        };
        let speed_t = narrow(speed, "speed")?;
        let tps_t = narrow(ticks_per_second, "ticks per second")?;

        let value = speed_t / tps_t;
        if value.is_zero() || tps_t.is_infinite() {
            return Err(AlignError::ZeroDelta {
                speed,
                ticks_per_second,
            });
        }
        if !value.is_finite() {
            return Err(AlignError::invalid(format!(
                "speed {speed} at {ticks_per_second} TPS overflows {}",
                T::NAME
            )));
        }
        Ok(Self { value })
    }

    /// Wraps a delta computed elsewhere.
    pub fn from_value(value: T) -> Result<Self> {
        if value.is_zero() {
            return Err(AlignError::ZeroDelta {
                speed: f64::NAN,
                ticks_per_second: f64::NAN,
            });
        }
        if !value.is_finite() {
            return Err(AlignError::invalid(format!("delta {value} is not finite")));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn forward(&self) -> ForwardStep<T> {
        ForwardStep { delta: self.value }
    }

    pub fn backward(&self) -> BackwardStep<T> {
        BackwardStep { delta: self.value }
    }
}

/// `next = position + delta`
#[derive(Debug, Clone, Copy)]
pub struct ForwardStep<T: Scalar> {
    delta: T,
}

impl<T: Scalar> Steppable<T> for ForwardStep<T> {
    #[inline]
    fn step(&self, position: T) -> T {
        position + self.delta
    }
}

/// `next = position - delta`
#[derive(Debug, Clone, Copy)]
pub struct BackwardStep<T: Scalar> {
    delta: T,
}

impl<T: Scalar> Steppable<T> for BackwardStep<T> {
    #[inline]
    fn step(&self, position: T) -> T {
        position - self.delta
    }
}
