use thiserror::Error;

/// Fatal failures of a search run. A run that fails returns no alignments.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    /// A parameter did not parse or fell outside its permitted range.
    /// Interactive hosts re-prompt on this.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The speed/TPS pair rounds to a per-tick movement of zero.
    #[error("speed {speed} at {ticks_per_second} TPS produces no per-tick movement")]
    ZeroDelta { speed: f64, ticks_per_second: f64 },
}

impl AlignError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AlignError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AlignError>;
