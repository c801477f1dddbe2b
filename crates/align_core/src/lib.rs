pub mod cache;
pub mod candidates;
pub mod collector;
pub mod error;
pub mod float_range;
pub mod search;
pub mod solvers;
pub mod speed;
/// The `align_core` crate finds every portal position and elapsed tick count
/// from which an object moving at a constant per-tick delta lands bit-for-bit
/// on a displayed target position.
///
/// Key components:
/// - **Traits**: `Scalar` (float width with bit reinterpretation), `Steppable` (one tick of motion).
/// - **Float range**: turning on-screen text into the float neighbourhood it may stand for.
/// - **Cache / Candidates / Verify**: backward stepping, ULP-neighbour candidates, forward replay.
/// - **Search**: the batch-stepped `AlignmentRunner` and the one-shot `find_alignments`.
pub mod traits;
pub mod types;
pub mod verify;

pub use error::{AlignError, Result};
pub use search::{
    find_alignments, AlignmentRunner, PrecisionRunner, RunProgress, SearchConfig, SearchParams,
};
pub use speed::SpeedPreset;
pub use types::{Alignment, Precision, SearchDiagnostics, SearchReport, SearchWarning};
pub use verify::VerifyStrategy;
