//! Records produced by a search run.

use crate::float_range::FloatRange;
use crate::verify::VerifyStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Float width a run simulates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Single,
    Double,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Single
    }
}

/// A tick count and the portal positions that replay onto the target after it.
///
/// Positions are widened to `f64`; for single-precision runs this is exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    pub ticks_since_portal: usize,
    /// The verified start nearest the origin.
    pub portal: f64,
    pub portal_min: f64,
    pub portal_max: f64,
}

/// Non-fatal conditions. The alignments returned alongside them are valid
/// but incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchWarning {
    /// Reaching back past the origin needs more ticks than the ceiling allows.
    /// `required` is absent when the tick count is not finite.
    TickCapExceeded { required: Option<u64>, ceiling: usize },
    /// Collection stopped after `cap` alignments.
    ResultCapExceeded { cap: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDiagnostics {
    pub precision: Precision,
    pub strategy: VerifyStrategy,
    pub delta: f64,
    pub resolved_range: FloatRange<f64>,
    pub max_ticks: usize,
    /// Tick indices actually examined. Smaller than `max_ticks + 1` after an
    /// early exit.
    pub ticks_checked: usize,
    pub truncated_by_tick_cap: bool,
    pub truncated_by_result_cap: bool,
    pub warnings: Vec<SearchWarning>,
    pub forward_steps: u64,
    pub elapsed_cache: Duration,
    pub elapsed_search: Duration,
}

impl SearchDiagnostics {
    pub fn is_truncated(&self) -> bool {
        self.truncated_by_tick_cap || self.truncated_by_result_cap
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Ordered by increasing tick count.
    pub alignments: Vec<Alignment>,
    pub diagnostics: SearchDiagnostics,
}
