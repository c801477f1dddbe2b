//! Search runs: parameter validation, the batch-stepped runner, and the
//! one-shot entry point.
//!
//! A run resolves the target, builds the backward cache in one pass, then walks
//! tick indices in increasing order. Hosts that want progress reporting or
//! cancellation drive [`AlignmentRunner::run_ticks`] in batches; stopping
//! between batches leaves every collected alignment valid.

use crate::cache::{BackwardCache, TickBudget};
use crate::candidates::Candidates;
use crate::collector::AlignmentCollector;
use crate::error::{AlignError, Result};
use crate::float_range::{resolve_display, FloatRange};
use crate::solvers::Delta;
use crate::speed::SpeedPreset;
use crate::traits::Scalar;
use crate::types::{Precision, SearchDiagnostics, SearchReport, SearchWarning};
use crate::verify::{ForwardVerifier, VerifyStrategy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TICK_CEILING: usize = 150_000;
pub const DEFAULT_RESULT_CAP: usize = DEFAULT_TICK_CEILING + 1;
/// Largest accepted `tick_ceiling`. The backward cache holds one entry per tick.
pub const MAX_TICK_CEILING: usize = 10_000_000;

/// Ticks examined per batch by [`AlignmentRunner::run_to_completion`].
const COMPLETION_BATCH: usize = 4_096;

/// What to search for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Target position as displayed, e.g. `"100.000000"`.
    pub target: String,
    pub ticks_per_second: f64,
    pub speed: SpeedPreset,
    #[serde(default)]
    pub leniency: f64,
}

impl SearchParams {
    pub fn new(target: impl Into<String>, ticks_per_second: f64, speed: SpeedPreset) -> Self {
        Self {
            target: target.into(),
            ticks_per_second,
            speed,
            leniency: 0.0,
        }
    }

    pub fn with_leniency(mut self, leniency: f64) -> Self {
        self.leniency = leniency;
        self
    }
}

/// Bounds and modes of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub tick_ceiling: usize,
    pub result_cap: usize,
    pub precision: Precision,
    pub strategy: VerifyStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tick_ceiling: DEFAULT_TICK_CEILING,
            result_cap: DEFAULT_RESULT_CAP,
            precision: Precision::Single,
            strategy: VerifyStrategy::Resimulate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunProgress {
    pub ticks_checked: usize,
    pub max_ticks: usize,
    pub alignments_found: usize,
    pub done: bool,
}

impl RunProgress {
    /// Fraction of the tick budget examined, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.done {
            return 1.0;
        }
        self.ticks_checked as f64 / (self.max_ticks + 1) as f64
    }
}

#[derive(Debug)]
pub struct AlignmentRunner<T: Scalar> {
    config: SearchConfig,
    range: FloatRange<T>,
    delta: Delta<T>,
    leniency: T,
    budget: TickBudget,
    cache: BackwardCache<T>,
    verifier: ForwardVerifier<T>,
    collector: AlignmentCollector<T>,
    next_tick: usize,
    done: bool,
    elapsed_cache: Duration,
    elapsed_search: Duration,
}

impl<T: Scalar> AlignmentRunner<T> {
    /// Validates the parameters and builds the backward cache.
    ///
    /// `config.precision` is ignored here; the width is `T`.
    pub fn new(params: &SearchParams, config: SearchConfig) -> Result<Self> {
        if config.tick_ceiling > MAX_TICK_CEILING {
            return Err(AlignError::invalid(format!(
                "tick ceiling {} is above the limit of {}",
                config.tick_ceiling, MAX_TICK_CEILING
            )));
        }
        if !params.leniency.is_finite() || params.leniency < 0.0 {
            return Err(AlignError::invalid(format!(
                "leniency must be a non-negative number, got {}",
                params.leniency
            )));
        }
        let leniency = T::from_f64(params.leniency)
            .filter(|l| l.is_finite())
            .ok_or_else(|| {
                AlignError::invalid(format!(
                    "leniency {} is not representable as {}",
                    params.leniency,
                    T::NAME
                ))
            })?;

        let range = resolve_display::<T>(&params.target)?;
        let delta = Delta::<T>::new(params.speed.units_per_second(), params.ticks_per_second)?;
        let budget = TickBudget::compute(range.max, leniency, &delta, config.tick_ceiling);
        if budget.truncated {
            log::warn!(
                "search needs {} ticks but the ceiling is {}; results will be incomplete",
                budget
                    .required
                    .map_or_else(|| "unbounded".to_string(), |r| r.to_string()),
                config.tick_ceiling
            );
        }

        let clock = Stopwatch::start();
        let cache = BackwardCache::build(range.canonical, &delta, budget.max_ticks);
        let elapsed_cache = clock.elapsed();

        log::debug!(
            "delta {} ({}), checking ticks 0..={}",
            delta.value(),
            T::NAME,
            budget.max_ticks
        );

        Ok(Self {
            config,
            verifier: ForwardVerifier::new(range.canonical, &delta, config.strategy),
            collector: AlignmentCollector::new(leniency, config.result_cap),
            range,
            delta,
            leniency,
            budget,
            cache,
            next_tick: 0,
            done: false,
            elapsed_cache,
            elapsed_search: Duration::ZERO,
        })
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn progress(&self) -> RunProgress {
        RunProgress {
            ticks_checked: self.next_tick,
            max_ticks: self.budget.max_ticks,
            alignments_found: self.collector.len(),
            done: self.done,
        }
    }

    /// Examines up to `batch` more tick indices.
    pub fn run_ticks(&mut self, batch: usize) -> RunProgress {
        let clock = Stopwatch::start();
        let floor = -self.leniency;
        let mut processed = 0;

        while !self.done && processed < batch {
            let ticks = self.next_tick;
            let Some(entry) = self.cache.get(ticks) else {
                self.done = true;
                break;
            };
            // Deeper entries are smaller still, so nothing later can land in the window.
            if entry < floor {
                log::debug!("backward cache passed {} at tick {}; stopping", floor, ticks);
                self.done = true;
                break;
            }
            if let Some(portal) = self.verifier.first_match(Candidates::around(entry), ticks) {
                if !self.collector.offer(ticks, portal) {
                    log::warn!(
                        "result cap of {} reached at tick {}; stopping",
                        self.config.result_cap,
                        ticks
                    );
                    self.done = true;
                    break;
                }
            }
            self.next_tick += 1;
            processed += 1;
        }
        if self.next_tick > self.budget.max_ticks {
            self.done = true;
        }

        self.elapsed_search += clock.elapsed();
        self.progress()
    }

    pub fn run_to_completion(&mut self) -> RunProgress {
        while !self.done {
            self.run_ticks(COMPLETION_BATCH);
        }
        self.progress()
    }

    /// Consumes the runner. Alignments found so far are returned even if the
    /// run was stopped early.
    pub fn finish(self) -> SearchReport {
        let mut warnings = Vec::new();
        if self.budget.truncated {
            warnings.push(SearchWarning::TickCapExceeded {
                required: self.budget.required,
                ceiling: self.config.tick_ceiling,
            });
        }
        let truncated_by_result_cap = self.collector.is_truncated();
        if truncated_by_result_cap {
            warnings.push(SearchWarning::ResultCapExceeded {
                cap: self.config.result_cap,
            });
        }

        let diagnostics = SearchDiagnostics {
            precision: T::PRECISION,
            strategy: self.verifier.strategy(),
            delta: self.delta.value().widen(),
            resolved_range: self.range.widen(),
            max_ticks: self.budget.max_ticks,
            ticks_checked: self.next_tick,
            truncated_by_tick_cap: self.budget.truncated,
            truncated_by_result_cap,
            warnings,
            forward_steps: self.verifier.steps_taken(),
            elapsed_cache: self.elapsed_cache,
            elapsed_search: self.elapsed_search,
        };
        let alignments = self.collector.into_alignments();
        log::info!(
            "found {} alignments over {} ticks in {:?}",
            alignments.len(),
            diagnostics.ticks_checked,
            diagnostics.elapsed_cache + diagnostics.elapsed_search
        );

        SearchReport {
            alignments,
            diagnostics,
        }
    }
}

/// A runner at the width chosen by `SearchConfig::precision`.
pub enum PrecisionRunner {
    Single(AlignmentRunner<f32>),
    Double(AlignmentRunner<f64>),
}

impl PrecisionRunner {
    pub fn new(params: &SearchParams, config: SearchConfig) -> Result<Self> {
        Ok(match config.precision {
            Precision::Single => PrecisionRunner::Single(AlignmentRunner::new(params, config)?),
            Precision::Double => PrecisionRunner::Double(AlignmentRunner::new(params, config)?),
        })
    }

    pub fn is_done(&self) -> bool {
        match self {
            PrecisionRunner::Single(r) => r.is_done(),
            PrecisionRunner::Double(r) => r.is_done(),
        }
    }

    pub fn progress(&self) -> RunProgress {
        match self {
            PrecisionRunner::Single(r) => r.progress(),
            PrecisionRunner::Double(r) => r.progress(),
        }
    }

    pub fn run_ticks(&mut self, batch: usize) -> RunProgress {
        match self {
            PrecisionRunner::Single(r) => r.run_ticks(batch),
            PrecisionRunner::Double(r) => r.run_ticks(batch),
        }
    }

    pub fn run_to_completion(&mut self) -> RunProgress {
        match self {
            PrecisionRunner::Single(r) => r.run_to_completion(),
            PrecisionRunner::Double(r) => r.run_to_completion(),
        }
    }

    pub fn finish(self) -> SearchReport {
        match self {
            PrecisionRunner::Single(r) => r.finish(),
            PrecisionRunner::Double(r) => r.finish(),
        }
    }
}

/// Runs a whole search and returns every alignment with its diagnostics.
pub fn find_alignments(params: &SearchParams, config: SearchConfig) -> Result<SearchReport> {
    let mut runner = PrecisionRunner::new(params, config)?;
    runner.run_to_completion();
    Ok(runner.finish())
}

/// Wall-clock timer. `Instant` is unavailable on wasm32, where it reads zero.
struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    started: std::time::Instant,
}

impl Stopwatch {
    fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            started: std::time::Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.started.elapsed()
        }
        #[cfg(target_arch = "wasm32")]
        {
            Duration::ZERO
        }
    }
}
