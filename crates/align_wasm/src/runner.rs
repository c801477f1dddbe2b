//! Stepped alignment search runner.

use crate::params::{build_params, parse_config, to_js_error};
use align_core::PrecisionRunner;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

/// WASM-exported runner for a batch-stepped alignment search.
/// Allows progress reporting by examining a batch of ticks at a time.
#[wasm_bindgen]
pub struct WasmAlignmentRunner {
    runner: Option<PrecisionRunner>,
}

#[wasm_bindgen]
impl WasmAlignmentRunner {
    /// Resolve the target and build the backward cache.
    #[wasm_bindgen(constructor)]
    pub fn new(
        target: &str,
        ticks_per_second: f64,
        speed: &str,
        leniency: f64,
        config_val: JsValue,
    ) -> Result<WasmAlignmentRunner, JsValue> {
        console_error_panic_hook::set_once();

        let params = build_params(target, ticks_per_second, speed, leniency).map_err(to_js_error)?;
        let config = parse_config(config_val).map_err(to_js_error)?;

        let runner = PrecisionRunner::new(&params, config)
            .map_err(|e| JsValue::from_str(&format!("Search init failed: {}", e)))?;

        Ok(WasmAlignmentRunner {
            runner: Some(runner),
        })
    }

    /// Check if the search is complete.
    pub fn is_done(&self) -> bool {
        self.runner.as_ref().map_or(true, |runner| runner.is_done())
    }

    /// Examine a batch of ticks and return progress.
    pub fn run_ticks(&mut self, batch_size: u32) -> Result<JsValue, JsValue> {
        let runner = self
            .runner
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        let progress = runner.run_ticks(batch_size.max(1) as usize);

        to_value(&progress).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Get progress information.
    pub fn get_progress(&self) -> Result<JsValue, JsValue> {
        let runner = self
            .runner
            .as_ref()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        to_value(&runner.progress())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Get the report. Callable once; a search stopped early reports what it found.
    pub fn get_result(&mut self) -> Result<JsValue, JsValue> {
        let runner = self
            .runner
            .take()
            .ok_or_else(|| JsValue::from_str("Runner not initialized"))?;

        let report = runner.finish();

        to_value(&report).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
