//! WASM bridge for the alignment search engine.
//!
//! Browser hosts either call [`find_alignments`] for a one-shot search or drive
//! a [`WasmAlignmentRunner`] in batches to report progress between them.

mod params;
mod runner;

pub use runner::WasmAlignmentRunner;

use align_core::float_range::resolve_display;
use align_core::SpeedPreset;
use params::{build_params, parse_config, parse_precision, to_js_error};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SpeedPresetPayload {
    label: &'static str,
    units_per_second: f64,
}

/// The selectable speeds, slowest first.
#[wasm_bindgen]
pub fn speed_presets() -> Result<JsValue, JsValue> {
    let payload: Vec<SpeedPresetPayload> = SpeedPreset::ALL
        .iter()
        .map(|preset| SpeedPresetPayload {
            label: preset.label(),
            units_per_second: preset.units_per_second(),
        })
        .collect();
    to_value(&payload).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Resolves a displayed position to `{ canonical, min, max }` at the given
/// precision ("single" or "double").
#[wasm_bindgen]
pub fn resolve_position(text: &str, precision: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let range = match parse_precision(precision).map_err(to_js_error)? {
        align_core::Precision::Single => resolve_display::<f32>(text).map(|r| r.widen()),
        align_core::Precision::Double => resolve_display::<f64>(text),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_value(&range).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Runs a whole search and returns the report.
#[wasm_bindgen]
pub fn find_alignments(
    target: &str,
    ticks_per_second: f64,
    speed: &str,
    leniency: f64,
    config_val: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let params = build_params(target, ticks_per_second, speed, leniency).map_err(to_js_error)?;
    let config = parse_config(config_val).map_err(to_js_error)?;
    let report = align_core::find_alignments(&params, config)
        .map_err(|e| JsValue::from_str(&format!("Search failed: {}", e)))?;

    to_value(&report).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
