//! Conversion of loosely typed JS arguments into core parameters.

use align_core::{Precision, SearchConfig, SearchParams, SpeedPreset};
use anyhow::{anyhow, Context, Result};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::JsValue;

pub(crate) fn build_params(
    target: &str,
    ticks_per_second: f64,
    speed: &str,
    leniency: f64,
) -> Result<SearchParams> {
    let speed: SpeedPreset = speed.parse()?;
    let leniency = if leniency.is_nan() { 0.0 } else { leniency };
    Ok(SearchParams::new(target, ticks_per_second, speed).with_leniency(leniency))
}

/// `undefined`/`null` select the defaults.
pub(crate) fn parse_config(config_val: JsValue) -> Result<SearchConfig> {
    if config_val.is_undefined() || config_val.is_null() {
        return Ok(SearchConfig::default());
    }
    from_value(config_val)
        .map_err(|e| anyhow!("{}", e))
        .context("Invalid search config")
}

pub(crate) fn parse_precision(precision: &str) -> Result<Precision> {
    match precision.trim().to_ascii_lowercase().as_str() {
        "single" | "f32" => Ok(Precision::Single),
        "double" | "f64" => Ok(Precision::Double),
        other => Err(anyhow!("Unknown precision: {}", other)),
    }
}

pub(crate) fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
