//! The fixed set of movement speeds a run can be configured with.

use crate::error::AlignError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedPreset {
    #[serde(rename = "0.5x")]
    Half,
    #[serde(rename = "1x")]
    Normal,
    #[serde(rename = "2x")]
    Double,
    #[serde(rename = "3x")]
    Triple,
    #[serde(rename = "4x")]
    Quadruple,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 5] = [
        SpeedPreset::Half,
        SpeedPreset::Normal,
        SpeedPreset::Double,
        SpeedPreset::Triple,
        SpeedPreset::Quadruple,
    ];

    /// Horizontal movement in units per second.
    pub fn units_per_second(self) -> f64 {
        match self {
            SpeedPreset::Half => 251.160_079_72,
            SpeedPreset::Normal => 311.580_093_72,
            SpeedPreset::Double => 387.420_042,
            SpeedPreset::Triple => 468.000_072,
            SpeedPreset::Quadruple => 576.000_072,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Half => "0.5x",
            SpeedPreset::Normal => "1x",
            SpeedPreset::Double => "2x",
            SpeedPreset::Triple => "3x",
            SpeedPreset::Quadruple => "4x",
        }
    }
}

impl Default for SpeedPreset {
    fn default() -> Self {
        SpeedPreset::Normal
    }
}

impl fmt::Display for SpeedPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedPreset {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_ascii_lowercase();
        let key = trimmed.strip_suffix('x').unwrap_or(&trimmed);
        match key {
            "0.5" | ".5" => Ok(SpeedPreset::Half),
            "1" => Ok(SpeedPreset::Normal),
            "2" => Ok(SpeedPreset::Double),
            "3" => Ok(SpeedPreset::Triple),
            "4" => Ok(SpeedPreset::Quadruple),
            _ => Err(AlignError::invalid(format!(
                "unknown speed '{}', expected one of 0.5x, 1x, 2x, 3x, 4x",
                s.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_with_and_without_suffix() {
        assert_eq!("1x".parse::<SpeedPreset>().unwrap(), SpeedPreset::Normal);
        assert_eq!(" 0.5X ".parse::<SpeedPreset>().unwrap(), SpeedPreset::Half);
        assert_eq!("4".parse::<SpeedPreset>().unwrap(), SpeedPreset::Quadruple);
    }

    #[test]
    fn rejects_unknown_speed() {
        let err = "5x".parse::<SpeedPreset>().expect_err("5x is not a preset");
        assert!(matches!(err, AlignError::InvalidInput(_)));
        assert!(err.to_string().contains("unknown speed"));
    }

    #[test]
    fn labels_round_trip_through_display_and_serde() {
        for preset in SpeedPreset::ALL {
            assert_eq!(preset.to_string().parse::<SpeedPreset>().unwrap(), preset);
            let json = serde_json::to_string(&preset).expect("serialize");
            assert_eq!(json, format!("\"{}\"", preset.label()));
        }
    }

    #[test]
    fn presets_increase_in_speed() {
        let speeds: Vec<f64> = SpeedPreset::ALL.iter().map(|p| p.units_per_second()).collect();
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }
}
