use align_core::{Precision, SearchConfig, VerifyStrategy};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reads a JSON `SearchConfig`. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: SearchConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

/// Command-line values that replace fields of a loaded config.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub tick_ceiling: Option<usize>,
    pub result_cap: Option<usize>,
    pub precision: Option<Precision>,
    pub strategy: Option<VerifyStrategy>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: SearchConfig) -> SearchConfig {
        if let Some(tick_ceiling) = self.tick_ceiling {
            config.tick_ceiling = tick_ceiling;
        }
        if let Some(result_cap) = self.result_cap {
            config.result_cap = result_cap;
        }
        if let Some(precision) = self.precision {
            config.precision = precision;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy;
        }
        config
    }
}
