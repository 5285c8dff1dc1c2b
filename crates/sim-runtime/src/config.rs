//! Engine configuration loaded from YAML.

use crate::engine::EngineStrategy;
use crate::RuntimeError;
use serde::{Deserialize, Serialize};
use sim_align::AiAssistanceLevel;
use sim_econ::DEFAULT_ROI_CAP;
use std::fs;
use std::path::Path;

/// Knobs owned by the surrounding system. Missing keys take their defaults.
///
/// Example (YAML):
/// ```yaml
/// market_simulation: true
/// roi_cap_pct: 70
/// ai_assistance: low
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Selects the market simulation engine instead of the weighted-score one.
    pub market_simulation: bool,
    pub roi_cap_pct: f64,
    pub apply_strategic_impacts: bool,
    pub apply_alignment: bool,
    pub ai_assistance: AiAssistanceLevel,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            market_simulation: false,
            roi_cap_pct: DEFAULT_ROI_CAP,
            apply_strategic_impacts: true,
            apply_alignment: true,
            ai_assistance: AiAssistanceLevel::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, RuntimeError> {
        let cfg: EngineConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuntimeError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), RuntimeError> {
        if !self.roi_cap_pct.is_finite() || self.roi_cap_pct < 0.0 {
            return Err(RuntimeError::InvalidConfig(format!(
                "roi_cap_pct must be a non-negative number, got {}",
                self.roi_cap_pct
            )));
        }
        Ok(())
    }

    pub fn strategy(&self) -> EngineStrategy {
        EngineStrategy::from_flag(self.market_simulation)
    }
}
