//! Penalty for strategic content left unedited from AI generation.

use serde::{Deserialize, Serialize};

/// How much AI help the round allows; scales the authorship penalty.
///
/// `Medium` and `High` apply the bands as-is, `Low` halves them and `None`
/// turns the penalty off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiAssistanceLevel {
    /// AI use is unrestricted; no penalty applies.
    None,
    Low,
    #[default]
    Medium,
    High,
}

impl AiAssistanceLevel {
    pub fn penalty_scale(self) -> f64 {
        match self {
            AiAssistanceLevel::None => 0.0,
            AiAssistanceLevel::Low => 0.5,
            AiAssistanceLevel::Medium | AiAssistanceLevel::High => 1.0,
        }
    }
}

const LIGHT_USE_PCT: f64 = 30.0;
const HEAVY_USE_PCT: f64 = 70.0;

/// Base penalty for one tool given its unedited share, before scaling.
pub fn tool_penalty(ai_content_percentage: f64) -> f64 {
    if !ai_content_percentage.is_finite() || ai_content_percentage < LIGHT_USE_PCT {
        0.0
    } else if ai_content_percentage < HEAVY_USE_PCT {
        -10.0
    } else {
        -30.0
    }
}

pub fn scaled_penalty(ai_content_percentage: f64, level: AiAssistanceLevel) -> f64 {
    tool_penalty(ai_content_percentage) * level.penalty_scale()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands() {
        assert_eq!(tool_penalty(0.0), 0.0);
        assert_eq!(tool_penalty(29.9), 0.0);
        assert_eq!(tool_penalty(30.0), -10.0);
        assert_eq!(tool_penalty(69.9), -10.0);
        assert_eq!(tool_penalty(70.0), -30.0);
        assert_eq!(tool_penalty(f64::NAN), 0.0);
    }

    #[test]
    fn assistance_scales_penalty() {
        assert_eq!(scaled_penalty(90.0, AiAssistanceLevel::None), 0.0);
        assert_eq!(scaled_penalty(90.0, AiAssistanceLevel::Low), -15.0);
        assert_eq!(scaled_penalty(90.0, AiAssistanceLevel::High), -30.0);
        assert_eq!(AiAssistanceLevel::default(), AiAssistanceLevel::Medium);
    }

    #[test]
    fn default_level_applies_bands_unscaled() {
        let level = AiAssistanceLevel::default();
        for share in [0.0, 29.9, 30.0, 50.0, 69.9, 70.0, 100.0] {
            assert_eq!(scaled_penalty(share, level), tool_penalty(share));
        }
        assert_eq!(scaled_penalty(50.0, level), -10.0);
        assert_eq!(scaled_penalty(85.0, level), -30.0);
    }
}
