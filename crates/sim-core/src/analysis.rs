//! Strategic analyses authored by a team (SWOT, Porter, BCG, PESTEL).
//!
//! Each analysis carries the share of its content left unedited from AI
//! generation. Only the alignment scorer reads that signal.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    /// Percent (0-100) of content left unedited from AI generation.
    pub ai_content_percentage: f64,
}

/// One of Porter's five forces with its 1-10 score and a free-text note.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceAssessment {
    pub score: u8,
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorterAnalysis {
    pub rivalry: ForceAssessment,
    pub new_entrants: ForceAssessment,
    pub substitutes: ForceAssessment,
    pub buyer_power: ForceAssessment,
    pub supplier_power: ForceAssessment,
    pub ai_content_percentage: f64,
}

impl PorterAnalysis {
    pub fn forces(&self) -> [&ForceAssessment; 5] {
        [
            &self.rivalry,
            &self.new_entrants,
            &self.substitutes,
            &self.buyer_power,
            &self.supplier_power,
        ]
    }

    /// Mean of the five force scores.
    pub fn average_score(&self) -> f64 {
        let total: u32 = self.forces().iter().map(|f| u32::from(f.score)).sum();
        f64::from(total) / 5.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BcgQuadrant {
    Star,
    CashCow,
    QuestionMark,
    Dog,
    #[serde(other)]
    Unknown,
}

impl BcgQuadrant {
    /// Quadrant implied by growth (percent) and relative share figures.
    pub fn classify(market_growth: f64, relative_market_share: f64) -> Self {
        let high_growth = market_growth >= 10.0;
        let high_share = relative_market_share >= 1.0;
        match (high_growth, high_share) {
            (true, true) => BcgQuadrant::Star,
            (false, true) => BcgQuadrant::CashCow,
            (true, false) => BcgQuadrant::QuestionMark,
            (false, false) => BcgQuadrant::Dog,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BcgProduct {
    pub product_name: String,
    #[serde(default)]
    pub market_growth: f64,
    #[serde(default)]
    pub relative_market_share: f64,
    pub quadrant: BcgQuadrant,
    #[serde(default)]
    pub notes: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BcgAnalysis {
    pub products: Vec<BcgProduct>,
    pub ai_content_percentage: f64,
}

impl BcgAnalysis {
    pub fn count(&self, quadrant: BcgQuadrant) -> usize {
        self.products.iter().filter(|p| p.quadrant == quadrant).count()
    }

    pub fn has(&self, quadrant: BcgQuadrant) -> bool {
        self.products.iter().any(|p| p.quadrant == quadrant)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PestelAnalysis {
    pub political: Vec<String>,
    pub economic: Vec<String>,
    pub social: Vec<String>,
    pub technological: Vec<String>,
    pub environmental: Vec<String>,
    pub legal: Vec<String>,
    pub ai_content_percentage: f64,
}

impl PestelAnalysis {
    pub fn dimensions(&self) -> [&[String]; 6] {
        [
            self.political.as_slice(),
            self.economic.as_slice(),
            self.social.as_slice(),
            self.technological.as_slice(),
            self.environmental.as_slice(),
            self.legal.as_slice(),
        ]
    }

    pub fn total_items(&self) -> usize {
        self.dimensions().iter().map(|d| d.len()).sum()
    }
}

/// The four analyses of one team; any of them may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicAnalyses {
    pub swot: Option<SwotAnalysis>,
    pub porter: Option<PorterAnalysis>,
    pub bcg: Option<BcgAnalysis>,
    pub pestel: Option<PestelAnalysis>,
}

impl StrategicAnalyses {
    pub fn is_empty(&self) -> bool {
        self.swot.is_none() && self.porter.is_none() && self.bcg.is_none() && self.pestel.is_none()
    }
}

/// Case-insensitive check whether any item mentions any of the keywords.
pub fn mentions_any(items: &[String], keywords: &[&str]) -> bool {
    items.iter().any(|item| {
        let lower = item.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcg_classification_matches_matrix() {
        assert_eq!(BcgQuadrant::classify(15.0, 1.5), BcgQuadrant::Star);
        assert_eq!(BcgQuadrant::classify(3.0, 2.0), BcgQuadrant::CashCow);
        assert_eq!(BcgQuadrant::classify(12.0, 0.4), BcgQuadrant::QuestionMark);
        assert_eq!(BcgQuadrant::classify(2.0, 0.3), BcgQuadrant::Dog);
    }

    #[test]
    fn mentions_is_case_insensitive() {
        let items = vec!["Produto de QUALIDADE premium".to_string()];
        assert!(mentions_any(&items, &["qualidade"]));
        assert!(!mentions_any(&items, &["preço"]));
    }

    #[test]
    fn unknown_quadrant_deserializes() {
        let p: BcgProduct = serde_json::from_str(
            r#"{"product_name":"X","quadrant":"unicorn","notes":""}"#,
        )
        .unwrap();
        assert_eq!(p.quadrant, BcgQuadrant::Unknown);
    }
}
