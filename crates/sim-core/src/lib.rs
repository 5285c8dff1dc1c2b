#![deny(warnings)]

//! Core domain models and invariants for the marketing round simulation.
//!
//! This crate defines the serializable types exchanged between the engines
//! and their collaborators, with validation helpers for the boundary that
//! constructs decision records.

pub mod analysis;
pub mod decision;
pub mod kpi;
pub mod market;
pub mod outcome;

pub use analysis::*;
pub use decision::*;
pub use kpi::*;
pub use market::*;
pub use outcome::*;

use thiserror::Error;

/// Validation errors for domain invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Numeric field must be finite.
    #[error("non-finite numeric value in {0}")]
    NonFinite(&'static str),
    /// Price, cost or budget must be non-negative.
    #[error("negative monetary value in {0}")]
    NegativeMoney(&'static str),
    /// A decision must distribute through at least one channel.
    #[error("decision has no distribution channel")]
    NoChannels,
    /// Porter force scores live in [1, 10].
    #[error("porter score {0} is out of range [1, 10]")]
    PorterScoreOutOfRange(u8),
    /// AI-content share must be a percentage.
    #[error("ai content percentage {0} is out of range [0, 100]")]
    AiPercentageOutOfRange(f64),
}

fn check_money(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeMoney(field));
    }
    Ok(())
}

/// Validate a marketing-mix decision.
pub fn validate_decision(d: &MarketingMixDecision) -> Result<(), ValidationError> {
    check_money(d.price, "price")?;
    check_money(d.estimated_cost, "estimated_cost")?;
    if d.channels.is_empty() {
        return Err(ValidationError::NoChannels);
    }
    if let Some(budgets) = &d.promotion_budgets {
        for value in budgets.values() {
            check_money(*value, "promotion_budgets")?;
        }
    }
    Ok(())
}

/// Validate a team budget.
pub fn validate_budget(budget: f64) -> Result<(), ValidationError> {
    check_money(budget, "budget")
}

/// Validate market context fields that are present.
pub fn validate_context(c: &MarketContext) -> Result<(), ValidationError> {
    if let Some(size) = c.market_size {
        check_money(size, "market_size")?;
    }
    if let Some(rate) = c.market_growth_rate {
        if !rate.is_finite() {
            return Err(ValidationError::NonFinite("market_growth_rate"));
        }
    }
    Ok(())
}

fn check_ai_percentage(pct: f64) -> Result<(), ValidationError> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(ValidationError::AiPercentageOutOfRange(pct));
    }
    Ok(())
}

/// Validate the strategic analyses that are present.
pub fn validate_analyses(a: &StrategicAnalyses) -> Result<(), ValidationError> {
    if let Some(swot) = &a.swot {
        check_ai_percentage(swot.ai_content_percentage)?;
    }
    if let Some(porter) = &a.porter {
        check_ai_percentage(porter.ai_content_percentage)?;
        for force in porter.forces() {
            if !(1..=10).contains(&force.score) {
                return Err(ValidationError::PorterScoreOutOfRange(force.score));
            }
        }
    }
    if let Some(bcg) = &a.bcg {
        check_ai_percentage(bcg.ai_content_percentage)?;
    }
    if let Some(pestel) = &a.pestel {
        check_ai_percentage(pestel.ai_content_percentage)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn decision(price: f64) -> MarketingMixDecision {
        MarketingMixDecision {
            product_quality: ProductQuality::Medium,
            features: FeatureTier::Intermediate,
            brand_positioning: BrandPositioning::Mainstream,
            price_strategy: PriceStrategy::Competitive,
            price,
            channels: BTreeSet::from([DistributionChannel::Retail]),
            coverage: Coverage::Regional,
            promotion_mix: BTreeSet::from([PromotionTag::SocialMedia]),
            promotion_intensity: PromotionIntensity::Medium,
            promotion_budgets: None,
            estimated_cost: 1_000.0,
            submitted_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    #[test]
    fn decision_parses_with_unknown_tags() {
        let json = r#"{
            "product_quality": "artisanal",
            "features": "complete",
            "brand_positioning": "premium",
            "price_strategy": "skimming",
            "price": 120.0,
            "channels": ["online", "teleport"],
            "coverage": "national",
            "promotion_mix": ["social_media"],
            "promotion_intensity": "high"
        }"#;
        let d: MarketingMixDecision = serde_json::from_str(json).unwrap();
        assert_eq!(d.product_quality, ProductQuality::Unknown);
        assert!(d.channels.contains(&DistributionChannel::Unknown));
        assert_eq!(d.known_channel_count(), 1);
        assert!(!d.is_submitted());
        validate_decision(&d).unwrap();
    }

    #[test]
    fn negative_price_is_rejected() {
        assert_eq!(
            validate_decision(&decision(-1.0)),
            Err(ValidationError::NegativeMoney("price"))
        );
        assert_eq!(
            validate_decision(&decision(f64::NAN)),
            Err(ValidationError::NonFinite("price"))
        );
    }

    #[test]
    fn empty_channels_are_rejected() {
        let mut d = decision(10.0);
        d.channels.clear();
        assert_eq!(validate_decision(&d), Err(ValidationError::NoChannels));
    }

    #[test]
    fn promotion_spend_prefers_budgets() {
        let mut d = decision(10.0);
        assert_eq!(d.promotion_spend(), 8_000.0);
        d.promotion_budgets = Some(
            [("tv".to_string(), 3_000.0), ("radio".to_string(), 500.0)].into(),
        );
        assert_eq!(d.promotion_spend(), 3_500.0);
    }

    #[test]
    fn porter_scores_are_bounded() {
        let mut a = StrategicAnalyses::default();
        a.porter = Some(PorterAnalysis::default());
        assert_eq!(
            validate_analyses(&a),
            Err(ValidationError::PorterScoreOutOfRange(0))
        );
    }

    #[test]
    fn sector_ids_map_to_categories() {
        assert_eq!(SectorCategory::from_sector_id("Alimentos"), SectorCategory::Essentials);
        assert_eq!(SectorCategory::from_sector_id("tecnologia"), SectorCategory::Technology);
        assert_eq!(SectorCategory::from_sector_id("moda_luxo"), SectorCategory::Luxury);
        assert_eq!(SectorCategory::from_sector_id("xyz"), SectorCategory::General);
        assert_eq!(MarketContext::default().sector_category(), SectorCategory::General);
    }

    #[test]
    fn market_players_never_zero() {
        let ctx = MarketContext::default();
        assert_eq!(ctx.market_players(0), 1);
        let ctx = MarketContext {
            number_of_competitors: Some(4),
            ..Default::default()
        };
        assert_eq!(ctx.market_players(5), 9);
    }

    proptest! {
        #[test]
        fn non_negative_prices_validate(price in 0.0f64..1_000_000.0,
                                        cost in 0.0f64..1_000_000.0) {
            let mut d = decision(price);
            d.estimated_cost = cost;
            prop_assert!(validate_decision(&d).is_ok());
        }

        #[test]
        fn severity_factor_in_range(idx in 0usize..5) {
            let s = [
                Severity::Low,
                Severity::Medium,
                Severity::High,
                Severity::Critical,
                Severity::Unknown,
            ][idx];
            prop_assert!((0.25..=1.0).contains(&s.factor()));
        }
    }
}
