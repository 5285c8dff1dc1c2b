//! Marketing-mix decision submitted by a team for one product in one round.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Product quality tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductQuality {
    Basic,
    Medium,
    Premium,
    /// Tag not recognised at the boundary; earns no bonus.
    #[serde(other)]
    Unknown,
}

/// Breadth of the product's feature set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureTier {
    Basic,
    Intermediate,
    Complete,
    #[serde(other)]
    Unknown,
}

/// Brand positioning chosen for the product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandPositioning {
    Economy,
    Mainstream,
    Premium,
    Luxury,
    #[serde(other)]
    Unknown,
}

/// Pricing strategy tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceStrategy {
    Penetration,
    Competitive,
    Value,
    Premium,
    Skimming,
    #[serde(other)]
    Unknown,
}

impl PriceStrategy {
    /// Strategies that price above the market.
    pub fn is_premium(self) -> bool {
        matches!(self, PriceStrategy::Premium | PriceStrategy::Skimming)
    }
}

/// Distribution channel tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionChannel {
    Direct,
    Retail,
    Wholesale,
    Online,
    Distributors,
    Marketplace,
    #[serde(other)]
    Unknown,
}

impl DistributionChannel {
    /// Channels that reach customers over the internet.
    pub fn is_digital(self) -> bool {
        matches!(
            self,
            DistributionChannel::Online | DistributionChannel::Marketplace
        )
    }
}

/// Geographic coverage of distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    Local,
    Regional,
    National,
    International,
    #[serde(other)]
    Unknown,
}

/// Promotion-mix tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionTag {
    Advertising,
    DigitalMarketing,
    SocialMedia,
    SalesPromotion,
    PublicRelations,
    PersonalSelling,
    DirectMarketing,
    Events,
    #[serde(other)]
    Unknown,
}

/// Promotion intensity tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionIntensity {
    Low,
    Medium,
    High,
    VeryHigh,
    #[serde(other)]
    Unknown,
}

/// One team's marketing-mix choices for one product in one round.
///
/// Immutable input to the engines once `submitted_at` is set; drafts are
/// filtered out by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketingMixDecision {
    pub product_quality: ProductQuality,
    pub features: FeatureTier,
    pub brand_positioning: BrandPositioning,
    pub price_strategy: PriceStrategy,
    /// Unit price (>= 0).
    pub price: f64,
    /// Non-empty set of channels.
    pub channels: BTreeSet<DistributionChannel>,
    pub coverage: Coverage,
    #[serde(default)]
    pub promotion_mix: BTreeSet<PromotionTag>,
    pub promotion_intensity: PromotionIntensity,
    /// Budget allocated per promotion channel id.
    #[serde(default)]
    pub promotion_budgets: Option<BTreeMap<String, f64>>,
    /// Team's own cost estimate (>= 0).
    #[serde(default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl MarketingMixDecision {
    /// Whether the decision left draft state.
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    /// Sum of explicit promotion budgets, if any were allocated.
    pub fn allocated_promotion_budget(&self) -> f64 {
        self.promotion_budgets
            .as_ref()
            .map(|b| b.values().filter(|v| v.is_finite()).sum())
            .unwrap_or(0.0)
    }

    /// Promotion spend for the round.
    ///
    /// Uses the allocated budgets when a map is present, otherwise a proxy
    /// derived from the intensity tier.
    pub fn promotion_spend(&self) -> f64 {
        if self.promotion_budgets.is_some() {
            return self.allocated_promotion_budget().max(0.0);
        }
        match self.promotion_intensity {
            PromotionIntensity::Low => 2_000.0,
            PromotionIntensity::Medium => 8_000.0,
            PromotionIntensity::High => 15_000.0,
            PromotionIntensity::VeryHigh => 25_000.0,
            PromotionIntensity::Unknown => 0.0,
        }
    }

    /// Whether any internet-facing channel is used.
    pub fn has_digital_channel(&self) -> bool {
        self.channels.iter().any(|c| c.is_digital())
    }

    /// Channels that map to a known tag.
    pub fn known_channel_count(&self) -> usize {
        self.channels
            .iter()
            .filter(|c| **c != DistributionChannel::Unknown)
            .count()
    }

    /// Promotion tags that map to a known tag.
    pub fn known_promotion_count(&self) -> usize {
        self.promotion_mix
            .iter()
            .filter(|t| **t != PromotionTag::Unknown)
            .count()
    }
}
