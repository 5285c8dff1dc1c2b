//! Marketing-mix sub-scores from categorical tier tables.
//!
//! Every table is an exhaustive `match` over the tier enum; `Unknown` tags
//! earn no bonus and fall through to the base score.

use sim_core::{
    BrandPositioning, Coverage, FeatureTier, MarketingMixDecision, MixScores, PriceStrategy,
    ProductQuality, PromotionIntensity,
};

const PRODUCT_BASE: f64 = 30.0;
const PRICE_BASE: f64 = 40.0;
const PLACE_BASE: f64 = 30.0;
const PROMOTION_BASE: f64 = 25.0;

const PRICE_COHERENCE_BONUS: f64 = 20.0;
const PRICED_BONUS: f64 = 10.0;
const PER_CHANNEL_BONUS: f64 = 8.0;
const MAX_CHANNELS_COUNTED: usize = 4;
const PER_PROMOTION_TAG_BONUS: f64 = 5.0;
const MAX_PROMOTION_TAGS_COUNTED: usize = 5;
const BUDGET_ALLOCATED_BONUS: f64 = 10.0;

const SCORE_CAP: f64 = 100.0;

fn quality_bonus(q: ProductQuality) -> f64 {
    match q {
        ProductQuality::Basic => 10.0,
        ProductQuality::Medium => 25.0,
        ProductQuality::Premium => 40.0,
        ProductQuality::Unknown => 0.0,
    }
}

fn feature_bonus(f: FeatureTier) -> f64 {
    match f {
        FeatureTier::Basic => 5.0,
        FeatureTier::Intermediate => 12.0,
        FeatureTier::Complete => 20.0,
        FeatureTier::Unknown => 0.0,
    }
}

fn positioning_bonus(b: BrandPositioning) -> f64 {
    match b {
        BrandPositioning::Economy => 2.0,
        BrandPositioning::Mainstream => 5.0,
        BrandPositioning::Premium => 8.0,
        BrandPositioning::Luxury => 10.0,
        BrandPositioning::Unknown => 0.0,
    }
}

fn strategy_bonus(s: PriceStrategy) -> f64 {
    match s {
        PriceStrategy::Penetration => 20.0,
        PriceStrategy::Competitive => 25.0,
        PriceStrategy::Value => 22.0,
        PriceStrategy::Premium => 15.0,
        PriceStrategy::Skimming => 10.0,
        PriceStrategy::Unknown => 0.0,
    }
}

/// Whether the price strategy fits the product's quality tier.
pub fn price_fits_quality(strategy: PriceStrategy, quality: ProductQuality) -> bool {
    use PriceStrategy as S;
    use ProductQuality as Q;
    matches!(
        (strategy, quality),
        (S::Premium | S::Skimming, Q::Premium)
            | (S::Penetration | S::Competitive, Q::Basic)
            | (S::Competitive | S::Value, Q::Medium)
    )
}

fn coverage_bonus(c: Coverage) -> f64 {
    match c {
        Coverage::Local => 10.0,
        Coverage::Regional => 20.0,
        Coverage::National => 30.0,
        Coverage::International => 35.0,
        Coverage::Unknown => 0.0,
    }
}

fn intensity_bonus(i: PromotionIntensity) -> f64 {
    match i {
        PromotionIntensity::Low => 10.0,
        PromotionIntensity::Medium => 25.0,
        PromotionIntensity::High => 35.0,
        PromotionIntensity::VeryHigh => 40.0,
        PromotionIntensity::Unknown => 0.0,
    }
}

/// Base plus quality, feature and positioning bonuses, capped at 100.
pub fn product_score(d: &MarketingMixDecision) -> f64 {
    (PRODUCT_BASE
        + quality_bonus(d.product_quality)
        + feature_bonus(d.features)
        + positioning_bonus(d.brand_positioning))
    .min(SCORE_CAP)
}

/// Strategy bonus, plus a bonus when the strategy fits the quality tier
/// and another when a price was set.
pub fn price_score(d: &MarketingMixDecision) -> f64 {
    let mut score = PRICE_BASE + strategy_bonus(d.price_strategy);
    if price_fits_quality(d.price_strategy, d.product_quality) {
        score += PRICE_COHERENCE_BONUS;
    }
    if d.price > 0.0 {
        score += PRICED_BONUS;
    }
    score.min(SCORE_CAP)
}

/// Coverage bonus plus a per-channel bonus for at most four known channels.
pub fn place_score(d: &MarketingMixDecision) -> f64 {
    let channels = d.known_channel_count().min(MAX_CHANNELS_COUNTED) as f64;
    (PLACE_BASE + coverage_bonus(d.coverage) + channels * PER_CHANNEL_BONUS).min(SCORE_CAP)
}

/// Intensity bonus, up to five known promotion tags, and a bonus when any
/// promotion budget is allocated.
pub fn promotion_score(d: &MarketingMixDecision) -> f64 {
    let tags = d.known_promotion_count().min(MAX_PROMOTION_TAGS_COUNTED) as f64;
    let mut score =
        PROMOTION_BASE + intensity_bonus(d.promotion_intensity) + tags * PER_PROMOTION_TAG_BONUS;
    if d.allocated_promotion_budget() > 0.0 {
        score += BUDGET_ALLOCATED_BONUS;
    }
    score.min(SCORE_CAP)
}

/// The four 0-100 sub-scores of a decision.
pub fn compute_mix_scores(d: &MarketingMixDecision) -> MixScores {
    MixScores {
        product: product_score(d),
        price: price_score(d),
        place: place_score(d),
        promotion: promotion_score(d),
    }
}

/// Weighted overall score in [0, 100].
pub fn overall_score(s: &MixScores) -> f64 {
    0.30 * s.product + 0.25 * s.price + 0.20 * s.place + 0.25 * s.promotion
}

/// Overall score with diminishing returns applied: (overall/100)^1.2.
pub fn effective_score_factor(s: &MixScores) -> f64 {
    (overall_score(s) / 100.0).clamp(0.0, 1.0).powf(1.2)
}
