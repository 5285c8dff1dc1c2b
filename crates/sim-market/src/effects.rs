//! Marketing-mix effects measured against the competitor reference.

use sim_core::{Coverage, FeatureTier, MarketingMixDecision, ProductQuality, SectorCategory};
use sim_econ::{demand_multiplier, EconError};

pub const MIN_DEMAND: f64 = 0.3;
pub const MAX_DEMAND: f64 = 3.0;
pub const MIN_PRICE_RATIO: f64 = 0.25;
pub const MAX_PRICE_RATIO: f64 = 4.0;

/// Weight of the previous round's spend still working this round.
pub const PROMO_CARRYOVER: f64 = 0.20;
const PROMO_SENSITIVITY: f64 = 0.18;
const MIN_PROMO_EFFECT: f64 = 0.6;
const MAX_PROMO_EFFECT: f64 = 1.8;

const CHANNEL_BONUS: f64 = 0.04;
const MAX_COUNTED_CHANNELS: usize = 4;

/// Price elasticity of demand for a sector.
pub fn elasticity(sector: SectorCategory) -> f64 {
    match sector {
        SectorCategory::Essentials => -0.8,
        SectorCategory::Retail => -1.5,
        SectorCategory::Technology => -1.2,
        SectorCategory::Luxury => -0.6,
        SectorCategory::Services => -1.0,
        SectorCategory::Industrial => -0.9,
        SectorCategory::General => -1.2,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceEffect {
    /// Units sold relative to pricing at the reference.
    pub demand: f64,
    /// Revenue relative to pricing at the reference: demand x price ratio.
    pub revenue: f64,
}

/// Constant-elasticity response to the price/reference ratio.
///
/// A zero price or reference carries no signal and yields a neutral effect.
pub fn price_effect(price: f64, reference: f64, elasticity: f64) -> Result<PriceEffect, EconError> {
    let demand = demand_multiplier(price, reference, elasticity, MIN_DEMAND, MAX_DEMAND)?;
    let ratio = if price > 0.0 && reference > 0.0 {
        (price / reference).clamp(MIN_PRICE_RATIO, MAX_PRICE_RATIO)
    } else {
        1.0
    };
    Ok(PriceEffect {
        demand,
        revenue: demand * ratio,
    })
}

/// Logarithmic-saturation response to promotion spend with carryover.
///
/// Spending exactly the reference is neutral; each extra unit adds less.
/// A zero reference carries no signal and yields a neutral effect.
pub fn promotion_effect(spend: f64, previous_spend: f64, reference: f64) -> f64 {
    let effective = spend.max(0.0) + PROMO_CARRYOVER * previous_spend.max(0.0);
    if reference <= 0.0 || !reference.is_finite() {
        return 1.0;
    }
    let lift = (1.0 + effective / reference).ln() - std::f64::consts::LN_2;
    let m = 1.0 + PROMO_SENSITIVITY * lift;
    if m.is_finite() {
        m.clamp(MIN_PROMO_EFFECT, MAX_PROMO_EFFECT)
    } else {
        1.0
    }
}

fn coverage_factor(c: Coverage) -> f64 {
    match c {
        Coverage::Local => 0.85,
        Coverage::Regional | Coverage::Unknown => 1.0,
        Coverage::National => 1.15,
        Coverage::International => 1.25,
    }
}

/// Coverage tier plus a bonus per extra channel, counting at most four.
pub fn place_effect(d: &MarketingMixDecision) -> f64 {
    let channels = d.known_channel_count().clamp(1, MAX_COUNTED_CHANNELS);
    coverage_factor(d.coverage) + CHANNEL_BONUS * (channels - 1) as f64
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProductEffect {
    pub revenue: f64,
    pub cost: f64,
}

/// Quality x feature tier lookup for revenue and for the cost surcharge.
pub fn product_effect(d: &MarketingMixDecision) -> ProductEffect {
    let (q_rev, q_cost) = match d.product_quality {
        ProductQuality::Basic => (0.90, 0.95),
        ProductQuality::Medium | ProductQuality::Unknown => (1.0, 1.0),
        ProductQuality::Premium => (1.15, 1.12),
    };
    let (f_rev, f_cost) = match d.features {
        FeatureTier::Basic => (0.95, 0.97),
        FeatureTier::Intermediate | FeatureTier::Unknown => (1.0, 1.0),
        FeatureTier::Complete => (1.08, 1.05),
    };
    ProductEffect {
        revenue: q_rev * f_rev,
        cost: q_cost * f_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use sim_core::{BrandPositioning, DistributionChannel, PriceStrategy, PromotionIntensity};
    use std::collections::BTreeSet;

    fn decision() -> MarketingMixDecision {
        MarketingMixDecision {
            product_quality: ProductQuality::Premium,
            features: FeatureTier::Complete,
            brand_positioning: BrandPositioning::Premium,
            price_strategy: PriceStrategy::Premium,
            price: 150.0,
            channels: BTreeSet::from([
                DistributionChannel::Direct,
                DistributionChannel::Retail,
                DistributionChannel::Online,
                DistributionChannel::Marketplace,
                DistributionChannel::Wholesale,
            ]),
            coverage: Coverage::National,
            promotion_mix: BTreeSet::new(),
            promotion_intensity: PromotionIntensity::High,
            promotion_budgets: None,
            estimated_cost: 0.0,
            submitted_at: None,
        }
    }

    #[test]
    fn price_at_reference_is_neutral() {
        let e = price_effect(50.0, 50.0, -1.5).unwrap();
        assert_eq!(
            e,
            PriceEffect {
                demand: 1.0,
                revenue: 1.0,
            }
        );
        let free = price_effect(0.0, 50.0, -1.5).unwrap();
        assert_eq!(free.revenue, 1.0);
    }

    #[test]
    fn undercutting_raises_demand() {
        let e = price_effect(80.0, 100.0, -1.5).unwrap();
        assert_relative_eq!(e.demand, 0.8f64.powf(-1.5), max_relative = 1e-12);
        assert_relative_eq!(e.revenue, 0.8f64.powf(-0.5), max_relative = 1e-12);
    }

    #[test]
    fn promotion_saturates() {
        assert_relative_eq!(promotion_effect(10_000.0, 0.0, 10_000.0), 1.0, epsilon = 1e-12);
        let double = promotion_effect(20_000.0, 0.0, 10_000.0) - 1.0;
        let quadruple = promotion_effect(40_000.0, 0.0, 10_000.0) - 1.0;
        assert!(double > 0.0);
        // per extra 10 000 spent
        assert!((quadruple - double) / 2.0 < double);
        assert_eq!(promotion_effect(0.0, 0.0, 0.0), 1.0);
    }

    #[test]
    fn zero_reference_is_neutral() {
        assert_eq!(promotion_effect(1.0, 0.0, 0.0), 1.0);
        assert_eq!(promotion_effect(50_000.0, 10_000.0, -0.0), 1.0);
    }

    #[test]
    fn carryover_helps() {
        assert!(promotion_effect(10_000.0, 10_000.0, 10_000.0) > 1.0);
    }

    #[test]
    fn place_counts_four_channels() {
        assert_relative_eq!(place_effect(&decision()), 1.15 + 0.12, max_relative = 1e-12);
    }

    #[test]
    fn product_tiers_multiply() {
        let p = product_effect(&decision());
        assert_relative_eq!(p.revenue, 1.15 * 1.08, max_relative = 1e-12);
        assert_relative_eq!(p.cost, 1.12 * 1.05, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn effects_stay_bounded(price in 0.0f64..10_000.0,
                                reference in 0.0f64..10_000.0,
                                spend in 0.0f64..1e6,
                                prev in 0.0f64..1e6,
                                promo_ref in 0.0f64..1e6) {
            let e = price_effect(price, reference, -1.2).unwrap();
            prop_assert!((MIN_DEMAND..=MAX_DEMAND).contains(&e.demand));
            prop_assert!(e.revenue.is_finite() && e.revenue > 0.0);
            let m = promotion_effect(spend, prev, promo_ref);
            prop_assert!((MIN_PROMO_EFFECT..=MAX_PROMO_EFFECT).contains(&m));
        }
    }
}
