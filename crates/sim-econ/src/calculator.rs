//! Base KPI calculator: the weighted-score engine strategy.

use crate::accounting::CAPITAL_SHARE_OF_BUDGET;
use crate::derive::{derive_bundle, DerivationInputs};
use crate::events::calculate_event_impact;
use crate::market::{cost_rate, market_share, revenue_multiplier};
use crate::scoring::{compute_mix_scores, effective_score_factor};
use crate::EconError;
use sim_core::{validate_budget, validate_context, validate_decision};
use sim_core::{KpiBundle, MarketContext, MarketEvent, MarketingMixDecision};
use tracing::{debug, trace};

/// Everything the base calculator reads for one product in one round.
#[derive(Clone, Debug)]
pub struct KpiInputs<'a> {
    pub decision: &'a MarketingMixDecision,
    pub events: &'a [MarketEvent],
    pub budget: f64,
    pub total_teams: u32,
    pub previous_accumulated_profit: Option<f64>,
    pub context: Option<&'a MarketContext>,
    /// Sector average margin in percent.
    pub sector_average_margin: Option<f64>,
}

/// Compute the base KPI bundle for one decision.
///
/// Errors only on contract violations (negative or non-finite money);
/// every degenerate path resolves to 0 or a neutral default.
pub fn calculate_kpis(inputs: &KpiInputs<'_>) -> Result<KpiBundle, EconError> {
    validate_decision(inputs.decision)?;
    validate_budget(inputs.budget)?;
    if let Some(ctx) = inputs.context {
        validate_context(ctx)?;
    }
    let previous = inputs.previous_accumulated_profit.unwrap_or(0.0);
    if !previous.is_finite() {
        return Err(EconError::NonFinite);
    }

    let scores = compute_mix_scores(inputs.decision);
    let factor = effective_score_factor(&scores);
    let multiplier = revenue_multiplier(inputs.context);
    let events = calculate_event_impact(inputs.events);
    trace!(
        factor,
        multiplier,
        event_multiplier = events.multiplier,
        "base revenue drivers"
    );

    let revenue = inputs.budget * factor * multiplier * events.multiplier;
    let costs = inputs.budget * cost_rate(inputs.decision, inputs.sector_average_margin);
    let share = market_share(revenue, inputs.budget, inputs.context, inputs.total_teams);

    let bundle = derive_bundle(&DerivationInputs {
        revenue,
        costs,
        market_share: share,
        scores,
        price: inputs.decision.price,
        target_consumers: inputs.context.and_then(|c| c.target_consumers),
        capital_stock: inputs.budget * CAPITAL_SHARE_OF_BUDGET,
        previous_accumulated_profit: previous,
    });
    debug!(
        revenue = bundle.revenue,
        costs = bundle.costs,
        roi = bundle.roi,
        share = bundle.market_share,
        "base kpis computed"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use sim_core::*;
    use std::collections::BTreeSet;

    fn decision() -> MarketingMixDecision {
        MarketingMixDecision {
            product_quality: ProductQuality::Medium,
            features: FeatureTier::Intermediate,
            brand_positioning: BrandPositioning::Mainstream,
            price_strategy: PriceStrategy::Competitive,
            price: 80.0,
            channels: BTreeSet::from([DistributionChannel::Retail, DistributionChannel::Online]),
            coverage: Coverage::Regional,
            promotion_mix: BTreeSet::from([PromotionTag::SocialMedia, PromotionTag::Advertising]),
            promotion_intensity: PromotionIntensity::Medium,
            promotion_budgets: None,
            estimated_cost: 20_000.0,
            submitted_at: None,
        }
    }

    fn inputs<'a>(
        d: &'a MarketingMixDecision,
        events: &'a [MarketEvent],
        budget: f64,
    ) -> KpiInputs<'a> {
        KpiInputs {
            decision: d,
            events,
            budget,
            total_teams: 5,
            previous_accumulated_profit: None,
            context: None,
            sector_average_margin: None,
        }
    }

    #[test]
    fn reference_decision() {
        let d = decision();
        let k = calculate_kpis(&inputs(&d, &[], 100_000.0)).unwrap();
        // product 72, price 95, place 66, promotion 60 -> overall 73.55
        assert_relative_eq!(k.scores.product, 72.0);
        assert_relative_eq!(k.scores.price, 95.0);
        assert_relative_eq!(k.scores.place, 66.0);
        assert_relative_eq!(k.scores.promotion, 60.0);
        let expected_revenue = 100_000.0 * 0.7355f64.powf(1.2) * 1.8;
        assert_relative_eq!(k.revenue, expected_revenue, max_relative = 1e-12);
        // 0.65 + 0.03 + 0.02 + 0.02 + 0.02
        assert_relative_eq!(k.costs, 74_000.0, max_relative = 1e-12);
        assert_relative_eq!(k.profit, k.revenue - k.costs);
        assert!(k.accounting.balance_gap().abs() < 0.01);
    }

    #[test]
    fn zero_budget_is_degenerate_not_an_error() {
        let d = decision();
        let k = calculate_kpis(&inputs(&d, &[], 0.0)).unwrap();
        assert_eq!(k.revenue, 0.0);
        assert_eq!(k.roi, 0.0);
        assert_eq!(k.market_share, crate::market::MIN_MARKET_SHARE);
    }

    #[test]
    fn negative_inputs_propagate() {
        let mut d = decision();
        assert!(calculate_kpis(&inputs(&d, &[], -1.0)).is_err());
        d.price = -5.0;
        assert!(matches!(
            calculate_kpis(&inputs(&d, &[], 1_000.0)),
            Err(EconError::Validation(_))
        ));
    }

    #[test]
    fn negative_events_reduce_revenue() {
        let d = decision();
        let calm = calculate_kpis(&inputs(&d, &[], 100_000.0)).unwrap();
        let crisis = [MarketEvent {
            title: "Recessão".into(),
            category: EventCategory::Economic,
            severity: Severity::High,
            active: true,
        }];
        let hit = calculate_kpis(&inputs(&d, &crisis, 100_000.0)).unwrap();
        assert_relative_eq!(hit.revenue, calm.revenue * 0.925, max_relative = 1e-12);
    }

    #[test]
    fn costs_capped_at_95_percent() {
        let mut d = decision();
        d.product_quality = ProductQuality::Premium;
        d.features = FeatureTier::Complete;
        d.coverage = Coverage::International;
        d.promotion_intensity = PromotionIntensity::VeryHigh;
        let mut i = inputs(&d, &[], 100_000.0);
        i.sector_average_margin = Some(10.0);
        let k = calculate_kpis(&i).unwrap();
        assert_relative_eq!(k.costs, 95_000.0, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn bounds_hold(budget in 0.0f64..2_000_000.0,
                       price in 0.0f64..5_000.0,
                       teams in 0u32..30,
                       growth in -30.0f64..30.0) {
            let mut d = decision();
            d.price = price;
            let ctx = MarketContext { market_growth_rate: Some(growth), ..Default::default() };
            let mut i = inputs(&d, &[], budget);
            i.total_teams = teams;
            i.context = Some(&ctx);
            let k = calculate_kpis(&i).unwrap();
            prop_assert!(k.is_finite());
            prop_assert!((-100.0..=100.0).contains(&k.nps));
            prop_assert!((0.0..=100.0).contains(&k.brand_perception));
            prop_assert!((0.0..=100.0).contains(&k.customer_satisfaction));
            prop_assert!((0.0..=100.0).contains(&k.customer_loyalty));
            prop_assert!((0.5..=45.0).contains(&k.market_share));
            prop_assert!(k.accounting.balance_gap().abs() < 0.01);
        }
    }
}
