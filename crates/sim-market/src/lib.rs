#![deny(warnings)]

//! Market simulation engine: the breakdown/elasticity strategy.
//!
//! The outcome is a base revenue/cost estimate plus additive, labelled
//! components measured against a synthesized competitor reference:
//! - price: constant-elasticity demand response
//! - promotion: logarithmic saturation with carryover
//! - place: coverage tier and channel breadth
//! - product: quality and feature tiers, with a cost surcharge
//! - competitor: what the competitor's reaction took away or gave back
//! - events: active market events, multiplied together

pub mod competitor;
pub mod effects;
pub mod events;

use serde::{Deserialize, Serialize};
use sim_core::{
    validate_budget, validate_context, validate_decision, BreakdownComponent, CompetitorResponse,
    EventImpact, KpiBundle, MarketContext, MarketEvent, MarketingMixDecision, RoundReference,
    SectorCategory,
};
use sim_econ::accounting::CAPITAL_SHARE_OF_BUDGET;
use sim_econ::market::{base_cost_rate, base_share, market_adjustment};
use sim_econ::{compute_mix_scores, derive_bundle, DerivationInputs, EconError};
use tracing::{debug, trace};

/// Revenue a budget yields in a neutral market before mix effects.
pub const BASE_REVENUE_RATE: f64 = 1.3;
const MIN_MARKET_FACTOR: f64 = 0.5;
const MAX_MARKET_FACTOR: f64 = 1.5;
pub const MIN_MARKET_SHARE: f64 = 0.1;
pub const MAX_MARKET_SHARE: f64 = 60.0;

/// Everything the simulation reads for one product in one round.
#[derive(Clone, Debug)]
pub struct SimulationInputs<'a> {
    pub decision: &'a MarketingMixDecision,
    pub events: &'a [MarketEvent],
    pub budget: f64,
    pub total_teams: u32,
    pub context: Option<&'a MarketContext>,
    /// References stored by the team's previous simulated round.
    pub previous: Option<&'a RoundReference>,
    /// Sector average margin in percent.
    pub sector_average_margin: Option<f64>,
    pub previous_accumulated_profit: Option<f64>,
}

/// KPI bundle plus the audit trail explaining it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub kpis: KpiBundle,
    pub breakdown: Vec<BreakdownComponent>,
    pub competitor: CompetitorResponse,
    pub event_impacts: Vec<EventImpact>,
    /// References the next round reads back.
    pub next_reference: RoundReference,
}

struct Baseline {
    revenue: f64,
    cost: f64,
    share: f64,
}

impl Baseline {
    fn component(
        &self,
        label: &str,
        revenue_factor: f64,
        cost_factor: f64,
        share_factor: f64,
        explanation: String,
    ) -> BreakdownComponent {
        let delta_revenue = self.revenue * (revenue_factor - 1.0);
        let delta_cost = self.cost * (cost_factor - 1.0);
        BreakdownComponent {
            label: label.to_string(),
            delta_revenue,
            delta_profit: delta_revenue - delta_cost,
            delta_market_share_points: self.share * (share_factor - 1.0),
            explanation,
        }
    }
}

fn pct(factor: f64) -> f64 {
    (factor - 1.0) * 100.0
}

/// Simulate one product's round.
///
/// Errors only on contract violations (negative or non-finite money);
/// missing context and a missing previous round resolve to neutral values.
pub fn simulate(inputs: &SimulationInputs<'_>) -> Result<SimulationOutcome, EconError> {
    let d = inputs.decision;
    validate_decision(d)?;
    validate_budget(inputs.budget)?;
    if let Some(ctx) = inputs.context {
        validate_context(ctx)?;
    }
    let previous_profit = inputs.previous_accumulated_profit.unwrap_or(0.0);
    if !previous_profit.is_finite() {
        return Err(EconError::NonFinite);
    }

    let promo_spend = d.promotion_spend();
    let previous_promo = inputs.previous.map_or(0.0, |p| p.team_promo_spend);
    let reaction = competitor::respond(d.price, promo_spend, inputs.previous);
    let reference = &reaction.response;

    let sector = inputs
        .context
        .map(MarketContext::sector_category)
        .unwrap_or(SectorCategory::General);
    let elasticity = effects::elasticity(sector);

    let base = Baseline {
        revenue: inputs.budget
            * BASE_REVENUE_RATE
            * (1.0 + market_adjustment(inputs.context)).clamp(MIN_MARKET_FACTOR, MAX_MARKET_FACTOR),
        cost: inputs.budget * base_cost_rate(inputs.sector_average_margin),
        share: base_share(inputs.context, inputs.total_teams),
    };

    let price_before = effects::price_effect(d.price, reaction.baseline_price, elasticity)?;
    let price_after = effects::price_effect(d.price, reference.reference_price, elasticity)?;
    let promo_before =
        effects::promotion_effect(promo_spend, previous_promo, reaction.baseline_promo);
    let promo_after =
        effects::promotion_effect(promo_spend, previous_promo, reference.reference_promo_spend);
    let place = effects::place_effect(d);
    let product = effects::product_effect(d);
    let event_impacts = events::event_impacts(inputs.events);
    let ev = events::aggregate(&event_impacts);
    trace!(
        elasticity,
        price = price_before.revenue,
        promotion = promo_before,
        place,
        product = product.revenue,
        events = ev.revenue,
        "simulation effects"
    );

    // Difference between facing the reacted and the un-reacted reference.
    let promo_shift = promo_after - promo_before;
    let competitor_revenue = 1.0 + (price_after.revenue - price_before.revenue) + promo_shift;
    let competitor_demand = 1.0 + (price_after.demand - price_before.demand) + promo_shift;

    let breakdown = vec![
        base.component(
            "price",
            price_before.revenue,
            1.0,
            price_before.demand,
            format!(
                "Preço {:.2} frente à referência {:.2} (elasticidade {:.1}): receita {:+.1}%",
                d.price,
                reaction.baseline_price,
                elasticity,
                pct(price_before.revenue)
            ),
        ),
        base.component(
            "promotion",
            promo_before,
            1.0,
            promo_before,
            format!(
                "Investimento promocional {:.0} com {:.0}% de efeito residual: receita {:+.1}%",
                promo_spend,
                effects::PROMO_CARRYOVER * 100.0,
                pct(promo_before)
            ),
        ),
        base.component(
            "place",
            place,
            1.0,
            place,
            format!(
                "Cobertura e {} canal(is) de distribuição: receita {:+.1}%",
                d.known_channel_count(),
                pct(place)
            ),
        ),
        base.component(
            "product",
            product.revenue,
            product.cost,
            product.revenue,
            format!(
                "Qualidade e funcionalidades: receita {:+.1}%, custos {:+.1}%",
                pct(product.revenue),
                pct(product.cost)
            ),
        ),
        base.component(
            "competitor",
            competitor_revenue,
            1.0,
            competitor_demand,
            reference.explanation.clone(),
        ),
        base.component(
            "events",
            ev.revenue,
            ev.cost,
            ev.demand,
            format!(
                "{} evento(s) ativo(s): receita {:+.1}%, custos {:+.1}%",
                event_impacts.len(),
                pct(ev.revenue),
                pct(ev.cost)
            ),
        ),
    ];

    let revenue = (base.revenue + breakdown.iter().map(|c| c.delta_revenue).sum::<f64>()).max(0.0);
    let delta_cost: f64 = breakdown
        .iter()
        .map(|c| c.delta_revenue - c.delta_profit)
        .sum();
    let costs = (base.cost + delta_cost).max(0.0);
    let share_points: f64 = breakdown.iter().map(|c| c.delta_market_share_points).sum();
    let share = (base.share + share_points).clamp(MIN_MARKET_SHARE, MAX_MARKET_SHARE);
    let share = if share.is_finite() { share } else { MIN_MARKET_SHARE };

    let kpis = derive_bundle(&DerivationInputs {
        revenue,
        costs,
        market_share: share,
        scores: compute_mix_scores(d),
        price: d.price,
        target_consumers: inputs.context.and_then(|c| c.target_consumers),
        capital_stock: inputs.budget * CAPITAL_SHARE_OF_BUDGET,
        previous_accumulated_profit: previous_profit,
    });
    debug!(
        revenue = kpis.revenue,
        costs = kpis.costs,
        share = kpis.market_share,
        reference_price = reference.reference_price,
        "market simulation computed"
    );

    let next_reference = RoundReference {
        team_price: d.price,
        team_promo_spend: promo_spend,
        competitor_reference_price: Some(reference.reference_price)
            .filter(|v| competitor::is_usable_reference(*v)),
        competitor_reference_promo: Some(reference.reference_promo_spend)
            .filter(|v| competitor::is_usable_reference(*v)),
    };

    Ok(SimulationOutcome {
        kpis,
        breakdown,
        competitor: reaction.response,
        event_impacts,
        next_reference,
    })
}
