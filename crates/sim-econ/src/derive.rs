//! KPI derivation shared by both engine strategies and every adjustment pass.
//!
//! `recompute_dependent_kpis` is the only place revenue/cost-dependent KPIs
//! are computed. Every pass that moves revenue or costs goes through it.

use crate::accounting::{derive_accounting, net_revenue, COGS_SHARE, MARKETING_EXPENSE_SHARE};
use crate::safe_div;
use sim_core::{KpiBundle, MixScores};

/// Inputs for building a full bundle once revenue and costs are known.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivationInputs {
    pub revenue: f64,
    pub costs: f64,
    pub market_share: f64,
    pub scores: MixScores,
    pub price: f64,
    pub target_consumers: Option<u64>,
    pub capital_stock: f64,
    pub previous_accumulated_profit: f64,
}

pub fn brand_perception(s: &MixScores) -> f64 {
    (0.40 * s.product + 0.10 * s.price + 0.15 * s.place + 0.35 * s.promotion).clamp(0.0, 100.0)
}

pub fn customer_satisfaction(s: &MixScores) -> f64 {
    (0.45 * s.product + 0.30 * s.price + 0.20 * s.place + 0.05 * s.promotion).clamp(0.0, 100.0)
}

pub fn customer_loyalty(s: &MixScores) -> f64 {
    (0.35 * s.product + 0.25 * s.price + 0.15 * s.place + 0.25 * s.promotion).clamp(0.0, 100.0)
}

/// Conversion rate in percent, [0.1, 15].
pub fn conversion_rate(promotion_score: f64, brand: f64) -> f64 {
    (0.5 + 4.5 * promotion_score / 100.0 + 3.0 * brand / 100.0).clamp(0.1, 15.0)
}

/// Average days from first contact to purchase, [5, 60].
pub fn average_conversion_days(promotion_score: f64, brand: f64) -> f64 {
    (45.0 - 0.2 * promotion_score - 0.1 * brand).clamp(5.0, 60.0)
}

/// Net promoter score in [-100, 100].
pub fn net_promoter_score(satisfaction: f64, loyalty: f64) -> f64 {
    (2.0 * satisfaction - 100.0 + 0.4 * (loyalty - 50.0)).clamp(-100.0, 100.0)
}

/// Customers served: revenue over price, capped by the reachable consumer base.
pub fn customer_count(
    revenue: f64,
    price: f64,
    target_consumers: Option<u64>,
    market_share: f64,
) -> f64 {
    let served = safe_div(revenue, price).max(0.0).floor();
    match target_consumers {
        Some(target) => {
            let reachable = (target as f64 * market_share / 100.0).max(0.0).floor();
            served.min(reachable)
        }
        None => served,
    }
}

/// Lifetime value: ticket x purchase frequency x lifespan x contribution margin.
pub fn lifetime_value(average_ticket: f64, loyalty: f64, contribution_margin: f64) -> f64 {
    let frequency = 1.0 + loyalty / 50.0;
    let lifespan_years = 1.0 + loyalty / 25.0;
    average_ticket * frequency * lifespan_years * contribution_margin.max(0.0) / 100.0
}

/// Re-derive every KPI that depends on revenue or costs.
///
/// Customers, perception scores and mix scores are carried over; profit,
/// margin, ROI, gross/net revenue, contribution margin, CAC, ticket, LTV,
/// LTV/CAC and the accounting statement are rebuilt. Pure: calling it twice
/// with the same revenue and costs yields the same bundle.
pub fn recompute_dependent_kpis(bundle: &KpiBundle, revenue: f64, costs: f64) -> KpiBundle {
    let mut out = bundle.clone();
    out.revenue = revenue;
    out.costs = costs;
    out.profit = revenue - costs;
    out.margin = safe_div(out.profit, revenue) * 100.0;
    out.roi = safe_div(out.profit, costs) * 100.0;
    out.gross_revenue = revenue;
    out.net_revenue = net_revenue(revenue);
    out.contribution_margin = safe_div(revenue - costs * COGS_SHARE, revenue) * 100.0;
    out.cac = safe_div(costs * MARKETING_EXPENSE_SHARE, out.customers);
    out.average_ticket = safe_div(revenue, out.customers);
    out.ltv = lifetime_value(out.average_ticket, out.customer_loyalty, out.contribution_margin);
    out.ltv_to_cac_ratio = safe_div(out.ltv, out.cac);
    out.accounting = derive_accounting(
        revenue,
        costs,
        bundle.accounting.capital_stock,
        bundle.accounting.previous_accumulated_profit,
    );
    out
}

/// Build a complete bundle from revenue, costs, share and mix scores.
pub fn derive_bundle(inputs: &DerivationInputs) -> KpiBundle {
    let s = &inputs.scores;
    let brand = brand_perception(s);
    let satisfaction = customer_satisfaction(s);
    let loyalty = customer_loyalty(s);
    let seed = KpiBundle {
        market_share: inputs.market_share,
        brand_perception: brand,
        customer_satisfaction: satisfaction,
        customer_loyalty: loyalty,
        conversion_rate: conversion_rate(s.promotion, brand),
        nps: net_promoter_score(satisfaction, loyalty),
        average_conversion_days: average_conversion_days(s.promotion, brand),
        customers: customer_count(
            inputs.revenue,
            inputs.price,
            inputs.target_consumers,
            inputs.market_share,
        ),
        scores: *s,
        accounting: sim_core::AccountingStatement {
            capital_stock: inputs.capital_stock,
            previous_accumulated_profit: inputs.previous_accumulated_profit,
            ..Default::default()
        },
        ..Default::default()
    };
    recompute_dependent_kpis(&seed, inputs.revenue, inputs.costs)
}
