//! Consolidation of per-product bundles into one team bundle.

use crate::derive::recompute_dependent_kpis;
use serde::{Deserialize, Serialize};
use sim_core::{AccountingStatement, KpiBundle, MixScores};

/// One product's bundle together with the budget allocated to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    pub product_id: String,
    pub budget: f64,
    pub kpis: KpiBundle,
}

/// Budget-proportional weights, or equal weights when the total budget is not positive.
pub fn consolidation_weights(budgets: &[f64]) -> Vec<f64> {
    if budgets.is_empty() {
        return Vec::new();
    }
    let total: f64 = budgets.iter().map(|b| b.max(0.0)).sum();
    if total <= 0.0 || !total.is_finite() {
        let equal = 1.0 / budgets.len() as f64;
        return vec![equal; budgets.len()];
    }
    budgets.iter().map(|b| b.max(0.0) / total).collect()
}

/// Merge per-product bundles into one team bundle.
///
/// Revenue, costs, customers, paid-in capital and previous accumulated profit
/// are summed; share, perception, conversion, NPS and mix scores are
/// budget-weighted. Everything that depends on revenue or costs (margin,
/// ROI, CAC, ticket, LTV from the weighted loyalty, LTV/CAC and the whole
/// statement, taxed at team level) then comes from
/// [`recompute_dependent_kpis`], so the result is a fixed point of it.
/// Returns `None` for an empty product set.
pub fn calculate_consolidated_results(products: &[ProductResult]) -> Option<KpiBundle> {
    if products.is_empty() {
        return None;
    }
    let budgets: Vec<f64> = products.iter().map(|p| p.budget).collect();
    let weights = consolidation_weights(&budgets);
    let weighted = |f: fn(&KpiBundle) -> f64| -> f64 {
        products
            .iter()
            .zip(&weights)
            .map(|(p, w)| f(&p.kpis) * w)
            .sum()
    };
    let total = |f: fn(&KpiBundle) -> f64| -> f64 { products.iter().map(|p| f(&p.kpis)).sum() };

    let seed = KpiBundle {
        market_share: weighted(|k| k.market_share),
        brand_perception: weighted(|k| k.brand_perception),
        customer_satisfaction: weighted(|k| k.customer_satisfaction),
        customer_loyalty: weighted(|k| k.customer_loyalty),
        conversion_rate: weighted(|k| k.conversion_rate),
        nps: weighted(|k| k.nps).clamp(-100.0, 100.0),
        average_conversion_days: weighted(|k| k.average_conversion_days),
        customers: total(|k| k.customers),
        scores: MixScores {
            product: weighted(|k| k.scores.product),
            price: weighted(|k| k.scores.price),
            place: weighted(|k| k.scores.place),
            promotion: weighted(|k| k.scores.promotion),
        },
        accounting: AccountingStatement {
            capital_stock: total(|k| k.accounting.capital_stock),
            previous_accumulated_profit: total(|k| k.accounting.previous_accumulated_profit),
            ..Default::default()
        },
        ..Default::default()
    };
    Some(recompute_dependent_kpis(
        &seed,
        total(|k| k.revenue),
        total(|k| k.costs),
    ))
}
