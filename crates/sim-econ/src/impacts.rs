//! Adjustment passes applied on top of an engine's KPI bundle.
//!
//! Each pass is a pure `KpiBundle -> KpiBundle` function. The caller chains
//! them explicitly; every pass that moves revenue or costs re-derives the
//! dependent KPIs through [`recompute_dependent_kpis`].

use crate::derive::recompute_dependent_kpis;
use crate::market::{MAX_MARKET_SHARE, MIN_MARKET_SHARE};
use serde::{Deserialize, Serialize};
use sim_core::{AlignmentResult, BcgQuadrant, KpiBundle, StrategicAnalyses};
use tracing::{debug, warn};

/// Policy ceiling for ROI, in percent.
pub const DEFAULT_ROI_CAP: f64 = 70.0;

const MIN_REVENUE_MODIFIER: f64 = 0.88;
const MAX_REVENUE_MODIFIER: f64 = 1.08;
const MIN_COST_MODIFIER: f64 = 0.94;
const MAX_COST_MODIFIER: f64 = 1.06;

/// Items per SWOT quadrant that still move the modifiers.
const MAX_COUNTED_ITEMS: usize = 5;

/// Revenue and cost multipliers derived from the strategic analyses.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategicModifiers {
    pub revenue: f64,
    pub cost: f64,
}

impl Default for StrategicModifiers {
    fn default() -> Self {
        Self {
            revenue: 1.0,
            cost: 1.0,
        }
    }
}

fn counted(items: &[String]) -> f64 {
    items.len().min(MAX_COUNTED_ITEMS) as f64
}

/// Count-based modifiers from the four analyses, each clamped to its policy range.
pub fn strategic_modifiers(analyses: &StrategicAnalyses) -> StrategicModifiers {
    let mut revenue = 0.0;
    let mut cost = 0.0;

    if let Some(swot) = &analyses.swot {
        revenue += 0.01 * counted(&swot.strengths) + 0.005 * counted(&swot.opportunities);
        revenue -= 0.01 * counted(&swot.weaknesses) + 0.005 * counted(&swot.threats);
        cost += 0.005 * counted(&swot.weaknesses);
    }

    if let Some(porter) = &analyses.porter {
        let pressure = porter.average_score();
        if pressure >= 7.0 {
            revenue -= 0.03;
            cost += 0.02;
        } else if pressure <= 4.0 {
            revenue += 0.03;
        }
    }

    if let Some(bcg) = &analyses.bcg {
        let stars = bcg.count(BcgQuadrant::Star) as f64;
        let cows = bcg.count(BcgQuadrant::CashCow) as f64;
        let dogs = bcg.count(BcgQuadrant::Dog) as f64;
        revenue += 0.02 * stars + 0.01 * cows - 0.02 * dogs;
        cost -= 0.01 * cows;
    }

    if let Some(pestel) = &analyses.pestel {
        if pestel.total_items() >= 12 {
            revenue += 0.02;
        }
        for dimension in [&pestel.political, &pestel.economic, &pestel.legal] {
            if !dimension.is_empty() {
                cost -= 0.005;
            }
        }
    }

    StrategicModifiers {
        revenue: (1.0 + revenue).clamp(MIN_REVENUE_MODIFIER, MAX_REVENUE_MODIFIER),
        cost: (1.0 + cost).clamp(MIN_COST_MODIFIER, MAX_COST_MODIFIER),
    }
}

/// Scale revenue and costs by the strategic modifiers and re-derive.
pub fn apply_strategic_impacts(kpis: &KpiBundle, analyses: &StrategicAnalyses) -> KpiBundle {
    let m = strategic_modifiers(analyses);
    debug!(revenue = m.revenue, cost = m.cost, "strategic modifiers");
    recompute_dependent_kpis(kpis, kpis.revenue * m.revenue, kpis.costs * m.cost)
}

/// Enforce the ROI ceiling by back-solving costs: costs = revenue / (1 + cap).
///
/// Bundles at or below the cap are returned unchanged.
pub fn apply_roi_clamp(kpis: &KpiBundle, cap_pct: f64) -> KpiBundle {
    if kpis.roi <= cap_pct || kpis.revenue <= 0.0 {
        return kpis.clone();
    }
    let costs = kpis.revenue / (1.0 + cap_pct / 100.0);
    warn!(roi = kpis.roi, cap = cap_pct, costs, "roi above policy cap, costs back-solved");
    recompute_dependent_kpis(kpis, kpis.revenue, costs)
}

/// Layer the alignment modifiers on top: revenue, then market share, then
/// profit, finishing with the ROI clamp.
///
/// Customers follow the applied share ratio, so a cap on the reachable
/// consumer base that held before still holds after.
pub fn apply_alignment_penalties(
    kpis: &KpiBundle,
    alignment: &AlignmentResult,
    cap_pct: f64,
) -> KpiBundle {
    let m = alignment.modifiers;

    let revenue = (kpis.revenue * (1.0 + m.revenue / 100.0)).max(0.0);
    let mut out = recompute_dependent_kpis(kpis, revenue, kpis.costs);

    // Stay inside the bounds of the engine that produced the share.
    let lo = MIN_MARKET_SHARE.min(kpis.market_share);
    let hi = MAX_MARKET_SHARE.max(kpis.market_share);
    out.market_share = (out.market_share * (1.0 + m.market_share / 100.0)).clamp(lo, hi);
    if kpis.market_share > 0.0 {
        out.customers = (out.customers * out.market_share / kpis.market_share).floor();
    }

    let profit_delta = out.profit.abs() * m.profit / 100.0;
    let costs = (out.costs - profit_delta).max(0.0);
    out = recompute_dependent_kpis(&out, out.revenue, costs);

    debug!(
        score = alignment.overall_score,
        revenue = out.revenue,
        profit = out.profit,
        "alignment modifiers applied"
    );
    apply_roi_clamp(&out, cap_pct)
}
