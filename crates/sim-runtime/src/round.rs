//! Per-team pipeline and parallel round processing.

use crate::config::EngineConfig;
use crate::engine::{EngineStrategy, OutcomeEngine, SimulationAudit};
use crate::RuntimeError;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sim_align::{score_alignment, AlignmentInputs};
use sim_core::{
    validate_analyses, AlignmentResult, KpiBundle, MarketContext, MarketEvent,
    MarketingMixDecision, RoundReference, StrategicAnalyses,
};
use sim_econ::{
    apply_alignment_penalties, apply_roi_clamp, apply_strategic_impacts,
    calculate_consolidated_results, EconError, ProductResult,
};
use tracing::{debug, info, warn};

/// One product's submitted decision and budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub product_id: String,
    pub decision: MarketingMixDecision,
    pub budget: f64,
    /// References stored by the previous simulated round, if any.
    #[serde(default)]
    pub previous_reference: Option<RoundReference>,
    #[serde(default)]
    pub previous_accumulated_profit: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRoundInput {
    pub team_id: String,
    pub products: Vec<ProductInput>,
    #[serde(default)]
    pub analyses: StrategicAnalyses,
}

impl TeamRoundInput {
    /// Carry this round's references and accumulated profit into the next.
    pub fn advance(&mut self, result: &TeamRoundResult) {
        for product in &mut self.products {
            let Some(outcome) = result
                .products
                .iter()
                .find(|o| o.product_id == product.product_id)
            else {
                continue;
            };
            product.previous_accumulated_profit = Some(outcome.kpis.accounting.accumulated_profit);
            if let Some(audit) = &outcome.audit {
                product.previous_reference = Some(audit.next_reference);
            }
        }
    }
}

/// Everything shared by all teams in a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundInput {
    pub round: u32,
    #[serde(default)]
    pub events: Vec<MarketEvent>,
    #[serde(default)]
    pub context: Option<MarketContext>,
    /// Sector average margin in percent.
    #[serde(default)]
    pub sector_average_margin: Option<f64>,
    pub teams: Vec<TeamRoundInput>,
}

impl RoundInput {
    pub fn context(&self) -> RoundContext<'_> {
        RoundContext {
            round: self.round,
            events: &self.events,
            context: self.context.as_ref(),
            total_teams: u32::try_from(self.teams.len()).unwrap_or(u32::MAX),
            sector_average_margin: self.sector_average_margin,
        }
    }
}

/// Borrowed view of the round-wide inputs an engine reads.
#[derive(Clone, Copy, Debug)]
pub struct RoundContext<'a> {
    pub round: u32,
    pub events: &'a [MarketEvent],
    pub context: Option<&'a MarketContext>,
    pub total_teams: u32,
    pub sector_average_margin: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductOutcome {
    pub product_id: String,
    pub budget: f64,
    pub kpis: KpiBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<SimulationAudit>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRoundResult {
    pub team_id: String,
    pub round: u32,
    pub engine: EngineStrategy,
    /// Consolidated team bundle.
    pub kpis: KpiBundle,
    pub products: Vec<ProductOutcome>,
    /// Alignment of the product holding the largest budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<AlignmentResult>,
}

fn process_product(
    config: &EngineConfig,
    engine: &dyn OutcomeEngine,
    round: &RoundContext<'_>,
    analyses: &StrategicAnalyses,
    product: &ProductInput,
) -> Result<ProductOutcome, RuntimeError> {
    if !product.decision.is_submitted() {
        return Err(RuntimeError::NotSubmitted(product.product_id.clone()));
    }
    let out = engine.compute_outcome(round, product)?;
    let mut kpis = out.kpis;

    if config.apply_strategic_impacts && !analyses.is_empty() {
        kpis = apply_strategic_impacts(&kpis, analyses);
    }
    kpis = apply_roi_clamp(&kpis, config.roi_cap_pct);

    let alignment = config.apply_alignment.then(|| {
        score_alignment(&AlignmentInputs::new(
            analyses,
            &product.decision,
            config.ai_assistance,
        ))
    });
    if let Some(a) = &alignment {
        kpis = apply_alignment_penalties(&kpis, a, config.roi_cap_pct);
    }

    debug!(
        product = %product.product_id,
        engine = engine.name(),
        revenue = kpis.revenue,
        roi = kpis.roi,
        "product outcome"
    );
    Ok(ProductOutcome {
        product_id: product.product_id.clone(),
        budget: product.budget,
        kpis,
        alignment,
        audit: out.audit,
    })
}

fn lead_product(products: &[ProductOutcome]) -> Option<&ProductOutcome> {
    products.iter().fold(None, |best, p| match best {
        Some(b) if b.budget >= p.budget => Some(b),
        _ => Some(p),
    })
}

/// Run one team through the engine, the adjustment passes and consolidation.
///
/// Per product: engine outcome, strategic impacts, ROI clamp, alignment
/// penalties (which end with the ROI clamp). The consolidated bundle is
/// clamped once more.
pub fn process_team(
    config: &EngineConfig,
    round: &RoundContext<'_>,
    team: &TeamRoundInput,
) -> Result<TeamRoundResult, RuntimeError> {
    validate_analyses(&team.analyses).map_err(EconError::from)?;
    let strategy = config.strategy();
    let engine = strategy.engine();
    let products = team
        .products
        .iter()
        .map(|p| process_product(config, engine, round, &team.analyses, p))
        .collect::<Result<Vec<_>, _>>()?;

    let per_product: Vec<ProductResult> = products
        .iter()
        .map(|p| ProductResult {
            product_id: p.product_id.clone(),
            budget: p.budget,
            kpis: p.kpis.clone(),
        })
        .collect();
    let consolidated = calculate_consolidated_results(&per_product)
        .ok_or_else(|| RuntimeError::NoProducts(team.team_id.clone()))?;
    let kpis = apply_roi_clamp(&consolidated, config.roi_cap_pct);
    let alignment = lead_product(&products).and_then(|p| p.alignment.clone());

    Ok(TeamRoundResult {
        team_id: team.team_id.clone(),
        round: round.round,
        engine: strategy,
        kpis,
        products,
        alignment,
    })
}

/// Process every team of a round in parallel. Results keep team order; a
/// failing team does not stop the others.
pub fn process_round(
    config: &EngineConfig,
    round: &RoundInput,
) -> Vec<Result<TeamRoundResult, RuntimeError>> {
    let ctx = round.context();
    info!(
        round = round.round,
        teams = round.teams.len(),
        engine = config.strategy().engine().name(),
        "processing round"
    );
    let results: Vec<_> = round
        .teams
        .par_iter()
        .map(|team| {
            let result = process_team(config, &ctx, team);
            if let Err(e) = &result {
                warn!(team = %team.team_id, error = %e, "team skipped");
            }
            result
        })
        .collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(round = round.round, ok = results.len() - failed, failed, "round processed");
    results
}
