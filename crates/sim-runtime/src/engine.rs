//! Interchangeable outcome engines.
//!
//! Both strategies take the same product input and return the same output
//! shape, so nothing downstream depends on which one ran.

use crate::round::{ProductInput, RoundContext};
use crate::RuntimeError;
use serde::{Deserialize, Serialize};
use sim_core::{BreakdownComponent, CompetitorResponse, EventImpact, KpiBundle, RoundReference};
use sim_econ::{calculate_kpis, KpiInputs};
use sim_market::{simulate, SimulationInputs};

/// Audit data only the market simulation produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationAudit {
    pub breakdown: Vec<BreakdownComponent>,
    pub competitor: CompetitorResponse,
    pub event_impacts: Vec<EventImpact>,
    pub next_reference: RoundReference,
}

/// Raw engine output for one product, before adjustment passes.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineOutput {
    pub kpis: KpiBundle,
    pub audit: Option<SimulationAudit>,
}

pub trait OutcomeEngine: Send + Sync {
    fn name(&self) -> &'static str;

    fn compute_outcome(
        &self,
        round: &RoundContext<'_>,
        product: &ProductInput,
    ) -> Result<EngineOutput, RuntimeError>;
}

/// Weighted-score engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct LegacyEngine;

impl OutcomeEngine for LegacyEngine {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn compute_outcome(
        &self,
        round: &RoundContext<'_>,
        product: &ProductInput,
    ) -> Result<EngineOutput, RuntimeError> {
        let kpis = calculate_kpis(&KpiInputs {
            decision: &product.decision,
            events: round.events,
            budget: product.budget,
            total_teams: round.total_teams,
            previous_accumulated_profit: product.previous_accumulated_profit,
            context: round.context,
            sector_average_margin: round.sector_average_margin,
        })?;
        Ok(EngineOutput { kpis, audit: None })
    }
}

/// Breakdown/elasticity engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarketSimulationEngine;

impl OutcomeEngine for MarketSimulationEngine {
    fn name(&self) -> &'static str {
        "market_simulation"
    }

    fn compute_outcome(
        &self,
        round: &RoundContext<'_>,
        product: &ProductInput,
    ) -> Result<EngineOutput, RuntimeError> {
        let out = simulate(&SimulationInputs {
            decision: &product.decision,
            events: round.events,
            budget: product.budget,
            total_teams: round.total_teams,
            context: round.context,
            previous: product.previous_reference.as_ref(),
            sector_average_margin: round.sector_average_margin,
            previous_accumulated_profit: product.previous_accumulated_profit,
        })?;
        Ok(EngineOutput {
            kpis: out.kpis,
            audit: Some(SimulationAudit {
                breakdown: out.breakdown,
                competitor: out.competitor,
                event_impacts: out.event_impacts,
                next_reference: out.next_reference,
            }),
        })
    }
}

static LEGACY: LegacyEngine = LegacyEngine;
static MARKET_SIMULATION: MarketSimulationEngine = MarketSimulationEngine;

/// Strategy picked once per invocation by the surrounding system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStrategy {
    #[default]
    Legacy,
    MarketSimulation,
}

impl EngineStrategy {
    pub fn from_flag(market_simulation: bool) -> Self {
        if market_simulation {
            EngineStrategy::MarketSimulation
        } else {
            EngineStrategy::Legacy
        }
    }

    pub fn engine(self) -> &'static dyn OutcomeEngine {
        match self {
            EngineStrategy::Legacy => &LEGACY,
            EngineStrategy::MarketSimulation => &MARKET_SIMULATION,
        }
    }
}
