//! Explanatory outputs: alignment results and market-simulation audit data.

use crate::market::{EventCategory, Severity};
use serde::{Deserialize, Serialize};

/// Signed KPI deltas in percent (-3.0 = -3%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiModifiers {
    pub revenue: f64,
    pub profit: f64,
    pub market_share: f64,
}

/// A single misalignment found by one analyzer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlignmentIssue {
    pub description: String,
    /// Points deducted from the analyzer score (negative).
    pub impact: f64,
}

/// Score and findings of one strategic tool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolAlignment {
    pub score: f64,
    pub issues: Vec<AlignmentIssue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltySource {
    Swot,
    Porter,
    Bcg,
    Pestel,
    AiContent,
}

/// Flattened penalty entry for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub source: PenaltySource,
    pub description: String,
    pub impact: f64,
}

/// Consistency between a team's analyses and its marketing decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// Final score in [0, 100].
    pub overall_score: f64,
    /// Share of the four tools meeting the substance bar, in [0, 100].
    pub completion_score: f64,
    pub swot: ToolAlignment,
    pub porter: ToolAlignment,
    pub bcg: ToolAlignment,
    pub pestel: ToolAlignment,
    /// Sum of AI-authorship penalties (<= 0).
    pub ai_penalty: f64,
    pub modifiers: KpiModifiers,
    pub penalties: Vec<Penalty>,
}

/// One additive, labelled contribution to the simulated outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BreakdownComponent {
    pub label: String,
    pub delta_revenue: f64,
    pub delta_profit: f64,
    pub delta_market_share_points: f64,
    pub explanation: String,
}

/// Synthesized competitor reaction to the team's previous-round behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitorResponse {
    /// Fractional change applied to the reference price (-0.1 = cut 10%).
    pub price_adjustment: f64,
    /// Fractional change applied to the reference promotion spend.
    pub promo_adjustment: f64,
    pub reference_price: f64,
    pub reference_promo_spend: f64,
    pub explanation: String,
}

/// Multipliers contributed by one active event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    pub title: String,
    pub category: EventCategory,
    pub severity: Severity,
    pub revenue_multiplier: f64,
    pub cost_multiplier: f64,
    pub demand_multiplier: f64,
}

/// Reference values stored after a simulated round and read back by the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundReference {
    pub team_price: f64,
    pub team_promo_spend: f64,
    #[serde(default)]
    pub competitor_reference_price: Option<f64>,
    #[serde(default)]
    pub competitor_reference_promo: Option<f64>,
}
