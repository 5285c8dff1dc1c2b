#![deny(warnings)]

//! Strategic alignment scoring.
//!
//! Compares a team's SWOT, Porter, BCG and PESTEL analyses with its
//! marketing-mix decision and turns the result into KPI modifiers:
//! - completion: how many tools meet the substance bar
//! - analyzers: rule deductions per tool
//! - authorship: penalty for unedited AI-generated content
//! - modifiers: score bands mapped to revenue/profit/share deltas

pub mod analyzers;
pub mod authorship;
pub mod completion;
pub mod modifiers;

pub use authorship::AiAssistanceLevel;

use sim_core::{
    AlignmentResult, BcgAnalysis, MarketingMixDecision, Penalty, PenaltySource, PestelAnalysis,
    PorterAnalysis, StrategicAnalyses, SwotAnalysis, ToolAlignment,
};
use std::collections::HashSet;
use tracing::debug;

const COMPLETION_WEIGHT: f64 = 0.30;
const ANALYZER_WEIGHT: f64 = 0.70;

/// Everything the scorer reads for one team.
#[derive(Clone, Copy, Debug)]
pub struct AlignmentInputs<'a> {
    pub swot: Option<&'a SwotAnalysis>,
    pub porter: Option<&'a PorterAnalysis>,
    pub bcg: Option<&'a BcgAnalysis>,
    pub pestel: Option<&'a PestelAnalysis>,
    pub decision: &'a MarketingMixDecision,
    pub ai_assistance: AiAssistanceLevel,
}

impl<'a> AlignmentInputs<'a> {
    pub fn new(
        analyses: &'a StrategicAnalyses,
        decision: &'a MarketingMixDecision,
        ai_assistance: AiAssistanceLevel,
    ) -> Self {
        Self {
            swot: analyses.swot.as_ref(),
            porter: analyses.porter.as_ref(),
            bcg: analyses.bcg.as_ref(),
            pestel: analyses.pestel.as_ref(),
            decision,
            ai_assistance,
        }
    }
}

fn ai_penalties(inputs: &AlignmentInputs<'_>) -> Vec<Penalty> {
    let shares = [
        ("SWOT", inputs.swot.map(|a| a.ai_content_percentage)),
        ("Porter", inputs.porter.map(|a| a.ai_content_percentage)),
        ("BCG", inputs.bcg.map(|a| a.ai_content_percentage)),
        ("PESTEL", inputs.pestel.map(|a| a.ai_content_percentage)),
    ];
    shares
        .into_iter()
        .filter_map(|(tool, share)| {
            let share = share?;
            let impact = authorship::scaled_penalty(share, inputs.ai_assistance);
            (impact < 0.0).then(|| Penalty {
                source: PenaltySource::AiContent,
                description: format!("{tool}: {share:.0}% do conteúdo gerado por IA sem edição"),
                impact,
            })
        })
        .collect()
}

fn flatten(tools: [(PenaltySource, &ToolAlignment); 4], ai: Vec<Penalty>) -> Vec<Penalty> {
    let mut seen = HashSet::new();
    tools
        .into_iter()
        .flat_map(|(source, tool)| {
            tool.issues.iter().map(move |i| Penalty {
                source,
                description: i.description.clone(),
                impact: i.impact,
            })
        })
        .chain(ai)
        .filter(|p| seen.insert(p.description.clone()))
        .collect()
}

/// Score how consistently the analyses support the decision.
///
/// Missing analyses score 0 on their analyzer and never count towards
/// completion. The overall score is clamped to [0, 100].
///
/// Example:
/// ```
/// use sim_align::{score_alignment, AiAssistanceLevel, AlignmentInputs};
/// # use sim_core::*;
/// # let decision = MarketingMixDecision {
/// #     product_quality: ProductQuality::Medium, features: FeatureTier::Basic,
/// #     brand_positioning: BrandPositioning::Mainstream,
/// #     price_strategy: PriceStrategy::Competitive,
/// #     price: 80.0, channels: [DistributionChannel::Retail].into(), coverage: Coverage::Regional,
/// #     promotion_mix: Default::default(), promotion_intensity: PromotionIntensity::Medium,
/// #     promotion_budgets: None, estimated_cost: 0.0, submitted_at: None,
/// # };
/// let analyses = StrategicAnalyses::default();
/// let r = score_alignment(&AlignmentInputs::new(&analyses, &decision, AiAssistanceLevel::Medium));
/// assert_eq!(r.overall_score, 0.0);
/// assert_eq!(r.modifiers.revenue, -10.0);
/// ```
pub fn score_alignment(inputs: &AlignmentInputs<'_>) -> AlignmentResult {
    let d = inputs.decision;
    let swot = analyzers::analyze_swot(inputs.swot, d);
    let porter = analyzers::analyze_porter(inputs.porter, d);
    let bcg = analyzers::analyze_bcg(inputs.bcg, d);
    let pestel = analyzers::analyze_pestel(inputs.pestel, d);

    let completion =
        completion::completion_score(inputs.swot, inputs.porter, inputs.bcg, inputs.pestel);
    let mean = (swot.score + porter.score + bcg.score + pestel.score) / 4.0;
    let ai = ai_penalties(inputs);
    let ai_penalty: f64 = ai.iter().map(|p| p.impact).sum();

    let overall = (COMPLETION_WEIGHT * completion + ANALYZER_WEIGHT * mean + ai_penalty)
        .clamp(0.0, 100.0);
    let modifiers = modifiers::modifiers_for(overall);
    debug!(overall, completion, mean, ai_penalty, "alignment scored");

    let penalties = flatten(
        [
            (PenaltySource::Swot, &swot),
            (PenaltySource::Porter, &porter),
            (PenaltySource::Bcg, &bcg),
            (PenaltySource::Pestel, &pestel),
        ],
        ai,
    );

    AlignmentResult {
        overall_score: overall,
        completion_score: completion,
        swot,
        porter,
        bcg,
        pestel,
        ai_penalty,
        modifiers,
        penalties,
    }
}
