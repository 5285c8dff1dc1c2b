//! Market-context multipliers, cost rates and market share.

use sim_core::{
    CompetitionLevel, CompetitorStrength, Coverage, FeatureTier, MarketConcentration,
    MarketContext, MarketingMixDecision, ProductQuality, PromotionIntensity,
};

/// Starting point of the revenue multiplier before context adjustments.
pub const BASE_REVENUE_MULTIPLIER: f64 = 1.8;
pub const MIN_REVENUE_MULTIPLIER: f64 = 0.5;
pub const MAX_REVENUE_MULTIPLIER: f64 = 2.0;

/// Cost rate used when no sector margin is known.
pub const DEFAULT_COST_RATE: f64 = 0.65;
/// Costs never exceed this share of the budget.
pub const MAX_COST_RATE: f64 = 0.95;

pub const MIN_MARKET_SHARE: f64 = 0.5;
pub const MAX_MARKET_SHARE: f64 = 45.0;

fn growth_adjustment(rate: f64) -> f64 {
    (rate * 0.02).clamp(-0.20, 0.30)
}

fn competition_adjustment(level: CompetitionLevel) -> f64 {
    match level {
        CompetitionLevel::Low => 0.15,
        CompetitionLevel::Medium | CompetitionLevel::Unknown => 0.0,
        CompetitionLevel::High => -0.10,
        CompetitionLevel::VeryHigh => -0.20,
    }
}

fn competitor_count_adjustment(count: u32) -> f64 {
    match count {
        0..=2 => 0.10,
        3..=5 => 0.0,
        6..=10 => -0.05,
        _ => -0.10,
    }
}

fn concentration_adjustment(c: MarketConcentration) -> f64 {
    match c {
        MarketConcentration::Fragmented => 0.05,
        MarketConcentration::Moderate | MarketConcentration::Unknown => 0.0,
        MarketConcentration::Concentrated => -0.05,
        MarketConcentration::Monopolistic => -0.15,
    }
}

fn strength_adjustment(s: CompetitorStrength) -> f64 {
    match s {
        CompetitorStrength::Weak => 0.10,
        CompetitorStrength::Moderate | CompetitorStrength::Unknown => 0.0,
        CompetitorStrength::Strong => -0.10,
        CompetitorStrength::Dominant => -0.20,
    }
}

/// Sum of the individually bounded context adjustments. Missing fields add 0.
pub fn market_adjustment(ctx: Option<&MarketContext>) -> f64 {
    let Some(ctx) = ctx else {
        return 0.0;
    };
    let growth = ctx
        .market_growth_rate
        .filter(|r| r.is_finite())
        .map(growth_adjustment)
        .unwrap_or(0.0);
    let competition = ctx.competition_level.map(competition_adjustment).unwrap_or(0.0);
    let competitors = ctx
        .number_of_competitors
        .map(competitor_count_adjustment)
        .unwrap_or(0.0);
    let concentration = ctx
        .market_concentration
        .map(concentration_adjustment)
        .unwrap_or(0.0);
    let strength = ctx.competitor_strength.map(strength_adjustment).unwrap_or(0.0);
    growth + competition + competitors + concentration + strength
}

/// Composite revenue multiplier in [0.5, 2.0].
pub fn revenue_multiplier(ctx: Option<&MarketContext>) -> f64 {
    (BASE_REVENUE_MULTIPLIER + market_adjustment(ctx))
        .clamp(MIN_REVENUE_MULTIPLIER, MAX_REVENUE_MULTIPLIER)
}

/// Base cost rate: derived from the sector's average margin (percent) when
/// known, otherwise the default.
pub fn base_cost_rate(sector_average_margin: Option<f64>) -> f64 {
    match sector_average_margin {
        Some(m) if m.is_finite() => (1.0 - m / 100.0).clamp(0.30, 0.90),
        _ => DEFAULT_COST_RATE,
    }
}

fn quality_surcharge(q: ProductQuality) -> f64 {
    match q {
        ProductQuality::Basic | ProductQuality::Unknown => 0.0,
        ProductQuality::Medium => 0.03,
        ProductQuality::Premium => 0.08,
    }
}

fn feature_surcharge(f: FeatureTier) -> f64 {
    match f {
        FeatureTier::Basic | FeatureTier::Unknown => 0.0,
        FeatureTier::Intermediate => 0.02,
        FeatureTier::Complete => 0.05,
    }
}

fn coverage_surcharge(c: Coverage) -> f64 {
    match c {
        Coverage::Local | Coverage::Unknown => 0.0,
        Coverage::Regional => 0.02,
        Coverage::National => 0.04,
        Coverage::International => 0.07,
    }
}

fn intensity_surcharge(i: PromotionIntensity) -> f64 {
    match i {
        PromotionIntensity::Low | PromotionIntensity::Unknown => 0.0,
        PromotionIntensity::Medium => 0.02,
        PromotionIntensity::High => 0.05,
        PromotionIntensity::VeryHigh => 0.08,
    }
}

/// Share of the budget consumed as costs, capped at 95%.
pub fn cost_rate(d: &MarketingMixDecision, sector_average_margin: Option<f64>) -> f64 {
    let rate = base_cost_rate(sector_average_margin)
        + quality_surcharge(d.product_quality)
        + feature_surcharge(d.features)
        + coverage_surcharge(d.coverage)
        + intensity_surcharge(d.promotion_intensity);
    rate.min(MAX_COST_RATE)
}

/// Fair share of the market before performance: 100 / players, scaled by concentration.
pub fn base_share(ctx: Option<&MarketContext>, total_teams: u32) -> f64 {
    let (players, scale) = match ctx {
        Some(c) => (c.market_players(total_teams), c.concentration_scale()),
        None => (total_teams.max(1), 1.0),
    };
    100.0 / f64::from(players) * scale
}

/// Log-dampened market share in [0.5, 45].
///
/// Revenue relative to budget drives the share: a team converting its budget
/// one-to-one keeps its fair share, and returns above that diminish.
pub fn market_share(
    revenue: f64,
    budget: f64,
    ctx: Option<&MarketContext>,
    total_teams: u32,
) -> f64 {
    let ratio = if budget > 0.0 { (revenue / budget).max(0.0) } else { 0.0 };
    let dampened = (1.0 + ratio).ln() / std::f64::consts::LN_2;
    let share = base_share(ctx, total_teams) * dampened;
    if !share.is_finite() {
        return MIN_MARKET_SHARE;
    }
    share.clamp(MIN_MARKET_SHARE, MAX_MARKET_SHARE)
}
