use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use sim_core::*;
use sim_runtime::{process_round, EngineConfig, ProductInput, RoundInput, TeamRoundInput};
use std::collections::BTreeSet;

fn demo_round(teams: usize) -> RoundInput {
    let decision = MarketingMixDecision {
        product_quality: ProductQuality::Medium,
        features: FeatureTier::Intermediate,
        brand_positioning: BrandPositioning::Mainstream,
        price_strategy: PriceStrategy::Competitive,
        price: 80.0,
        channels: BTreeSet::from([DistributionChannel::Retail, DistributionChannel::Online]),
        coverage: Coverage::Regional,
        promotion_mix: BTreeSet::from([PromotionTag::Advertising]),
        promotion_intensity: PromotionIntensity::Medium,
        promotion_budgets: None,
        estimated_cost: 10_000.0,
        submitted_at: Utc.timestamp_opt(1_700_000_000, 0).single(),
    };
    RoundInput {
        round: 1,
        events: vec![MarketEvent {
            title: "Recessão".into(),
            category: EventCategory::Economic,
            severity: Severity::High,
            active: true,
        }],
        context: None,
        sector_average_margin: None,
        teams: (0..teams)
            .map(|i| TeamRoundInput {
                team_id: format!("team-{i}"),
                products: (0..3)
                    .map(|j| ProductInput {
                        product_id: format!("p{j}"),
                        decision: decision.clone(),
                        budget: 50_000.0 + 10_000.0 * j as f64,
                        previous_reference: None,
                        previous_accumulated_profit: None,
                    })
                    .collect(),
                analyses: StrategicAnalyses::default(),
            })
            .collect(),
    }
}

fn bench_round(c: &mut Criterion) {
    let round = demo_round(64);
    let legacy = EngineConfig::default();
    let market = EngineConfig {
        market_simulation: true,
        ..Default::default()
    };
    c.bench_function("round_legacy_64_teams", |b| {
        b.iter(|| std::hint::black_box(process_round(&legacy, &round)))
    });
    c.bench_function("round_market_64_teams", |b| {
        b.iter(|| std::hint::black_box(process_round(&market, &round)))
    });
}

criterion_group!(benches, bench_round);
criterion_main!(benches);
