#![deny(warnings)]

//! Headless CLI: runs one round from a JSON scenario or a seeded demo round.

use anyhow::{bail, Context, Result};
use chrono::{TimeZone, Utc};
use persistence::{RoundArchive, TeamRoundRecord};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim_core::*;
use sim_runtime::{process_round, EngineConfig, ProductInput, RoundInput, TeamRoundInput};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    config: Option<String>,
    teams: Option<u32>,
    seed: Option<u64>,
    out: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = it.next(),
            "--config" => args.config = it.next(),
            "--teams" => args.teams = it.next().and_then(|s| s.parse().ok()),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--out" => args.out = it.next(),
            "--help" | "-h" => {
                println!(
                    "usage: marketsim [--scenario round.json] [--config engine.yaml] \
                     [--teams N] [--seed S] [--out archive.json]"
                );
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(args)
}

fn load_scenario(path: &str) -> Result<RoundInput> {
    let file = File::open(path).with_context(|| format!("opening scenario {path}"))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scenario {path}"))
}

fn pick<T: Copy>(rng: &mut ChaCha8Rng, options: &[T]) -> T {
    // options are non-empty literals
    *options.choose(rng).unwrap_or(&options[0])
}

fn demo_decision(rng: &mut ChaCha8Rng) -> MarketingMixDecision {
    use DistributionChannel as C;
    let all_channels = [
        C::Direct,
        C::Retail,
        C::Wholesale,
        C::Online,
        C::Distributors,
        C::Marketplace,
    ];
    let n = rng.gen_range(1..=3);
    let channels: BTreeSet<_> = all_channels.choose_multiple(rng, n).copied().collect();
    MarketingMixDecision {
        product_quality: pick(
            rng,
            &[ProductQuality::Basic, ProductQuality::Medium, ProductQuality::Premium],
        ),
        features: pick(
            rng,
            &[FeatureTier::Basic, FeatureTier::Intermediate, FeatureTier::Complete],
        ),
        brand_positioning: pick(
            rng,
            &[BrandPositioning::Economy, BrandPositioning::Mainstream, BrandPositioning::Premium],
        ),
        price_strategy: pick(
            rng,
            &[
                PriceStrategy::Penetration,
                PriceStrategy::Competitive,
                PriceStrategy::Value,
                PriceStrategy::Premium,
            ],
        ),
        price: (rng.gen_range(20.0..300.0f64) * 100.0).round() / 100.0,
        channels,
        coverage: pick(rng, &[Coverage::Local, Coverage::Regional, Coverage::National]),
        promotion_mix: BTreeSet::from([pick(
            rng,
            &[PromotionTag::Advertising, PromotionTag::SocialMedia, PromotionTag::SalesPromotion],
        )]),
        promotion_intensity: pick(
            rng,
            &[PromotionIntensity::Low, PromotionIntensity::Medium, PromotionIntensity::High],
        ),
        promotion_budgets: None,
        estimated_cost: rng.gen_range(5_000.0..30_000.0),
        submitted_at: Utc.timestamp_opt(1_700_000_000, 0).single(),
    }
}

fn demo_analyses(rng: &mut ChaCha8Rng) -> StrategicAnalyses {
    let items = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let swot = rng.gen_bool(0.8).then(|| SwotAnalysis {
        strengths: items(&["Qualidade superior do produto", "Marca reconhecida"]),
        weaknesses: items(&["Preço acima da média"]),
        opportunities: items(&["Crescimento das vendas online"]),
        threats: items(&["Concorrência agressiva"]),
        ai_content_percentage: rng.gen_range(0.0..100.0),
    });
    let force = |rng: &mut ChaCha8Rng| ForceAssessment {
        score: rng.gen_range(1..=10),
        notes: "Avaliação baseada em pesquisa de mercado".to_string(),
    };
    let porter = rng.gen_bool(0.6).then(|| PorterAnalysis {
        rivalry: force(rng),
        new_entrants: force(rng),
        substitutes: force(rng),
        buyer_power: force(rng),
        supplier_power: force(rng),
        ai_content_percentage: rng.gen_range(0.0..100.0),
    });
    StrategicAnalyses {
        swot,
        porter,
        ..Default::default()
    }
}

fn demo_round(teams: u32, seed: u64) -> RoundInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let teams = (1..=teams)
        .map(|i| {
            let products = (1..=rng.gen_range(1..=2))
                .map(|j| ProductInput {
                    product_id: format!("t{i}-p{j}"),
                    decision: demo_decision(&mut rng),
                    budget: (rng.gen_range(20_000.0..150_000.0f64) / 1_000.0).round() * 1_000.0,
                    previous_reference: None,
                    previous_accumulated_profit: None,
                })
                .collect();
            TeamRoundInput {
                team_id: format!("team-{i}"),
                products,
                analyses: demo_analyses(&mut rng),
            }
        })
        .collect();
    RoundInput {
        round: 1,
        events: vec![MarketEvent {
            title: "Alta da inflação".to_string(),
            category: EventCategory::Economic,
            severity: Severity::Medium,
            active: true,
        }],
        context: Some(MarketContext {
            sector_id: Some("retail".to_string()),
            market_growth_rate: Some(4.0),
            competition_level: Some(CompetitionLevel::Medium),
            ..Default::default()
        }),
        sector_average_margin: Some(35.0),
        teams,
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args()?;
    info!(
        sha = env!("GIT_SHA"),
        built = env!("BUILD_DATE"),
        ?args,
        "starting marketsim"
    );

    let config = match &args.config {
        Some(path) => EngineConfig::load(path).with_context(|| format!("loading config {path}"))?,
        None => EngineConfig::default(),
    };
    let round = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => demo_round(args.teams.unwrap_or(4), args.seed.unwrap_or(42)),
    };

    let results = process_round(&config, &round);
    println!(
        "marketsim {} | round {} | engine: {:?} | teams: {}",
        env!("GIT_SHA"),
        round.round,
        config.strategy(),
        round.teams.len()
    );
    for (team, result) in round.teams.iter().zip(&results) {
        match result {
            Ok(r) => {
                let rec = TeamRoundRecord::from_result(r)?;
                println!(
                    "KPI | {} | revenue: ${} | costs: ${} | profit: ${} | ROI: {}% \
                     | share: {}% | NPS: {} | alignment: {}",
                    rec.team_id,
                    rec.kpis.revenue,
                    rec.kpis.costs,
                    rec.kpis.profit,
                    rec.kpis.roi,
                    rec.kpis.market_share,
                    rec.kpis.nps,
                    rec.alignment_score
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            Err(e) => warn!(team = %team.team_id, error = %e, "team failed"),
        }
    }

    if let Some(out) = &args.out {
        let archive = RoundArchive::build(&round, &results)?;
        archive.write_json(out)?;
        println!("archived {} records to {out}", archive.records.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_round_is_deterministic() {
        let a = demo_round(6, 7);
        let b = demo_round(6, 7);
        assert_eq!(a, b);
        assert_eq!(a.teams.len(), 6);
        assert!(a.teams.iter().all(|t| t
            .products
            .iter()
            .all(|p| p.decision.is_submitted() && !p.decision.channels.is_empty())));
        assert_ne!(a, demo_round(6, 8));
    }

    #[test]
    fn bundled_scenario_runs_on_both_engines() {
        let round: RoundInput =
            serde_json::from_str(include_str!("../../../demos/round.json")).unwrap();
        let config =
            EngineConfig::from_yaml_str(include_str!("../../../demos/engine.yaml")).unwrap();
        for cfg in [config.clone(), EngineConfig { market_simulation: false, ..config }] {
            let results = process_round(&cfg, &round);
            assert_eq!(results.len(), 2);
            for r in &results {
                let r = r.as_ref().unwrap();
                assert!(r.kpis.roi <= cfg.roi_cap_pct + 1e-6);
                assert!(TeamRoundRecord::from_result(r).is_ok());
            }
        }
    }
}
