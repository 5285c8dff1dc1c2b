#![deny(warnings)]

//! Persisted shape of round results.
//!
//! KPI bundles are flattened into named fields rounded to exactly two
//! decimal places. Rounding happens here and nowhere upstream. Whole rounds
//! are archived as pretty-printed JSON.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sim_core::{AccountingStatement, KpiBundle, MixScores};
use sim_runtime::{EngineStrategy, RoundInput, RuntimeError, SimulationAudit, TeamRoundResult};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Decimal places kept for every persisted KPI.
pub const PERSISTED_DP: u32 = 2;

#[derive(Debug, Error)]
pub enum PersistError {
    /// KPI value could not be represented as a decimal.
    #[error("field {0} is not a finite number")]
    NonFinite(&'static str),
    #[error("archive io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("archive json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Round a KPI to the persisted precision, halves away from zero.
///
/// Example:
/// let d = to_persisted(117_647.0588, "costs").unwrap();
/// assert_eq!(d.to_string(), "117647.06");
pub fn to_persisted(value: f64, field: &'static str) -> Result<Decimal, PersistError> {
    let d = Decimal::from_f64(value).ok_or(PersistError::NonFinite(field))?;
    Ok(d.round_dp_with_strategy(PERSISTED_DP, RoundingStrategy::MidpointAwayFromZero))
}

macro_rules! persisted_record {
    ($(#[$meta:meta])* $name:ident from $src:ty { $($field:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: Decimal,)+
        }

        impl $name {
            pub fn from_source(src: &$src) -> Result<Self, PersistError> {
                Ok(Self {
                    $($field: to_persisted(src.$field, stringify!($field))?,)+
                })
            }
        }
    };
}

persisted_record! {
    /// Headline KPIs of one bundle.
    KpiRecord from KpiBundle {
        revenue, costs, profit, margin, market_share, roi, brand_perception,
        customer_satisfaction, customer_loyalty, cac, ltv, conversion_rate, average_ticket,
        ltv_to_cac_ratio, nps, average_conversion_days, contribution_margin, gross_revenue,
        net_revenue, customers,
    }
}

persisted_record! {
    ScoreRecord from MixScores { product, price, place, promotion }
}

persisted_record! {
    /// Income statement and balance sheet lines.
    AccountingRecord from AccountingStatement {
        gross_revenue, sales_taxes, returns, discounts, net_revenue, cogs, gross_profit,
        selling_expenses, administrative_expenses, general_expenses, other_expenses,
        operating_expenses, ebitda, depreciation, ebit, financial_result, pre_tax_income,
        income_tax, net_income, previous_accumulated_profit, accumulated_profit,
        cash, receivables, inventory, current_assets, fixed_assets, intangible_assets,
        non_current_assets, total_assets, suppliers, tax_obligations, payroll_obligations,
        current_liabilities, long_term_loans, non_current_liabilities, total_liabilities,
        capital_stock, retained_earnings, equity, total_liabilities_and_equity,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub budget: Decimal,
    #[serde(flatten)]
    pub kpis: KpiRecord,
    /// Audit trail, present for the market simulation engine only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<SimulationAudit>,
}

/// One team's persisted result for one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRoundRecord {
    pub team_id: String,
    pub round: u32,
    pub engine: EngineStrategy,
    #[serde(flatten)]
    pub kpis: KpiRecord,
    pub scores: ScoreRecord,
    pub accounting: AccountingRecord,
    #[serde(default)]
    pub alignment_score: Option<Decimal>,
    #[serde(default)]
    pub penalties: Vec<String>,
    pub products: Vec<ProductRecord>,
}

impl TeamRoundRecord {
    pub fn from_result(result: &TeamRoundResult) -> Result<Self, PersistError> {
        let products = result
            .products
            .iter()
            .map(|p| {
                Ok(ProductRecord {
                    product_id: p.product_id.clone(),
                    budget: to_persisted(p.budget, "budget")?,
                    kpis: KpiRecord::from_source(&p.kpis)?,
                    audit: p.audit.clone(),
                })
            })
            .collect::<Result<Vec<_>, PersistError>>()?;
        let alignment_score = result
            .alignment
            .as_ref()
            .map(|a| to_persisted(a.overall_score, "alignment_score"))
            .transpose()?;
        let penalties = result
            .alignment
            .iter()
            .flat_map(|a| a.penalties.iter().map(|p| p.description.clone()))
            .collect();
        Ok(Self {
            team_id: result.team_id.clone(),
            round: result.round,
            engine: result.engine,
            kpis: KpiRecord::from_source(&result.kpis)?,
            scores: ScoreRecord::from_source(&result.kpis.scores)?,
            accounting: AccountingRecord::from_source(&result.kpis.accounting)?,
            alignment_score,
            penalties,
            products,
        })
    }
}

/// A team the runtime skipped, with the reason.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamFailure {
    pub team_id: String,
    pub error: String,
}

/// Every record of one processed round.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundArchive {
    pub round: u32,
    pub records: Vec<TeamRoundRecord>,
    #[serde(default)]
    pub failures: Vec<TeamFailure>,
}

/// Directory used for archives when none is given.
pub fn default_archive_dir() -> &'static str {
    "./saves/rounds"
}

pub fn archive_path(dir: impl AsRef<Path>, round: u32) -> PathBuf {
    dir.as_ref().join(format!("round-{round:03}.json"))
}

impl RoundArchive {
    /// Pair runtime results with the teams they came from; results keep team order.
    pub fn build(
        round: &RoundInput,
        results: &[Result<TeamRoundResult, RuntimeError>],
    ) -> Result<Self, PersistError> {
        let mut archive = RoundArchive {
            round: round.round,
            ..Default::default()
        };
        for (team, result) in round.teams.iter().zip(results) {
            match result {
                Ok(r) => archive.records.push(TeamRoundRecord::from_result(r)?),
                Err(e) => archive.failures.push(TeamFailure {
                    team_id: team.team_id.clone(),
                    error: e.to_string(),
                }),
            }
        }
        Ok(archive)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        info!(path = %path.display(), teams = self.records.len(), "round archived");
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(to_persisted(117_647.058_823, "costs").unwrap().to_string(), "117647.06");
        assert_eq!(to_persisted(70.0, "roi").unwrap(), Decimal::new(7000, 2));
        assert_eq!(to_persisted(0.125, "margin").unwrap().to_string(), "0.13");
        assert!(matches!(
            to_persisted(f64::NAN, "roi"),
            Err(PersistError::NonFinite("roi"))
        ));
    }

    #[test]
    fn record_flattens_bundle() {
        let bundle = KpiBundle {
            revenue: 200_000.0,
            costs: 117_647.058_823_529,
            profit: 82_352.941_176_471,
            roi: 69.999_999_999_9,
            ..Default::default()
        };
        let rec = KpiRecord::from_source(&bundle).unwrap();
        assert_eq!(rec.costs, Decimal::new(11_764_706, 2));
        assert_eq!(rec.roi, Decimal::new(7000, 2));
        assert_eq!(rec.nps, Decimal::ZERO);
    }

    #[test]
    fn archive_path_is_zero_padded() {
        assert_eq!(
            archive_path("saves", 7),
            Path::new("saves").join("round-007.json")
        );
    }

    fn team(id: &str, revenue: f64) -> TeamRoundResult {
        let kpis = KpiBundle {
            revenue,
            costs: revenue / 1.7,
            ..Default::default()
        };
        TeamRoundResult {
            team_id: id.into(),
            round: 3,
            engine: EngineStrategy::Legacy,
            kpis: kpis.clone(),
            products: vec![sim_runtime::ProductOutcome {
                product_id: "p1".into(),
                budget: 50_000.0,
                kpis,
                alignment: None,
                audit: None,
            }],
            alignment: None,
        }
    }

    #[test]
    fn archive_round_trips_through_json() {
        let round = RoundInput {
            round: 3,
            events: vec![],
            context: None,
            sector_average_margin: None,
            teams: ["a", "b"]
                .iter()
                .map(|id| sim_runtime::TeamRoundInput {
                    team_id: id.to_string(),
                    products: vec![],
                    analyses: Default::default(),
                })
                .collect(),
        };
        let results = vec![
            Ok(team("a", 200_000.0)),
            Err(RuntimeError::NoProducts("b".into())),
        ];
        let archive = RoundArchive::build(&round, &results).unwrap();
        assert_eq!(archive.records.len(), 1);
        assert_eq!(archive.failures[0].team_id, "b");
        assert_eq!(archive.records[0].kpis.costs.to_string(), "117647.06");

        let dir = std::env::temp_dir().join(format!("marketsim-archive-{}", std::process::id()));
        let path = archive_path(&dir, 3);
        archive.write_json(&path).unwrap();
        let back = RoundArchive::read_json(&path).unwrap();
        assert_eq!(back, archive);
        let _ = fs::remove_dir_all(&dir);
    }

    proptest! {
        #[test]
        fn persisted_values_have_two_places(v in -1e9f64..1e9) {
            let d = to_persisted(v, "value").unwrap();
            prop_assert!(d.scale() <= PERSISTED_DP);
            prop_assert!((d - Decimal::from_f64(v).unwrap()).abs() <= Decimal::new(5, 3));
        }
    }
}
