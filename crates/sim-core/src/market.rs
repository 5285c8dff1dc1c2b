//! Exogenous market events and per-class market configuration.

use serde::{Deserialize, Serialize};

/// Category of a market event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Economic,
    Technological,
    Social,
    Competitive,
    Regulatory,
    Environmental,
    #[serde(other)]
    Unknown,
}

impl EventCategory {
    /// Categories whose events depress demand.
    pub fn depresses_demand(self) -> bool {
        matches!(
            self,
            EventCategory::Economic
                | EventCategory::Competitive
                | EventCategory::Regulatory
                | EventCategory::Environmental
        )
    }
}

/// Severity tier of a market event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Numeric weight in [0.25, 1.0]; unknown tiers count as medium.
    pub fn factor(self) -> f64 {
        match self {
            Severity::Low => 0.25,
            Severity::Medium | Severity::Unknown => 0.5,
            Severity::High => 0.75,
            Severity::Critical => 1.0,
        }
    }
}

/// An exogenous shock affecting every team in the round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    #[serde(default)]
    pub title: String,
    pub category: EventCategory,
    pub severity: Severity,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Iterate only the events that affect computation.
pub fn active_events(events: &[MarketEvent]) -> impl Iterator<Item = &MarketEvent> {
    events.iter().filter(|e| e.active)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    B2c,
    B2b,
    B2b2c,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    VeryHigh,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketConcentration {
    Fragmented,
    Moderate,
    Concentrated,
    Monopolistic,
    #[serde(other)]
    Unknown,
}

impl MarketConcentration {
    /// Scale applied to a team's market share.
    pub fn share_scale(self) -> f64 {
        match self {
            MarketConcentration::Fragmented => 0.85,
            MarketConcentration::Moderate | MarketConcentration::Unknown => 1.0,
            MarketConcentration::Concentrated => 1.15,
            MarketConcentration::Monopolistic => 1.30,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorStrength {
    Weak,
    Moderate,
    Strong,
    Dominant,
    #[serde(other)]
    Unknown,
}

/// Broad sector families used for demand elasticity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorCategory {
    Essentials,
    Retail,
    Technology,
    Luxury,
    Services,
    Industrial,
    General,
}

impl SectorCategory {
    /// Classify a free-form sector id (Portuguese or English).
    pub fn from_sector_id(id: &str) -> Self {
        let id = id.trim().to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| id.contains(k));
        if has(&["aliment", "food", "bebida", "beverage", "higiene"]) {
            SectorCategory::Essentials
        } else if has(&["varejo", "retail", "comercio", "comércio"]) {
            SectorCategory::Retail
        } else if has(&["tecnolog", "tech", "software", "eletr", "electr"]) {
            SectorCategory::Technology
        } else if has(&["luxo", "luxury", "moda", "fashion", "joia", "jewel"]) {
            SectorCategory::Luxury
        } else if has(&["servi", "saude", "saúde", "health", "educa", "consult"]) {
            SectorCategory::Services
        } else if has(&["indust", "manufact", "agro", "constru"]) {
            SectorCategory::Industrial
        } else {
            SectorCategory::General
        }
    }
}

/// Per-class market configuration. Every field is optional; absent values
/// fall back to neutral defaults in the engines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketContext {
    pub sector_id: Option<String>,
    pub business_type: Option<BusinessType>,
    pub market_size: Option<f64>,
    /// Annual growth in percent (5.0 = 5%).
    pub market_growth_rate: Option<f64>,
    pub competition_level: Option<CompetitionLevel>,
    pub number_of_competitors: Option<u32>,
    pub market_concentration: Option<MarketConcentration>,
    pub competitor_strength: Option<CompetitorStrength>,
    pub target_consumers: Option<u64>,
}

impl MarketContext {
    pub fn sector_category(&self) -> SectorCategory {
        self.sector_id
            .as_deref()
            .map(SectorCategory::from_sector_id)
            .unwrap_or(SectorCategory::General)
    }

    pub fn concentration_scale(&self) -> f64 {
        self.market_concentration
            .map(MarketConcentration::share_scale)
            .unwrap_or(1.0)
    }

    /// Teams in the round plus external competitors, never below one.
    pub fn market_players(&self, total_teams: u32) -> u32 {
        total_teams
            .saturating_add(self.number_of_competitors.unwrap_or(0))
            .max(1)
    }
}
