#![deny(warnings)]

//! Round runtime for the marketing simulation.
//!
//! - [`EngineConfig`]: YAML configuration, including the engine strategy flag
//! - [`OutcomeEngine`]: the weighted-score and market-simulation strategies
//! - [`process_team`]: engine, adjustment passes and consolidation for one team
//! - [`process_round`]: every team of a round, in parallel

pub mod config;
pub mod engine;
pub mod round;

pub use config::EngineConfig;
pub use engine::{
    EngineOutput, EngineStrategy, LegacyEngine, MarketSimulationEngine, OutcomeEngine,
    SimulationAudit,
};
pub use round::{
    process_round, process_team, ProductInput, ProductOutcome, RoundContext, RoundInput,
    TeamRoundInput, TeamRoundResult,
};

use sim_econ::EconError;
use thiserror::Error;

/// Errors surfaced per team by the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// An engine rejected its inputs.
    #[error(transparent)]
    Econ(#[from] EconError),
    /// Only submitted decisions are processed.
    #[error("decision for product {0} is still a draft")]
    NotSubmitted(String),
    #[error("team {0} has no products")]
    NoProducts(String),
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
