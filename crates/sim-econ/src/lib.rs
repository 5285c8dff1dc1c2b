#![deny(warnings)]

//! Economic models for the marketing round simulation.
//!
//! This crate provides:
//! - The base KPI calculator (weighted-score strategy)
//! - The shared derivation routine every adjustment pass goes through
//! - The accounting expansion (income statement and balance sheet)
//! - Impact composition (strategic modifiers, ROI policy clamp, alignment penalties)
//! - Consolidation of per-product bundles into one team bundle
//! - Constant-elasticity demand helpers

pub mod accounting;
pub mod calculator;
pub mod consolidation;
pub mod derive;
pub mod events;
pub mod impacts;
pub mod market;
pub mod scoring;

pub use accounting::derive_accounting;
pub use calculator::{calculate_kpis, KpiInputs};
pub use consolidation::{calculate_consolidated_results, consolidation_weights, ProductResult};
pub use derive::{derive_bundle, recompute_dependent_kpis, DerivationInputs};
pub use events::{calculate_event_impact, EventImpactSummary};
pub use impacts::{
    apply_alignment_penalties, apply_roi_clamp, apply_strategic_impacts, strategic_modifiers,
    StrategicModifiers, DEFAULT_ROI_CAP,
};
pub use scoring::{compute_mix_scores, overall_score};

use sim_core::ValidationError;
use thiserror::Error;

/// Errors produced by economic helpers.
///
/// Degenerate inputs (zero price, revenue, costs or customers) never error;
/// these variants signal contract violations by the caller.
#[derive(Debug, Error, PartialEq)]
pub enum EconError {
    /// Elasticity must be finite and strictly negative.
    #[error("invalid elasticity: {0}")]
    InvalidElasticity(f64),
    /// Monetary values must be non-negative and finite.
    #[error("invalid price or cost value")]
    InvalidPrice,
    /// Numeric input was NaN or infinite.
    #[error("non-finite numeric input")]
    NonFinite,
    /// Decision or context rejected at validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Division that yields 0 when the denominator is zero or the result is not finite.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        return 0.0;
    }
    let q = num / den;
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// Demand multiplier under constant elasticity with respect to a reference price.
///
/// m = (price / ref_price)^elasticity, clamped to [min, max]. Requires
/// elasticity < 0 and non-negative finite prices; a zero price or reference
/// is treated as "no signal" and yields 1.0.
///
/// Example:
/// let m = demand_multiplier(10.0, 10.0, -1.5, 0.3, 3.0).unwrap();
/// assert_eq!(m, 1.0);
pub fn demand_multiplier(
    price: f64,
    ref_price: f64,
    elasticity: f64,
    min: f64,
    max: f64,
) -> Result<f64, EconError> {
    if !elasticity.is_finite() || elasticity >= 0.0 {
        return Err(EconError::InvalidElasticity(elasticity));
    }
    if !price.is_finite() || !ref_price.is_finite() {
        return Err(EconError::NonFinite);
    }
    if price < 0.0 || ref_price < 0.0 {
        return Err(EconError::InvalidPrice);
    }
    if price == 0.0 || ref_price == 0.0 {
        return Ok(1.0);
    }
    let m = (price / ref_price).powf(elasticity);
    if !m.is_finite() {
        return Ok(max);
    }
    Ok(m.clamp(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn demand_identity_at_ref_price() {
        assert_eq!(demand_multiplier(50.0, 50.0, -1.2, 0.3, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn demand_rejects_bad_elasticity() {
        assert!(demand_multiplier(1.0, 1.0, 0.5, 0.3, 3.0).is_err());
        assert!(demand_multiplier(1.0, 1.0, f64::NAN, 0.3, 3.0).is_err());
        assert_eq!(
            demand_multiplier(-1.0, 1.0, -1.0, 0.3, 3.0),
            Err(EconError::InvalidPrice)
        );
    }

    #[test]
    fn demand_zero_price_is_neutral() {
        assert_eq!(demand_multiplier(0.0, 10.0, -1.0, 0.3, 3.0).unwrap(), 1.0);
    }

    #[test]
    fn safe_div_short_circuits() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
    }

    proptest! {
        #[test]
        fn demand_monotonic(p in 1.0f64..1_000.0, e in -3.0f64..-0.1) {
            let low = demand_multiplier(p, p + 10.0, e, 0.3, 3.0).unwrap();
            let high = demand_multiplier(p + 20.0, p + 10.0, e, 0.3, 3.0).unwrap();
            prop_assert!(low >= 1.0);
            prop_assert!(high <= 1.0);
            prop_assert!((0.3..=3.0).contains(&low));
        }
    }
}
