//! Synthesized competitor reacting to the team's previous-round behaviour.
//!
//! The competitor is not a simulated team: it only moves the reference price
//! and promotion spend the current round is measured against.

use sim_core::{CompetitorResponse, RoundReference};

/// Price drops larger than this fraction trigger a reaction.
pub const PRICE_DROP_TRIGGER: f64 = 0.10;
pub const PRICE_PASS_THROUGH: f64 = 0.40;
pub const MAX_PRICE_CUT: f64 = 0.15;

/// Promotion increases larger than this fraction trigger a reaction.
pub const PROMO_INCREASE_TRIGGER: f64 = 0.10;
pub const PROMO_PASS_THROUGH: f64 = 0.30;
pub const MAX_PROMO_RAISE: f64 = 0.20;

/// Competitor reaction plus the references it started from.
#[derive(Clone, Debug, PartialEq)]
pub struct CompetitorReaction {
    pub response: CompetitorResponse,
    /// Reference price before the reaction.
    pub baseline_price: f64,
    /// Reference promotion spend before the reaction.
    pub baseline_promo: f64,
}

fn relative_change(previous: f64, current: f64) -> f64 {
    if is_usable_reference(previous) && current.is_finite() {
        (current - previous) / previous
    } else {
        0.0
    }
}

/// Only a positive, finite reference carries a signal.
pub fn is_usable_reference(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

fn first_usable(candidates: [Option<f64>; 2], fallback: f64) -> f64 {
    candidates
        .into_iter()
        .flatten()
        .find(|v| is_usable_reference(*v))
        .unwrap_or(fallback)
}

/// Derive the competitor's reference price and promotion spend.
///
/// The baseline is the stored competitor reference, else the team's own
/// previous value, else the current value. Zero references are skipped, so a
/// round without promotion spend never pins the baseline at zero. Without a
/// previous round the current values seed it, which makes the first round
/// neutral.
pub fn respond(
    price: f64,
    promo_spend: f64,
    previous: Option<&RoundReference>,
) -> CompetitorReaction {
    let baseline_price = previous.map_or(price, |p| {
        first_usable([p.competitor_reference_price, Some(p.team_price)], price)
    });
    let baseline_promo = previous.map_or(promo_spend, |p| {
        first_usable(
            [p.competitor_reference_promo, Some(p.team_promo_spend)],
            promo_spend,
        )
    });

    let mut notes = Vec::new();

    let price_drop = -previous.map_or(0.0, |p| relative_change(p.team_price, price));
    let price_adjustment = if price_drop > PRICE_DROP_TRIGGER {
        let cut = (PRICE_PASS_THROUGH * price_drop).min(MAX_PRICE_CUT);
        notes.push(format!(
            "Concorrente reduziu o preço em {:.1}% após queda de {:.1}% no seu preço",
            cut * 100.0,
            price_drop * 100.0
        ));
        -cut
    } else {
        0.0
    };

    let promo_increase = previous.map_or(0.0, |p| relative_change(p.team_promo_spend, promo_spend));
    let promo_adjustment = if promo_increase > PROMO_INCREASE_TRIGGER {
        let raise = (PROMO_PASS_THROUGH * promo_increase).min(MAX_PROMO_RAISE);
        notes.push(format!(
            "Concorrente aumentou a promoção em {:.1}% após alta de {:.1}% no seu investimento",
            raise * 100.0,
            promo_increase * 100.0
        ));
        raise
    } else {
        0.0
    };

    if notes.is_empty() {
        notes.push("Concorrente manteve preço e promoção".to_string());
    }

    CompetitorReaction {
        response: CompetitorResponse {
            price_adjustment,
            promo_adjustment,
            reference_price: baseline_price * (1.0 + price_adjustment),
            reference_promo_spend: baseline_promo * (1.0 + promo_adjustment),
            explanation: notes.join("; "),
        },
        baseline_price,
        baseline_promo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn previous(price: f64, promo: f64) -> RoundReference {
        RoundReference {
            team_price: price,
            team_promo_spend: promo,
            competitor_reference_price: None,
            competitor_reference_promo: None,
        }
    }

    #[test]
    fn first_round_is_neutral() {
        let r = respond(80.0, 8_000.0, None);
        assert_eq!(r.response.price_adjustment, 0.0);
        assert_eq!(r.response.promo_adjustment, 0.0);
        assert_eq!(r.response.reference_price, 80.0);
        assert_eq!(r.baseline_promo, 8_000.0);
    }

    #[test]
    fn price_cut_passes_through() {
        let r = respond(80.0, 8_000.0, Some(&previous(100.0, 8_000.0)));
        assert_relative_eq!(r.response.price_adjustment, -0.08, max_relative = 1e-12);
        assert_relative_eq!(r.response.reference_price, 92.0, max_relative = 1e-12);
    }

    #[test]
    fn small_moves_are_ignored() {
        let r = respond(95.0, 8_500.0, Some(&previous(100.0, 8_000.0)));
        assert_eq!(r.response.price_adjustment, 0.0);
        assert_eq!(r.response.promo_adjustment, 0.0);
    }

    #[test]
    fn reactions_are_capped() {
        let r = respond(10.0, 40_000.0, Some(&previous(100.0, 10_000.0)));
        assert_relative_eq!(r.response.price_adjustment, -MAX_PRICE_CUT);
        assert_relative_eq!(r.response.promo_adjustment, MAX_PROMO_RAISE);
        assert_relative_eq!(r.response.reference_promo_spend, 12_000.0, max_relative = 1e-12);
    }

    #[test]
    fn stored_reference_wins_over_team_price() {
        let mut p = previous(100.0, 5_000.0);
        p.competitor_reference_price = Some(120.0);
        let r = respond(100.0, 5_000.0, Some(&p));
        assert_eq!(r.baseline_price, 120.0);
        assert_eq!(r.response.reference_price, 120.0);
    }

    #[test]
    fn zero_references_fall_back_to_current_spend() {
        let p = RoundReference {
            team_price: 80.0,
            team_promo_spend: 0.0,
            competitor_reference_price: Some(80.0),
            competitor_reference_promo: Some(0.0),
        };
        let r = respond(80.0, 1.0, Some(&p));
        assert_eq!(r.baseline_promo, 1.0);
        assert_eq!(r.response.promo_adjustment, 0.0);
        assert_eq!(r.response.reference_promo_spend, 1.0);

        let mut p = previous(100.0, 0.0);
        p.competitor_reference_promo = Some(3_000.0);
        assert_eq!(respond(100.0, 500.0, Some(&p)).baseline_promo, 3_000.0);
    }
}
