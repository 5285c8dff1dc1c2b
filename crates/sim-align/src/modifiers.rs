//! Score bands mapping the final alignment score to KPI modifiers.

use sim_core::KpiModifiers;

/// (lower bound, revenue %, profit %, market share %), highest band first.
const BANDS: [(f64, f64, f64, f64); 6] = [
    (90.0, 5.0, 6.0, 3.0),
    (80.0, 3.0, 4.0, 2.0),
    (70.0, 1.0, 2.0, 1.0),
    (60.0, 0.0, 0.0, 0.0),
    (45.0, -3.0, -4.0, -2.0),
    (30.0, -6.0, -8.0, -4.0),
];

const FLOOR_BAND: KpiModifiers = KpiModifiers {
    revenue: -10.0,
    profit: -12.0,
    market_share: -6.0,
};

pub fn modifiers_for(score: f64) -> KpiModifiers {
    BANDS
        .iter()
        .find(|(lower, ..)| score >= *lower)
        .map(|&(_, revenue, profit, market_share)| KpiModifiers {
            revenue,
            profit,
            market_share,
        })
        .unwrap_or(FLOOR_BAND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(modifiers_for(100.0).revenue, 5.0);
        assert_eq!(modifiers_for(90.0).profit, 6.0);
        assert_eq!(modifiers_for(89.99).profit, 4.0);
        assert_eq!(modifiers_for(60.0), KpiModifiers::default());
        assert_eq!(modifiers_for(44.0).market_share, -4.0);
        assert_eq!(modifiers_for(29.0), FLOOR_BAND);
        assert_eq!(modifiers_for(f64::NAN), FLOOR_BAND);
    }
}
