//! Aggregate demand impact of the round's active market events.

use serde::{Deserialize, Serialize};
use sim_core::{active_events, EventCategory, MarketEvent};

/// Weight of a demand-depressing event at full severity.
const NEGATIVE_EVENT_WEIGHT: f64 = 0.10;
/// Favourable events count at half weight.
const POSITIVE_EVENT_WEIGHT: f64 = NEGATIVE_EVENT_WEIGHT / 2.0;

const MIN_EVENT_MULTIPLIER: f64 = 0.5;
const MAX_EVENT_MULTIPLIER: f64 = 1.5;

/// Combined event factor and the signed contribution of each active event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventImpactSummary {
    pub multiplier: f64,
    pub contributions: Vec<(String, f64)>,
}

fn contribution(event: &MarketEvent) -> f64 {
    let severity = event.severity.factor();
    match event.category {
        EventCategory::Unknown => 0.0,
        c if c.depresses_demand() => -NEGATIVE_EVENT_WEIGHT * severity,
        _ => POSITIVE_EVENT_WEIGHT * severity,
    }
}

/// Aggregate event factor in [0.5, 1.5]; exactly 1.0 when no event is active.
pub fn calculate_event_impact(events: &[MarketEvent]) -> EventImpactSummary {
    let contributions: Vec<(String, f64)> = active_events(events)
        .map(|e| (e.title.clone(), contribution(e)))
        .collect();
    if contributions.is_empty() {
        return EventImpactSummary {
            multiplier: 1.0,
            contributions,
        };
    }
    let total: f64 = contributions.iter().map(|(_, c)| c).sum();
    EventImpactSummary {
        multiplier: (1.0 + total).clamp(MIN_EVENT_MULTIPLIER, MAX_EVENT_MULTIPLIER),
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_core::Severity;

    fn event(category: EventCategory, severity: Severity, active: bool) -> MarketEvent {
        MarketEvent {
            title: format!("{category:?}"),
            category,
            severity,
            active,
        }
    }

    #[test]
    fn empty_events_are_neutral() {
        assert_eq!(calculate_event_impact(&[]).multiplier, 1.0);
    }

    #[test]
    fn inactive_events_are_ignored() {
        let events = [event(EventCategory::Economic, Severity::Critical, false)];
        let impact = calculate_event_impact(&events);
        assert_eq!(impact.multiplier, 1.0);
        assert!(impact.contributions.is_empty());
    }

    #[test]
    fn positive_events_count_half() {
        let bad =
            calculate_event_impact(&[event(EventCategory::Economic, Severity::Critical, true)]);
        let good =
            calculate_event_impact(&[event(EventCategory::Social, Severity::Critical, true)]);
        assert!((bad.multiplier - 0.90).abs() < 1e-12);
        assert!((good.multiplier - 1.05).abs() < 1e-12);
    }

    #[test]
    fn aggregate_is_clamped() {
        let events: Vec<_> = (0..10)
            .map(|_| event(EventCategory::Competitive, Severity::Critical, true))
            .collect();
        assert_eq!(calculate_event_impact(&events).multiplier, MIN_EVENT_MULTIPLIER);
    }
}
