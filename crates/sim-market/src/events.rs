//! Per-category event effects on revenue, cost and demand.

use sim_core::{active_events, EventCategory, EventImpact, MarketEvent};

const MIN_AGGREGATE: f64 = 0.5;
const MAX_AGGREGATE: f64 = 1.5;

/// (revenue, cost, demand) deltas at full severity.
fn category_deltas(category: EventCategory) -> (f64, f64, f64) {
    match category {
        EventCategory::Economic => (-0.10, 0.05, -0.08),
        EventCategory::Technological => (0.05, -0.03, 0.04),
        EventCategory::Social => (0.03, 0.0, 0.05),
        EventCategory::Competitive => (-0.06, 0.02, -0.07),
        EventCategory::Regulatory => (-0.03, 0.06, -0.02),
        EventCategory::Environmental => (-0.04, 0.04, -0.03),
        EventCategory::Unknown => (0.0, 0.0, 0.0),
    }
}

/// One impact per active event, deltas scaled by severity.
pub fn event_impacts(events: &[MarketEvent]) -> Vec<EventImpact> {
    active_events(events)
        .map(|e| {
            let (rev, cost, demand) = category_deltas(e.category);
            let s = e.severity.factor();
            EventImpact {
                title: e.title.clone(),
                category: e.category,
                severity: e.severity,
                revenue_multiplier: 1.0 + rev * s,
                cost_multiplier: 1.0 + cost * s,
                demand_multiplier: 1.0 + demand * s,
            }
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateImpact {
    pub revenue: f64,
    pub cost: f64,
    pub demand: f64,
}

/// Multiply impacts across events; each aggregate is clamped to [0.5, 1.5].
pub fn aggregate(impacts: &[EventImpact]) -> AggregateImpact {
    let product = |f: fn(&EventImpact) -> f64| {
        impacts
            .iter()
            .map(f)
            .product::<f64>()
            .clamp(MIN_AGGREGATE, MAX_AGGREGATE)
    };
    AggregateImpact {
        revenue: product(|i| i.revenue_multiplier),
        cost: product(|i| i.cost_multiplier),
        demand: product(|i| i.demand_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
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
    fn no_events_is_neutral() {
        let a = aggregate(&event_impacts(&[]));
        assert_eq!(
            a,
            AggregateImpact {
                revenue: 1.0,
                cost: 1.0,
                demand: 1.0,
            }
        );
    }

    #[test]
    fn impacts_multiply_and_skip_inactive() {
        let events = [
            event(EventCategory::Economic, Severity::Critical, true),
            event(EventCategory::Technological, Severity::Medium, true),
            event(EventCategory::Competitive, Severity::Critical, false),
        ];
        let impacts = event_impacts(&events);
        assert_eq!(impacts.len(), 2);
        let a = aggregate(&impacts);
        assert_relative_eq!(a.revenue, 0.90 * 1.025, max_relative = 1e-12);
        assert_relative_eq!(a.cost, 1.05 * 0.985, max_relative = 1e-12);
    }

    #[test]
    fn aggregate_is_clamped() {
        let events: Vec<_> = (0..20)
            .map(|_| event(EventCategory::Economic, Severity::Critical, true))
            .collect();
        let a = aggregate(&event_impacts(&events));
        assert_eq!(a.revenue, MIN_AGGREGATE);
        assert_eq!(a.cost, MAX_AGGREGATE);
    }
}
