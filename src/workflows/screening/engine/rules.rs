use super::super::domain::{PassengerRecord, RiskFactor, RuleHit, ThreatSeverity};
use super::config::ScoringConfig;

/// Walks the rule table in order and returns the hits plus their summed weight.
pub(crate) fn score_record(record: &PassengerRecord, config: &ScoringConfig) -> (Vec<RuleHit>, u32) {
    debug_assert!(
        record.extra_weight_kg.is_finite(),
        "passenger {} reached the rule engine with a non-finite baggage weight",
        record.passenger_id
    );

    let mut hits = Vec::new();
    let mut push = |factor: RiskFactor| {
        hits.push(RuleHit::new(factor, config.weights.weight_for(factor)));
    };

    if record.no_fly_match {
        push(RiskFactor::NoFlyListMatch);
    }

    match record.baggage_scan_result.severity() {
        Some(ThreatSeverity::Dangerous) => push(RiskFactor::DangerousWeapon),
        Some(ThreatSeverity::Suspicious) => push(RiskFactor::SuspiciousWeapon),
        None => {}
    }

    match record.chemical_trace.severity() {
        Some(ThreatSeverity::Dangerous) => push(RiskFactor::DangerousChemical),
        Some(ThreatSeverity::Suspicious) => push(RiskFactor::SuspiciousChemical),
        None => {}
    }

    if record.travel_anomaly_level.is_high() {
        push(RiskFactor::HighTravelAnomaly);
    }

    if record.duplicate_bag_tag {
        push(RiskFactor::DuplicateBagTag);
    }

    if record.multiple_boarding_passes {
        push(RiskFactor::MultipleBoardingPasses);
    }

    if record.unattended_baggage {
        push(RiskFactor::UnattendedBaggage);
    }

    if record.bag_tampering {
        push(RiskFactor::BagTampering);
    }

    if record.behavior_state.is_suspicious() {
        push(RiskFactor::SuspiciousBehavior);
    }

    if record.extra_weight_kg >= config.excess_weight_threshold_kg {
        push(RiskFactor::ExcessBaggageWeight);
    }

    let total = hits.iter().map(|hit| hit.weight).sum();
    (hits, total)
}
