use serde::{Deserialize, Serialize};

use super::super::domain::RiskFactor;

/// Points contributed by each rule when it fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWeights {
    pub no_fly_match: u32,
    pub dangerous_weapon: u32,
    pub suspicious_weapon: u32,
    pub dangerous_chemical: u32,
    pub suspicious_chemical: u32,
    pub high_travel_anomaly: u32,
    pub duplicate_bag_tag: u32,
    pub multiple_boarding_passes: u32,
    pub unattended_baggage: u32,
    pub bag_tampering: u32,
    pub suspicious_behavior: u32,
    pub excess_baggage_weight: u32,
}

impl RuleWeights {
    pub fn weight_for(&self, factor: RiskFactor) -> u32 {
        match factor {
            RiskFactor::NoFlyListMatch => self.no_fly_match,
            RiskFactor::DangerousWeapon => self.dangerous_weapon,
            RiskFactor::SuspiciousWeapon => self.suspicious_weapon,
            RiskFactor::DangerousChemical => self.dangerous_chemical,
            RiskFactor::SuspiciousChemical => self.suspicious_chemical,
            RiskFactor::HighTravelAnomaly => self.high_travel_anomaly,
            RiskFactor::DuplicateBagTag => self.duplicate_bag_tag,
            RiskFactor::MultipleBoardingPasses => self.multiple_boarding_passes,
            RiskFactor::UnattendedBaggage => self.unattended_baggage,
            RiskFactor::BagTampering => self.bag_tampering,
            RiskFactor::SuspiciousBehavior => self.suspicious_behavior,
            RiskFactor::ExcessBaggageWeight => self.excess_baggage_weight,
        }
    }
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            no_fly_match: 5,
            dangerous_weapon: 35,
            suspicious_weapon: 25,
            dangerous_chemical: 35,
            suspicious_chemical: 25,
            high_travel_anomaly: 15,
            duplicate_bag_tag: 20,
            multiple_boarding_passes: 20,
            unattended_baggage: 15,
            bag_tampering: 10,
            suspicious_behavior: 10,
            excess_baggage_weight: 10,
        }
    }
}

/// Inclusive lower bounds for the MEDIUM and HIGH tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub medium: u32,
    pub high: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium: 100,
            high: 140,
        }
    }
}

/// Scoring rubric: rule weights, the excess baggage limit, and tier cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: RuleWeights,
    pub excess_weight_threshold_kg: f64,
    pub thresholds: TierThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: RuleWeights::default(),
            excess_weight_threshold_kg: 7.0,
            thresholds: TierThresholds::default(),
        }
    }
}
