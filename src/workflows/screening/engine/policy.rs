use super::super::domain::RiskLevel;
use super::config::TierThresholds;

impl RiskLevel {
    /// Lower bounds are inclusive: a score equal to a threshold lands in the higher tier.
    pub fn from_score(score: u32, thresholds: &TierThresholds) -> Self {
        if score >= thresholds.high {
            RiskLevel::High
        } else if score >= thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Classifies a score with the standard thresholds.
pub fn classify(score: u32) -> RiskLevel {
    RiskLevel::from_score(score, &TierThresholds::default())
}
