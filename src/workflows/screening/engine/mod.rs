mod config;
mod policy;
mod rules;

pub use config::{RuleWeights, ScoringConfig, TierThresholds};
pub use policy::classify;

use super::domain::{PassengerRecord, RiskAssessment, RiskLevel};

/// Stateless evaluator that applies the scoring rubric to a passenger.
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: ScoringConfig,
}

impl RiskEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn assess(&self, record: &PassengerRecord) -> RiskAssessment {
        let (hits, score) = rules::score_record(record, &self.config);
        let level = RiskLevel::from_score(score, &self.config.thresholds);

        RiskAssessment { score, level, hits }
    }
}
