//! Passenger risk screening: intake, rule scoring, tiering, reports, and alerts.

pub mod alert;
pub mod batch;
pub mod domain;
pub mod engine;
pub mod intake;
pub mod report;

pub use alert::{
    AlertChannel, AlertDispatchError, AlertDispatcher, AlertMessage, AlertOutcome,
    DeliveryError, SmtpAlertChannel,
};
pub use batch::{
    HistogramBin, ScreenedPassenger, ScreeningBatch, TierDistribution, DEFAULT_HISTOGRAM_BINS,
};
pub use domain::{
    BaggageScanResult, BehaviorState, ChemicalTrace, PassengerRecord, RiskAssessment,
    RiskFactor, RiskLevel, RuleHit, ThreatSeverity, TravelAnomalyLevel,
};
pub use engine::{classify, RiskEngine, RuleWeights, ScoringConfig, TierThresholds};
pub use intake::{IntakeBatch, IntakeError, PassengerIntake, RejectedRow, RejectionReason};
pub use report::{render_pdf, Recommendation, ReportError, ReportLine, SecurityReport};

use std::io::Read;
use std::path::Path;

/// A dataset after intake and scoring.
#[derive(Debug, Clone)]
pub struct ScreeningRun {
    pub batch: ScreeningBatch,
    pub rejected: Vec<RejectedRow>,
}

impl ScreeningRun {
    pub fn from_path<P: AsRef<Path>>(path: P, engine: &RiskEngine) -> Result<Self, IntakeError> {
        Ok(Self::from_intake(PassengerIntake::from_path(path)?, engine))
    }

    pub fn from_reader<R: Read>(reader: R, engine: &RiskEngine) -> Result<Self, IntakeError> {
        Ok(Self::from_intake(PassengerIntake::from_reader(reader)?, engine))
    }

    pub fn from_intake(intake: IntakeBatch, engine: &RiskEngine) -> Self {
        let IntakeBatch { records, rejected } = intake;
        Self {
            batch: ScreeningBatch::assess(records, engine),
            rejected,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.batch.len() + self.rejected.len()
    }
}
