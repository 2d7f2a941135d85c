mod normalizer;
mod parser;

pub use normalizer::{RejectedRow, RejectionReason};
pub use parser::REQUIRED_COLUMNS;

use super::domain::PassengerRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug)]
pub enum IntakeError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for IntakeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntakeError::Io(err) => write!(f, "failed to read passenger dataset: {}", err),
            IntakeError::Csv(err) => write!(f, "invalid passenger CSV data: {}", err),
        }
    }
}

impl std::error::Error for IntakeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntakeError::Io(err) => Some(err),
            IntakeError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for IntakeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Normalised passengers plus the rows that failed validation.
#[derive(Debug, Clone, Default)]
pub struct IntakeBatch {
    pub records: Vec<PassengerRecord>,
    pub rejected: Vec<RejectedRow>,
}

impl IntakeBatch {
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

pub struct PassengerIntake;

impl PassengerIntake {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<IntakeBatch, IntakeError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<IntakeBatch, IntakeError> {
        let mut batch = IntakeBatch::default();

        for raw in parser::parse_records(reader)? {
            match normalizer::normalize_record(&raw) {
                Ok(record) => batch.records.push(record),
                Err(reason) => {
                    debug!(line = raw.line, %reason, "passenger row rejected");
                    batch.rejected.push(RejectedRow {
                        line: raw.line,
                        reason,
                    });
                }
            }
        }

        info!(
            total = batch.total_rows(),
            accepted = batch.records.len(),
            rejected = batch.rejected.len(),
            "passenger dataset normalised"
        );

        Ok(batch)
    }
}
