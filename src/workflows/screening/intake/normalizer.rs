use super::super::domain::{
    BaggageScanResult, BehaviorState, ChemicalTrace, PassengerRecord, TravelAnomalyLevel,
};
use super::parser::RawRecord;
use serde::Serialize;
use std::fmt;

/// Why a row was excluded from the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    MissingField { column: &'static str },
    InvalidEncoding { column: &'static str },
    InvalidWeight { value: String },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::MissingField { column } => write!(f, "missing value for '{column}'"),
            RejectionReason::InvalidEncoding { column } => {
                write!(f, "value for '{column}' is not valid UTF-8")
            }
            RejectionReason::InvalidWeight { value } => {
                write!(f, "extra_weight_kg '{value}' is not a number")
            }
        }
    }
}

/// A source row that failed validation, identified by its line in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: RejectionReason,
}

pub(crate) fn normalize_record(raw: &RawRecord) -> Result<PassengerRecord, RejectionReason> {
    let identifier = |column: &'static str| -> Result<String, RejectionReason> {
        present(raw, column).map(str::to_string)
    };
    let token = |column: &'static str| -> Result<String, RejectionReason> {
        present(raw, column).map(str::to_lowercase)
    };
    let flag = |column: &'static str| -> Result<bool, RejectionReason> {
        token(column).map(|value| value == "yes")
    };

    Ok(PassengerRecord {
        passenger_id: identifier("passenger_id")?,
        passenger_name: identifier("passenger_name")?,
        flight_no: identifier("flight_no")?,
        behavior_state: BehaviorState::from_token(&token("behavior_state")?),
        bag_tampering: flag("bag_tampering")?,
        no_fly_match: flag("no_fly_match")?,
        chemical_trace: ChemicalTrace::from_token(&token("chemical_trace")?),
        baggage_scan_result: BaggageScanResult::from_token(&token("baggage_scan_result")?),
        travel_anomaly_level: TravelAnomalyLevel::from_token(&token("travel_anomaly_level")?),
        travel_pattern_risk: token("travel_pattern_risk")?,
        duplicate_bag_tag: flag("duplicate_bag_tag")?,
        unattended_baggage: flag("unattended_baggage")?,
        multiple_boarding_passes: flag("multiple_boarding_passes")?,
        extra_weight_kg: parse_weight(present(raw, "extra_weight_kg")?)?,
    })
}

fn present<'a>(raw: &'a RawRecord, column: &'static str) -> Result<&'a str, RejectionReason> {
    if raw.is_undecodable(column) {
        return Err(RejectionReason::InvalidEncoding { column });
    }
    raw.get(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(RejectionReason::MissingField { column })
}

fn parse_weight(value: &str) -> Result<f64, RejectionReason> {
    value
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .ok_or_else(|| RejectionReason::InvalidWeight {
            value: value.to_string(),
        })
}

#[cfg(test)]
pub(crate) fn parse_weight_for_tests(value: &str) -> Result<f64, RejectionReason> {
    parse_weight(value)
}
