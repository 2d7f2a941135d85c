use super::super::alert::TIMESTAMP_FORMAT;
use super::super::batch::ScreenedPassenger;
use super::super::domain::RiskLevel;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const REPORT_TITLE: &str = "AIRPORT SECURITY RISK ASSESSMENT REPORT";

/// Closing guidance printed on every report, selected by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    SecondaryScreening,
    Cleared,
}

impl Recommendation {
    pub fn for_level(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Self::SecondaryScreening,
            RiskLevel::Medium | RiskLevel::Low => Self::Cleared,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::SecondaryScreening => "Immediate secondary screening is REQUIRED.",
            Self::Cleared => "Passenger cleared under standard security procedures.",
        }
    }
}

/// Presentation hint attached to each report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    Title,
    Heading,
    Field,
    Bullet,
    Separator,
    Blank,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }

    /// Text as it appears in the plain-text preview.
    pub fn rendered(&self) -> String {
        match self.style {
            LineStyle::Bullet => format!("- {}", self.text),
            LineStyle::Separator => "-".repeat(40),
            _ => self.text.clone(),
        }
    }
}

/// Structured per-passenger report shared by the text preview and the PDF renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityReport {
    pub passenger_id: String,
    pub passenger_name: String,
    pub flight_no: String,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<&'static str>,
    pub recommendation: Recommendation,
    pub generated_at: NaiveDateTime,
}

impl SecurityReport {
    pub fn compose(passenger: &ScreenedPassenger, generated_at: NaiveDateTime) -> Self {
        let record = &passenger.record;
        let assessment = &passenger.assessment;

        Self {
            passenger_id: record.passenger_id.clone(),
            passenger_name: record.passenger_name.clone(),
            flight_no: record.flight_no.clone(),
            risk_score: assessment.score,
            risk_level: assessment.level,
            risk_factors: assessment.reasons(),
            recommendation: Recommendation::for_level(assessment.level),
            generated_at,
        }
    }

    /// Deterministic document name for the PDF export.
    pub fn file_name(&self) -> String {
        format!("{}_security_report.pdf", self.passenger_id)
    }

    pub fn lines(&self) -> Vec<ReportLine> {
        let mut lines = vec![
            ReportLine::new(LineStyle::Title, REPORT_TITLE),
            ReportLine::blank(),
            ReportLine::new(
                LineStyle::Field,
                format!("Passenger ID   : {}", self.passenger_id),
            ),
            ReportLine::new(
                LineStyle::Field,
                format!("Passenger Name : {}", self.passenger_name),
            ),
            ReportLine::new(
                LineStyle::Field,
                format!("Flight Number  : {}", self.flight_no),
            ),
            ReportLine::blank(),
            ReportLine::new(LineStyle::Separator, ""),
            ReportLine::new(LineStyle::Field, format!("Risk Score : {}", self.risk_score)),
            ReportLine::new(LineStyle::Field, format!("Risk Level : {}", self.risk_level)),
            ReportLine::blank(),
            ReportLine::new(LineStyle::Heading, "Risk Factors:"),
        ];

        if self.risk_factors.is_empty() {
            lines.push(ReportLine::new(LineStyle::Field, "No risk factors detected."));
        } else {
            lines.extend(
                self.risk_factors
                    .iter()
                    .map(|factor| ReportLine::new(LineStyle::Bullet, *factor)),
            );
        }

        lines.extend([
            ReportLine::blank(),
            ReportLine::new(LineStyle::Heading, "Recommendation:"),
            ReportLine::new(LineStyle::Field, self.recommendation.message()),
            ReportLine::blank(),
            ReportLine::new(
                LineStyle::Footer,
                format!(
                    "Generated On: {}",
                    self.generated_at.format(TIMESTAMP_FORMAT)
                ),
            ),
        ]);

        lines
    }

    /// Plain-text preview of [`SecurityReport::lines`].
    pub fn to_text(&self) -> String {
        self.lines()
            .iter()
            .map(ReportLine::rendered)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::{
        BaggageScanResult, BehaviorState, ChemicalTrace, PassengerRecord, TravelAnomalyLevel,
    };
    use crate::workflows::screening::engine::RiskEngine;
    use chrono::NaiveDate;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .and_then(|date| date.and_hms_opt(14, 5, 0))
            .expect("valid timestamp")
    }

    fn screened(no_fly: bool, scan: &str, weight: f64, everything: bool) -> ScreenedPassenger {
        let record = PassengerRecord {
            passenger_id: "P-77".to_string(),
            passenger_name: "Katherine Johnson".to_string(),
            flight_no: "NH9".to_string(),
            behavior_state: BehaviorState::from_token("calm"),
            bag_tampering: everything,
            no_fly_match: no_fly,
            chemical_trace: ChemicalTrace::from_token(if everything {
                "cocaine"
            } else {
                "none"
            }),
            baggage_scan_result: BaggageScanResult::from_token(scan),
            travel_anomaly_level: TravelAnomalyLevel::from_token("low"),
            travel_pattern_risk: "low".to_string(),
            duplicate_bag_tag: everything,
            unattended_baggage: everything,
            multiple_boarding_passes: everything,
            extra_weight_kg: weight,
        };
        let assessment = RiskEngine::default().assess(&record);
        ScreenedPassenger { record, assessment }
    }

    #[test]
    fn text_preview_lists_reasons_in_rule_order() {
        let report = SecurityReport::compose(&screened(true, "pistol", 8.0, false), generated_at());
        let text = report.to_text();

        assert!(text.starts_with(REPORT_TITLE));
        assert!(text.contains("Passenger ID   : P-77"));
        assert!(text.contains("Passenger Name : Katherine Johnson"));
        assert!(text.contains("Flight Number  : NH9"));
        assert!(text.contains("Risk Score : 50"));
        assert!(text.contains("Risk Level : LOW"));
        assert!(text.contains(
            "Risk Factors:\n- No-Fly List Match\n- Dangerous Weapon Detected\n- Excess Baggage Weight\n"
        ));
        assert!(text.contains("Passenger cleared under standard security procedures."));
        assert!(text.ends_with("Generated On: 2025-06-01 14:05:00"));
    }

    #[test]
    fn high_tier_requires_secondary_screening() {
        let report = SecurityReport::compose(&screened(true, "knife", 9.0, true), generated_at());
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.recommendation, Recommendation::SecondaryScreening);
        assert!(report
            .to_text()
            .contains("Immediate secondary screening is REQUIRED."));
    }

    #[test]
    fn report_without_factors_says_so() {
        let report = SecurityReport::compose(&screened(false, "clear", 0.0, false), generated_at());
        assert!(report.risk_factors.is_empty());
        assert!(report
            .lines()
            .iter()
            .all(|line| line.style != LineStyle::Bullet));
        assert!(report.to_text().contains("Risk Factors:\nNo risk factors detected."));
    }

    #[test]
    fn file_name_is_derived_from_passenger_id() {
        let report = SecurityReport::compose(&screened(false, "clear", 0.0, false), generated_at());
        assert_eq!(report.file_name(), "P-77_security_report.pdf");
    }
}
