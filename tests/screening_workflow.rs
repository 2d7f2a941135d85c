use airport_screening::workflows::screening::{
    AlertChannel, AlertDispatcher, AlertOutcome, DeliveryError, Recommendation, RejectionReason,
    RiskEngine, RiskLevel, ScreeningRun, SecurityReport,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};

const DATASET: &str = include_str!("../demos/passengers.csv");

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<(String, String, String)>>,
}

impl AlertChannel for Outbox {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        self.sent
            .lock()
            .expect("outbox lock")
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

fn screened() -> ScreeningRun {
    ScreeningRun::from_reader(DATASET.as_bytes(), &RiskEngine::default())
        .expect("demo dataset parses")
}

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|date| date.and_hms_opt(9, 26, 53))
        .expect("valid timestamp")
}

#[test]
fn invalid_rows_are_reported_not_scored() {
    let run = screened();

    assert_eq!(run.total_rows(), 6);
    assert_eq!(run.batch.len(), 4);
    assert_eq!(run.rejected.len(), 2);
    assert_eq!(
        run.rejected[0].reason,
        RejectionReason::MissingField {
            column: "extra_weight_kg"
        }
    );
    assert_eq!(
        run.rejected[1].reason,
        RejectionReason::InvalidWeight {
            value: "heavy".to_string()
        }
    );
    assert!(run.batch.find("P005").is_none());
}

#[test]
fn scores_follow_the_rule_table() {
    let run = screened();

    let low = run.batch.find("P001").expect("P001 scored");
    assert_eq!(low.assessment.score, 50);
    assert_eq!(low.assessment.level, RiskLevel::Low);
    assert_eq!(
        low.assessment.reasons(),
        vec![
            "No-Fly List Match",
            "Dangerous Weapon Detected",
            "Excess Baggage Weight"
        ]
    );

    let medium = run.batch.find("P002").expect("P002 scored");
    assert_eq!(medium.assessment.score, 130);
    assert_eq!(medium.assessment.level, RiskLevel::Medium);

    let high = run.batch.find("P003").expect("P003 scored");
    assert_eq!(high.assessment.score, 175);
    assert_eq!(high.assessment.level, RiskLevel::High);

    let clear = run.batch.find("P004").expect("P004 scored");
    assert_eq!(clear.assessment.score, 0);
    assert!(clear.assessment.reasons().is_empty());

    let distribution = run.batch.tier_distribution();
    assert_eq!(
        (distribution.low, distribution.medium, distribution.high),
        (2, 1, 1)
    );
}

#[test]
fn only_high_tier_passengers_are_alerted() {
    let run = screened();
    let outbox = Arc::new(Outbox::default());
    let dispatcher = AlertDispatcher::new(outbox.clone(), "security@example.com");

    let outcome = dispatcher
        .dispatch(&run.batch.high_risk(), generated_at())
        .expect("in-memory delivery");
    assert_eq!(outcome, AlertOutcome::Sent { passengers: 1 });

    let sent = outbox.sent.lock().expect("outbox lock");
    assert_eq!(sent.len(), 1);
    let (to, subject, body) = &sent[0];
    assert_eq!(to, "security@example.com");
    assert_eq!(subject, "HIGH RISK PASSENGER ALERT");
    assert!(body.contains("P003"));
    assert!(body.contains("Grace Hopper"));
    assert!(!body.contains("P002"));
}

#[test]
fn a_quiet_batch_sends_nothing() {
    let dataset = DATASET
        .lines()
        .filter(|line| !line.starts_with("P003"))
        .collect::<Vec<_>>()
        .join("\n");
    let run = ScreeningRun::from_reader(dataset.as_bytes(), &RiskEngine::default())
        .expect("dataset parses");
    let outbox = Arc::new(Outbox::default());
    let dispatcher = AlertDispatcher::new(outbox.clone(), "security@example.com");

    let outcome = dispatcher
        .dispatch(&run.batch.high_risk(), generated_at())
        .expect("nothing to send is not an error");

    assert_eq!(outcome, AlertOutcome::NothingToSend);
    assert!(outbox.sent.lock().expect("outbox lock").is_empty());
}

#[test]
fn report_preview_lists_factors_and_recommendation() {
    let run = screened();
    let passenger = run.batch.find("P003").expect("P003 scored");
    let report = SecurityReport::compose(passenger, generated_at());

    assert_eq!(report.recommendation, Recommendation::SecondaryScreening);
    assert_eq!(report.file_name(), "P003_security_report.pdf");

    let text = report.to_text();
    assert!(text.contains("Passenger ID   : P003"));
    assert!(text.contains("- Dangerous Chemical Trace"));
    assert!(text.contains("Immediate secondary screening is REQUIRED."));
    assert!(text.contains("Generated On: 2025-03-14 09:26:53"));
}
