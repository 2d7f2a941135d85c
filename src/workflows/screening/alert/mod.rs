//! High-risk alert composition and dispatch.
//!
//! The dispatcher turns the HIGH-tier subset of a batch into one notification and hands it
//! to an [`AlertChannel`]. It never retries and never deduplicates; the caller decides
//! when and how often to send.

mod smtp;

pub use smtp::SmtpAlertChannel;

use super::batch::ScreenedPassenger;
use crate::config::ConfigError;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const ALERT_SUBJECT: &str = "HIGH RISK PASSENGER ALERT";
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outbound delivery hook (SMTP in production, in-memory in tests).
pub trait AlertChannel: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Transport-level failure while delivering an alert.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("invalid mail address: {0}")]
    Address(String),
    #[error("unable to build alert message: {0}")]
    Message(String),
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Error raised by [`AlertDispatcher::dispatch`].
#[derive(Debug, thiserror::Error)]
pub enum AlertDispatchError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Plain-text alert ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
    pub passenger_count: usize,
}

impl AlertMessage {
    /// Composes one message enumerating every passenger; `None` when there is nobody to report.
    pub fn compose(
        high_risk: &[&ScreenedPassenger],
        generated_at: NaiveDateTime,
    ) -> Option<Self> {
        if high_risk.is_empty() {
            return None;
        }

        let mut lines = vec![
            "AIRPORT SECURITY ALERT".to_string(),
            "=====================".to_string(),
            String::new(),
            "The following HIGH-RISK passengers were detected:".to_string(),
        ];

        for passenger in high_risk {
            let record = &passenger.record;
            let assessment = &passenger.assessment;
            lines.extend([
                String::new(),
                format!("Passenger ID   : {}", record.passenger_id),
                format!("Name           : {}", record.passenger_name),
                format!("Flight No      : {}", record.flight_no),
                format!("Risk Score     : {}", assessment.score),
                "Reasons:".to_string(),
            ]);
            lines.extend(
                assessment
                    .reasons()
                    .into_iter()
                    .map(|reason| format!("- {reason}")),
            );
            lines.push("-".repeat(40));
        }

        lines.extend([
            String::new(),
            "Generated On:".to_string(),
            generated_at.format(TIMESTAMP_FORMAT).to_string(),
        ]);

        let mut body = lines.join("\n");
        body.push('\n');

        Some(Self {
            subject: ALERT_SUBJECT.to_string(),
            body,
            passenger_count: high_risk.len(),
        })
    }
}

/// Result of a dispatch request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AlertOutcome {
    NothingToSend,
    Sent { passengers: usize },
}

/// Sends HIGH-tier alerts to a fixed recipient through an injected channel.
#[derive(Clone)]
pub struct AlertDispatcher {
    channel: Arc<dyn AlertChannel>,
    recipient: String,
}

impl std::fmt::Debug for AlertDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertDispatcher")
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

impl AlertDispatcher {
    pub fn new(channel: Arc<dyn AlertChannel>, recipient: impl Into<String>) -> Self {
        Self {
            channel,
            recipient: recipient.into(),
        }
    }

    /// Builds an SMTP-backed dispatcher; fails when credentials are incomplete.
    pub fn smtp(config: &crate::config::AlertConfig) -> Result<Self, ConfigError> {
        let settings = config.smtp()?;
        let recipient = settings.recipient.clone();
        Ok(Self::new(Arc::new(SmtpAlertChannel::new(settings)), recipient))
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn dispatch(
        &self,
        high_risk: &[&ScreenedPassenger],
        generated_at: NaiveDateTime,
    ) -> Result<AlertOutcome, AlertDispatchError> {
        let Some(message) = AlertMessage::compose(high_risk, generated_at) else {
            info!("no high-risk passengers; alert skipped");
            return Ok(AlertOutcome::NothingToSend);
        };

        if let Err(err) = self
            .channel
            .send(&self.recipient, &message.subject, &message.body)
        {
            warn!(error = %err, passengers = message.passenger_count, "security alert delivery failed");
            return Err(err.into());
        }

        info!(
            passengers = message.passenger_count,
            recipient = %self.recipient,
            "security alert sent"
        );
        Ok(AlertOutcome::Sent {
            passengers: message.passenger_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::{
        BaggageScanResult, BehaviorState, ChemicalTrace, PassengerRecord, RiskAssessment,
        RiskFactor, RiskLevel, RuleHit, TravelAnomalyLevel,
    };
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<(String, String, String)>>,
        fail: bool,
    }

    impl AlertChannel for RecordingChannel {
        fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
            if self.fail {
                return Err(DeliveryError::Transport("connection refused".to_string()));
            }
            self.sent.lock().expect("channel mutex poisoned").push((
                to.to_string(),
                subject.to_string(),
                body.to_string(),
            ));
            Ok(())
        }
    }

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 26, 53))
            .expect("valid timestamp")
    }

    fn screened(id: &str, name: &str) -> ScreenedPassenger {
        ScreenedPassenger {
            record: PassengerRecord {
                passenger_id: id.to_string(),
                passenger_name: name.to_string(),
                flight_no: "EK202".to_string(),
                behavior_state: BehaviorState::Aggressive,
                bag_tampering: false,
                no_fly_match: true,
                chemical_trace: ChemicalTrace::from_token("none"),
                baggage_scan_result: BaggageScanResult::Knife,
                travel_anomaly_level: TravelAnomalyLevel::from_token("low"),
                travel_pattern_risk: "low".to_string(),
                duplicate_bag_tag: false,
                unattended_baggage: false,
                multiple_boarding_passes: false,
                extra_weight_kg: 0.0,
            },
            assessment: RiskAssessment {
                score: 150,
                level: RiskLevel::High,
                hits: vec![
                    RuleHit::new(RiskFactor::NoFlyListMatch, 5),
                    RuleHit::new(RiskFactor::DangerousWeapon, 35),
                ],
            },
        }
    }

    #[test]
    fn empty_subset_sends_nothing() {
        let channel = Arc::new(RecordingChannel::default());
        let dispatcher = AlertDispatcher::new(channel.clone(), "security@example.com");

        let outcome = dispatcher.dispatch(&[], generated_at()).expect("not an error");
        assert_eq!(outcome, AlertOutcome::NothingToSend);
        assert!(channel.sent.lock().expect("lock").is_empty());
    }

    #[test]
    fn one_message_enumerates_every_passenger() {
        let channel = Arc::new(RecordingChannel::default());
        let dispatcher = AlertDispatcher::new(channel.clone(), "security@example.com");
        let first = screened("P1", "Alan Turing");
        let second = screened("P2", "Joan Clarke");

        let outcome = dispatcher
            .dispatch(&[&first, &second], generated_at())
            .expect("sent");
        assert_eq!(outcome, AlertOutcome::Sent { passengers: 2 });

        let sent = channel.sent.lock().expect("lock");
        assert_eq!(sent.len(), 1);
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "security@example.com");
        assert_eq!(subject, ALERT_SUBJECT);
        assert!(body.starts_with("AIRPORT SECURITY ALERT"));
        assert!(body.contains("Passenger ID   : P1"));
        assert!(body.contains("Name           : Joan Clarke"));
        assert!(body.contains("Risk Score     : 150"));
        assert!(body.contains("Reasons:\n- No-Fly List Match\n- Dangerous Weapon Detected\n"));
        assert!(body.ends_with("Generated On:\n2025-03-14 09:26:53\n"));
        assert!(body.find("P1").expect("p1") < body.find("P2").expect("p2"));
    }

    #[test]
    fn message_layout_is_exact_for_a_single_passenger() {
        let passenger = screened("P7", "Mary Cartwright");
        let message = AlertMessage::compose(&[&passenger], generated_at()).expect("composed");

        let expected = "AIRPORT SECURITY ALERT\n\
=====================\n\
\n\
The following HIGH-RISK passengers were detected:\n\
\n\
Passenger ID   : P7\n\
Name           : Mary Cartwright\n\
Flight No      : EK202\n\
Risk Score     : 150\n\
Reasons:\n\
- No-Fly List Match\n\
- Dangerous Weapon Detected\n\
----------------------------------------\n\
\n\
Generated On:\n\
2025-03-14 09:26:53\n";
        assert_eq!(message.body, expected);
        assert_eq!(message.passenger_count, 1);
    }

    #[test]
    fn repeated_dispatch_is_not_deduplicated() {
        let channel = Arc::new(RecordingChannel::default());
        let dispatcher = AlertDispatcher::new(channel.clone(), "security@example.com");
        let passenger = screened("P1", "Alan Turing");

        dispatcher.dispatch(&[&passenger], generated_at()).expect("first");
        dispatcher.dispatch(&[&passenger], generated_at()).expect("second");
        assert_eq!(channel.sent.lock().expect("lock").len(), 2);
    }

    #[test]
    fn delivery_failures_are_surfaced() {
        let channel = Arc::new(RecordingChannel {
            fail: true,
            ..RecordingChannel::default()
        });
        let dispatcher = AlertDispatcher::new(channel, "security@example.com");
        let passenger = screened("P1", "Alan Turing");

        let error = dispatcher
            .dispatch(&[&passenger], generated_at())
            .expect_err("delivery fails");
        assert!(matches!(
            error,
            AlertDispatchError::Delivery(DeliveryError::Transport(_))
        ));
    }

    #[test]
    fn smtp_dispatcher_requires_credentials() {
        let config = crate::config::AlertConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            username: Some("alerts@example.com".to_string()),
            password: None,
            sender: Some("alerts@example.com".to_string()),
            recipient: Some("security@example.com".to_string()),
        };
        let error = AlertDispatcher::smtp(&config).expect_err("missing password");
        assert!(matches!(
            error,
            ConfigError::MissingSmtpSetting {
                name: "SMTP_PASSWORD"
            }
        ));
    }
}
