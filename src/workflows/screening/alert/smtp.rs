use super::{AlertChannel, DeliveryError};
use crate::config::SmtpSettings;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::debug;

/// Port where the server expects TLS from the first byte (SMTPS).
const IMPLICIT_TLS_PORT: u16 = 465;

/// How the TLS session is negotiated for a given SMTP port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TlsMode {
    Implicit,
    StartTls,
}

impl TlsMode {
    pub(crate) fn for_port(port: u16) -> Self {
        if port == IMPLICIT_TLS_PORT {
            Self::Implicit
        } else {
            Self::StartTls
        }
    }
}

/// Authenticated SMTP delivery over TLS. Port 465 uses implicit TLS, any other port
/// upgrades with STARTTLS. Each send opens a fresh connection.
#[derive(Debug, Clone)]
pub struct SmtpAlertChannel {
    settings: SmtpSettings,
}

impl SmtpAlertChannel {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn transport(&self) -> Result<SmtpTransport, DeliveryError> {
        let credentials = Credentials::new(
            self.settings.username.clone(),
            self.settings.password.clone(),
        );

        let builder = match TlsMode::for_port(self.settings.port) {
            TlsMode::Implicit => SmtpTransport::relay(&self.settings.host),
            TlsMode::StartTls => SmtpTransport::starttls_relay(&self.settings.host),
        };

        let transport = builder
            .map_err(|err| DeliveryError::Transport(err.to_string()))?
            .port(self.settings.port)
            .credentials(credentials)
            .build();

        Ok(transport)
    }
}

impl AlertChannel for SmtpAlertChannel {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        let from: Mailbox = self
            .settings
            .sender
            .parse()
            .map_err(|err: lettre::address::AddressError| {
                DeliveryError::Address(format!("{}: {err}", self.settings.sender))
            })?;
        let to: Mailbox = to
            .trim()
            .parse()
            .map_err(|err: lettre::address::AddressError| {
                DeliveryError::Address(format!("{to}: {err}"))
            })?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|err| DeliveryError::Message(err.to_string()))?;

        debug!(
            host = %self.settings.host,
            port = self.settings.port,
            tls = ?TlsMode::for_port(self.settings.port),
            "opening smtp session"
        );
        self.transport()?
            .send(&email)
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        Ok(())
    }
}
