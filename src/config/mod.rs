use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub alerts: AlertConfig,
    pub reports: ReportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "465".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidSmtpPort)?;
        let username = non_empty_var("SMTP_USERNAME");
        let alerts = AlertConfig {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port,
            sender: non_empty_var("ALERT_SENDER").or_else(|| username.clone()),
            username,
            password: non_empty_var("SMTP_PASSWORD"),
            recipient: non_empty_var("ALERT_RECIPIENT"),
        };

        let output_dir = env::var("REPORT_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            alerts,
            reports: ReportConfig {
                output_dir: PathBuf::from(output_dir),
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Outbound alert transport. Credentials are optional until a send is attempted.
#[derive(Clone)]
pub struct AlertConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

impl fmt::Debug for AlertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl AlertConfig {
    /// Resolves the full credential set required for an authenticated send.
    pub fn smtp(&self) -> Result<SmtpSettings, ConfigError> {
        let required = |value: &Option<String>, name: &'static str| {
            value
                .clone()
                .ok_or(ConfigError::MissingSmtpSetting { name })
        };

        Ok(SmtpSettings {
            host: self.smtp_host.clone(),
            port: self.smtp_port,
            username: required(&self.username, "SMTP_USERNAME")?,
            password: required(&self.password, "SMTP_PASSWORD")?,
            sender: required(&self.sender, "ALERT_SENDER")?,
            recipient: required(&self.recipient, "ALERT_RECIPIENT")?,
        })
    }
}

/// Fully resolved SMTP-over-TLS settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Where generated passenger reports are written by the CLI.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSmtpPort,
    MissingSmtpSetting { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSmtpPort => write!(f, "SMTP_PORT must be a valid u16"),
            ConfigError::MissingSmtpSetting { name } => {
                write!(f, "{name} must be set to send security alerts")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSmtpPort
            | ConfigError::MissingSmtpSetting { .. } => None,
        }
    }
}
