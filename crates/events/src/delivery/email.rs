//! Alert email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport to send a
//! plain-text email for each threshold breach. Configuration is loaded from
//! environment variables; if `SMTP_HOST` is not set, [`EmailConfig::from_env`]
//! returns `None` and delivery is disabled. Sends are best-effort: callers
//! log failures and move on -- there is no retry.

use envtrack_core::alert::Alert;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "alerts@envtrack.local";

/// Default recipient when `ALERT_EMAIL_TO` is not set.
const DEFAULT_TO_ADDRESS: &str = "ops@envtrack.local";

/// Configuration for the SMTP alert delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Address that receives every alert email.
    pub to_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable         | Required | Default                  |
    /// |------------------|----------|--------------------------|
    /// | `SMTP_HOST`      | yes      | --                       |
    /// | `SMTP_PORT`      | no       | `587`                    |
    /// | `SMTP_FROM`      | no       | `alerts@envtrack.local`  |
    /// | `ALERT_EMAIL_TO` | no       | `ops@envtrack.local`     |
    /// | `SMTP_USER`      | no       | --                       |
    /// | `SMTP_PASSWORD`  | no       | --                       |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            to_address: std::env::var("ALERT_EMAIL_TO")
                .unwrap_or_else(|_| DEFAULT_TO_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// AlertEmail
// ---------------------------------------------------------------------------

/// The fields an alert email carries.
///
/// Built either from a domain [`Alert`] (the monitoring loop) or directly
/// from the notify endpoint's request payload.
#[derive(Debug, Clone)]
pub struct AlertEmail {
    /// Human-readable sensor name, e.g. `"Air Quality"`.
    pub sensor: String,
    pub value: f64,
    pub expected_range: String,
    /// Pre-formatted observation time.
    pub timestamp: String,
}

impl From<&Alert> for AlertEmail {
    fn from(alert: &Alert) -> Self {
        Self {
            sensor: alert.sensor.label().to_string(),
            value: alert.value,
            expected_range: alert.expected_range.clone(),
            timestamp: alert.timestamp.to_rfc3339(),
        }
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends alert notification emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    /// Create a new delivery service with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send one alert email to the configured recipient.
    pub async fn deliver(&self, alert: &AlertEmail) -> Result<(), EmailError> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials,
            AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
        };

        let subject = format!("Alert: Abnormal {} Detected", alert.sensor);
        let body = format!(
            "An unusual {} level was detected at {}.\n\n\
             Value detected: {}\n\
             Expected range: {}\n\n\
             Please take necessary action or monitor the system.\n\n\
             - EnviroTrack Monitoring",
            alert.sensor, alert.timestamp, alert.value, alert.expected_range
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(self.config.to_address.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(
            to = %self.config.to_address,
            sensor = %alert.sensor,
            "Alert email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
