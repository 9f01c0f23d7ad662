//! Email delivery via SMTP.
//!
//! [`EmailDelivery`] owns a pooled `lettre` async transport built once at
//! startup. If `SMTP_HOST` is not set, [`EmailConfig::from_env`] returns
//! `None` and the API runs without a mailer.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::messages::Notification;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Connection, TLS or authentication failure.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "PosterTrack <noreply@postertrack.local>";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 mailbox, e.g. `PosterTrack <noreply@example.com>`.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                                   |
    /// |-----------------|----------|-------------------------------------------|
    /// | `SMTP_HOST`     | yes      |                                           |
    /// | `SMTP_PORT`     | no       | `587`                                     |
    /// | `SMTP_FROM`     | no       | `PosterTrack <noreply@postertrack.local>` |
    /// | `SMTP_USER`     | no       |                                           |
    /// | `SMTP_PASSWORD` | no       |                                           |
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `None` if `SMTP_HOST` is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let smtp_host = lookup("SMTP_HOST").filter(|h| !h.trim().is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: lookup("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: lookup("SMTP_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: lookup("SMTP_USER"),
            smtp_password: lookup("SMTP_PASSWORD"),
        })
    }
}

/// Sends [`Notification`]s over SMTP.
pub struct EmailDelivery {
    from: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailDelivery {
    /// Validate the sender and build the STARTTLS transport. No connection is
    /// opened until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let from: Mailbox = config.from_address.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            from,
            mailer: builder.build(),
        })
    }

    /// Send one notification to every address in `recipients`.
    pub async fn send(&self, recipients: &[&str], notification: &Notification) -> Result<(), EmailError> {
        let email = build_message(&self.from, recipients, notification)?;
        self.mailer.send(email).await?;

        tracing::info!(
            recipients = recipients.len(),
            subject = %notification.subject,
            "Notification email sent",
        );
        Ok(())
    }
}

fn build_message(
    from: &Mailbox,
    recipients: &[&str],
    notification: &Notification,
) -> Result<Message, EmailError> {
    let mut builder = Message::builder()
        .from(from.clone())
        .subject(notification.subject.clone())
        .header(ContentType::TEXT_PLAIN);
    for to in recipients {
        builder = builder.to(to.parse()?);
    }
    Ok(builder.body(notification.body.clone())?)
}
