//! # Barbershop Mailer
//!
//! Best-effort transactional email for booking confirmations. Messages are
//! dispatched on a detached task with a bounded number of retries; a
//! delivery failure is logged and never propagates back into the request
//! that triggered it.

pub mod config;

use async_trait::async_trait;
use eyre::{eyre, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::MailerConfig;

/// A fully rendered outbound email.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound email transport. The API crate holds this behind a trait so
/// handler tests can substitute a recording double for the SMTP client.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// SMTP-backed mailer using lettre's async tokio transport.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailerConfig) -> Result<Self> {
        let from = config
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| eyre!("Invalid SMTP_FROM_ADDRESS: {e}"))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(message
                .to
                .parse::<Mailbox>()
                .map_err(|e| eyre!("Invalid recipient address {}: {e}", message.to))?)
            .subject(message.subject.clone())
            .body(message.body.clone())?;

        self.transport.send(email).await?;

        Ok(())
    }
}

/// Fire-and-forget dispatch with bounded retries.
///
/// Spawned after the booking row has committed, so the HTTP response never
/// waits on SMTP and a dead relay cannot fail a booking.
pub fn spawn_send(
    mailer: Arc<dyn Mailer>,
    message: EmailMessage,
    attempts: u32,
    retry_delay: Duration,
) {
    tokio::spawn(async move {
        let attempts = attempts.max(1);
        for attempt in 1..=attempts {
            match mailer.send(&message).await {
                Ok(()) => {
                    info!("Email sent to {} ({})", message.to, message.subject);
                    return;
                }
                Err(e) if attempt < attempts => {
                    warn!(
                        "Email to {} failed (attempt {}/{}): {e}",
                        message.to, attempt, attempts
                    );
                    tokio::time::sleep(retry_delay).await;
                }
                Err(e) => {
                    warn!(
                        "Giving up on email to {} after {} attempts: {e}",
                        message.to, attempts
                    );
                }
            }
        }
    });
}
