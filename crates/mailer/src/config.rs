use eyre::{eyre, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Configuration for the transactional mailer.
///
/// All values come from environment variables. When `SMTP_HOST` is not set
/// the mailer is disabled entirely and bookings proceed without
/// notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct MailerConfig {
    /// SMTP relay hostname (required)
    pub smtp_host: String,
    /// SMTP submission port (defaults to 587)
    pub smtp_port: u16,
    /// SMTP username, when the relay requires authentication
    pub smtp_username: Option<String>,
    /// SMTP password, when the relay requires authentication
    pub smtp_password: Option<String>,
    /// Sender address for all outgoing mail (required)
    pub from_address: String,
    /// Delivery attempts per message before giving up (defaults to 3)
    pub retry_attempts: Option<u32>,
    /// Seconds to wait between delivery attempts (defaults to 5)
    pub retry_delay_secs: Option<u64>,
}

impl MailerConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `Ok(None)` when `SMTP_HOST` is unset, which means email
    /// notifications are switched off rather than misconfigured.
    pub fn from_env() -> Result<Option<Self>> {
        let smtp_host = match env::var("SMTP_HOST") {
            Ok(host) => host,
            Err(_) => return Ok(None),
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse::<u16>()
            .map_err(|_| eyre!("SMTP_PORT must be a valid u16"))?;

        let from_address = env::var("SMTP_FROM_ADDRESS")
            .map_err(|_| eyre!("SMTP_FROM_ADDRESS environment variable not set"))?;

        let smtp_username = env::var("SMTP_USERNAME").ok();
        let smtp_password = env::var("SMTP_PASSWORD").ok();

        let retry_attempts = env::var("SMTP_RETRY_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());
        let retry_delay_secs = env::var("SMTP_RETRY_DELAY_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok());

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
            retry_attempts,
            retry_delay_secs,
        }))
    }

    /// Delivery attempts per message (defaults to 3)
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts.unwrap_or(3).max(1)
    }

    /// Pause between delivery attempts (defaults to 5 seconds)
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs.unwrap_or(5))
    }
}
