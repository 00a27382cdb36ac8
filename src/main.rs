use std::sync::Arc;

use barbershop_api::config::ApiConfig;
use barbershop_api::MailNotifier;
use barbershop_db::{create_pool, schema::initialize_database};
use barbershop_mailer::{config::MailerConfig, SmtpMailer};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Configure the mailer when SMTP settings are present; without them,
    // bookings still work and confirmations are skipped.
    let mailer = match MailerConfig::from_env()? {
        Some(mailer_config) => {
            let smtp = SmtpMailer::new(&mailer_config)?;
            Some(MailNotifier {
                mailer: Arc::new(smtp),
                retry_attempts: mailer_config.retry_attempts(),
                retry_delay: mailer_config.retry_delay(),
            })
        }
        None => None,
    };

    // Start API server
    barbershop_api::start_server(config, db_pool, mailer).await?;

    Ok(())
}
