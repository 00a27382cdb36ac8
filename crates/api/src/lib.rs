//! # Barbershop API
//!
//! The API crate provides the web server for the barbershop booking
//! service: the service catalog, barber profiles, customer accounts,
//! weekly work schedules, availability lookup, and appointment booking.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like password hashing and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use barbershop_mailer::{EmailMessage, Mailer};
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Per-barber serialization points for the booking check-and-insert
/// sequence.
///
/// The availability check and the appointment insert are two separate
/// statements; holding the barber's lock across both makes two concurrent
/// requests for the same slot resolve deterministically into one success
/// and one conflict.
#[derive(Clone, Default)]
pub struct BarberLocks {
    inner: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl BarberLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, barber_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().await;
            map.entry(barber_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// Handle on the configured mailer plus its retry policy. Bookings call
/// `notify`, which spawns the delivery task and returns immediately.
#[derive(Clone)]
pub struct MailNotifier {
    pub mailer: Arc<dyn Mailer>,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl MailNotifier {
    pub fn notify(&self, message: EmailMessage) {
        barbershop_mailer::spawn_send(
            self.mailer.clone(),
            message,
            self.retry_attempts,
            self.retry_delay,
        );
    }
}

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Optional email notifier; `None` disables booking confirmations
    pub mailer: Option<MailNotifier>,
    /// Per-barber booking locks
    pub booking_locks: BarberLocks,
    /// Scan step between candidate appointment start times
    pub slot_granularity_minutes: i64,
}

/// Starts the API server with the provided configuration, database
/// connection, and optional mailer.
pub async fn start_server(
    config: config::ApiConfig,
    db_pool: PgPool,
    mailer: Option<MailNotifier>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        mailer,
        booking_locks: BarberLocks::new(),
        slot_granularity_minutes: config.slot_granularity_minutes,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Service catalog endpoints
        .merge(routes::services::routes())
        // Barber profile endpoints
        .merge(routes::barbers::routes())
        // Customer account endpoints
        .merge(routes::customers::routes())
        // Weekly work-schedule endpoints
        .merge(routes::work_schedules::routes())
        // Availability lookup endpoints
        .merge(routes::availability::routes())
        // Appointment booking endpoints
        .merge(routes::appointments::routes())
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
