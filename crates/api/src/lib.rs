//! # MentorSync API
//!
//! The API crate provides the web server implementation for the MentorSync
//! booking engine. It exposes endpoints for slot management, payment-gated
//! booking, and the session lifecycle, plus admin triggers for the
//! background jobs.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Thin request adapters over the engine services
//! - **Services**: SlotGenerator, BookingCoordinator and SessionLifecycle
//! - **Jobs**: SlotMaintenanceJob and SessionSweepJob, trigger-agnostic
//! - **Payment**: the payment-gateway collaborator (order / verify / refund)
//! - **Middleware**: error mapping to HTTP responses
//!
//! The API uses Axum as the web framework and SQLx for database interactions.

/// Configuration module for API settings
pub mod config;
/// Request handlers bridging HTTP to the services
pub mod handlers;
/// Background jobs driven by an external periodic trigger
pub mod jobs;
/// Middleware for error handling
pub mod middleware;
/// Payment gateway collaborator
pub mod payment;
/// Route definitions and API endpoint structure
pub mod routes;
/// The scheduling and booking engine services
pub mod services;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use crate::payment::PaymentGateway;

/// Shared application state that is accessible to all request handlers.
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,

    /// Payment gateway collaborator used by the booking coordinator
    pub payment: Arc<dyn PaymentGateway>,

    /// Rolling window kept populated by the maintenance job, in days
    pub slot_window_days: i64,
}

/// Starts the API server with the provided configuration, database
/// connection, and payment gateway.
pub async fn start_server(
    config: config::ApiConfig,
    db_pool: PgPool,
    payment: Arc<dyn PaymentGateway>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        payment,
        slot_window_days: config.slot_window_days,
    });

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot management endpoints
        .merge(routes::slots::routes())
        // Booking endpoints
        .merge(routes::bookings::routes())
        // Session lifecycle endpoints
        .merge(routes::sessions::routes())
        // Admin job triggers
        .merge(routes::admin::routes())
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
