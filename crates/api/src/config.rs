//! # API Configuration Module
//!
//! Loads configuration for the MentorSync API server from environment
//! variables, with defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: host address to bind (default: "0.0.0.0")
//! - `API_PORT`: port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: logging level (default: "info")
//! - `API_CORS_ORIGINS`: comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: request timeout (default: 30)
//! - `RAZORPAY_KEY_ID` / `RAZORPAY_KEY_SECRET`: payment gateway credentials (required)
//! - `RAZORPAY_BASE_URL`: gateway endpoint (default: "https://api.razorpay.com")
//! - `SLOT_WINDOW_DAYS`: rolling generation window (default: 7)
//! - `MAINTENANCE_INTERVAL_SECONDS`: slot maintenance cadence (default: 86400)
//! - `SWEEP_INTERVAL_SECONDS`: session sweep cadence (default: 300)

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Configuration for the MentorSync API server and its background jobs.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Payment gateway key id
    pub razorpay_key_id: String,

    /// Payment gateway key secret, used for order auth and signature checks
    pub razorpay_key_secret: String,

    /// Payment gateway endpoint
    pub razorpay_base_url: String,

    /// Forward horizon kept populated with generated slots, in days
    pub slot_window_days: i64,

    /// Seconds between slot maintenance runs
    pub maintenance_interval_secs: u64,

    /// Seconds between session sweep runs
    pub sweep_interval_secs: u64,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` or either Razorpay credential is
    /// missing, or if a numeric value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        // Payment gateway settings
        let razorpay_key_id = env::var("RAZORPAY_KEY_ID")
            .wrap_err("RAZORPAY_KEY_ID environment variable must be set")?;
        let razorpay_key_secret = env::var("RAZORPAY_KEY_SECRET")
            .wrap_err("RAZORPAY_KEY_SECRET environment variable must be set")?;
        let razorpay_base_url = env::var("RAZORPAY_BASE_URL")
            .unwrap_or_else(|_| "https://api.razorpay.com".to_string());

        // Scheduling settings
        let slot_window_days = env::var("SLOT_WINDOW_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .wrap_err("Invalid SLOT_WINDOW_DAYS value")?;
        let maintenance_interval_secs = env::var("MAINTENANCE_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .wrap_err("Invalid MAINTENANCE_INTERVAL_SECONDS value")?;
        let sweep_interval_secs = env::var("SWEEP_INTERVAL_SECONDS")
            .unwrap_or_else(|_| "300".to_string())
            .parse()
            .wrap_err("Invalid SWEEP_INTERVAL_SECONDS value")?;

        Ok(Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            razorpay_key_id,
            razorpay_key_secret,
            razorpay_base_url,
            slot_window_days,
            maintenance_interval_secs,
            sweep_interval_secs,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080").
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
