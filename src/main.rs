use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use mentorsync_api::config::ApiConfig;
use mentorsync_api::payment::RazorpayGateway;
use mentorsync_db::{create_pool, schema::initialize_database};

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

    // Payment gateway used by the booking coordinator
    let payment = Arc::new(RazorpayGateway::new(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
        config.razorpay_base_url.clone(),
    ));

    // Start the periodic slot maintenance and session sweep loops
    mentorsync_api::jobs::spawn_all(
        db_pool.clone(),
        config.slot_window_days,
        Duration::from_secs(config.maintenance_interval_secs),
        Duration::from_secs(config.sweep_interval_secs),
    );

    // Start API server
    mentorsync_api::start_server(config, db_pool, payment).await?;

    Ok(())
}
