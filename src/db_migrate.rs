use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use tracing::info;

use mentorsync_db::schema::initialize_database;

/// Standalone schema bootstrap for the booking engine. The server applies
/// the same schema on startup; this binary exists for provisioning a
/// database ahead of a deploy without starting the HTTP surface.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    tracing_subscriber::fmt().init();

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL must be set to bootstrap the schema")?;

    let pool = mentorsync_db::create_pool(&database_url).await?;
    initialize_database(&pool).await?;

    info!(
        "Schema ready: time_slots and session_bookings with the \
         (mentor_id, start_time) idempotency key, capacity checks, and the \
         active-session-per-pair guard in place."
    );

    Ok(())
}
