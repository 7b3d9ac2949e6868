//! Background jobs. Each job is a plain struct with an async `run()`
//! entrypoint and no opinion about what triggers it: the binary drives them
//! from tokio interval loops, the admin routes expose manual triggers, and
//! any cron-equivalent could call them just as well.

pub mod session_sweep;
pub mod slot_maintenance;

use std::time::Duration;

use sqlx::PgPool;
use tracing::error;

pub use session_sweep::SessionSweepJob;
pub use slot_maintenance::SlotMaintenanceJob;

/// Spawns the periodic loops for both jobs. Failed runs are logged and the
/// loop keeps going; the next tick retries from scratch.
pub fn spawn_all(
    pool: PgPool,
    slot_window_days: i64,
    maintenance_interval: Duration,
    sweep_interval: Duration,
) {
    let maintenance = SlotMaintenanceJob::new(pool.clone(), slot_window_days);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(maintenance_interval);
        loop {
            ticker.tick().await;
            if let Err(err) = maintenance.run().await {
                error!("Slot maintenance run failed: {}", err);
            }
        }
    });

    let sweep = SessionSweepJob::new(pool);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            if let Err(err) = sweep.run().await {
                error!("Session sweep run failed: {}", err);
            }
        }
    });
}
