use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One mentor's pattern failing must not abort the whole maintenance run;
/// the failure is captured here and reported with the aggregate result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorFailure {
    pub mentor_id: Uuid,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaintenanceReport {
    pub slots_deleted: u64,
    pub slots_generated: u64,
    pub mentor_errors: Vec<MentorFailure>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepReport {
    /// Sessions promoted to ONGOING because their slot start had passed.
    pub sessions_started: u64,
    pub sessions_completed: u64,
    pub errors: Vec<String>,
}
