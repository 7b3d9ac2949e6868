pub mod maintenance;
pub mod session;
pub mod time_slot;
