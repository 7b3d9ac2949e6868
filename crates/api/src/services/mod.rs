/// Capacity-checked, payment-gated reservation and commit
pub mod booking;
/// Session state machine operations
pub mod lifecycle;
/// Recurring and one-off slot creation
pub mod slots;
