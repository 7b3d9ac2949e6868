pub mod admin;
pub mod bookings;
pub mod sessions;
pub mod slots;
