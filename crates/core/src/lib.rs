//! # MentorSync Core
//!
//! Domain types and pure scheduling logic for the MentorSync booking engine.
//! This crate is I/O free: it defines the data model, the error taxonomy,
//! the recurring-slot enumeration, the session state machine rules, and the
//! datetime normalizer. Persistence and transport live in the `db` and
//! `api` crates.

pub mod datetime;
pub mod errors;
pub mod lifecycle;
pub mod models;
pub mod scheduling;
