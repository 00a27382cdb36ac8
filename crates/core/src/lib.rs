//! # Barbershop Core
//!
//! Domain types shared by every other crate in the workspace: request and
//! response models, the error taxonomy, and the slot-availability
//! calculator. This crate is deliberately free of I/O so the booking rules
//! can be tested without a database or an HTTP stack.

/// Slot-availability calculation over a single day's schedule
pub mod availability;
/// Error taxonomy used across the workspace
pub mod errors;
/// Domain models and request/response DTOs
pub mod models;
