//! # Barberbook Core
//!
//! Domain types and the appointment availability engine shared by the
//! database and API crates.
//!
//! The engine answers two questions for a calendar day: which slots are
//! bookable for a service, and whether a specific slot is free (with
//! alternatives when it is not). It never writes; every read goes through the
//! [`store::SchedulingStore`] collaborator so the persistence layer stays
//! swappable in tests.

pub mod errors;
pub mod models;
pub mod query;
pub mod scheduling;
pub mod store;
