//! Domain entities for the medical records system.
//!
//! Forward relationships are owned values (an appointment owns its patient,
//! doctor and prescriptions). Back-references are foreign-key ids, so an
//! entity graph loaded from the database is always a tree.

mod appointment;
mod doctor;
mod medication;
mod patient;
mod prescription;

pub use appointment::*;
pub use doctor::*;
pub use medication::*;
pub use patient::*;
pub use prescription::*;
