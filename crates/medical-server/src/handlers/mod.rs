//! HTTP handlers, one module per resource.
//!
//! Handlers validate the request DTO, lock the database, call the service
//! and map the result back to DTOs. Nothing is awaited while the lock is
//! held.

pub mod appointments;
pub mod doctors;
pub mod medications;
pub mod patients;
pub mod prescriptions;
pub mod specializations;
