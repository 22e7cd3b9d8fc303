//! Medical Core - records for a medical practice
//!
//! Patients, doctors, specializations, appointments, prescriptions and
//! medications stored in SQLite, with:
//! - A repository layer per entity on a single [`Database`] connection
//! - Services enforcing existence and referential checks, one transaction
//!   per write
//! - Wire DTOs with field validation and a cycle-free entity <-> DTO mapper

pub mod db;
pub mod dto;
pub mod mapper;
pub mod models;
pub mod service;

pub use db::{Database, DbError, DbResult};
pub use dto::{Validate, ValidationErrors};
pub use service::{ServiceError, ServiceResult};
