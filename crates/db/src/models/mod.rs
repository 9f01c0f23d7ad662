//! Row structs and DTOs.
//!
//! Each submodule pairs a `FromRow` row struct with the `Deserialize` DTOs
//! used to create or patch it. Update DTOs carry only `Option` fields.

pub mod analytics;
pub mod campaign;
pub mod catalog;
pub mod competitive_report;
pub mod compliance_report;
pub mod location;
pub mod lookup;
pub mod user;
