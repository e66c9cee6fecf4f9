//! Domain layer of the lab reservation service: models, the error taxonomy,
//! the repository seam and the services that enforce every business rule.

pub mod auth;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod services;

pub use errors::{LabError, LabResult};
