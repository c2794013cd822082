//! Domain layer for the industry index service
//!
//! This module contains the index document model, the error taxonomy and
//! the ports the loader depends on.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
