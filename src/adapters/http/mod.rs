//! HTTP API over the index query layer.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod params;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{build_router, AppState, IndexHttpConfig, IndexHttpServer};
