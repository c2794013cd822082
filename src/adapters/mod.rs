//! Adapters between the query layer and the outside world.

pub mod cache;
pub mod http;
pub mod upstream;
