//! Upstream index sources.

pub mod http_source;
pub mod static_source;

pub use http_source::HttpIndexSource;
pub use static_source::StaticIndexSource;
