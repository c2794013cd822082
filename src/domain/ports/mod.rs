//! Port trait definitions (Hexagonal Architecture)
//!
//! - IndexSource: fetches the upstream index document
//! - Clock: current-time source for cache expiry

pub mod clock;
pub mod index_source;

pub use clock::{Clock, SystemClock};
pub use index_source::IndexSource;
