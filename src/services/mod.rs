pub mod index_service;
pub mod ranking_queries;

pub use index_service::IndexService;
pub use ranking_queries::DEFAULT_SEARCH_LIMIT;
