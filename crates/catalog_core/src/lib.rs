//! Core record store for the library catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use codec::{decode_record, encode_record, quote_field, RecordReader};
pub use config::{CatalogConfig, ConfigError, LoggingConfig};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::author::Author;
pub use model::book::Book;
pub use model::publisher::Publisher;
pub use model::{Entity, EntityId};
pub use search::matcher::{MatchScope, SearchError, SearchQuery, SearchResult, TextMatcher};
pub use service::library_service::{CsvLibraryService, LibraryService};
pub use store::{
    AuthorMapper, AuthorTable, BookMapper, BookTable, CsvTable, PublisherMapper, PublisherTable,
    RecordMapper, RepoError, RepoResult, Table,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
