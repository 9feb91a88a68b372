//! CLI error type. Every error ends the process with status 1.

use catalog_core::{ConfigError, EntityId, LoggingError, RepoError, SearchError};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Repo(RepoError),
    Search(SearchError),
    /// An update names an author or publisher id that is not stored.
    MissingReference { kind: &'static str, id: EntityId },
    Output(String),
}

pub type CliResult<T> = Result<T, CliError>;

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config error: {err}"),
            Self::Logging(err) => write!(f, "logging error: {err}"),
            Self::Repo(err) => write!(f, "storage error: {err}"),
            Self::Search(err) => write!(f, "search error: {err}"),
            Self::MissingReference { kind, id } => write!(f, "no {kind} with id {id}"),
            Self::Output(message) => write!(f, "output error: {message}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Search(err) => Some(err),
            Self::MissingReference { .. } | Self::Output(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SearchError> for CliError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value.to_string())
    }
}
