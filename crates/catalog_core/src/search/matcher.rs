//! Case-insensitive text matching for catalog search.
//!
//! # Responsibility
//! - Compile user search text into one reusable matcher.
//! - Keep literal substring search safe from regex syntax errors.
//!
//! # Invariants
//! - Matching is always case-insensitive.
//! - Blank search text matches every value.

use crate::store::RepoError;
use regex::{Regex, RegexBuilder};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for query compilation and table reads.
#[derive(Debug)]
pub enum SearchError {
    /// Raw regex text could not be compiled.
    InvalidQuery { query: String, message: String },
    Repo(RepoError),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, message } => {
                write!(f, "invalid search pattern `{query}`: {message}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuery { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Which fields a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchScope {
    /// Books: title and ISBN. Publishers and authors: name.
    #[default]
    Primary,
    /// Adds secondary fields: author/publisher names for books, address and
    /// phone for publishers.
    Global,
}

/// Search options shared by every entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub scope: MatchScope,
    /// Treat `text` as a regular expression instead of a literal substring.
    ///
    /// Default is `false` so arbitrary user input never fails to compile.
    pub raw_regex: bool,
}

impl SearchQuery {
    /// Literal substring query over primary fields.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            scope: MatchScope::Primary,
            raw_regex: false,
        }
    }

    pub fn global(mut self) -> Self {
        self.scope = MatchScope::Global;
        self
    }

    pub fn with_scope(mut self, scope: MatchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn regex(mut self) -> Self {
        self.raw_regex = true;
        self
    }

    pub fn is_global(&self) -> bool {
        self.scope == MatchScope::Global
    }
}

/// Compiled matcher for one [`SearchQuery`].
#[derive(Debug, Clone)]
pub struct TextMatcher {
    regex: Option<Regex>,
}

impl TextMatcher {
    pub fn compile(query: &SearchQuery) -> SearchResult<Self> {
        if query.text.is_empty() {
            return Ok(Self { regex: None });
        }

        let pattern = if query.raw_regex {
            query.text.clone()
        } else {
            regex::escape(&query.text)
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|err| SearchError::InvalidQuery {
                query: query.text.clone(),
                message: err.to_string(),
            })?;

        Ok(Self { regex: Some(regex) })
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.as_ref().map_or(true, |regex| regex.is_match(value))
    }

    /// Returns whether any of `values` matches.
    pub fn any<'v>(&self, values: impl IntoIterator<Item = &'v str>) -> bool {
        values.into_iter().any(|value| self.is_match(value))
    }
}
