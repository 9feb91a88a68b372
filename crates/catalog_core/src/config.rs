//! Catalog configuration.
//!
//! # Responsibility
//! - Describe where the three table files live and how logging is set up.
//! - Load overrides from a JSON file; every field has a default.
//!
//! # Invariants
//! - Relative table file names resolve against `data_dir`.
//! - The three tables never share one file.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration-layer error.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file or data directory could not be read/created.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Config file is not valid JSON for [`CatalogConfig`].
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Values parsed but are not usable together.
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "`{}`: {source}", path.display()),
            Self::Parse { path, source } => {
                write!(f, "invalid config file `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Logging settings. Logging stays off while `dir` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

/// Table file locations plus logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_authors_file")]
    pub authors_file: PathBuf,
    #[serde(default = "default_publishers_file")]
    pub publishers_file: PathBuf,
    #[serde(default = "default_books_file")]
    pub books_file: PathBuf,
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_level() -> String {
    default_log_level().to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_authors_file() -> PathBuf {
    PathBuf::from("authors.csv")
}

fn default_publishers_file() -> PathBuf {
    PathBuf::from("publishers.csv")
}

fn default_books_file() -> PathBuf {
    PathBuf::from("books.csv")
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            authors_file: default_authors_file(),
            publishers_file: default_publishers_file(),
            books_file: default_books_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Default file names rooted at `data_dir`.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Loads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn authors_path(&self) -> PathBuf {
        self.data_dir.join(&self.authors_file)
    }

    pub fn publishers_path(&self) -> PathBuf {
        self.data_dir.join(&self.publishers_file)
    }

    pub fn books_path(&self) -> PathBuf {
        self.data_dir.join(&self.books_file)
    }

    /// Rejects empty file names and tables that would share a file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let files = [
            ("authors_file", &self.authors_file),
            ("publishers_file", &self.publishers_file),
            ("books_file", &self.books_file),
        ];
        for (key, file) in files {
            if file.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(format!("`{key}` must not be empty")));
            }
        }

        let paths = [self.authors_path(), self.publishers_path(), self.books_path()];
        for (index, path) in paths.iter().enumerate() {
            if paths[index + 1..].contains(path) {
                return Err(ConfigError::Invalid(format!(
                    "table file `{}` is configured more than once",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
