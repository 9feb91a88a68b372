//! File-backed table store.
//!
//! # Responsibility
//! - Define the CRUD contract every catalog table satisfies ([`Table`]).
//! - Map records to entities per kind ([`RecordMapper`]) and keep file I/O in
//!   one generic implementation ([`csv_table::CsvTable`]).
//!
//! # Invariants
//! - A missing table file reads as an empty table, never as an error.
//! - Not-found is `Ok(None)`; errors are reserved for I/O failures and
//!   corrupted rows.
//! - Tables never cascade; cross-table rules live in the service layer.

use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod csv_table;
pub mod mappers;

pub use csv_table::{AuthorTable, BookTable, CsvTable, PublisherTable};
pub use mappers::{AuthorMapper, BookMapper, PublisherMapper};

pub type RepoResult<T> = Result<T, RepoError>;

/// Table-level error for persistence and decoding failures.
#[derive(Debug)]
pub enum RepoError {
    /// Disk read/write failure other than a missing file.
    Io(std::io::Error),
    /// A record has fewer fields than its kind requires.
    MissingField {
        table: &'static str,
        column: &'static str,
        found: usize,
    },
    /// A field could not be parsed (e.g. a non-numeric id).
    InvalidData(String),
    /// A book row points at an author/publisher id that is not stored.
    UnresolvedReference {
        table: &'static str,
        row_id: EntityId,
        target: &'static str,
        target_id: EntityId,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::MissingField {
                table,
                column,
                found,
            } => write!(
                f,
                "record in `{table}` is missing column `{column}` (found {found} fields)"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnresolvedReference {
                table,
                row_id,
                target,
                target_id,
            } => write!(
                f,
                "{table} row {row_id} references missing {target} row {target_id}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::MissingField { .. } => None,
            Self::InvalidData(_) => None,
            Self::UnresolvedReference { .. } => None,
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// CRUD contract for one table of one entity kind.
pub trait Table<T> {
    /// Appends `entity` without checking for an existing row with its id.
    fn save(&self, entity: &T) -> RepoResult<()>;
    /// Returns the first row with `id`.
    fn find(&self, id: EntityId) -> RepoResult<Option<T>>;
    /// Returns every row in storage order.
    fn find_all(&self) -> RepoResult<Vec<T>>;
    /// Replaces the row with `entity`'s id. Leaves the table untouched when
    /// no row matches.
    fn update(&self, entity: &T) -> RepoResult<()>;
    /// Removes every row with `entity`'s id and returns the first stored
    /// value. Returns `None` when no row matched or the removed row could
    /// not be decoded.
    fn delete(&self, entity: &T) -> RepoResult<Option<T>>;
}

/// Converts between one entity kind and its on-disk field list.
///
/// The first field of every record is the entity id.
pub trait RecordMapper {
    type Entity: crate::model::Entity;

    /// Table name used in log events and error messages.
    const TABLE: &'static str;

    fn to_record(&self, entity: &Self::Entity) -> Vec<String>;

    fn from_record(&self, record: &[String]) -> RepoResult<Self::Entity>;
}
