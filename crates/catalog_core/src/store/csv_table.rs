//! Generic table over one delimited-text file.
//!
//! # Responsibility
//! - Implement [`Table`] for any [`RecordMapper`] on top of the record codec.
//! - Own all file I/O for the catalog.
//!
//! # Invariants
//! - `save` only appends; `update`/`delete` read the whole file and then
//!   overwrite it completely.
//! - Rows are matched by comparing the raw id field with the canonical
//!   decimal form of the target id, so unrelated rows are written back
//!   exactly as decoded.
//! - Blank lines are skipped on read and dropped on rewrite.
//!
//! # Known gaps
//! - `save` does not check for an existing row with the same id; `find` then
//!   returns whichever duplicate comes first.
//! - A crash between truncation and rewrite loses the table contents.
//! - `delete` still removes a row it cannot decode (e.g. a book whose author
//!   is gone) but then returns `None` instead of the stored value.

use super::mappers::{AuthorMapper, BookMapper, PublisherMapper};
use super::{RecordMapper, RepoResult, Table};
use crate::codec::{encode_record, RecordReader};
use crate::model::{Entity, EntityId};
use log::{debug, error, info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type AuthorTable = CsvTable<AuthorMapper>;
pub type PublisherTable = CsvTable<PublisherMapper>;
pub type BookTable = CsvTable<BookMapper<AuthorTable, PublisherTable>>;

/// File-backed table for one entity kind.
///
/// Holds only the file path and mapper; every call goes back to disk.
#[derive(Debug, Clone)]
pub struct CsvTable<M> {
    path: PathBuf,
    mapper: M,
}

impl<M: RecordMapper> CsvTable<M> {
    pub fn new(path: impl Into<PathBuf>, mapper: M) -> Self {
        Self {
            path: path.into(),
            mapper,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the table file. Returns `None` when it does not exist yet.
    fn read_contents(&self) -> RepoResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=table_read module=store table={} status=missing",
                    M::TABLE
                );
                Ok(None)
            }
            Err(err) => {
                error!(
                    "event=table_read module=store table={} status=error error={}",
                    M::TABLE,
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Decodes every non-blank record in file order.
    fn read_records(&self) -> RepoResult<Option<Vec<Vec<String>>>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(None);
        };
        let records = RecordReader::new(&contents)
            .filter(|record| !is_blank(record))
            .collect();
        Ok(Some(records))
    }

    fn rewrite(&self, records: &[Vec<String>]) -> RepoResult<()> {
        let contents: String = records.iter().map(|record| encode_record(record)).collect();
        if let Err(err) = fs::write(&self.path, contents) {
            error!(
                "event=table_rewrite module=store table={} status=error error={}",
                M::TABLE,
                err
            );
            return Err(err.into());
        }
        info!(
            "event=table_rewrite module=store table={} status=ok rows={}",
            M::TABLE,
            records.len()
        );
        Ok(())
    }
}

impl<M: RecordMapper> Table<M::Entity> for CsvTable<M> {
    fn save(&self, entity: &M::Entity) -> RepoResult<()> {
        let line = encode_record(self.mapper.to_record(entity));
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        info!(
            "event=record_append module=store table={} id={} status=ok",
            M::TABLE,
            entity.id()
        );
        Ok(())
    }

    fn find(&self, id: EntityId) -> RepoResult<Option<M::Entity>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(None);
        };
        let key = id.to_string();
        for record in RecordReader::new(&contents) {
            if !is_blank(&record) && matches_key(&record, &key) {
                return self.mapper.from_record(&record).map(Some);
            }
        }
        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<M::Entity>> {
        let Some(records) = self.read_records()? else {
            return Ok(Vec::new());
        };
        records
            .iter()
            .map(|record| self.mapper.from_record(record))
            .collect()
    }

    fn update(&self, entity: &M::Entity) -> RepoResult<()> {
        let Some(mut records) = self.read_records()? else {
            debug!(
                "event=record_update module=store table={} id={} status=noop",
                M::TABLE,
                entity.id()
            );
            return Ok(());
        };

        let key = entity.id().to_string();
        let mut replaced = false;
        for record in records.iter_mut() {
            if matches_key(record, &key) {
                *record = self.mapper.to_record(entity);
                replaced = true;
            }
        }

        if !replaced {
            debug!(
                "event=record_update module=store table={} id={} status=noop",
                M::TABLE,
                entity.id()
            );
            return Ok(());
        }
        self.rewrite(&records)
    }

    fn delete(&self, entity: &M::Entity) -> RepoResult<Option<M::Entity>> {
        let Some(records) = self.read_records()? else {
            return Ok(None);
        };

        let key = entity.id().to_string();
        let (removed, kept): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| matches_key(record, &key));

        let Some(first_removed) = removed.first() else {
            debug!(
                "event=record_delete module=store table={} id={} status=noop",
                M::TABLE,
                entity.id()
            );
            return Ok(None);
        };
        self.rewrite(&kept)?;
        info!(
            "event=record_delete module=store table={} id={} status=ok removed={}",
            M::TABLE,
            entity.id(),
            removed.len()
        );

        match self.mapper.from_record(first_removed) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!(
                    "event=record_delete module=store table={} id={} status=undecodable error={}",
                    M::TABLE,
                    entity.id(),
                    err
                );
                Ok(None)
            }
        }
    }
}

fn matches_key(record: &[String], key: &str) -> bool {
    record.first().is_some_and(|id| id == key)
}

fn is_blank(record: &[String]) -> bool {
    let blank = record.len() == 1 && record[0].is_empty();
    if blank {
        warn!("event=record_skipped module=store reason=blank_line");
    }
    blank
}
