//! Library use-case service.
//!
//! # Responsibility
//! - Assign surrogate ids for new authors, publishers and books.
//! - Keep book references pointing at stored author/publisher rows.
//! - Cascade author/publisher deletes to the books that reference them.
//! - Provide lookup and search entry points for front ends.
//!
//! # Invariants
//! - The next id is `max(existing ids) + 1`, or `0` for an empty table,
//!   computed from a fresh `find_all` on every create.
//! - Referenced rows are inserted when missing but never overwritten.
//! - `delete_author`/`remove_publisher` leave no book referencing the removed
//!   id. Table-level deletes never cascade.
//! - Name-based book creation reuses the first exact-name match in table
//!   order; which duplicate wins is implementation-defined.
//!
//! # Known gaps
//! - Cascading deletes list books through `find_all`, so one orphaned book
//!   row anywhere fails the whole cascade before anything is written.

use crate::config::{CatalogConfig, ConfigError};
use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::publisher::Publisher;
use crate::model::{Entity, EntityId};
use crate::search::matcher::{SearchQuery, SearchResult, TextMatcher};
use crate::store::{
    AuthorMapper, AuthorTable, BookMapper, BookTable, PublisherMapper, PublisherTable,
    RepoError, RepoResult, Table,
};
use log::{info, warn};

/// Service over CSV tables configured by [`CatalogConfig`].
pub type CsvLibraryService = LibraryService<AuthorTable, PublisherTable, BookTable>;

/// Integrity layer over one author, one publisher and one book table.
pub struct LibraryService<A, P, B> {
    authors: A,
    publishers: P,
    books: B,
}

impl CsvLibraryService {
    /// Wires the three CSV tables from `config`.
    ///
    /// Creates the data directory when missing. Table files are created
    /// lazily on first write.
    pub fn open(config: &CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        std::fs::create_dir_all(&config.data_dir).map_err(|source| ConfigError::Io {
            path: config.data_dir.clone(),
            source,
        })?;

        let authors = AuthorTable::new(config.authors_path(), AuthorMapper);
        let publishers = PublisherTable::new(config.publishers_path(), PublisherMapper);
        let books = BookTable::new(
            config.books_path(),
            BookMapper::new(authors.clone(), publishers.clone()),
        );
        info!(
            "event=catalog_open module=service status=ok data_dir={}",
            config.data_dir.display()
        );
        Ok(Self::new(authors, publishers, books))
    }
}

impl<A, P, B> LibraryService<A, P, B>
where
    A: Table<Author>,
    P: Table<Publisher>,
    B: Table<Book>,
{
    pub fn new(authors: A, publishers: P, books: B) -> Self {
        Self {
            authors,
            publishers,
            books,
        }
    }

    /// Creates and stores an author with the next free id.
    pub fn create_author(&self, name: impl Into<String>) -> RepoResult<Author> {
        let author = Author::new(next_id(&self.authors.find_all()?, "authors")?, name);
        self.authors.save(&author)?;
        Ok(author)
    }

    /// Creates and stores a publisher with the next free id.
    pub fn create_publisher(
        &self,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> RepoResult<Publisher> {
        let id = next_id(&self.publishers.find_all()?, "publishers")?;
        let publisher = Publisher::new(id, name, address, phone);
        self.publishers.save(&publisher)?;
        Ok(publisher)
    }

    /// Creates a publisher with blank address and phone.
    pub fn create_publisher_named(&self, name: impl Into<String>) -> RepoResult<Publisher> {
        self.create_publisher(name, "", "")
    }

    /// Creates a book for the given author and publisher.
    ///
    /// An author or publisher whose id is not stored yet is saved as-is
    /// first. Stored rows with the same id are left untouched even when
    /// their fields differ.
    pub fn create_book(
        &self,
        title: impl Into<String>,
        isbn: impl Into<String>,
        author: Author,
        publisher: Publisher,
    ) -> RepoResult<Book> {
        if self.authors.find(author.id())?.is_none() {
            self.authors.save(&author)?;
        }
        if self.publishers.find(publisher.id())?.is_none() {
            self.publishers.save(&publisher)?;
        }
        self.insert_book(title.into(), isbn.into(), author, publisher)
    }

    /// Creates a book, looking up author and publisher by exact name.
    ///
    /// Missing names are created. With duplicate names, the first match in
    /// table order is used.
    pub fn create_book_named(
        &self,
        title: impl Into<String>,
        isbn: impl Into<String>,
        author_name: &str,
        publisher_name: &str,
    ) -> RepoResult<Book> {
        let author = match self.authors_named(author_name)?.into_iter().next() {
            Some(author) => author,
            None => self.create_author(author_name)?,
        };
        let publisher = match self.publishers_named(publisher_name)?.into_iter().next() {
            Some(publisher) => publisher,
            None => self.create_publisher_named(publisher_name)?,
        };
        self.insert_book(title.into(), isbn.into(), author, publisher)
    }

    fn insert_book(
        &self,
        title: String,
        isbn: String,
        author: Author,
        publisher: Publisher,
    ) -> RepoResult<Book> {
        let id = next_id(&self.books.find_all()?, "books")?;
        let book = Book::new(id, title, isbn, author, publisher);
        self.books.save(&book)?;
        Ok(book)
    }

    pub fn all_authors(&self) -> RepoResult<Vec<Author>> {
        self.authors.find_all()
    }

    pub fn author_by_id(&self, id: EntityId) -> RepoResult<Option<Author>> {
        self.authors.find(id)
    }

    /// Authors whose name equals `name` exactly.
    pub fn authors_named(&self, name: &str) -> RepoResult<Vec<Author>> {
        Ok(self
            .authors
            .find_all()?
            .into_iter()
            .filter(|author| author.name == name)
            .collect())
    }

    /// Authors whose name matches `query`. Authors have no secondary fields,
    /// so both scopes search the name only.
    pub fn authors_matching(&self, query: &SearchQuery) -> SearchResult<Vec<Author>> {
        let matcher = TextMatcher::compile(query)?;
        Ok(self
            .authors
            .find_all()?
            .into_iter()
            .filter(|author| matcher.is_match(&author.name))
            .collect())
    }

    pub fn all_publishers(&self) -> RepoResult<Vec<Publisher>> {
        self.publishers.find_all()
    }

    pub fn publisher_by_id(&self, id: EntityId) -> RepoResult<Option<Publisher>> {
        self.publishers.find(id)
    }

    /// Publishers whose name equals `name` exactly.
    pub fn publishers_named(&self, name: &str) -> RepoResult<Vec<Publisher>> {
        Ok(self
            .publishers
            .find_all()?
            .into_iter()
            .filter(|publisher| publisher.name == name)
            .collect())
    }

    /// Publishers matching `query` by name, or also by address and phone
    /// for a global query.
    pub fn publishers_matching(&self, query: &SearchQuery) -> SearchResult<Vec<Publisher>> {
        let matcher = TextMatcher::compile(query)?;
        let global = query.is_global();
        Ok(self
            .publishers
            .find_all()?
            .into_iter()
            .filter(|publisher| {
                matcher.is_match(&publisher.name)
                    || (global
                        && matcher.any([publisher.address.as_str(), publisher.phone.as_str()]))
            })
            .collect())
    }

    pub fn all_books(&self) -> RepoResult<Vec<Book>> {
        self.books.find_all()
    }

    pub fn book_by_id(&self, id: EntityId) -> RepoResult<Option<Book>> {
        self.books.find(id)
    }

    /// Books whose title equals `title` exactly.
    pub fn books_with_title(&self, title: &str) -> RepoResult<Vec<Book>> {
        Ok(self
            .books
            .find_all()?
            .into_iter()
            .filter(|book| book.title == title)
            .collect())
    }

    /// Books whose author id is `author`'s id.
    pub fn books_by_author(&self, author: &Author) -> RepoResult<Vec<Book>> {
        Ok(self
            .books
            .find_all()?
            .into_iter()
            .filter(|book| book.author.id() == author.id())
            .collect())
    }

    /// Books whose publisher id is `publisher`'s id.
    pub fn books_published_by(&self, publisher: &Publisher) -> RepoResult<Vec<Book>> {
        Ok(self
            .books
            .find_all()?
            .into_iter()
            .filter(|book| book.publisher.id() == publisher.id())
            .collect())
    }

    /// Books matching `query` by title or ISBN, or also by author and
    /// publisher name for a global query.
    pub fn books_matching(&self, query: &SearchQuery) -> SearchResult<Vec<Book>> {
        let matcher = TextMatcher::compile(query)?;
        let global = query.is_global();
        Ok(self
            .books
            .find_all()?
            .into_iter()
            .filter(|book| {
                matcher.any([book.title.as_str(), book.isbn.as_str()])
                    || (global
                        && matcher.any([book.author.name.as_str(), book.publisher.name.as_str()]))
            })
            .collect())
    }

    /// Rewrites the stored author row with `author`'s current fields.
    pub fn update_author(&self, author: &Author) -> RepoResult<()> {
        self.authors.update(author)
    }

    /// Rewrites the stored publisher row with `publisher`'s current fields.
    pub fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()> {
        self.publishers.update(publisher)
    }

    /// Rewrites the stored book row, first inserting its author/publisher
    /// when no stored row equals them.
    ///
    /// A stored row with the same id but different fields is kept as is; the
    /// book then points at the stored version.
    pub fn update_book(&self, book: &Book) -> RepoResult<()> {
        ensure_referenced(&self.authors, &book.author, "authors")?;
        ensure_referenced(&self.publishers, &book.publisher, "publishers")?;
        self.books.update(book)
    }

    /// Deletes `author` and every book whose author id matches.
    ///
    /// Returns the number of books removed.
    pub fn delete_author(&self, author: &Author) -> RepoResult<usize> {
        let written = self.books_by_author(author)?;
        for book in &written {
            self.books.delete(book)?;
        }
        self.authors.delete(author)?;
        info!(
            "event=author_delete module=service id={} cascaded_books={}",
            author.id(),
            written.len()
        );
        Ok(written.len())
    }

    /// Deletes `publisher` and every book whose publisher id matches.
    ///
    /// Returns the number of books removed.
    pub fn remove_publisher(&self, publisher: &Publisher) -> RepoResult<usize> {
        let published = self.books_published_by(publisher)?;
        for book in &published {
            self.books.delete(book)?;
        }
        self.publishers.delete(publisher)?;
        info!(
            "event=publisher_delete module=service id={} cascaded_books={}",
            publisher.id(),
            published.len()
        );
        Ok(published.len())
    }

    /// Deletes one book. Authors and publishers are not touched.
    pub fn remove_book(&self, book: &Book) -> RepoResult<Option<Book>> {
        self.books.delete(book)
    }
}

/// `max(ids) + 1`, or `0` when `rows` is empty.
///
/// Fails when the largest stored id is already `EntityId::MAX`.
fn next_id<T: Entity>(rows: &[T], table: &str) -> RepoResult<EntityId> {
    match rows.iter().map(Entity::id).max() {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            warn!("event=id_exhausted module=service table={table} max_id={max}");
            RepoError::InvalidData(format!("no id left after {max} in {table}"))
        }),
    }
}

fn ensure_referenced<T, R>(table: &R, value: &T, table_name: &str) -> RepoResult<()>
where
    T: Entity + PartialEq,
    R: Table<T>,
{
    let rows = table.find_all()?;
    if rows.contains(value) {
        return Ok(());
    }
    if rows.iter().any(|row| row.id() == value.id()) {
        warn!(
            "event=stale_reference module=service table={} id={} status=kept_stored",
            table_name,
            value.id()
        );
        return Ok(());
    }
    table.save(value)
}
