//! Command dispatch and output formatting.

use crate::args::{AuthorAction, BookAction, Cli, Command, PublisherAction};
use crate::errors::{CliError, CliResult};
use catalog_core::{
    init_from_config, Author, Book, CatalogConfig, CsvLibraryService, EntityId, Publisher,
    SearchQuery,
};
use log::info;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};

const NOT_FOUND: &str = "no record";

/// Runs one parsed command against the configured catalog.
pub fn run(cli: Cli) -> CliResult<()> {
    let config = resolve_config(&cli)?;
    init_from_config(&config.logging)?;
    let service = CsvLibraryService::open(&config)?;
    let out = Output { json: cli.json };

    match cli.command {
        Command::Authors { action } => run_authors(&service, &out, action),
        Command::Publishers { action } => run_publishers(&service, &out, action),
        Command::Books { action } => run_books(&service, &out, action),
    }
}

/// Config file values, then command-line overrides.
fn resolve_config(cli: &Cli) -> CliResult<CatalogConfig> {
    let mut config = match &cli.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    config.logging.dir = config.logging.dir.as_deref().map(absolute);
    config.validate()?;
    Ok(config)
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

fn run_authors(
    service: &CsvLibraryService,
    out: &Output,
    action: AuthorAction,
) -> CliResult<()> {
    match action {
        AuthorAction::List => out.list(&service.all_authors()?),
        AuthorAction::Get { id } => out.one(service.author_by_id(id)?.as_ref()),
        AuthorAction::Search { text, regex } => {
            let mut query = SearchQuery::new(text);
            if regex {
                query = query.regex();
            }
            out.list(&service.authors_matching(&query)?)
        }
        AuthorAction::Add { name } => out.one(Some(&service.create_author(name)?)),
        AuthorAction::Rename { id, name } => match service.author_by_id(id)? {
            Some(mut author) => {
                author.name = name;
                service.update_author(&author)?;
                out.one(Some(&author))
            }
            None => out.one(None::<&Author>),
        },
        AuthorAction::Delete { id } => match service.author_by_id(id)? {
            Some(author) => {
                let books = service.delete_author(&author)?;
                info!("event=cli_delete module=cli kind=author id={id} books={books}");
                out.message(format!("deleted {author} and {books} book(s)"))
            }
            None => out.message(NOT_FOUND),
        },
    }
}

fn run_publishers(
    service: &CsvLibraryService,
    out: &Output,
    action: PublisherAction,
) -> CliResult<()> {
    match action {
        PublisherAction::List => out.list(&service.all_publishers()?),
        PublisherAction::Get { id } => out.one(service.publisher_by_id(id)?.as_ref()),
        PublisherAction::Search(search) => {
            out.list(&service.publishers_matching(&search.query())?)
        }
        PublisherAction::Add {
            name,
            address,
            phone,
        } => out.one(Some(&service.create_publisher(name, address, phone)?)),
        PublisherAction::Update {
            id,
            name,
            address,
            phone,
        } => match service.publisher_by_id(id)? {
            Some(mut publisher) => {
                if let Some(name) = name {
                    publisher.name = name;
                }
                if let Some(address) = address {
                    publisher.address = address;
                }
                if let Some(phone) = phone {
                    publisher.phone = phone;
                }
                service.update_publisher(&publisher)?;
                out.one(Some(&publisher))
            }
            None => out.one(None::<&Publisher>),
        },
        PublisherAction::Delete { id } => match service.publisher_by_id(id)? {
            Some(publisher) => {
                let books = service.remove_publisher(&publisher)?;
                info!("event=cli_delete module=cli kind=publisher id={id} books={books}");
                out.message(format!("deleted {publisher} and {books} book(s)"))
            }
            None => out.message(NOT_FOUND),
        },
    }
}

fn run_books(service: &CsvLibraryService, out: &Output, action: BookAction) -> CliResult<()> {
    match action {
        BookAction::List => out.list(&service.all_books()?),
        BookAction::Get { id } => out.one(service.book_by_id(id)?.as_ref()),
        BookAction::Search(search) => out.list(&service.books_matching(&search.query())?),
        BookAction::Add {
            title,
            isbn,
            author,
            publisher,
        } => out.one(Some(
            &service.create_book_named(title, isbn, &author, &publisher)?,
        )),
        BookAction::Update {
            id,
            title,
            isbn,
            author_id,
            publisher_id,
        } => {
            let Some(mut book) = service.book_by_id(id)? else {
                return out.one(None::<&Book>);
            };
            if let Some(title) = title {
                book.title = title;
            }
            if let Some(isbn) = isbn {
                book.isbn = isbn;
            }
            if let Some(author_id) = author_id {
                book.author = service
                    .author_by_id(author_id)?
                    .ok_or(CliError::MissingReference {
                        kind: "author",
                        id: author_id,
                    })?;
            }
            if let Some(publisher_id) = publisher_id {
                book.publisher = service.publisher_by_id(publisher_id)?.ok_or(
                    CliError::MissingReference {
                        kind: "publisher",
                        id: publisher_id,
                    },
                )?;
            }
            service.update_book(&book)?;
            out.one(Some(&book))
        }
        BookAction::Delete { id } => delete_book(service, out, id),
    }
}

fn delete_book(service: &CsvLibraryService, out: &Output, id: EntityId) -> CliResult<()> {
    let Some(book) = service.book_by_id(id)? else {
        return out.message(NOT_FOUND);
    };
    match service.remove_book(&book)? {
        Some(removed) => out.message(format!("deleted {removed}")),
        None => out.message(NOT_FOUND),
    }
}

/// Plain text or JSON printing to stdout.
struct Output {
    json: bool,
}

impl Output {
    fn list<T: Serialize + Display>(&self, rows: &[T]) -> CliResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(rows)?);
            return Ok(());
        }
        if rows.is_empty() {
            println!("{NOT_FOUND}");
        }
        for row in rows {
            println!("{row}");
        }
        Ok(())
    }

    fn one<T: Serialize + Display>(&self, row: Option<&T>) -> CliResult<()> {
        match (row, self.json) {
            (Some(row), true) => println!("{}", serde_json::to_string_pretty(row)?),
            (Some(row), false) => println!("{row}"),
            (None, true) => println!("null"),
            (None, false) => println!("{NOT_FOUND}"),
        }
        Ok(())
    }

    fn message(&self, text: impl Display) -> CliResult<()> {
        if self.json {
            println!("{}", serde_json::json!({ "message": text.to_string() }));
        } else {
            println!("{text}");
        }
        Ok(())
    }
}
