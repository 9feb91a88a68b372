//! Command-line argument definitions.
//!
//! Global flags override values from the JSON config file.

use catalog_core::EntityId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Flat-file library catalog.
#[derive(Parser, Debug)]
#[command(name = "catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the table files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rotating log files; logging is off without one
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print records as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage authors
    Authors {
        #[command(subcommand)]
        action: AuthorAction,
    },

    /// Manage publishers
    Publishers {
        #[command(subcommand)]
        action: PublisherAction,
    },

    /// Manage books
    Books {
        #[command(subcommand)]
        action: BookAction,
    },
}

/// Search text plus matching flags.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Case-insensitive text to look for
    pub text: String,

    /// Also match secondary fields
    #[arg(long)]
    pub global: bool,

    /// Treat the text as a regular expression
    #[arg(long)]
    pub regex: bool,
}

#[derive(Subcommand, Debug)]
pub enum AuthorAction {
    /// List every author
    List,
    /// Show one author
    Get { id: EntityId },
    /// Search authors by name
    Search {
        text: String,
        /// Treat the text as a regular expression
        #[arg(long)]
        regex: bool,
    },
    /// Create an author with the next free id
    Add { name: String },
    /// Change an author's name
    Rename { id: EntityId, name: String },
    /// Delete an author and all of their books
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum PublisherAction {
    /// List every publisher
    List,
    /// Show one publisher
    Get { id: EntityId },
    /// Search publishers by name, or also address and phone with --global
    Search(SearchArgs),
    /// Create a publisher with the next free id
    Add {
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Change a publisher's name, address or phone
    Update {
        id: EntityId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a publisher and all of its books
    Delete { id: EntityId },
}

#[derive(Subcommand, Debug)]
pub enum BookAction {
    /// List every book
    List,
    /// Show one book
    Get { id: EntityId },
    /// Search books by title and ISBN, or also author and publisher with --global
    Search(SearchArgs),
    /// Create a book, reusing or creating the named author and publisher
    Add {
        title: String,
        isbn: String,
        author: String,
        publisher: String,
    },
    /// Change a book's fields or point it at another stored author/publisher
    Update {
        id: EntityId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        author_id: Option<EntityId>,
        #[arg(long)]
        publisher_id: Option<EntityId>,
    },
    /// Delete one book
    Delete { id: EntityId },
}

impl SearchArgs {
    pub fn query(&self) -> catalog_core::SearchQuery {
        let mut query = catalog_core::SearchQuery::new(self.text.clone());
        if self.global {
            query = query.global();
        }
        if self.regex {
            query = query.regex();
        }
        query
    }
}
