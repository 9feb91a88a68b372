//! Book record.
//!
//! # Invariants
//! - `author` and `publisher` are owned copies. They are rehydrated from their
//!   own tables on every read, so two books never share mutable state.
//! - ISBN validity is not checked.

use super::author::Author;
use super::publisher::Publisher;
use super::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A catalogued book with its author and publisher.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Book {
    id: EntityId,
    pub title: String,
    pub isbn: String,
    pub author: Author,
    pub publisher: Publisher,
}

impl Book {
    pub fn new(
        id: EntityId,
        title: impl Into<String>,
        isbn: impl Into<String>,
        author: Author,
        publisher: Publisher,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            isbn: isbn.into(),
            author,
            publisher,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Book {
    fn id(&self) -> EntityId {
        Book::id(self)
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), by {}, published by {}",
            self.title, self.id, self.author.name, self.publisher.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Book;
    use crate::model::author::Author;
    use crate::model::publisher::Publisher;

    #[test]
    fn display_names_author_and_publisher() {
        let book = Book::new(
            7,
            "Persuasion",
            "9781908533081",
            Author::new(0, "Jane Austen"),
            Publisher::named(2, "TransAtlantic Press"),
        );
        assert_eq!(
            book.to_string(),
            "Persuasion (7), by Jane Austen, published by TransAtlantic Press"
        );
    }
}
