//! Record layouts for the three catalog tables.
//!
//! | table | layout |
//! |---|---|
//! | authors | `id,name` |
//! | publishers | `id,name,address,phone` |
//! | books | `id,authorId,publisherId,title,isbn` |
//!
//! Fields past the layout are ignored on read.

use super::{RecordMapper, RepoError, RepoResult, Table};
use crate::model::author::Author;
use crate::model::book::Book;
use crate::model::publisher::Publisher;
use crate::model::EntityId;

const AUTHOR_COLUMNS: [&str; 2] = ["id", "name"];
const PUBLISHER_COLUMNS: [&str; 4] = ["id", "name", "address", "phone"];
const BOOK_COLUMNS: [&str; 5] = ["id", "author_id", "publisher_id", "title", "isbn"];

#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorMapper;

impl RecordMapper for AuthorMapper {
    type Entity = Author;
    const TABLE: &'static str = "authors";

    fn to_record(&self, entity: &Author) -> Vec<String> {
        vec![entity.id().to_string(), entity.name.clone()]
    }

    fn from_record(&self, record: &[String]) -> RepoResult<Author> {
        let id = parse_id(Self::TABLE, "id", field(record, Self::TABLE, &AUTHOR_COLUMNS, 0)?)?;
        let name = field(record, Self::TABLE, &AUTHOR_COLUMNS, 1)?;
        Ok(Author::new(id, name))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PublisherMapper;

impl RecordMapper for PublisherMapper {
    type Entity = Publisher;
    const TABLE: &'static str = "publishers";

    fn to_record(&self, entity: &Publisher) -> Vec<String> {
        vec![
            entity.id().to_string(),
            entity.name.clone(),
            entity.address.clone(),
            entity.phone.clone(),
        ]
    }

    fn from_record(&self, record: &[String]) -> RepoResult<Publisher> {
        let column = |index| field(record, Self::TABLE, &PUBLISHER_COLUMNS, index);
        let id = parse_id(Self::TABLE, "id", column(0)?)?;
        Ok(Publisher::new(id, column(1)?, column(2)?, column(3)?))
    }
}

/// Book layout plus the tables used to rehydrate author/publisher ids.
#[derive(Debug, Clone)]
pub struct BookMapper<A, P> {
    authors: A,
    publishers: P,
}

impl<A, P> BookMapper<A, P>
where
    A: Table<Author>,
    P: Table<Publisher>,
{
    pub fn new(authors: A, publishers: P) -> Self {
        Self {
            authors,
            publishers,
        }
    }
}

impl<A, P> RecordMapper for BookMapper<A, P>
where
    A: Table<Author>,
    P: Table<Publisher>,
{
    type Entity = Book;
    const TABLE: &'static str = "books";

    fn to_record(&self, entity: &Book) -> Vec<String> {
        vec![
            entity.id().to_string(),
            entity.author.id().to_string(),
            entity.publisher.id().to_string(),
            entity.title.clone(),
            entity.isbn.clone(),
        ]
    }

    fn from_record(&self, record: &[String]) -> RepoResult<Book> {
        let column = |index| field(record, Self::TABLE, &BOOK_COLUMNS, index);
        let id = parse_id(Self::TABLE, "id", column(0)?)?;
        let author_id = parse_id(Self::TABLE, "author_id", column(1)?)?;
        let publisher_id = parse_id(Self::TABLE, "publisher_id", column(2)?)?;
        let title = column(3)?;
        let isbn = column(4)?;

        let author = self
            .authors
            .find(author_id)?
            .ok_or(RepoError::UnresolvedReference {
                table: Self::TABLE,
                row_id: id,
                target: "author",
                target_id: author_id,
            })?;
        let publisher =
            self.publishers
                .find(publisher_id)?
                .ok_or(RepoError::UnresolvedReference {
                    table: Self::TABLE,
                    row_id: id,
                    target: "publisher",
                    target_id: publisher_id,
                })?;

        Ok(Book::new(id, title, isbn, author, publisher))
    }
}

fn field<'r>(
    record: &'r [String],
    table: &'static str,
    columns: &[&'static str],
    index: usize,
) -> RepoResult<&'r str> {
    record
        .get(index)
        .map(String::as_str)
        .ok_or(RepoError::MissingField {
            table,
            column: columns[index],
            found: record.len(),
        })
}

fn parse_id(table: &str, column: &str, value: &str) -> RepoResult<EntityId> {
    value.parse::<EntityId>().map_err(|_| {
        RepoError::InvalidData(format!("invalid id `{value}` in {table}.{column}"))
    })
}

#[cfg(test)]
mod tests {
    use super::{AuthorMapper, PublisherMapper};
    use crate::model::author::Author;
    use crate::model::publisher::Publisher;
    use crate::store::{RecordMapper, RepoError};

    fn record(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn author_layout_is_id_then_name() {
        let author = Author::new(2, "Bujold");
        assert_eq!(AuthorMapper.to_record(&author), record(&["2", "Bujold"]));
        assert_eq!(AuthorMapper.from_record(&record(&["2", "Bujold"])).unwrap(), author);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let author = AuthorMapper
            .from_record(&record(&["2", "Bujold", "leftover"]))
            .unwrap();
        assert_eq!(author, Author::new(2, "Bujold"));
    }

    #[test]
    fn short_record_reports_missing_column() {
        let err = PublisherMapper
            .from_record(&record(&["1", "Baen"]))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::MissingField {
                table: "publishers",
                column: "address",
                found: 2
            }
        ));
    }

    #[test]
    fn non_numeric_id_is_invalid_data() {
        let err = AuthorMapper
            .from_record(&record(&["-1", "Nobody"]))
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(message) if message.contains("authors.id")));
    }

    #[test]
    fn publisher_layout_round_trips() {
        let publisher = Publisher::new(5, "Avon", "New York, NY", "555-0100");
        let fields = PublisherMapper.to_record(&publisher);
        assert_eq!(PublisherMapper.from_record(&fields).unwrap(), publisher);
    }
}
