use catalog_core::{
    Author, AuthorMapper, AuthorTable, Publisher, PublisherMapper, PublisherTable, RepoError,
    Table,
};
use std::fs;
use tempfile::TempDir;

fn author_table(dir: &TempDir) -> AuthorTable {
    AuthorTable::new(dir.path().join("authors.csv"), AuthorMapper)
}

fn publisher_table(dir: &TempDir) -> PublisherTable {
    PublisherTable::new(dir.path().join("publishers.csv"), PublisherMapper)
}

#[test]
fn missing_file_reads_as_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);

    assert!(table.find_all().unwrap().is_empty());
    assert!(table.find(0).unwrap().is_none());
    assert!(!table.path().exists());
}

#[test]
fn save_creates_file_and_appends_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);

    table.save(&Author::new(0, "Jane Austen")).unwrap();
    table.save(&Author::new(1, "Verne, Jules")).unwrap();

    assert_eq!(
        fs::read_to_string(table.path()).unwrap(),
        "0,Jane Austen\n1,\"Verne, Jules\"\n"
    );
    assert_eq!(
        table.find_all().unwrap(),
        vec![Author::new(0, "Jane Austen"), Author::new(1, "Verne, Jules")]
    );
}

#[test]
fn find_returns_matching_row_or_none() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    table.save(&Author::new(3, "Wrede")).unwrap();
    table.save(&Author::new(10, "McKinley")).unwrap();

    assert_eq!(table.find(10).unwrap(), Some(Author::new(10, "McKinley")));
    assert_eq!(table.find(1).unwrap(), None);
}

#[test]
fn duplicate_ids_are_both_kept_and_find_returns_first() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    table.save(&Author::new(4, "First")).unwrap();
    table.save(&Author::new(4, "Second")).unwrap();

    assert_eq!(table.find_all().unwrap().len(), 2);
    assert_eq!(table.find(4).unwrap(), Some(Author::new(4, "First")));
}

#[test]
fn update_replaces_the_row_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    table.save(&Author::new(1, "Wrede")).unwrap();
    table.save(&Author::new(2, "Bujold")).unwrap();
    table.save(&Author::new(3, "McKinley")).unwrap();

    table.update(&Author::new(2, "Bujold Rev")).unwrap();

    assert_eq!(table.find(2).unwrap(), Some(Author::new(2, "Bujold Rev")));
    let contents = fs::read_to_string(table.path()).unwrap();
    assert_eq!(contents, "1,Wrede\n2,Bujold Rev\n3,McKinley\n");
    assert_eq!(contents.lines().filter(|line| line.starts_with("2,")).count(), 1);
}

#[test]
fn update_of_absent_id_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    fs::write(table.path(), "0,\"Austen, Jane\"\n").unwrap();

    table.update(&Author::new(9, "Nobody")).unwrap();

    assert_eq!(
        fs::read_to_string(table.path()).unwrap(),
        "0,\"Austen, Jane\"\n"
    );
}

#[test]
fn update_and_delete_do_not_create_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);

    table.update(&Author::new(0, "Ghost")).unwrap();
    assert_eq!(table.delete(&Author::new(0, "Ghost")).unwrap(), None);
    assert!(!table.path().exists());
}

#[test]
fn delete_returns_stored_value_and_keeps_others_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let table = publisher_table(&dir);
    table
        .save(&Publisher::new(0, "Baen", "Riverdale, NY", "555-0100"))
        .unwrap();
    table.save(&Publisher::named(1, "Avon")).unwrap();
    table.save(&Publisher::named(2, "Tor")).unwrap();

    let removed = table.delete(&Publisher::named(1, "stale name")).unwrap();

    assert_eq!(removed, Some(Publisher::named(1, "Avon")));
    assert_eq!(
        table.find_all().unwrap(),
        vec![
            Publisher::new(0, "Baen", "Riverdale, NY", "555-0100"),
            Publisher::named(2, "Tor"),
        ]
    );
}

#[test]
fn delete_of_absent_id_returns_none() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    table.save(&Author::new(0, "Jane Austen")).unwrap();

    assert_eq!(table.delete(&Author::new(5, "Nobody")).unwrap(), None);
    assert_eq!(table.find_all().unwrap().len(), 1);
}

#[test]
fn rewrite_preserves_unrelated_rows_with_extra_fields() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    fs::write(table.path(), "0,Austen,legacy column\n1,Verne\n").unwrap();

    table.update(&Author::new(1, "Jules Verne")).unwrap();

    assert_eq!(
        fs::read_to_string(table.path()).unwrap(),
        "0,Austen,legacy column\n1,Jules Verne\n"
    );
}

#[test]
fn blank_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    fs::write(table.path(), "0,Austen\n\n1,Verne\n").unwrap();

    assert_eq!(table.find_all().unwrap().len(), 2);
    assert_eq!(table.find(1).unwrap(), Some(Author::new(1, "Verne")));
}

#[test]
fn short_record_is_a_missing_field_error() {
    let dir = tempfile::tempdir().unwrap();
    let table = publisher_table(&dir);
    fs::write(table.path(), "0,Baen,Riverdale\n").unwrap();

    let err = table.find_all().unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingField {
            table: "publishers",
            column: "phone",
            found: 3
        }
    ));
}

#[test]
fn non_numeric_id_is_invalid_data_only_when_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let table = author_table(&dir);
    fs::write(table.path(), "0,Austen\nabc,Broken\n").unwrap();

    assert_eq!(table.find(0).unwrap(), Some(Author::new(0, "Austen")));
    assert!(matches!(
        table.find_all().unwrap_err(),
        RepoError::InvalidData(_)
    ));
}

#[test]
fn unreadable_path_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let table = AuthorTable::new(dir.path(), AuthorMapper);

    assert!(matches!(table.find_all().unwrap_err(), RepoError::Io(_)));
    assert!(matches!(
        table.save(&Author::new(0, "x")).unwrap_err(),
        RepoError::Io(_)
    ));
}
