use catalog_core::{CatalogConfig, CsvLibraryService, MatchScope, SearchError, SearchQuery};
use tempfile::TempDir;

fn seeded() -> (TempDir, CsvLibraryService) {
    let dir = tempfile::tempdir().unwrap();
    let service = CsvLibraryService::open(&CatalogConfig::in_dir(dir.path())).unwrap();
    service
        .create_book_named("A Civil Campaign", "0671578855", "Lois McMaster Bujold", "Baen Books")
        .unwrap();
    service
        .create_book_named("Persuasion", "9781908533081", "Jane Austen", "TransAtlantic Press")
        .unwrap();
    service
        .create_publisher("Ace", "New York, NY", "555-0142")
        .unwrap();
    (dir, service)
}

fn titles(books: &[catalog_core::Book]) -> Vec<&str> {
    books.iter().map(|book| book.title.as_str()).collect()
}

#[test]
fn primary_book_search_looks_at_title_and_isbn() {
    let (_dir, service) = seeded();

    let by_title = service.books_matching(&SearchQuery::new("campaign")).unwrap();
    assert_eq!(titles(&by_title), vec!["A Civil Campaign"]);

    let by_isbn = service.books_matching(&SearchQuery::new("97819")).unwrap();
    assert_eq!(titles(&by_isbn), vec!["Persuasion"]);

    let by_author = service.books_matching(&SearchQuery::new("austen")).unwrap();
    assert!(by_author.is_empty());
}

#[test]
fn global_book_search_includes_author_and_publisher_names() {
    let (_dir, service) = seeded();

    let by_author = service
        .books_matching(&SearchQuery::new("AUSTEN").global())
        .unwrap();
    assert_eq!(titles(&by_author), vec!["Persuasion"]);

    let by_publisher = service
        .books_matching(&SearchQuery::new("baen").with_scope(MatchScope::Global))
        .unwrap();
    assert_eq!(titles(&by_publisher), vec!["A Civil Campaign"]);
}

#[test]
fn publisher_scope_controls_address_and_phone_matching() {
    let (_dir, service) = seeded();

    assert!(service
        .publishers_matching(&SearchQuery::new("new york"))
        .unwrap()
        .is_empty());

    let global = service
        .publishers_matching(&SearchQuery::new("0142").global())
        .unwrap();
    assert_eq!(global.len(), 1);
    assert_eq!(global[0].name, "Ace");
}

#[test]
fn literal_search_treats_regex_syntax_as_text() {
    let (_dir, service) = seeded();
    service.create_author("Smith (Jr.)").unwrap();

    let found = service.authors_matching(&SearchQuery::new("(jr.)")).unwrap();
    assert_eq!(found.len(), 1);
    assert!(service
        .authors_matching(&SearchQuery::new("a.b"))
        .unwrap()
        .is_empty());
}

#[test]
fn raw_regex_search_matches_patterns() {
    let (_dir, service) = seeded();

    let found = service
        .authors_matching(&SearchQuery::new("^jane|bujold$").regex())
        .unwrap();
    assert_eq!(found.len(), 2);
}

#[test]
fn invalid_raw_regex_is_reported() {
    let (_dir, service) = seeded();

    let err = service
        .books_matching(&SearchQuery::new("(unclosed").regex())
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidQuery { ref query, .. } if query == "(unclosed"));
}

#[test]
fn empty_text_matches_everything() {
    let (_dir, service) = seeded();

    assert_eq!(service.books_matching(&SearchQuery::new("")).unwrap().len(), 2);
    assert_eq!(
        service.publishers_matching(&SearchQuery::new("")).unwrap().len(),
        3
    );
}
