use crate::app::{AppState, NoticeKind};
use crate::config::{Config, StorageConfig, Theme};
use crate::library::{
    BOOKS_KEY, Book, Catalog, Genre, LibraryStats, ReadingStatus, SaveOutcome, seed_books,
};
use crate::store::Store;
use std::path::PathBuf;

fn test_store() -> Store {
    Store::open_memory().unwrap()
}

fn test_state() -> AppState {
    AppState::with_store(test_store())
}

fn test_config(dir: &tempfile::TempDir) -> Config {
    Config {
        storage: StorageConfig {
            path: dir.path().join("store.db"),
        },
    }
}

fn sample_book(title: &str, author: &str) -> Book {
    Book::new(title, author, Genre::Fiction)
}

#[test]
fn store_read_missing_returns_default() {
    let store = test_store();
    assert_eq!(store.read("missing", 7u32), 7);
    assert!(!store.contains("missing"));
}

#[test]
fn store_write_then_read_round_trip() {
    let store = test_store();

    store.write("number", &42u32);

    assert!(store.contains("number"));
    assert_eq!(store.read("number", 0u32), 42);
    assert_eq!(store.raw("number").as_deref(), Some("42"));
}

#[test]
fn store_corrupt_value_returns_default() {
    let store = test_store();

    store.write("flag", &"not a bool");

    assert!(!store.read("flag", false));
}

#[test]
fn store_reopen_reads_persisted_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");

    {
        let store = Store::open(&path);
        assert!(store.is_persistent());
        store.write("number", &5u32);
    }

    let store = Store::open(&path);
    assert_eq!(store.read("number", 0u32), 5);
}

#[test]
fn store_degrades_to_memory_on_bad_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    // Parent is a file, so the database cannot be created there.
    let store = Store::open(&blocker.join("store.db"));

    assert!(!store.is_persistent());
    store.write("key", &1u32);
    assert_eq!(store.read("key", 0u32), 1);
}

#[test]
fn catalog_seeds_when_store_empty() {
    let catalog = Catalog::load(test_store());

    assert_eq!(catalog.len(), 5);
    let books = catalog.all();
    assert_eq!(books[0].title, "Cem Anos de Solidão");
    assert_eq!(books[1].title, "Duna");
    assert_eq!(books[4].title, "Sapiens: Uma Breve História da Humanidade");
}

#[test]
fn catalog_save_new_assigns_id_and_appends() {
    let catalog = Catalog::load(test_store());
    let input = sample_book("Neuromancer", "William Gibson");

    let (saved, outcome) = catalog.save(input.clone()).unwrap();

    assert_eq!(outcome, SaveOutcome::Added);
    assert!(!saved.id.is_empty());
    assert_eq!(catalog.len(), 6);

    let mut expected = input;
    expected.id = saved.id.clone();
    assert_eq!(saved, expected);
    assert_eq!(catalog.all().last().unwrap().id, saved.id);
}

#[test]
fn catalog_save_existing_replaces_in_place() {
    let catalog = Catalog::load(test_store());
    let mut book = catalog.get("2").unwrap();
    book.current_page = Some(300);

    let (saved, outcome) = catalog.save(book).unwrap();

    assert_eq!(outcome, SaveOutcome::Updated);
    assert_eq!(saved.id, "2");
    assert_eq!(catalog.len(), 5);

    let books = catalog.all();
    assert_eq!(books[1].id, "2");
    assert_eq!(books[1].current_page, Some(300));
}

#[test]
fn catalog_save_unknown_id_appends_with_fresh_id() {
    let catalog = Catalog::load(test_store());
    let mut book = sample_book("Ghost Entry", "Nobody");
    book.id = "does-not-exist".to_string();

    let (saved, outcome) = catalog.save(book).unwrap();

    assert_eq!(outcome, SaveOutcome::Added);
    assert_ne!(saved.id, "does-not-exist");
    assert_eq!(catalog.len(), 6);
}

#[test]
fn catalog_save_rejects_missing_fields() {
    let catalog = Catalog::load(test_store());

    assert!(catalog.save(sample_book("   ", "Author")).is_err());
    assert!(catalog.save(sample_book("Title", "")).is_err());
    assert_eq!(catalog.len(), 5);
}

#[test]
fn catalog_save_rejects_out_of_range_rating() {
    let catalog = Catalog::load(test_store());

    let mut book = sample_book("Rated", "Author");
    book.rating = Some(6);
    assert!(catalog.save(book).is_err());

    let mut book = sample_book("Rated", "Author");
    book.rating = Some(0);
    assert!(catalog.save(book).is_err());

    let mut book = sample_book("Rated", "Author");
    book.rating = Some(5);
    assert!(catalog.save(book).is_ok());
}

#[test]
fn catalog_save_clamps_current_page() {
    let catalog = Catalog::load(test_store());
    let mut book = sample_book("Short Book", "Author");
    book.total_pages = Some(100);
    book.current_page = Some(250);

    let (saved, _) = catalog.save(book).unwrap();

    assert_eq!(saved.current_page, Some(100));
}

#[test]
fn catalog_delete_then_absent_is_noop() {
    let catalog = Catalog::load(test_store());

    assert!(catalog.delete("3"));
    assert_eq!(catalog.len(), 4);
    assert!(catalog.get("3").is_none());

    assert!(!catalog.delete("3"));
    assert_eq!(catalog.len(), 4);
}

#[test]
fn catalog_filter_empty_term_returns_all_in_order() {
    let catalog = Catalog::load(test_store());

    let books = catalog.filter("", None);

    assert_eq!(books.len(), 5);
    assert_eq!(books[0].id, "1");
    assert_eq!(books[4].id, "5");
}

#[test]
fn catalog_filter_matches_title_case_insensitive() {
    let catalog = Catalog::load(test_store());

    let books = catalog.filter("DUNA", None);

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Duna");
}

#[test]
fn catalog_filter_matches_author() {
    let catalog = Catalog::load(test_store());

    let books = catalog.filter("herbert", None);

    assert_eq!(books.len(), 1);
    assert_eq!(books[0].author, "Frank Herbert");
}

#[test]
fn catalog_filter_by_genre() {
    let catalog = Catalog::load(test_store());

    let books = catalog.filter("", Some(Genre::ScienceFiction));

    assert_eq!(books.len(), 2);
    assert!(books.iter().all(|b| b.genre == Genre::ScienceFiction));
}

#[test]
fn catalog_filter_combines_term_and_genre() {
    let catalog = Catalog::load(test_store());

    let books = catalog.filter("duna", Some(Genre::ScienceFiction));
    assert_eq!(books.len(), 1);

    let books = catalog.filter("duna", Some(Genre::History));
    assert!(books.is_empty());
}

#[test]
fn catalog_persists_across_reload() {
    let store = test_store();
    let catalog = Catalog::load(store.clone());

    let (saved, _) = catalog.save(sample_book("Persisted", "Author")).unwrap();

    let reloaded = Catalog::load(store);
    assert_eq!(reloaded.len(), 6);
    assert_eq!(reloaded.get(&saved.id).unwrap().title, "Persisted");
}

#[test]
fn catalog_corrupt_data_falls_back_to_seeds() {
    let store = test_store();
    store.write(BOOKS_KEY, &"garbage");

    let catalog = Catalog::load(store);

    assert_eq!(catalog.len(), 5);
    assert!(catalog.get("1").is_some());
}

#[test]
fn seed_books_have_unique_ids() {
    let books = seed_books();

    let mut ids: Vec<_> = books.iter().map(|b| b.id.clone()).collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 5);
}

#[test]
fn book_reading_progress_rounds() {
    let mut book = sample_book("Progress", "Author");
    book.total_pages = Some(412);
    book.current_page = Some(250);

    assert_eq!(book.reading_progress(), 61);
}

#[test]
fn book_reading_progress_handles_missing_pages() {
    let mut book = sample_book("Progress", "Author");
    assert_eq!(book.reading_progress(), 0);

    book.total_pages = Some(0);
    book.current_page = Some(10);
    assert_eq!(book.reading_progress(), 0);

    book.total_pages = Some(412);
    book.current_page = None;
    assert_eq!(book.reading_progress(), 0);

    book.current_page = Some(500);
    assert_eq!(book.reading_progress(), 100);
}

#[test]
fn book_shows_progress_by_status() {
    let mut book = sample_book("Progress", "Author");
    book.total_pages = Some(100);

    book.status = ReadingStatus::Reading;
    assert!(book.shows_progress());

    book.status = ReadingStatus::Paused;
    assert!(book.shows_progress());

    book.status = ReadingStatus::Finished;
    assert!(!book.shows_progress());

    book.status = ReadingStatus::Reading;
    book.total_pages = None;
    assert!(!book.shows_progress());
}

#[test]
fn book_completion_counts_filled_fields() {
    assert_eq!(sample_book("T", "A").completion(), 33);

    let catalog = Catalog::load(test_store());
    assert_eq!(catalog.get("1").unwrap().completion(), 92);
}

#[test]
fn stats_from_seed_data() {
    let catalog = Catalog::load(test_store());

    let stats = catalog.stats();

    assert_eq!(stats.total_books, 5);
    assert_eq!(stats.reading, 1);
    assert_eq!(stats.finished, 2);
    assert_eq!(stats.pages_read, 1251);
}

#[test]
fn stats_empty_catalog() {
    let stats = LibraryStats::from_books(&[]);

    assert_eq!(stats.total_books, 0);
    assert_eq!(stats.reading, 0);
    assert_eq!(stats.finished, 0);
    assert_eq!(stats.pages_read, 0);
}

#[test]
fn stats_finished_without_total_uses_current_page() {
    let mut book = sample_book("Odd Record", "Author");
    book.status = ReadingStatus::Finished;
    book.current_page = Some(88);

    let stats = LibraryStats::from_books(&[book]);

    assert_eq!(stats.finished, 1);
    assert_eq!(stats.pages_read, 88);
}

#[test]
fn genre_label_round_trip() {
    let json = serde_json::to_string(&Genre::ScienceFiction).unwrap();
    assert_eq!(json, "\"Ficção Científica\"");

    assert_eq!(
        Genre::from_label("ficção científica"),
        Some(Genre::ScienceFiction)
    );
    assert_eq!(Genre::from_label("nope"), None);
}

#[test]
fn status_label_round_trip() {
    let json = serde_json::to_string(&ReadingStatus::WantToRead).unwrap();
    assert_eq!(json, "\"Quero Ler\"");

    assert_eq!(
        ReadingStatus::from_label("quero ler"),
        Some(ReadingStatus::WantToRead)
    );
    assert_eq!(ReadingStatus::from_label("lido"), Some(ReadingStatus::Finished));
}

#[test]
fn book_json_uses_camel_case_keys() {
    let mut book = sample_book("Wire Format", "Author");
    book.total_pages = Some(10);

    let json = serde_json::to_string(&book).unwrap();
    assert!(json.contains("\"totalPages\":10"));
    assert!(!json.contains("total_pages"));
    assert!(!json.contains("synopsis"));

    let parsed: Book = serde_json::from_str(
        r#"{"title":"Solo","author":"Ana","genre":"Poesia","status":"Lendo","currentPage":3,"totalPages":9}"#,
    )
    .unwrap();
    assert_eq!(parsed.id, "");
    assert_eq!(parsed.genre, Genre::Poetry);
    assert_eq!(parsed.status, ReadingStatus::Reading);
    assert_eq!(parsed.total_pages, Some(9));
}

#[test]
fn theme_defaults_to_system() {
    let state = test_state();
    assert_eq!(state.theme(), Theme::System);
}

#[test]
fn theme_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    {
        let state = AppState::open(&config);
        state.set_theme(Theme::Dark);
    }

    let state = AppState::open(&config);
    assert_eq!(state.theme(), Theme::Dark);
}

#[test]
fn session_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(&dir);

    {
        let state = AppState::open(&config);
        state
            .session
            .login("demo@bookshelf.com", "password")
            .unwrap();
    }

    let state = AppState::open(&config);
    assert!(state.session.is_authenticated());
}

#[test]
fn app_save_book_reports_outcome() {
    let state = test_state();

    let (book, notice) = state.save_book(sample_book("Noticed", "Author")).unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Book added to the library");

    let (_, notice) = state.save_book(book).unwrap();
    assert_eq!(notice.message, "Book updated");
}

#[test]
fn app_delete_book_reports_outcome() {
    let state = test_state();

    let (removed, notice) = state.delete_book("1");
    assert!(removed);
    assert_eq!(notice.kind, NoticeKind::Success);

    let (removed, notice) = state.delete_book("1");
    assert!(!removed);
    assert_eq!(notice.kind, NoticeKind::Error);
}

#[test]
fn config_parse_toml() {
    let toml = r#"
[storage]
path = "/tmp/test-bookshelf.db"
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.storage.path, PathBuf::from("/tmp/test-bookshelf.db"));
}

#[test]
fn config_default_values() {
    let config = Config::default();
    assert!(config.storage.path.ends_with("bookshelf.db"));

    let parsed: Config = toml::from_str("").unwrap();
    assert_eq!(parsed.storage.path, config.storage.path);
}
