use crate::error::Result;
use crate::library::{Book, Genre, LibraryStats, seed_books};
use crate::store::Store;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Store key holding the serialized collection.
pub const BOOKS_KEY: &str = "books";

/// Outcome of a save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was appended.
    Added,
    /// An existing entry was replaced in place.
    Updated,
}

/// The user's ordered book collection, backed by the persisted store.
///
/// Insertion order is the display order. Every mutation rewrites the whole
/// collection under [`BOOKS_KEY`].
#[derive(Clone)]
pub struct Catalog {
    store: Store,
    books: Arc<RwLock<Vec<Book>>>,
}

impl Catalog {
    /// Load the catalog from the store, seeding the example set when the
    /// key is absent or unreadable.
    pub fn load(store: Store) -> Self {
        let books: Vec<Book> = store.read(BOOKS_KEY, seed_books());

        tracing::debug!(books = books.len(), "Loaded catalog");

        Self {
            store,
            books: Arc::new(RwLock::new(books)),
        }
    }

    /// Validate and save a book.
    ///
    /// A record whose id matches an existing entry replaces it in place;
    /// anything else is appended with a fresh identifier. Returns the saved
    /// record together with what happened.
    pub fn save(&self, mut book: Book) -> Result<(Book, SaveOutcome)> {
        book.validate()?;

        // Keep the derived progress inside [0, 100]
        if let (Some(current), Some(total)) = (book.current_page, book.total_pages)
            && current > total
        {
            book.current_page = Some(total);
        }

        let outcome = {
            let mut books = self.books.write();
            match books.iter().position(|b| b.id == book.id) {
                Some(index) => {
                    books[index] = book.clone();
                    SaveOutcome::Updated
                }
                None => {
                    book.id = Uuid::new_v4().to_string();
                    books.push(book.clone());
                    SaveOutcome::Added
                }
            }
        };

        self.flush();
        tracing::info!(id = %book.id, title = %book.title, outcome = ?outcome, "Saved book");

        Ok((book, outcome))
    }

    /// Remove a book by id, reporting whether anything was removed.
    ///
    /// An absent id is a no-op, not an error.
    pub fn delete(&self, id: &str) -> bool {
        let removed = {
            let mut books = self.books.write();
            let before = books.len();
            books.retain(|b| b.id != id);
            books.len() < before
        };

        if removed {
            self.flush();
            tracing::info!(id = id, "Deleted book");
        }

        removed
    }

    /// Get book by ID.
    pub fn get(&self, id: &str) -> Option<Book> {
        self.books.read().iter().find(|b| b.id == id).cloned()
    }

    /// Get all books in insertion order.
    pub fn all(&self) -> Vec<Book> {
        self.books.read().clone()
    }

    /// Filter by search term and genre, preserving insertion order.
    ///
    /// An empty term matches every record; the term otherwise matches
    /// case-insensitively against title or author. `None` genre means all.
    pub fn filter(&self, term: &str, genre: Option<Genre>) -> Vec<Book> {
        let term = term.to_lowercase();
        self.books
            .read()
            .iter()
            .filter(|b| {
                let matches_search = term.is_empty()
                    || b.title.to_lowercase().contains(&term)
                    || b.author.to_lowercase().contains(&term);
                let matches_genre = genre.is_none_or(|g| b.genre == g);
                matches_search && matches_genre
            })
            .cloned()
            .collect()
    }

    /// Aggregate dashboard statistics.
    pub fn stats(&self) -> LibraryStats {
        LibraryStats::from_books(&self.books.read())
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.read().len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.read().is_empty()
    }

    /// Write the whole collection to the store.
    fn flush(&self) {
        let books = self.books.read();
        self.store.write(BOOKS_KEY, &*books);
    }
}
