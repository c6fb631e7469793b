//! Book model and the persisted catalog.

/// Book record and its enums.
pub mod book;
/// Catalog collection and operations.
pub mod catalog;

pub use book::{Book, Genre, ReadingStatus};
pub use catalog::{BOOKS_KEY, Catalog, SaveOutcome};

use serde::{Deserialize, Serialize};

/// Aggregate reading statistics for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    /// Total number of books.
    pub total_books: usize,
    /// Books currently being read.
    pub reading: usize,
    /// Books finished.
    pub finished: usize,
    /// Total pages read across the catalog.
    pub pages_read: u64,
}

impl LibraryStats {
    /// Compute statistics over a collection.
    ///
    /// A finished book with a known page count contributes its full length;
    /// everything else contributes the current page.
    pub fn from_books(books: &[Book]) -> Self {
        let pages_read = books
            .iter()
            .map(|b| match (b.status, b.total_pages) {
                (ReadingStatus::Finished, Some(total)) if total > 0 => total as u64,
                _ => b.current_page.unwrap_or(0) as u64,
            })
            .sum();

        Self {
            total_books: books.len(),
            reading: books
                .iter()
                .filter(|b| b.status == ReadingStatus::Reading)
                .count(),
            finished: books
                .iter()
                .filter(|b| b.status == ReadingStatus::Finished)
                .count(),
            pages_read,
        }
    }
}

/// The example catalog seeded when no collection has been persisted yet.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book {
            id: "1".to_string(),
            title: "Cem Anos de Solidão".to_string(),
            author: "Gabriel García Márquez".to_string(),
            genre: Genre::MagicalRealism,
            year: Some(1967),
            total_pages: Some(417),
            current_page: Some(417),
            rating: Some(5),
            synopsis: Some(
                "A história de várias gerações da família Buendía, cujo patriarca, \
                 José Arcadio Buendía, fundou a cidade de Macondo."
                    .to_string(),
            ),
            cover_image: Some("https://picsum.photos/seed/solitude/300/450".to_string()),
            status: ReadingStatus::Finished,
            notes: Some("Uma obra-prima da literatura latino-americana.".to_string()),
            pdf_attachment: None,
        },
        Book {
            id: "2".to_string(),
            title: "Duna".to_string(),
            author: "Frank Herbert".to_string(),
            genre: Genre::ScienceFiction,
            year: Some(1965),
            total_pages: Some(412),
            current_page: Some(250),
            rating: Some(5),
            synopsis: Some(
                "A história do jovem Paul Atreides, cuja família aceita a \
                 administração do planeta deserto Arrakis."
                    .to_string(),
            ),
            cover_image: Some("https://picsum.photos/seed/dune/300/450".to_string()),
            status: ReadingStatus::Reading,
            notes: Some("A especiaria deve fluir.".to_string()),
            pdf_attachment: None,
        },
        Book {
            id: "3".to_string(),
            title: "O Guia do Mochileiro das Galáxias".to_string(),
            author: "Douglas Adams".to_string(),
            genre: Genre::ScienceFiction,
            year: Some(1979),
            total_pages: Some(224),
            current_page: Some(0),
            rating: Some(4),
            synopsis: Some(
                "Segundos antes da Terra ser demolida para dar lugar a uma via \
                 expressa galáctica, Arthur Dent é resgatado do planeta por seu \
                 amigo Ford Prefect."
                    .to_string(),
            ),
            cover_image: Some("https://picsum.photos/seed/hitchhiker/300/450".to_string()),
            status: ReadingStatus::WantToRead,
            notes: None,
            pdf_attachment: None,
        },
        Book {
            id: "4".to_string(),
            title: "Código Limpo".to_string(),
            author: "Robert C. Martin".to_string(),
            genre: Genre::Programming,
            year: Some(2008),
            total_pages: Some(464),
            current_page: Some(464),
            rating: Some(5),
            synopsis: Some(
                "Um manual de artesanato de software ágil. O livro foi dividido \
                 em três partes."
                    .to_string(),
            ),
            cover_image: Some("https://picsum.photos/seed/cleancode/300/450".to_string()),
            status: ReadingStatus::Finished,
            notes: Some("Essencial para qualquer desenvolvedor.".to_string()),
            pdf_attachment: None,
        },
        Book {
            id: "5".to_string(),
            title: "Sapiens: Uma Breve História da Humanidade".to_string(),
            author: "Yuval Noah Harari".to_string(),
            genre: Genre::History,
            year: Some(2011),
            total_pages: Some(443),
            current_page: Some(120),
            rating: Some(4),
            synopsis: Some(
                "Explora a história da humanidade, desde a Idade da Pedra até as \
                 revoluções políticas e tecnológicas do século XXI."
                    .to_string(),
            ),
            cover_image: Some("https://picsum.photos/seed/sapiens/300/450".to_string()),
            status: ReadingStatus::Paused,
            notes: Some("Perspicaz, mas denso.".to_string()),
            pdf_attachment: None,
        },
    ]
}
