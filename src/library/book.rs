//! Book record model.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Number of user-facing fields on a record, excluding the identifier.
const FIELD_COUNT: u32 = 12;

/// Represents a book in the personal catalog.
///
/// Serialized with camelCase keys; absent optional fields are omitted so
/// persisted catalogs stay compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier. Empty on a draft; assigned when first saved.
    #[serde(default)]
    pub id: String,

    /// Book title.
    pub title: String,

    /// Author name.
    pub author: String,

    /// Genre.
    pub genre: Genre,

    /// Publication year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,

    /// Total page count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,

    /// Current page reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,

    /// Rating from 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Synopsis or summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,

    /// Cover image URL or inline-encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Reading status.
    pub status: ReadingStatus,

    /// Personal notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Attached document as an inline data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_attachment: Option<String>,
}

impl Book {
    /// Create a new draft with the required fields.
    pub fn new(title: &str, author: &str, genre: Genre) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            genre,
            ..Self::default()
        }
    }

    /// Check the record invariants: non-empty title and author, rating in range.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }

        if self.author.trim().is_empty() {
            return Err(AppError::Validation("Author is required".to_string()));
        }

        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        Ok(())
    }

    /// Reading progress as a percentage, 0 when page counts are missing.
    pub fn reading_progress(&self) -> u8 {
        match (self.current_page, self.total_pages) {
            (Some(current), Some(total)) if total > 0 => {
                let percent = (current as f64 / total as f64 * 100.0).round();
                percent.min(100.0) as u8
            }
            _ => 0,
        }
    }

    /// Whether the detail screen shows a progress bar for this record.
    pub fn shows_progress(&self) -> bool {
        matches!(self.status, ReadingStatus::Reading | ReadingStatus::Paused)
            && self.total_pages.is_some_and(|total| total > 0)
    }

    /// Share of filled fields as a percentage (form progress affordance).
    ///
    /// Strings count when non-empty, numeric fields when present; the
    /// identifier is excluded.
    pub fn completion(&self) -> u8 {
        let filled = [
            !self.title.is_empty(),
            !self.author.is_empty(),
            true, // genre is always set
            self.year.is_some(),
            self.total_pages.is_some(),
            self.current_page.is_some(),
            self.rating.is_some(),
            self.synopsis.as_deref().is_some_and(|s| !s.is_empty()),
            self.cover_image.as_deref().is_some_and(|s| !s.is_empty()),
            true, // status is always set
            self.notes.as_deref().is_some_and(|s| !s.is_empty()),
            self.pdf_attachment.as_deref().is_some_and(|s| !s.is_empty()),
        ]
        .iter()
        .filter(|&&f| f)
        .count() as u32;

        ((filled as f64 / FIELD_COUNT as f64) * 100.0).round() as u8
    }
}

impl Default for Book {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            author: String::new(),
            genre: Genre::Literature,
            year: None,
            total_pages: None,
            current_page: None,
            rating: None,
            synopsis: None,
            cover_image: None,
            status: ReadingStatus::WantToRead,
            notes: None,
            pdf_attachment: None,
        }
    }
}

/// Fixed genre set for catalog entries.
///
/// Serialized labels are kept in Portuguese so catalogs written by earlier
/// releases stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// General literature.
    #[serde(rename = "Literatura")]
    Literature,
    /// Science fiction.
    #[serde(rename = "Ficção Científica")]
    ScienceFiction,
    /// Magical realism.
    #[serde(rename = "Realismo Mágico")]
    MagicalRealism,
    /// Fiction.
    #[serde(rename = "Ficção")]
    Fiction,
    /// Fantasy.
    #[serde(rename = "Fantasia")]
    Fantasy,
    /// Romance.
    #[serde(rename = "Romance")]
    Romance,
    /// Biography.
    #[serde(rename = "Biografia")]
    Biography,
    /// History.
    #[serde(rename = "História")]
    History,
    /// Self-help.
    #[serde(rename = "Autoajuda")]
    SelfHelp,
    /// Technology.
    #[serde(rename = "Tecnologia")]
    Technology,
    /// Programming.
    #[serde(rename = "Programação")]
    Programming,
    /// Business.
    #[serde(rename = "Negócios")]
    Business,
    /// Psychology.
    #[serde(rename = "Psicologia")]
    Psychology,
    /// Philosophy.
    #[serde(rename = "Filosofia")]
    Philosophy,
    /// Poetry.
    #[serde(rename = "Poesia")]
    Poetry,
}

impl Genre {
    /// All genres in display order.
    pub const ALL: [Genre; 15] = [
        Genre::Literature,
        Genre::ScienceFiction,
        Genre::MagicalRealism,
        Genre::Fiction,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
        Genre::Technology,
        Genre::Programming,
        Genre::Business,
        Genre::Psychology,
        Genre::Philosophy,
        Genre::Poetry,
    ];

    /// Get the display label for this genre.
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Literature => "Literatura",
            Genre::ScienceFiction => "Ficção Científica",
            Genre::MagicalRealism => "Realismo Mágico",
            Genre::Fiction => "Ficção",
            Genre::Fantasy => "Fantasia",
            Genre::Romance => "Romance",
            Genre::Biography => "Biografia",
            Genre::History => "História",
            Genre::SelfHelp => "Autoajuda",
            Genre::Technology => "Tecnologia",
            Genre::Programming => "Programação",
            Genre::Business => "Negócios",
            Genre::Psychology => "Psicologia",
            Genre::Philosophy => "Filosofia",
            Genre::Poetry => "Poesia",
        }
    }

    /// Try to match a display label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Reading status of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    /// Not started yet.
    #[serde(rename = "Quero Ler")]
    WantToRead,
    /// Currently reading.
    #[serde(rename = "Lendo")]
    Reading,
    /// Finished reading.
    #[serde(rename = "Lido")]
    Finished,
    /// On hold.
    #[serde(rename = "Pausado")]
    Paused,
    /// Given up.
    #[serde(rename = "Abandonado")]
    Abandoned,
}

impl ReadingStatus {
    /// All statuses in display order.
    pub const ALL: [ReadingStatus; 5] = [
        ReadingStatus::WantToRead,
        ReadingStatus::Reading,
        ReadingStatus::Finished,
        ReadingStatus::Paused,
        ReadingStatus::Abandoned,
    ];

    /// Get the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingStatus::WantToRead => "Quero Ler",
            ReadingStatus::Reading => "Lendo",
            ReadingStatus::Finished => "Lido",
            ReadingStatus::Paused => "Pausado",
            ReadingStatus::Abandoned => "Abandonado",
        }
    }

    /// Try to match a display label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}
