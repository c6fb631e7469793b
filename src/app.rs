//! Application state shared by the interface layer.

use crate::config::{Config, Theme};
use crate::error::Result;
use crate::library::{Book, Catalog, SaveOutcome};
use crate::session::SessionGate;
use crate::store::Store;

/// Store key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Error,
}

/// Message handed to the interface after an operation.
///
/// The interface decides how to display it; nothing here is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Human-readable message.
    pub message: String,
    /// Success or error.
    pub kind: NoticeKind,
}

impl Notice {
    /// Build a success notice.
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            kind: NoticeKind::Success,
        }
    }

    /// Build an error notice.
    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            kind: NoticeKind::Error,
        }
    }
}

/// Shared application state.
///
/// Owns the store and the services built on it. Interfaces call in with
/// plain data and get state, notices or results back.
#[derive(Clone)]
pub struct AppState {
    /// The persisted catalog.
    pub catalog: Catalog,
    /// The session gate.
    pub session: SessionGate,
    store: Store,
}

impl AppState {
    /// Open the application state over the configured store path.
    pub fn open(config: &Config) -> Self {
        Self::with_store(Store::open(&config.storage.path))
    }

    /// Build the application state over an injected store.
    pub fn with_store(store: Store) -> Self {
        let catalog = Catalog::load(store.clone());
        let session = SessionGate::new(store.clone());

        Self {
            catalog,
            session,
            store,
        }
    }

    /// Save a book and describe the outcome.
    pub fn save_book(&self, book: Book) -> Result<(Book, Notice)> {
        let (book, outcome) = self.catalog.save(book)?;
        let notice = match outcome {
            SaveOutcome::Added => Notice::success("Book added to the library"),
            SaveOutcome::Updated => Notice::success("Book updated"),
        };

        Ok((book, notice))
    }

    /// Delete a book and describe the outcome.
    ///
    /// An absent id is a catalog no-op; only the notice reports it.
    pub fn delete_book(&self, id: &str) -> (bool, Notice) {
        if self.catalog.delete(id) {
            (true, Notice::success("Book deleted"))
        } else {
            (false, Notice::error("Book not found"))
        }
    }

    /// Current theme preference.
    pub fn theme(&self) -> Theme {
        self.store.read(THEME_KEY, Theme::default())
    }

    /// Persist a theme preference.
    pub fn set_theme(&self, theme: Theme) {
        self.store.write(THEME_KEY, &theme);
        tracing::info!(theme = theme.as_str(), "Theme changed");
    }

    /// Whether state survives a restart.
    pub fn is_persistent(&self) -> bool {
        self.store.is_persistent()
    }
}
