//! bookshelf-rs: A personal book tracker with a local persisted library.
//!
//! This crate keeps a catalog of books with reading progress, ratings
//! and notes in a local key-value store, behind a small set of screens
//! driven by a guarded view state machine.
//!
//! # Features
//!
//! - Book catalog with add, edit and delete
//! - Reading status, page progress and 1-5 star ratings
//! - Title/author search and genre filtering
//! - Library statistics (totals, pages read)
//! - Demo login gating the mutating screens
//! - Durable storage in a local SQLite-backed key-value store

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Application state and notices.
pub mod app;
/// Configuration and CLI.
pub mod config;
/// Error types.
pub mod error;
/// Book model, catalog and statistics.
pub mod library;
/// Session gate.
pub mod session;
/// Key-value store.
pub mod store;
/// View state machine.
pub mod view;

#[cfg(test)]
mod tests;

pub use app::{AppState, Notice, NoticeKind};
pub use config::{Cli, Command, Config, Theme};
pub use error::{AppError, Result};
pub use library::{Book, Catalog, Genre, LibraryStats, ReadingStatus};
pub use store::Store;
pub use view::{NavEvent, Navigator, View};
