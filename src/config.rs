use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Personal book tracker with reading progress, ratings and a local
/// persisted library.
#[derive(Parser, Debug, Clone)]
#[command(name = "bookshelf-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "BOOKSHELF_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse the library interactively (default if no command given).
    Browse,

    /// List books, optionally filtered.
    List {
        /// Search term matched against title and author.
        #[arg(short, long)]
        search: Option<String>,

        /// Genre label to filter by.
        #[arg(short, long)]
        genre: Option<String>,
    },

    /// Show one book in detail.
    Show {
        /// Book identifier.
        id: String,
    },

    /// Add a book to the library.
    Add {
        /// Book title.
        #[arg(short, long)]
        title: String,

        /// Author name.
        #[arg(short, long)]
        author: String,

        /// Genre label (defaults to "Literatura").
        #[arg(short, long)]
        genre: Option<String>,

        /// Reading status label (defaults to "Quero Ler").
        #[arg(long)]
        status: Option<String>,

        /// Publication year.
        #[arg(long)]
        year: Option<u32>,

        /// Total page count.
        #[arg(long)]
        pages: Option<u32>,

        /// Current page reached.
        #[arg(long)]
        page: Option<u32>,

        /// Rating from 1 to 5.
        #[arg(short, long)]
        rating: Option<u8>,

        /// Synopsis text.
        #[arg(long)]
        synopsis: Option<String>,

        /// Cover image URL.
        #[arg(long)]
        cover: Option<String>,

        /// Personal notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Edit an existing book. Only the given fields change.
    Edit {
        /// Book identifier.
        id: String,

        /// New title.
        #[arg(short, long)]
        title: Option<String>,

        /// New author.
        #[arg(short, long)]
        author: Option<String>,

        /// New genre label.
        #[arg(short, long)]
        genre: Option<String>,

        /// New reading status label.
        #[arg(long)]
        status: Option<String>,

        /// New publication year.
        #[arg(long)]
        year: Option<u32>,

        /// New total page count.
        #[arg(long)]
        pages: Option<u32>,

        /// New current page.
        #[arg(long)]
        page: Option<u32>,

        /// New rating from 1 to 5.
        #[arg(short, long)]
        rating: Option<u8>,

        /// New synopsis.
        #[arg(long)]
        synopsis: Option<String>,

        /// New cover image URL.
        #[arg(long)]
        cover: Option<String>,

        /// New personal notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a book.
    Del {
        /// Book identifier.
        id: String,
    },

    /// Show reading statistics.
    Stats,

    /// Log in with the demo account.
    Login {
        /// Account email (will prompt if not provided).
        email: Option<String>,

        /// Password (will prompt if not provided).
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out.
    Logout,

    /// Show or set the color theme.
    Theme {
        /// Theme name: light, dark or system.
        value: Option<String>,
    },

    /// Create a default config file and the store.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite store file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("bookshelf-rs").join("bookshelf.db"))
        .unwrap_or_else(|| PathBuf::from("data/bookshelf.db"))
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &PathBuf) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("bookshelf.toml"),
            dirs::config_dir()
                .map(|p| p.join("bookshelf-rs").join("config.toml"))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# bookshelf-rs configuration

[storage]
# Path to the library store (defaults to the user data directory)
# path = "/home/user/.local/share/bookshelf-rs/bookshelf.db"
"#
        .to_string()
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light colors.
    Light,
    /// Dark colors.
    Dark,
    /// Follow the desktop preference.
    #[default]
    System,
}

impl Theme {
    /// Get the display name for this theme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Try to match a theme name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "system" => Some(Theme::System),
            _ => None,
        }
    }
}
