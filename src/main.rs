//! bookshelf-rs entry point.

use bookshelf_rs::{
    app::{AppState, Notice},
    config::{Cli, Command, Config, Theme},
    error::AppError,
    library::{Book, Genre, ReadingStatus},
    store::Store,
    view::{NavEvent, Navigator, View},
};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookshelf_rs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Handle command
    match cli.command {
        Some(Command::Browse) => cmd_browse(&config),
        Some(Command::List { search, genre }) => cmd_list(&config, search, genre),
        Some(Command::Show { id }) => cmd_show(&config, &id),
        Some(Command::Add {
            title,
            author,
            genre,
            status,
            year,
            pages,
            page,
            rating,
            synopsis,
            cover,
            notes,
        }) => cmd_add(
            &config, title, author, genre, status, year, pages, page, rating, synopsis, cover,
            notes,
        ),
        Some(Command::Edit {
            id,
            title,
            author,
            genre,
            status,
            year,
            pages,
            page,
            rating,
            synopsis,
            cover,
            notes,
        }) => cmd_edit(
            &config, &id, title, author, genre, status, year, pages, page, rating, synopsis,
            cover, notes,
        ),
        Some(Command::Del { id }) => cmd_del(&config, &id),
        Some(Command::Stats) => cmd_stats(&config),
        Some(Command::Login { email, password }) => cmd_login(&config, email, password),
        Some(Command::Logout) => cmd_logout(&config),
        Some(Command::Theme { value }) => cmd_theme(&config, value),
        Some(Command::Init { force }) => cmd_init(force),
        None => {
            // Default: open the interactive browser
            cmd_browse(&config)
        }
    }
}

/// Initialize config and store.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("bookshelf.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    // Write default config
    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());

    // Initialize store
    let config = Config::default();
    if let Some(parent) = config.storage.path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let store = Store::open(&config.storage.path);
    if !store.is_persistent() {
        anyhow::bail!("Could not open store: {}", config.storage.path.display());
    }
    println!("Initialized store: {}", config.storage.path.display());

    println!("\nEdit bookshelf.toml to change where the library is kept.");
    println!("Then run: bookshelf-rs login");
    println!("And: bookshelf-rs browse");

    Ok(())
}

/// Interactive screen-by-screen browser.
fn cmd_browse(config: &Config) -> anyhow::Result<()> {
    let state = AppState::open(config);

    if !state.is_persistent() {
        println!("Warning: store unavailable, changes are kept in memory only.");
    }

    let mut nav = Navigator::new();
    let mut search = String::new();
    let mut genre: Option<Genre> = None;

    println!("bookshelf-rs. Type 'help' for commands, 'quit' to exit.");

    loop {
        let authenticated = state.session.is_authenticated();

        match nav.current().clone() {
            View::Login => {
                println!("\nLog in (blank email goes back)");
                let Some(email) = prompt_line("Email: ")? else {
                    println!();
                    break;
                };
                if email.is_empty() {
                    nav.apply(NavEvent::Navigate(View::Library), authenticated);
                    continue;
                }
                let Some(password) = prompt_line("Password: ")? else {
                    println!();
                    break;
                };

                match state.session.login(&email, &password) {
                    Ok(()) => {
                        println!("Logged in as {}", email);
                        nav.apply(NavEvent::LoginSucceeded, true);
                    }
                    Err(e) => println!("{}", e),
                }
            }

            View::AddBook => {
                println!("\nAdd a book (blank title cancels)");
                match run_book_form(&state, Book::default())? {
                    Some(notice) => {
                        println!("{}", notice.message);
                        nav.apply(NavEvent::BookSaved, authenticated);
                    }
                    None => nav.apply(NavEvent::Navigate(View::Library), authenticated),
                }
            }

            View::EditBook { book_id } => match state.catalog.get(&book_id) {
                Some(book) => {
                    println!("\nEdit '{}' (enter keeps the current value)", book.title);
                    match run_book_form(&state, book)? {
                        Some(notice) => {
                            println!("{}", notice.message);
                            nav.apply(NavEvent::BookSaved, authenticated);
                        }
                        None => nav.apply(NavEvent::Navigate(View::Library), authenticated),
                    }
                }
                None => {
                    println!("Book not found: {}", book_id);
                    nav.apply(NavEvent::Navigate(View::Library), authenticated);
                }
            },

            view => {
                render(&state, &view, &search, genre);

                let Some(input) = prompt_line("> ")? else {
                    println!();
                    break;
                };
                if input.is_empty() {
                    continue;
                }

                let (verb, rest) = split_command(&input);
                match verb {
                    "help" | "?" => print_help(),
                    "quit" | "q" | "exit" => break,
                    "library" | "l" => {
                        nav.apply(NavEvent::Navigate(View::Library), authenticated);
                    }
                    "dashboard" | "d" => {
                        nav.apply(NavEvent::Navigate(View::Dashboard), authenticated);
                    }
                    "add" | "a" => {
                        nav.apply(NavEvent::Navigate(View::AddBook), authenticated);
                    }
                    "open" | "show" | "o" => {
                        if rest.is_empty() {
                            println!("Usage: open <id>");
                        } else {
                            let view = View::ViewBook {
                                book_id: rest.to_string(),
                            };
                            nav.apply(NavEvent::Navigate(view), authenticated);
                        }
                    }
                    "edit" | "e" => {
                        if rest.is_empty() {
                            println!("Usage: edit <id>");
                        } else {
                            let view = View::EditBook {
                                book_id: rest.to_string(),
                            };
                            nav.apply(NavEvent::Navigate(view), authenticated);
                        }
                    }
                    "delete" | "del" | "rm" => {
                        if !authenticated {
                            println!("Log in to delete books.");
                        } else if rest.is_empty() {
                            println!("Usage: delete <id>");
                        } else {
                            let (removed, notice) = state.delete_book(rest);
                            println!("{}", notice.message);
                            if removed {
                                nav.apply(NavEvent::BookDeleted, authenticated);
                            }
                        }
                    }
                    "search" | "s" => {
                        search = rest.to_string();
                        nav.apply(NavEvent::Navigate(View::Library), authenticated);
                    }
                    "genre" | "g" => {
                        if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
                            genre = None;
                            nav.apply(NavEvent::Navigate(View::Library), authenticated);
                        } else if let Some(value) = Genre::from_label(rest) {
                            genre = Some(value);
                            nav.apply(NavEvent::Navigate(View::Library), authenticated);
                        } else {
                            println!("Unknown genre: {}", rest);
                        }
                    }
                    "genres" => {
                        for value in Genre::ALL {
                            println!("  {}", value.label());
                        }
                    }
                    "login" => {
                        nav.apply(NavEvent::Navigate(View::Login), authenticated);
                    }
                    "logout" => {
                        state.session.logout();
                        println!("Logged out.");
                        nav.apply(NavEvent::LoggedOut, false);
                    }
                    "theme" => {
                        if rest.is_empty() {
                            println!("Theme: {}", state.theme().as_str());
                        } else if let Some(value) = Theme::from_name(rest) {
                            state.set_theme(value);
                            println!("Theme set to {}", value.as_str());
                        } else {
                            println!("Unknown theme: {}", rest);
                        }
                    }
                    "back" | "b" => {
                        nav.apply(NavEvent::Navigate(View::Library), authenticated);
                    }
                    _ => println!("Unknown command '{}'. Type 'help'.", verb),
                }
            }
        }
    }

    Ok(())
}

/// Print the catalog, optionally filtered.
fn cmd_list(config: &Config, search: Option<String>, genre: Option<String>) -> anyhow::Result<()> {
    let state = AppState::open(config);

    let genre = match genre {
        Some(ref name) => Some(parse_genre(name)?),
        None => None,
    };
    let books = state.catalog.filter(search.as_deref().unwrap_or(""), genre);

    if books.is_empty() {
        println!("No books found.");
    } else {
        print_book_table(&books);
    }

    Ok(())
}

/// Print one book in detail.
fn cmd_show(config: &Config, id: &str) -> anyhow::Result<()> {
    let state = AppState::open(config);

    let book = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;
    print_book(&book);

    Ok(())
}

/// Add a book from flags (requires login).
fn cmd_add(
    config: &Config,
    title: String,
    author: String,
    genre: Option<String>,
    status: Option<String>,
    year: Option<u32>,
    pages: Option<u32>,
    page: Option<u32>,
    rating: Option<u8>,
    synopsis: Option<String>,
    cover: Option<String>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let state = AppState::open(config);
    ensure_logged_in(&state)?;

    let genre = match genre {
        Some(ref name) => parse_genre(name)?,
        None => Genre::Literature,
    };

    let mut book = Book::new(&title, &author, genre);
    if let Some(ref name) = status {
        book.status = parse_status(name)?;
    }
    book.year = year;
    book.total_pages = pages;
    book.current_page = page;
    book.rating = rating;
    book.synopsis = synopsis;
    book.cover_image = cover;
    book.notes = notes;

    let (book, _) = state.save_book(book)?;
    println!("Added book: {} (id: {})", book.title, book.id);

    Ok(())
}

/// Update fields on an existing book (requires login).
fn cmd_edit(
    config: &Config,
    id: &str,
    title: Option<String>,
    author: Option<String>,
    genre: Option<String>,
    status: Option<String>,
    year: Option<u32>,
    pages: Option<u32>,
    page: Option<u32>,
    rating: Option<u8>,
    synopsis: Option<String>,
    cover: Option<String>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let state = AppState::open(config);
    ensure_logged_in(&state)?;

    let mut book = state
        .catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    if let Some(title) = title {
        book.title = title;
    }
    if let Some(author) = author {
        book.author = author;
    }
    if let Some(ref name) = genre {
        book.genre = parse_genre(name)?;
    }
    if let Some(ref name) = status {
        book.status = parse_status(name)?;
    }
    if year.is_some() {
        book.year = year;
    }
    if pages.is_some() {
        book.total_pages = pages;
    }
    if page.is_some() {
        book.current_page = page;
    }
    if rating.is_some() {
        book.rating = rating;
    }
    if synopsis.is_some() {
        book.synopsis = synopsis;
    }
    if cover.is_some() {
        book.cover_image = cover;
    }
    if notes.is_some() {
        book.notes = notes;
    }

    let (book, _) = state.save_book(book)?;
    println!("Updated book: {} (id: {})", book.title, book.id);

    Ok(())
}

/// Delete a book (requires login).
fn cmd_del(config: &Config, id: &str) -> anyhow::Result<()> {
    let state = AppState::open(config);
    ensure_logged_in(&state)?;

    if state.catalog.delete(id) {
        println!("Deleted book: {}", id);
    } else {
        println!("Book not found: {}", id);
    }

    Ok(())
}

/// Print library statistics (requires login).
fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let state = AppState::open(config);
    ensure_logged_in(&state)?;

    let stats = state.catalog.stats();
    println!("Books:      {}", stats.total_books);
    println!("Reading:    {}", stats.reading);
    println!("Finished:   {}", stats.finished);
    println!("Pages read: {}", stats.pages_read);

    Ok(())
}

/// Log in and persist the session flag.
fn cmd_login(
    config: &Config,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let state = AppState::open(config);

    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?.unwrap_or_default(),
    };
    let password = match password {
        Some(p) => p,
        None => prompt_line("Password: ")?.unwrap_or_default(),
    };

    state.session.login(&email, &password)?;
    println!("Logged in as {}", email);

    Ok(())
}

/// Clear the session flag.
fn cmd_logout(config: &Config) -> anyhow::Result<()> {
    let state = AppState::open(config);
    state.session.logout();
    println!("Logged out.");

    Ok(())
}

/// Show or set the persisted theme.
fn cmd_theme(config: &Config, value: Option<String>) -> anyhow::Result<()> {
    let state = AppState::open(config);

    match value {
        Some(name) => {
            let theme = Theme::from_name(&name)
                .ok_or_else(|| AppError::Validation(format!("Unknown theme: {}", name)))?;
            state.set_theme(theme);
            println!("Theme set to {}", theme.as_str());
        }
        None => println!("{}", state.theme().as_str()),
    }

    Ok(())
}

/// Guard for commands that mirror the protected screens.
fn ensure_logged_in(state: &AppState) -> bookshelf_rs::Result<()> {
    if state.session.is_authenticated() {
        Ok(())
    } else {
        Err(AppError::NotAuthenticated(
            "run 'bookshelf-rs login' first".to_string(),
        ))
    }
}

/// Render the current screen. Display only, no state changes.
fn render(state: &AppState, view: &View, search: &str, genre: Option<Genre>) {
    match view {
        View::Dashboard => render_dashboard(state),
        View::Library => render_library(state, search, genre),
        View::ViewBook { book_id } => match state.catalog.get(book_id) {
            Some(book) => print_book(&book),
            None => println!("\nBook not found: {}", book_id),
        },
        _ => {}
    }
}

fn render_dashboard(state: &AppState) {
    let stats = state.catalog.stats();

    println!("\nDashboard");
    println!("{}", "-".repeat(72));
    println!(
        "Books: {}   Reading: {}   Finished: {}   Pages read: {}",
        stats.total_books, stats.reading, stats.finished, stats.pages_read
    );

    let books = state.catalog.all();
    if !books.is_empty() {
        println!("\nRecently added:");
        for book in books.iter().rev().take(3) {
            println!("  {} - {}", book.title, book.author);
        }
    }
}

fn render_library(state: &AppState, search: &str, genre: Option<Genre>) {
    let books = state.catalog.filter(search, genre);

    println!("\nLibrary");
    if !search.is_empty() || genre.is_some() {
        println!(
            "Filter: '{}' / {}",
            search,
            genre.map(|g| g.label()).unwrap_or("all genres")
        );
    }

    if books.is_empty() {
        println!("No books found.");
    } else {
        print_book_table(&books);
    }
}

fn print_book_table(books: &[Book]) {
    println!(
        "{:<36} {:<28} {:<22} {:<18} STATUS",
        "ID", "TITLE", "AUTHOR", "GENRE"
    );
    println!("{}", "-".repeat(110));
    for book in books {
        println!(
            "{:<36} {:<28} {:<22} {:<18} {}",
            book.id,
            book.title,
            book.author,
            book.genre.label(),
            book.status.label()
        );
    }
}

fn print_book(book: &Book) {
    println!("\n{}", book.title);
    println!("{}", "-".repeat(72));
    println!("Author:  {}", book.author);
    println!("Genre:   {}", book.genre.label());
    println!("Status:  {}", book.status.label());
    if let Some(year) = book.year {
        println!("Year:    {}", year);
    }
    if let Some(rating) = book.rating {
        println!("Rating:  {}/5", rating);
    }
    match (book.current_page, book.total_pages) {
        (Some(current), Some(total)) => println!("Pages:   {} of {}", current, total),
        (None, Some(total)) => println!("Pages:   {}", total),
        _ => {}
    }
    if book.shows_progress() {
        let percent = book.reading_progress();
        println!("Progress: {}% [{}]", percent, progress_bar(percent));
    }
    if let Some(ref synopsis) = book.synopsis {
        println!("\n{}", synopsis);
    }
    if let Some(ref notes) = book.notes {
        println!("\nNotes: {}", notes);
    }
    if book.pdf_attachment.is_some() {
        println!("\nHas an attached document.");
    }
    println!("\nId: {}", book.id);
}

fn progress_bar(percent: u8) -> String {
    let filled = (percent as usize).min(100) / 5;
    format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled))
}

fn print_help() {
    println!("Commands:");
    println!("  library              go to the library");
    println!("  dashboard            go to the dashboard (requires login)");
    println!("  open <id>            show a book");
    println!("  add                  add a book (requires login)");
    println!("  edit <id>            edit a book (requires login)");
    println!("  delete <id>          delete a book (requires login)");
    println!("  search <term>        filter by title or author (blank clears)");
    println!("  genre <name|all>     filter by genre");
    println!("  genres               list genre names");
    println!("  login / logout       open or close the session");
    println!("  theme [name]         show or set light/dark/system");
    println!("  quit");
}

/// Field-by-field book form. Returns the save notice, or None when cancelled.
///
/// Re-prompts with the entered values kept when validation rejects the save.
fn run_book_form(state: &AppState, mut book: Book) -> anyhow::Result<Option<Notice>> {
    loop {
        if !fill_book_form(&mut book)? {
            return Ok(None);
        }

        println!("Form {}% complete", book.completion());

        match state.save_book(book.clone()) {
            Ok((_, notice)) => return Ok(Some(notice)),
            Err(AppError::Validation(message)) => println!("{}", message),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompt for every editable field. Returns false when the user cancelled.
fn fill_book_form(book: &mut Book) -> anyhow::Result<bool> {
    let Some(title) = prompt_field("Title", &book.title)? else {
        return Ok(false);
    };
    if title.is_empty() {
        return Ok(false);
    }
    book.title = title;

    let Some(author) = prompt_field("Author", &book.author)? else {
        return Ok(false);
    };
    book.author = author;

    let Some(genre) = prompt_field("Genre", book.genre.label())? else {
        return Ok(false);
    };
    match Genre::from_label(&genre) {
        Some(value) => book.genre = value,
        None => println!("Unknown genre '{}', keeping {}", genre, book.genre.label()),
    }

    let Some(status) = prompt_field("Status", book.status.label())? else {
        return Ok(false);
    };
    match ReadingStatus::from_label(&status) {
        Some(value) => book.status = value,
        None => println!("Unknown status '{}', keeping {}", status, book.status.label()),
    }

    let Some(year) = prompt_field("Year", &number_text(book.year))? else {
        return Ok(false);
    };
    book.year = parse_number(&year);

    let Some(pages) = prompt_field("Total pages", &number_text(book.total_pages))? else {
        return Ok(false);
    };
    book.total_pages = parse_number(&pages);

    let Some(page) = prompt_field("Current page", &number_text(book.current_page))? else {
        return Ok(false);
    };
    book.current_page = parse_number(&page);

    let Some(rating) = prompt_field("Rating (1-5)", &number_text(book.rating))? else {
        return Ok(false);
    };
    book.rating = parse_number(&rating);

    let Some(synopsis) = prompt_field("Synopsis", book.synopsis.as_deref().unwrap_or(""))? else {
        return Ok(false);
    };
    book.synopsis = (!synopsis.is_empty()).then_some(synopsis);

    let Some(cover) = prompt_field("Cover URL", book.cover_image.as_deref().unwrap_or(""))? else {
        return Ok(false);
    };
    book.cover_image = (!cover.is_empty()).then_some(cover);

    let Some(notes) = prompt_field("Notes", book.notes.as_deref().unwrap_or(""))? else {
        return Ok(false);
    };
    book.notes = (!notes.is_empty()).then_some(notes);

    Ok(true)
}

/// Prompt for a form field. Empty input keeps the current value.
fn prompt_field(label: &str, current: &str) -> anyhow::Result<Option<String>> {
    let prompt = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };

    let Some(input) = prompt_line(&prompt)? else {
        return Ok(None);
    };

    if input.is_empty() {
        Ok(Some(current.to_string()))
    } else {
        Ok(Some(input))
    }
}

/// Split an input line into a verb and the remainder.
fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    }
}

/// Prompt for a line of input. Returns None at end of input.
fn prompt_line(prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}

fn number_text<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn parse_number<T: std::str::FromStr>(input: &str) -> Option<T> {
    if input.is_empty() {
        return None;
    }

    match input.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Not a number: {}", input);
            None
        }
    }
}

fn parse_genre(name: &str) -> bookshelf_rs::Result<Genre> {
    Genre::from_label(name).ok_or_else(|| AppError::Validation(format!("Unknown genre: {}", name)))
}

fn parse_status(name: &str) -> bookshelf_rs::Result<ReadingStatus> {
    ReadingStatus::from_label(name)
        .ok_or_else(|| AppError::Validation(format!("Unknown status: {}", name)))
}
