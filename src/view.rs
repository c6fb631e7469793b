//! Screen navigation state machine.
//!
//! Navigation is modeled as a closed set of views plus a pure transition
//! function over events. The session guard runs before any state change;
//! nothing here touches the catalog or the store.

/// The active screen.
///
/// Exactly one view is active at a time. Views are transient: they are never
/// persisted and every launch starts at the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Reading statistics overview. Protected.
    Dashboard,
    /// The browsable, filterable catalog. The initial view.
    Library,
    /// Form for a new book. Protected.
    AddBook,
    /// Detail screen for one book.
    ViewBook {
        /// Identifier of the displayed book.
        book_id: String,
    },
    /// Edit form for one book. Protected.
    EditBook {
        /// Identifier of the edited book.
        book_id: String,
    },
    /// Credential form.
    Login,
}

impl View {
    /// Whether this view sits behind the session gate.
    pub fn requires_auth(&self) -> bool {
        matches!(self, View::Dashboard | View::AddBook | View::EditBook { .. })
    }
}

/// Navigation events fed to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Request to show a view.
    Navigate(View),
    /// The session gate accepted the credentials.
    LoginSucceeded,
    /// The user ended the session.
    LoggedOut,
    /// A save operation completed.
    BookSaved,
    /// A delete operation completed.
    BookDeleted,
}

/// Resolve a requested view against the session flag.
///
/// Returns the requested view when it may be entered, the login screen
/// otherwise. Evaluated before any state change; never called from a render
/// path.
pub fn guard(requested: View, authenticated: bool) -> View {
    if requested.requires_auth() && !authenticated {
        View::Login
    } else {
        requested
    }
}

/// Navigation state: the active view plus the target of a guarded redirect.
///
/// `pending` is set only while the login screen was reached through the
/// guard; a successful login resumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: View,
    pending: Option<View>,
}

impl Navigator {
    /// Start at the library with no pending redirect.
    pub fn new() -> Self {
        Self {
            current: View::Library,
            pending: None,
        }
    }

    /// The active view.
    pub fn current(&self) -> &View {
        &self.current
    }

    /// Where a guarded redirect was headed, if anywhere.
    pub fn pending(&self) -> Option<&View> {
        self.pending.as_ref()
    }

    /// Apply one event in place.
    pub fn apply(&mut self, event: NavEvent, authenticated: bool) {
        *self = transition(self.clone(), event, authenticated);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure transition function: one navigation state and one event in, the next
/// state out.
///
/// A guarded redirect records the requested view; `LoginSucceeded` resumes
/// it, falling back to the dashboard when the login screen was opened
/// directly. Logout and catalog mutations always land on the library.
pub fn transition(nav: Navigator, event: NavEvent, authenticated: bool) -> Navigator {
    match event {
        NavEvent::Navigate(requested) => {
            let resolved = guard(requested.clone(), authenticated);
            let pending = (resolved != requested).then_some(requested);
            Navigator {
                current: resolved,
                pending,
            }
        }
        NavEvent::LoginSucceeded => Navigator {
            current: nav.pending.unwrap_or(View::Dashboard),
            pending: None,
        },
        NavEvent::LoggedOut | NavEvent::BookSaved | NavEvent::BookDeleted => Navigator {
            current: View::Library,
            pending: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_library() {
        assert_eq!(*Navigator::new().current(), View::Library);
    }

    #[test]
    fn test_guard_redirects_protected_views() {
        assert_eq!(guard(View::Dashboard, false), View::Login);
        assert_eq!(guard(View::AddBook, false), View::Login);
        let edit = View::EditBook {
            book_id: "2".to_string(),
        };
        assert_eq!(guard(edit.clone(), false), View::Login);
        assert_eq!(guard(edit.clone(), true), edit);
        assert_eq!(guard(View::Dashboard, true), View::Dashboard);
    }

    #[test]
    fn test_guard_passes_public_views() {
        let detail = View::ViewBook {
            book_id: "2".to_string(),
        };
        assert_eq!(guard(View::Library, false), View::Library);
        assert_eq!(guard(detail.clone(), false), detail);
        assert_eq!(guard(View::Login, false), View::Login);
    }

    #[test]
    fn test_login_resumes_guarded_target() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::AddBook), false);
        assert_eq!(*nav.current(), View::Login);
        assert_eq!(nav.pending(), Some(&View::AddBook));

        nav.apply(NavEvent::LoginSucceeded, true);
        assert_eq!(*nav.current(), View::AddBook);
        assert_eq!(nav.pending(), None);
    }

    #[test]
    fn test_direct_login_lands_on_dashboard() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::Login), false);
        assert_eq!(nav.pending(), None);

        nav.apply(NavEvent::LoginSucceeded, true);
        assert_eq!(*nav.current(), View::Dashboard);
    }

    #[test]
    fn test_navigation_clears_stale_pending() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::AddBook), false);
        nav.apply(NavEvent::Navigate(View::Library), false);
        nav.apply(NavEvent::Navigate(View::Login), false);
        nav.apply(NavEvent::LoginSucceeded, true);
        assert_eq!(*nav.current(), View::Dashboard);
    }

    #[test]
    fn test_logout_returns_to_library() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::Dashboard), true);
        nav.apply(NavEvent::LoggedOut, false);
        assert_eq!(*nav.current(), View::Library);
    }

    #[test]
    fn test_mutations_return_to_library() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::AddBook), true);
        nav.apply(NavEvent::BookSaved, true);
        assert_eq!(*nav.current(), View::Library);

        nav.apply(
            NavEvent::Navigate(View::ViewBook {
                book_id: "4".to_string(),
            }),
            true,
        );
        nav.apply(NavEvent::BookDeleted, true);
        assert_eq!(*nav.current(), View::Library);
    }

    #[test]
    fn test_authenticated_navigation_passes_through() {
        let mut nav = Navigator::new();
        nav.apply(NavEvent::Navigate(View::Dashboard), true);
        assert_eq!(*nav.current(), View::Dashboard);
        assert_eq!(nav.pending(), None);
    }
}
