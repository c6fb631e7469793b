//! Mock session gate.

use crate::error::{AppError, Result};
use crate::store::Store;

/// Store key holding the authenticated flag.
pub const SESSION_KEY: &str = "isAuthenticated";

/// Demo account email.
pub const DEMO_EMAIL: &str = "demo@bookshelf.com";

/// Demo account password.
pub const DEMO_PASSWORD: &str = "password";

/// Gate over the persisted authenticated flag.
///
/// This is a demonstration gate, not real authentication: one fixed
/// credential pair compared in plain text, one persisted boolean, no token
/// and no expiry.
#[derive(Clone)]
pub struct SessionGate {
    store: Store,
}

impl SessionGate {
    /// Create a gate over the given store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Whether the user is currently authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.store.read(SESSION_KEY, false)
    }

    /// Check the demo credentials and persist the flag on success.
    ///
    /// A mismatch leaves the flag untouched.
    pub fn login(&self, email: &str, password: &str) -> Result<()> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            tracing::warn!(email = email, "Rejected login attempt");
            return Err(AppError::InvalidCredentials);
        }

        self.store.write(SESSION_KEY, &true);
        tracing::info!(email = email, "Logged in");
        Ok(())
    }

    /// Clear the authenticated flag.
    pub fn logout(&self) {
        self.store.write(SESSION_KEY, &false);
        tracing::info!("Logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate {
        SessionGate::new(Store::open_memory().unwrap())
    }

    #[test]
    fn test_defaults_to_logged_out() {
        assert!(!gate().is_authenticated());
    }

    #[test]
    fn test_demo_credentials_accepted() {
        let gate = gate();
        gate.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        assert!(gate.is_authenticated());
    }

    #[test]
    fn test_wrong_credentials_rejected() {
        let gate = gate();
        assert!(gate.login(DEMO_EMAIL, "hunter2").is_err());
        assert!(gate.login("admin@bookshelf.com", DEMO_PASSWORD).is_err());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_logout_clears_flag() {
        let gate = gate();
        gate.login(DEMO_EMAIL, DEMO_PASSWORD).unwrap();
        gate.logout();
        assert!(!gate.is_authenticated());
    }
}
