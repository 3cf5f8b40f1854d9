use anyhow::Result;
use derive_more::Display;
use tracing::{info, instrument, warn};

use crate::models::LoginReqDto;
use crate::utils::local_storage::{keys, LocalStorage};

/// Shown when nothing was stored for the signed-in user.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

#[derive(Debug, Display, PartialEq, Eq)]
pub enum AuthError {
    #[display(fmt = "Invalid username or password")]
    InvalidCredentials,
    #[display(fmt = "Could not store the session: {}", _0)]
    Storage(String),
}

impl std::error::Error for AuthError {}

/// The credential pair the login form is checked against.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub display_name: String,
}

/// Signed-in flag persisted in client storage.
///
/// This is a placeholder for a real identity backend: it compares against a
/// configured pair and nothing else.
pub struct AuthState<S: LocalStorage> {
    storage: S,
    credentials: Credentials,
    authenticated: bool,
}

impl<S: LocalStorage> AuthState<S> {
    /// Restore the flag left by a previous session. Unreadable storage counts
    /// as signed out.
    pub fn restore(storage: S, credentials: Credentials) -> Self {
        let authenticated = match storage.get_item(keys::IS_AUTHENTICATED) {
            Ok(flag) => flag.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Failed to read session flag");
                false
            }
        };

        Self {
            storage,
            credentials,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[instrument(name = "auth_login", skip(self, req), fields(username = %req.username))]
    pub fn login(&mut self, req: &LoginReqDto) -> Result<(), AuthError> {
        if req.username != self.credentials.username || req.password != self.credentials.password {
            warn!("Rejected login");
            return Err(AuthError::InvalidCredentials);
        }

        self.persist_login()
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.authenticated = true;
        info!("Login successful");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<()> {
        self.storage.remove_item(keys::IS_AUTHENTICATED)?;
        self.storage.remove_item(keys::DISPLAY_NAME)?;
        self.authenticated = false;
        info!("Logged out");
        Ok(())
    }

    pub fn display_name(&self) -> String {
        if !self.authenticated {
            return FALLBACK_DISPLAY_NAME.to_string();
        }
        self.storage
            .get_item(keys::DISPLAY_NAME)
            .ok()
            .flatten()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_string())
    }

    fn persist_login(&self) -> Result<()> {
        self.storage.set_item(keys::IS_AUTHENTICATED, "true")?;
        self.storage
            .set_item(keys::DISPLAY_NAME, &self.credentials.display_name)?;
        Ok(())
    }
}
