use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::error::AuthError;

/// Bearer token for the current learner, shared by every API client clone.
///
/// The token is set on login and cleared on logout; nothing is written to disk.
#[derive(Clone, Default)]
pub struct AuthSession {
    token: Arc<RwLock<Option<String>>>,
}

impl AuthSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session that is already logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyToken` if the token is blank.
    pub fn with_token(token: impl Into<String>) -> Result<Self, AuthError> {
        let session = Self::new();
        session.login(token)?;
        Ok(session)
    }

    /// Store a new token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmptyToken` if the token is blank.
    pub fn login(&self, token: impl Into<String>) -> Result<(), AuthError> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        info!("auth session started");
        Ok(())
    }

    pub fn logout(&self) {
        let previous = self
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            info!("auth session cleared");
        }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
