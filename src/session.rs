//! Process-wide session store.
//!
//! Holds the bearer token and the signed-in user. Set once at login or
//! session restore, read by every API call, cleared at logout. Uses
//! `RwLock` because reads vastly outnumber the two writes.

use std::sync::RwLock;

use crate::error::AppError;
use crate::models::{Role, User};

/// An authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Shared session state. Lives in `AppState` behind an `Arc` so the
/// API client and the workflows read the same token.
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Set the session (login / restore).
    pub fn set(&self, session: Session) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = Some(session);
        }
    }

    /// Clear the session (logout).
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = None;
        }
    }

    /// Current session, if signed in.
    pub fn current(&self) -> Option<Session> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }

    /// Bearer token for API calls.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|s| s.token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Current session or `Unauthorized`.
    pub fn require(&self) -> Result<Session, AppError> {
        self.current().ok_or(AppError::Unauthorized)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
