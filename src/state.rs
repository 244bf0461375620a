//! Shared application state.
//!
//! One `AppState` lives for the whole process. Screens call the
//! workflow functions with a reference to it; tests build one around a
//! `MockBackend`.

use std::sync::{Arc, RwLock};

use crate::api::{ApiClient, Backend};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::gate::ActionGate;
use crate::locale::{self, Language};
use crate::session::{Session, SessionStore};

pub struct AppState {
    config: AppConfig,
    session: Arc<SessionStore>,
    language: RwLock<Language>,
    backend: Arc<dyn Backend>,
    gate: ActionGate,
}

impl AppState {
    /// State backed by the real HTTP client.
    pub fn new(config: AppConfig) -> Self {
        let session = Arc::new(SessionStore::new());
        let backend = Arc::new(ApiClient::new(&config, Arc::clone(&session)));
        Self::with_backend(config, session, backend)
    }

    /// State around an arbitrary backend. Tests pass a `MockBackend`.
    pub fn with_backend(
        config: AppConfig,
        session: Arc<SessionStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            config,
            session,
            language: RwLock::new(Language::default()),
            backend,
            gate: ActionGate::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn gate(&self) -> &ActionGate {
        &self.gate
    }

    pub fn language(&self) -> Language {
        self.language
            .read()
            .map(|guard| *guard)
            .unwrap_or_default()
    }

    pub fn set_language(&self, lang: Language) {
        if let Ok(mut guard) = self.language.write() {
            *guard = lang;
        }
    }

    /// Current session or `Unauthorized`.
    pub fn require_session(&self) -> Result<Session, AppError> {
        self.session.require()
    }

    /// Current session if it belongs to the company owner, `Forbidden`
    /// otherwise. User and invitation management is owner-only.
    pub fn require_owner(&self) -> Result<Session, AppError> {
        let session = self.require_session()?;
        if !session.role().can_manage_users() {
            return Err(AppError::Forbidden(locale::msg_owner_only(self.language())));
        }
        Ok(session)
    }
}


#[cfg(test)]
mod tests {
    use crate::api::MockBackend;
    use crate::models::Role;

    use super::testutil::signed_in_state;
    use super::*;

    #[test]
    fn default_language_is_bulgarian() {
        let state = signed_in_state(Role::Owner, MockBackend::new());
        assert_eq!(state.language(), Language::Bg);
        state.set_language(Language::En);
        assert_eq!(state.language(), Language::En);
    }

    #[test]
    fn require_owner_rejects_other_roles() {
        let state = signed_in_state(Role::Accountant, MockBackend::new());
        let err = state.require_owner().unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let owner = signed_in_state(Role::Owner, MockBackend::new());
        assert!(owner.require_owner().is_ok());
    }

    #[test]
    fn require_session_without_login_is_unauthorized() {
        let state = AppState::with_backend(
            AppConfig::default(),
            Arc::new(SessionStore::new()),
            Arc::new(MockBackend::new()),
        );
        assert_eq!(state.require_session().unwrap_err(), AppError::Unauthorized);
    }
}
