//! Sign-in and sign-out.
//!
//! Login is two requests: the credential exchange, then the profile
//! fetch that tells us the user's role and company. Only after both
//! succeed is the session considered established.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::AppError;
use crate::locale;
use crate::models::{AuthResponse, Role, User};
use crate::session::Session;
use crate::state::AppState;

/// Profile stub used between the credential exchange and the `/auth/me`
/// answer, so the profile request itself carries the bearer token.
/// Deliberately the least-privileged role; it is replaced or cleared
/// before login returns.
fn provisional_user(auth: &AuthResponse) -> User {
    User {
        user_id: auth.user_id.clone(),
        email: auth.email.clone(),
        name: auth.name.clone(),
        picture: auth.picture.clone(),
        company_id: None,
        role: Role::Viewer,
        created_at: Utc::now(),
    }
}

/// Sign in and populate the session store.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<User, AppError> {
    let email = email.trim();
    if !email.contains('@') || password.is_empty() {
        return Err(AppError::Validation(locale::msg_invalid_credentials(
            state.language(),
        )));
    }

    let auth = state.backend().login(email, password).await?;
    state.session().set(Session {
        token: auth.session_token.clone(),
        user: provisional_user(&auth),
    });

    match state.backend().me().await {
        Ok(user) => {
            state.session().set(Session {
                token: auth.session_token,
                user: user.clone(),
            });
            info!(user_id = %user.user_id, role = user.role.as_str(), "signed in");
            Ok(user)
        }
        Err(err) => {
            state.session().clear();
            Err(err)
        }
    }
}

/// Sign out. The local session is cleared even when the server cannot
/// be reached, so the user is never stuck signed in.
pub async fn logout(state: &AppState) {
    if let Err(err) = state.backend().logout().await {
        warn!(error = %err, "remote logout failed, clearing local session anyway");
    }
    state.session().clear();
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::MockBackend;
    use crate::config::AppConfig;
    use crate::session::SessionStore;
    use crate::state::testutil::{signed_in_state, test_user};

    use super::*;

    fn auth_response() -> AuthResponse {
        AuthResponse {
            user_id: "user_1a2b3c4d5e6f".into(),
            email: "ivan@acme.bg".into(),
            name: "Иван Петров".into(),
            picture: None,
            session_token: "tok_fresh".into(),
        }
    }

    fn signed_out_state(backend: Arc<MockBackend>) -> AppState {
        AppState::with_backend(
            AppConfig::default(),
            Arc::new(SessionStore::new()),
            backend,
        )
    }

    #[tokio::test]
    async fn login_stores_token_and_profile() {
        let backend = Arc::new(
            MockBackend::new().with_auth(auth_response(), test_user(Role::Owner)),
        );
        let state = signed_out_state(backend);

        let user = login(&state, "ivan@acme.bg", "parola123").await.unwrap();
        assert_eq!(user.role, Role::Owner);
        assert_eq!(state.session().token().as_deref(), Some("tok_fresh"));
    }

    #[tokio::test]
    async fn bad_credentials_never_reach_the_network() {
        let backend = Arc::new(MockBackend::new());
        let state = signed_out_state(Arc::clone(&backend));

        let err = login(&state, "not-an-email", "parola123").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = login(&state, "ivan@acme.bg", "").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(backend.calls().is_empty(), "no request was issued");
    }

    #[tokio::test]
    async fn failed_profile_fetch_leaves_no_session() {
        // Credential exchange succeeds, the profile fetch fails.
        let backend = Arc::new(MockBackend::new().with_login(auth_response()));
        let state = signed_out_state(backend);

        assert!(login(&state, "ivan@acme.bg", "parola123").await.is_err());
        assert!(!state.session().is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_session_even_offline() {
        let backend = MockBackend::new().failing_with(AppError::Network("down".into()));
        let state = signed_in_state(Role::Owner, backend);

        logout(&state).await;
        assert!(!state.session().is_authenticated());
    }
}
