//! Invitations and user management.
//!
//! All of it is owner-only: every entry point checks the session role
//! before issuing a single request, and non-owners get a locked view
//! instead of an error. Invitations are created server-side (the server
//! mints the code, the token and the 48-hour expiry) and then offered
//! to the owner through the share channels.

use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::host::ConfirmPrompt;
use crate::locale::{self, ShareMessage};
use crate::models::{Company, Invitation, InvitationCreated, Role, User};
use crate::gate::ActionKind;
use crate::state::AppState;

/// What the user-management screen renders.
#[derive(Debug, Clone, PartialEq)]
pub enum UserManagementView {
    /// Shown to every role except owner. No data is fetched.
    Locked,
    Open {
        users: Vec<User>,
        invitations: Vec<Invitation>,
    },
}

/// A freshly created invitation plus everything needed to share it.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationOffer {
    pub created: InvitationCreated,
    pub link: String,
    pub message: ShareMessage,
}

/// Deep link for an invitation token.
pub fn join_link(base: &str, token: &str) -> String {
    format!("{}/invite/{token}", base.trim_end_matches('/'))
}

/// Load the user-management screen.
///
/// Non-owners get `Locked` without any backend traffic.
pub async fn load_user_management(state: &AppState) -> Result<UserManagementView, AppError> {
    let session = state.require_session()?;
    if !session.role().can_manage_users() {
        return Ok(UserManagementView::Locked);
    }

    let users = state.backend().list_users().await?;
    let invitations = state.backend().list_invitations().await?;
    Ok(UserManagementView::Open { users, invitations })
}

/// Create an invitation for the given role and build its share message.
pub async fn create_invitation(state: &AppState, role: Role) -> Result<InvitationOffer, AppError> {
    state.require_owner()?;
    let _guard = state
        .gate()
        .try_begin(ActionKind::CreateInvitation)
        .ok_or(AppError::Busy)?;

    let created = state.backend().create_invitation(role).await?;
    info!(role = role.as_str(), code = %created.code, "invitation created");

    let lang = state.language();
    let link = join_link(&state.config().invite_link_base, &created.invite_token);
    let message = ShareMessage {
        subject: locale::invite_subject(lang, &created.company_name),
        body: locale::invite_body(lang, &created.company_name, created.role, &link, &created.code),
    };
    Ok(InvitationOffer {
        created,
        link,
        message,
    })
}

/// Cancel a pending invitation after confirmation.
///
/// Returns `Ok(false)` when the user declines; nothing is sent.
pub async fn cancel_invitation(
    state: &AppState,
    confirm: &dyn ConfirmPrompt,
    id: Uuid,
) -> Result<bool, AppError> {
    state.require_owner()?;
    let _guard = state
        .gate()
        .try_begin(ActionKind::CancelInvitation)
        .ok_or(AppError::Busy)?;

    let (title, message) = locale::confirm_cancel_invitation(state.language());
    if !confirm.confirm(&title, &message) {
        return Ok(false);
    }

    state.backend().cancel_invitation(id).await?;
    info!(invitation_id = %id, "invitation cancelled");
    Ok(true)
}

/// Change another member's role. The owner's own row is immutable.
pub async fn update_user_role(
    state: &AppState,
    user_id: &str,
    role: Role,
) -> Result<(), AppError> {
    let session = state.require_owner()?;
    if session.user.user_id == user_id {
        return Err(AppError::Validation(locale::msg_own_row(state.language())));
    }
    let _guard = state
        .gate()
        .try_begin(ActionKind::UpdateUser)
        .ok_or(AppError::Busy)?;

    state.backend().update_user_role(user_id, role).await
}

/// Remove a member from the company after confirmation.
///
/// Returns `Ok(false)` when the user declines.
pub async fn remove_user(
    state: &AppState,
    confirm: &dyn ConfirmPrompt,
    user: &User,
) -> Result<bool, AppError> {
    let session = state.require_owner()?;
    if session.user.user_id == user.user_id {
        return Err(AppError::Validation(locale::msg_own_row(state.language())));
    }
    let _guard = state
        .gate()
        .try_begin(ActionKind::UpdateUser)
        .ok_or(AppError::Busy)?;

    let (title, message) = locale::confirm_remove_user(state.language(), &user.name);
    if !confirm.confirm(&title, &message) {
        return Ok(false);
    }

    state.backend().remove_user(&user.user_id).await?;
    info!(user_id = %user.user_id, "user removed from company");
    Ok(true)
}

/// Join a company with a manually entered invitation code.
pub async fn join_company(state: &AppState, code: &str) -> Result<Company, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::Validation(locale::msg_code_required(
            state.language(),
        )));
    }
    state.backend().join_company(code).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::api::MockBackend;
    use crate::config::AppConfig;
    use crate::host::MockConfirm;
    use crate::state::testutil::{signed_in_pair, signed_in_state, test_user};

    use super::*;

    fn created_fixture() -> InvitationCreated {
        InvitationCreated {
            code: "483920".into(),
            invite_token: "abc123".into(),
            company_name: "Acme EOOD".into(),
            role: Role::Staff,
        }
    }

    fn state_with(role: Role, backend: MockBackend) -> (AppState, Arc<MockBackend>) {
        signed_in_pair(AppConfig::default(), role, backend)
    }

    #[tokio::test]
    async fn non_owner_gets_locked_view_without_any_request() {
        for role in [Role::Manager, Role::Accountant, Role::Staff, Role::Viewer] {
            let (state, backend) = state_with(role, MockBackend::new());
            let view = load_user_management(&state).await.unwrap();
            assert_eq!(view, UserManagementView::Locked);
            assert!(backend.calls().is_empty(), "{role:?} issued a request");
        }
    }

    #[tokio::test]
    async fn owner_loads_users_and_invitations() {
        let backend = MockBackend::new()
            .with_users(vec![test_user(Role::Owner)])
            .with_invitations(vec![]);
        let state = signed_in_state(Role::Owner, backend);

        match load_user_management(&state).await.unwrap() {
            UserManagementView::Open { users, invitations } => {
                assert_eq!(users.len(), 1);
                assert!(invitations.is_empty());
            }
            UserManagementView::Locked => panic!("owner must see the open view"),
        }
    }

    #[tokio::test]
    async fn created_invitation_message_embeds_link_code_and_role() {
        let backend = MockBackend::new().with_invitation(created_fixture());
        let state = signed_in_state(Role::Owner, backend);

        let offer = create_invitation(&state, Role::Staff).await.unwrap();
        assert_eq!(offer.link, "https://app.fakturo.bg/invite/abc123");
        assert!(offer.message.body.contains(&offer.link));
        assert!(offer.message.body.contains("483920"));
        assert!(offer.message.body.contains("Служител"));
        assert!(offer.message.body.contains("48 часа"));
        assert!(offer.message.subject.contains("Acme EOOD"));
    }

    #[tokio::test]
    async fn non_owner_cannot_create_invitations() {
        let (state, backend) = state_with(Role::Accountant, MockBackend::new());
        let err = create_invitation(&state, Role::Staff).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn declined_cancellation_sends_nothing() {
        let (state, backend) = state_with(Role::Owner, MockBackend::new());
        let confirm = MockConfirm::declining();

        let done = cancel_invitation(&state, &confirm, Uuid::new_v4())
            .await
            .unwrap();
        assert!(!done);
        assert!(backend.calls().is_empty());
        assert_eq!(confirm.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_cancellation_hits_the_backend() {
        let (state, backend) = state_with(Role::Owner, MockBackend::new());
        let id = Uuid::new_v4();

        let done = cancel_invitation(&state, &MockConfirm::accepting(), id)
            .await
            .unwrap();
        assert!(done);
        assert_eq!(backend.calls(), vec![format!("cancel_invitation:{id}")]);
    }

    #[tokio::test]
    async fn owner_cannot_edit_own_row() {
        let (state, backend) = state_with(Role::Owner, MockBackend::new());
        let me = state.require_session().unwrap().user;

        let err = update_user_role(&state, &me.user_id, Role::Viewer)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = remove_user(&state, &MockConfirm::accepting(), &me)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_join_code_is_rejected_locally() {
        let (state, backend) = state_with(Role::Viewer, MockBackend::new());
        let err = join_company(&state, "   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn join_link_tolerates_trailing_slash() {
        assert_eq!(
            join_link("https://app.fakturo.bg/", "abc123"),
            "https://app.fakturo.bg/invite/abc123"
        );
    }
}
