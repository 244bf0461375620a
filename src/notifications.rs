//! Notification preferences screen.

use crate::error::AppError;
use crate::gate::ActionKind;
use crate::locale;
use crate::models::{NotificationSettings, NotificationSettingsUpdate};
use crate::state::AppState;

/// The server creates default settings on first read, so this never
/// 404s for a fresh account.
pub async fn load_settings(state: &AppState) -> Result<NotificationSettings, AppError> {
    state.require_session()?;
    state.backend().get_notification_settings().await
}

/// Save edited preferences. Enabling the VAT threshold requires a
/// positive threshold amount in the same update.
pub async fn save_settings(
    state: &AppState,
    update: NotificationSettingsUpdate,
) -> Result<NotificationSettings, AppError> {
    state.require_session()?;
    if update.vat_threshold_enabled == Some(true)
        && !update.vat_threshold_amount.is_some_and(|v| v > 0.0)
    {
        return Err(AppError::Validation(locale::msg_threshold_required(
            state.language(),
        )));
    }
    let _guard = state
        .gate()
        .try_begin(ActionKind::SaveSettings)
        .ok_or(AppError::Busy)?;

    state.backend().update_notification_settings(&update).await
}
