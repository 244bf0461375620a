//! Company profile screen.

use crate::error::AppError;
use crate::locale;
use crate::models::{Company, CompanyUpdate};
use crate::state::AppState;

pub async fn load_company(state: &AppState) -> Result<Company, AppError> {
    state.require_session()?;
    state.backend().get_company().await
}

/// Save edited company fields. Unset fields stay unchanged server-side.
pub async fn save_company(state: &AppState, update: CompanyUpdate) -> Result<Company, AppError> {
    state.require_session()?;
    if let Some(name) = &update.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation(locale::msg_company_name_required(
                state.language(),
            )));
        }
    }
    state.backend().update_company(&update).await
}
