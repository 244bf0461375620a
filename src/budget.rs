//! Monthly budget and recurring expenses.
//!
//! The server owns the math (spent amount, percent used, alerting);
//! the client validates form input, renders the progress bar and
//! manages the recurring-expense list.

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::error::AppError;
use crate::gate::ActionKind;
use crate::locale;
use crate::models::{Budget, BudgetCreate, BudgetStatus, RecurringExpense, RecurringExpenseCreate};
use crate::state::AppState;

/// Color of the budget progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressColor {
    Green,
    Amber,
    Red,
}

/// Bar color for a percent-used value: red at or over the limit, amber
/// from 80%, green below.
pub fn progress_color(percent_used: f64) -> ProgressColor {
    if percent_used >= 100.0 {
        ProgressColor::Red
    } else if percent_used >= 80.0 {
        ProgressColor::Amber
    } else {
        ProgressColor::Green
    }
}

/// Bar width in percent. Overspending shows a full red bar, never a
/// bar wider than its track.
pub fn progress_width(percent_used: f64) -> f64 {
    percent_used.clamp(0.0, 100.0)
}

/// Everything the budget screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetScreen {
    pub status: BudgetStatus,
    pub recurring: Vec<RecurringExpense>,
}

pub async fn load_budget(state: &AppState) -> Result<BudgetScreen, AppError> {
    state.require_session()?;
    let status = state.backend().get_budget_status().await?;
    let recurring = state.backend().list_recurring_expenses().await?;
    Ok(BudgetScreen { status, recurring })
}

fn valid_month(month: &str) -> bool {
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").is_ok() && month.len() == 7
}

/// Create or replace the budget for a month.
pub async fn save_budget(
    state: &AppState,
    month: &str,
    expense_limit: f64,
    alert_threshold: f64,
) -> Result<Budget, AppError> {
    state.require_session()?;
    let lang = state.language();
    if expense_limit <= 0.0 {
        return Err(AppError::Validation(locale::msg_positive_limit(lang)));
    }
    if !valid_month(month) {
        return Err(AppError::Validation(locale::msg_invalid_month(lang)));
    }
    let _guard = state
        .gate()
        .try_begin(ActionKind::SaveBudget)
        .ok_or(AppError::Busy)?;

    let budget = state
        .backend()
        .create_budget(&BudgetCreate {
            month: month.to_string(),
            expense_limit,
            alert_threshold,
        })
        .await?;
    info!(month, expense_limit, "budget saved");
    Ok(budget)
}

/// Add a recurring expense.
///
/// The day of month is sent as entered; the form hints at 1–28 but no
/// layer rejects other values (see DESIGN.md).
pub async fn add_recurring_expense(
    state: &AppState,
    description: &str,
    amount: f64,
    day_of_month: u8,
) -> Result<RecurringExpense, AppError> {
    state.require_session()?;
    let lang = state.language();
    let description = description.trim();
    if description.is_empty() {
        return Err(AppError::Validation(locale::msg_description_required(lang)));
    }
    if amount <= 0.0 {
        return Err(AppError::Validation(locale::msg_positive_amount(lang)));
    }

    state
        .backend()
        .create_recurring_expense(&RecurringExpenseCreate {
            description: description.to_string(),
            amount,
            day_of_month,
        })
        .await
}

pub async fn delete_recurring_expense(state: &AppState, id: Uuid) -> Result<(), AppError> {
    state.require_session()?;
    state.backend().delete_recurring_expense(id).await
}

#[cfg(test)]
mod tests {
    use crate::api::MockBackend;
    use crate::config::AppConfig;
    use crate::models::Role;
    use crate::state::testutil::{signed_in_pair, signed_in_state};

    use super::*;

    #[test]
    fn color_thresholds() {
        assert_eq!(progress_color(0.0), ProgressColor::Green);
        assert_eq!(progress_color(79.9), ProgressColor::Green);
        assert_eq!(progress_color(80.0), ProgressColor::Amber);
        assert_eq!(progress_color(99.9), ProgressColor::Amber);
        assert_eq!(progress_color(100.0), ProgressColor::Red);
        assert_eq!(progress_color(150.0), ProgressColor::Red);
    }

    #[test]
    fn width_is_clamped_to_the_track() {
        assert_eq!(progress_width(42.5), 42.5);
        assert_eq!(progress_width(150.0), 100.0);
        assert_eq!(progress_width(-1.0), 0.0);
    }

    #[tokio::test]
    async fn budget_month_must_be_yyyy_mm() {
        let (state, backend) =
            signed_in_pair(AppConfig::default(), Role::Owner, MockBackend::new());

        for month in ["2026-13", "март 2026", "2026-3", "2026-03-01"] {
            let err = save_budget(&state, month, 1000.0, 80.0).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{month} accepted");
        }
        assert!(backend.calls().is_empty());

        assert!(save_budget(&state, "2026-03", 1000.0, 80.0).await.is_ok());
    }

    #[tokio::test]
    async fn budget_limit_must_be_positive() {
        let state = signed_in_state(Role::Owner, MockBackend::new());
        let err = save_budget(&state, "2026-03", 0.0, 80.0).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn recurring_expense_requires_description_and_amount() {
        let (state, backend) =
            signed_in_pair(AppConfig::default(), Role::Owner, MockBackend::new());

        let err = add_recurring_expense(&state, "  ", 50.0, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = add_recurring_expense(&state, "Наем", -5.0, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.calls().is_empty());

        let created = add_recurring_expense(&state, " Наем ", 800.0, 5).await.unwrap();
        assert_eq!(created.description, "Наем", "description is trimmed");
        assert_eq!(created.day_of_month, 5);
    }

    #[tokio::test]
    async fn out_of_range_day_is_passed_through() {
        let state = signed_in_state(Role::Owner, MockBackend::new());
        let created = add_recurring_expense(&state, "Ток", 120.0, 31).await.unwrap();
        assert_eq!(created.day_of_month, 31);
    }

    #[tokio::test]
    async fn load_fetches_status_and_recurring_list() {
        let (state, backend) =
            signed_in_pair(AppConfig::default(), Role::Accountant, MockBackend::new());
        let screen = load_budget(&state).await.unwrap();
        assert!(screen.status.budget.is_none());
        assert!(screen.recurring.is_empty());
        assert_eq!(
            backend.calls(),
            vec!["get_budget_status", "list_recurring_expenses"]
        );
    }
}
