use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monthly expense budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub company_id: Uuid,
    /// YYYY-MM.
    pub month: String,
    pub expense_limit: f64,
    /// Percent of the limit at which the server raises an alert.
    pub alert_threshold: f64,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /budget`.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetCreate {
    pub month: String,
    pub expense_limit: f64,
    pub alert_threshold: f64,
}

/// Current-month budget state as computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    #[serde(default)]
    pub budget: Option<Budget>,
    pub spent: f64,
    pub percent_used: f64,
}

/// An expense generated automatically every month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: Uuid,
    pub company_id: Uuid,
    pub user_id: String,
    pub description: String,
    pub amount: f64,
    /// Day the expense is generated. The form hints at 1–28 but the
    /// range is not validated anywhere; see DESIGN.md.
    pub day_of_month: u8,
    #[serde(default)]
    pub category: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub last_generated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /recurring-expenses`.
#[derive(Debug, Clone, Serialize)]
pub struct RecurringExpenseCreate {
    pub description: String,
    pub amount: f64,
    pub day_of_month: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_status_without_budget() {
        let json = r#"{"spent": 0.0, "percent_used": 0.0}"#;
        let status: BudgetStatus = serde_json::from_str(json).unwrap();
        assert!(status.budget.is_none());
    }
}
