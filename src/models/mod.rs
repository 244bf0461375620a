//! Wire types shared with the backend API.
//!
//! Field names and shapes follow the backend's JSON exactly; the client
//! never persists these between sessions.

pub mod backup;
pub mod budget;
pub mod company;
pub mod enums;
pub mod invitation;
pub mod notifications;
pub mod records;
pub mod statistics;
pub mod user;

pub use backup::{BackupBundle, BackupStatistics, BackupStatus, RestoreCounts};
pub use budget::{Budget, BudgetCreate, BudgetStatus, RecurringExpense, RecurringExpenseCreate};
pub use company::{Company, CompanyUpdate};
pub use enums::{ExportFormat, InvitationStatus, Role};
pub use invitation::{Invitation, InvitationCreated};
pub use notifications::{NotificationSettings, NotificationSettingsUpdate};
pub use records::{DailyRevenue, Expense, Invoice, InvoiceItem};
pub use statistics::StatisticsSummary;
pub use user::{AuthResponse, User};

/// Errors from parsing wire values into typed models.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
