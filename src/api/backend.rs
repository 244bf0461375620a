use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    AuthResponse, BackupBundle, BackupStatistics, Budget, BudgetCreate, BudgetStatus, Company,
    CompanyUpdate, Invitation, InvitationCreated, NotificationSettings,
    NotificationSettingsUpdate, RecurringExpense, RecurringExpenseCreate, RestoreCounts, Role,
    StatisticsSummary, User,
};

/// Every backend operation the workflows perform.
///
/// One method per endpoint the screens touch. `ApiClient` implements
/// this over HTTP; `MockBackend` replays canned responses in tests.
#[async_trait]
pub trait Backend: Send + Sync {
    // ── Auth ─────────────────────────────────────────────────
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError>;
    async fn logout(&self) -> Result<(), AppError>;
    async fn me(&self) -> Result<User, AppError>;

    // ── Company & users ──────────────────────────────────────
    async fn get_company(&self) -> Result<Company, AppError>;
    async fn update_company(&self, update: &CompanyUpdate) -> Result<Company, AppError>;
    /// Join a company with a manually entered invitation code.
    async fn join_company(&self, code: &str) -> Result<Company, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), AppError>;
    async fn remove_user(&self, user_id: &str) -> Result<(), AppError>;

    // ── Invitations ──────────────────────────────────────────
    async fn create_invitation(&self, role: Role) -> Result<InvitationCreated, AppError>;
    async fn list_invitations(&self) -> Result<Vec<Invitation>, AppError>;
    async fn cancel_invitation(&self, id: Uuid) -> Result<(), AppError>;

    // ── Backup ───────────────────────────────────────────────
    async fn fetch_backup_bundle(&self) -> Result<BackupBundle, AppError>;
    /// POST a parsed backup file. The server appends/merges; the
    /// client never deletes anything as part of a restore.
    async fn restore_backup(&self, bundle: &serde_json::Value) -> Result<RestoreCounts, AppError>;
    async fn backup_statistics(&self) -> Result<BackupStatistics, AppError>;

    // ── Budget ───────────────────────────────────────────────
    async fn get_budget_status(&self) -> Result<BudgetStatus, AppError>;
    async fn create_budget(&self, budget: &BudgetCreate) -> Result<Budget, AppError>;
    async fn list_recurring_expenses(&self) -> Result<Vec<RecurringExpense>, AppError>;
    async fn create_recurring_expense(
        &self,
        expense: &RecurringExpenseCreate,
    ) -> Result<RecurringExpense, AppError>;
    async fn delete_recurring_expense(&self, id: Uuid) -> Result<(), AppError>;

    // ── Notifications ────────────────────────────────────────
    async fn get_notification_settings(&self) -> Result<NotificationSettings, AppError>;
    async fn update_notification_settings(
        &self,
        update: &NotificationSettingsUpdate,
    ) -> Result<NotificationSettings, AppError>;

    // ── Statistics & export ──────────────────────────────────
    async fn get_statistics_summary(&self) -> Result<StatisticsSummary, AppError>;
    async fn export_report(&self, format: crate::models::ExportFormat)
        -> Result<Vec<u8>, AppError>;
}

// ═══════════════════════════════════════════════════════════
// MockBackend — canned responses + call recording for tests
// ═══════════════════════════════════════════════════════════

use std::sync::Mutex;

use chrono::Utc;

use crate::models::ExportFormat;

/// Mock backend for tests.
///
/// Records the name of every call so tests can assert which requests a
/// workflow issued (or that it issued none). Responses are canned via
/// the `with_*` builders; an unconfigured response is a server error so
/// a test failure points at the missing fixture.
#[derive(Default)]
pub struct MockBackend {
    calls: Mutex<Vec<String>>,
    fail_with: Mutex<Option<AppError>>,
    auth: Mutex<Option<AuthResponse>>,
    user: Mutex<Option<User>>,
    company: Mutex<Option<Company>>,
    users: Mutex<Vec<User>>,
    invitation_created: Mutex<Option<InvitationCreated>>,
    invitations: Mutex<Vec<Invitation>>,
    bundle: Mutex<Option<BackupBundle>>,
    restored: Mutex<Vec<serde_json::Value>>,
    budget_status: Mutex<Option<BudgetStatus>>,
    recurring: Mutex<Vec<RecurringExpense>>,
    settings: Mutex<Option<NotificationSettings>>,
    summary: Mutex<Option<StatisticsSummary>>,
    export_bytes: Mutex<Vec<u8>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_invitation(self, created: InvitationCreated) -> Self {
        *self.invitation_created.lock().unwrap() = Some(created);
        self
    }

    pub fn with_invitations(self, invitations: Vec<Invitation>) -> Self {
        *self.invitations.lock().unwrap() = invitations;
        self
    }

    pub fn with_bundle(self, bundle: BackupBundle) -> Self {
        *self.bundle.lock().unwrap() = Some(bundle);
        self
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        *self.users.lock().unwrap() = users;
        self
    }

    pub fn with_company(self, company: Company) -> Self {
        *self.company.lock().unwrap() = Some(company);
        self
    }

    pub fn with_auth(self, auth: AuthResponse, user: User) -> Self {
        *self.auth.lock().unwrap() = Some(auth);
        *self.user.lock().unwrap() = Some(user);
        self
    }

    /// Credential exchange succeeds but the profile fetch has no
    /// fixture, so `me` fails.
    pub fn with_login(self, auth: AuthResponse) -> Self {
        *self.auth.lock().unwrap() = Some(auth);
        self
    }

    pub fn with_budget_status(self, status: BudgetStatus) -> Self {
        *self.budget_status.lock().unwrap() = Some(status);
        self
    }

    pub fn with_recurring(self, expenses: Vec<RecurringExpense>) -> Self {
        *self.recurring.lock().unwrap() = expenses;
        self
    }

    pub fn with_settings(self, settings: NotificationSettings) -> Self {
        *self.settings.lock().unwrap() = Some(settings);
        self
    }

    pub fn with_summary(self, summary: StatisticsSummary) -> Self {
        *self.summary.lock().unwrap() = Some(summary);
        self
    }

    pub fn with_export_bytes(self, bytes: Vec<u8>) -> Self {
        *self.export_bytes.lock().unwrap() = bytes;
        self
    }

    /// Fail every subsequent call with this error.
    pub fn failing_with(self, err: AppError) -> Self {
        *self.fail_with.lock().unwrap() = Some(err);
        self
    }

    /// Names of every call issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Bundles posted to the restore endpoint.
    pub fn restored_bundles(&self) -> Vec<serde_json::Value> {
        self.restored.lock().unwrap().clone()
    }

    fn record(&self, call: &str) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(call.to_string());
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn missing(fixture: &str) -> AppError {
        AppError::Server {
            status: 500,
            detail: format!("mock: no canned {fixture}"),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, AppError> {
        self.record("login")?;
        self.auth
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("auth"))
    }

    async fn logout(&self) -> Result<(), AppError> {
        self.record("logout")
    }

    async fn me(&self) -> Result<User, AppError> {
        self.record("me")?;
        self.user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("user"))
    }

    async fn get_company(&self) -> Result<Company, AppError> {
        self.record("get_company")?;
        self.company
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("company"))
    }

    async fn update_company(&self, _update: &CompanyUpdate) -> Result<Company, AppError> {
        self.record("update_company")?;
        self.company
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("company"))
    }

    async fn join_company(&self, _code: &str) -> Result<Company, AppError> {
        self.record("join_company")?;
        self.company
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("company"))
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.record("list_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), AppError> {
        self.record(&format!("update_user_role:{user_id}:{}", role.as_str()))
    }

    async fn remove_user(&self, user_id: &str) -> Result<(), AppError> {
        self.record(&format!("remove_user:{user_id}"))
    }

    async fn create_invitation(&self, role: Role) -> Result<InvitationCreated, AppError> {
        self.record(&format!("create_invitation:{}", role.as_str()))?;
        self.invitation_created
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("invitation"))
    }

    async fn list_invitations(&self) -> Result<Vec<Invitation>, AppError> {
        self.record("list_invitations")?;
        Ok(self.invitations.lock().unwrap().clone())
    }

    async fn cancel_invitation(&self, id: Uuid) -> Result<(), AppError> {
        self.record(&format!("cancel_invitation:{id}"))
    }

    async fn fetch_backup_bundle(&self) -> Result<BackupBundle, AppError> {
        self.record("fetch_backup_bundle")?;
        self.bundle
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("bundle"))
    }

    async fn restore_backup(&self, bundle: &serde_json::Value) -> Result<RestoreCounts, AppError> {
        self.record("restore_backup")?;
        self.restored.lock().unwrap().push(bundle.clone());
        // Behaves like restoring into an empty account: everything in
        // the bundle's statistics block is restored.
        let stats: BackupStatistics = bundle
            .get("statistics")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        Ok(RestoreCounts {
            invoices: stats.invoice_count,
            revenues: stats.revenue_count,
            expenses: stats.expense_count,
        })
    }

    async fn backup_statistics(&self) -> Result<BackupStatistics, AppError> {
        self.record("backup_statistics")?;
        Ok(self
            .bundle
            .lock()
            .unwrap()
            .as_ref()
            .map(|b| b.statistics)
            .unwrap_or_default())
    }

    async fn get_budget_status(&self) -> Result<BudgetStatus, AppError> {
        self.record("get_budget_status")?;
        Ok(self
            .budget_status
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(BudgetStatus {
                budget: None,
                spent: 0.0,
                percent_used: 0.0,
            }))
    }

    async fn create_budget(&self, budget: &BudgetCreate) -> Result<Budget, AppError> {
        self.record("create_budget")?;
        Ok(Budget {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            month: budget.month.clone(),
            expense_limit: budget.expense_limit,
            alert_threshold: budget.alert_threshold,
            created_at: Utc::now(),
        })
    }

    async fn list_recurring_expenses(&self) -> Result<Vec<RecurringExpense>, AppError> {
        self.record("list_recurring_expenses")?;
        Ok(self.recurring.lock().unwrap().clone())
    }

    async fn create_recurring_expense(
        &self,
        expense: &RecurringExpenseCreate,
    ) -> Result<RecurringExpense, AppError> {
        self.record("create_recurring_expense")?;
        let created = RecurringExpense {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            user_id: "user_mock".into(),
            description: expense.description.clone(),
            amount: expense.amount,
            day_of_month: expense.day_of_month,
            category: None,
            is_active: true,
            last_generated: None,
            created_at: Utc::now(),
        };
        self.recurring.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_recurring_expense(&self, id: Uuid) -> Result<(), AppError> {
        self.record(&format!("delete_recurring_expense:{id}"))?;
        self.recurring.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn get_notification_settings(&self) -> Result<NotificationSettings, AppError> {
        self.record("get_notification_settings")?;
        // The server creates default settings on first read.
        Ok(self
            .settings
            .lock()
            .unwrap()
            .get_or_insert_with(default_settings)
            .clone())
    }

    async fn update_notification_settings(
        &self,
        update: &NotificationSettingsUpdate,
    ) -> Result<NotificationSettings, AppError> {
        self.record("update_notification_settings")?;
        let mut guard = self.settings.lock().unwrap();
        let settings = guard.get_or_insert_with(default_settings);
        if let Some(v) = update.vat_threshold_enabled {
            settings.vat_threshold_enabled = v;
        }
        if let Some(v) = update.vat_threshold_amount {
            settings.vat_threshold_amount = v;
        }
        if let Some(v) = update.periodic_enabled {
            settings.periodic_enabled = v;
        }
        if let Some(v) = &update.periodic_dates {
            settings.periodic_dates = v.clone();
        }
        settings.updated_at = Utc::now();
        Ok(settings.clone())
    }

    async fn get_statistics_summary(&self) -> Result<StatisticsSummary, AppError> {
        self.record("get_statistics_summary")?;
        self.summary
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::missing("summary"))
    }

    async fn export_report(&self, format: ExportFormat) -> Result<Vec<u8>, AppError> {
        self.record(&format!("export_report:{}", format.as_str()))?;
        Ok(self.export_bytes.lock().unwrap().clone())
    }
}

fn default_settings() -> NotificationSettings {
    NotificationSettings {
        id: Uuid::new_v4(),
        user_id: "user_mock".into(),
        vat_threshold_enabled: false,
        vat_threshold_amount: 0.0,
        periodic_enabled: false,
        periodic_dates: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_records_calls_in_order() {
        let mock = MockBackend::new();
        let _ = mock.list_users().await;
        let _ = mock.logout().await;
        assert_eq!(mock.calls(), vec!["list_users", "logout"]);
    }

    #[tokio::test]
    async fn failing_mock_returns_the_configured_error() {
        let mock = MockBackend::new().failing_with(AppError::Network("down".into()));
        let err = mock.list_users().await.unwrap_err();
        assert_eq!(err, AppError::Network("down".into()));
        // The call is still recorded.
        assert_eq!(mock.calls(), vec!["list_users"]);
    }

    #[tokio::test]
    async fn restore_counts_mirror_bundle_statistics() {
        let mock = MockBackend::new();
        let bundle = serde_json::json!({
            "statistics": {"invoice_count": 3, "revenue_count": 2, "expense_count": 1},
            "invoices": [], "revenues": [], "expenses": []
        });
        let counts = mock.restore_backup(&bundle).await.unwrap();
        assert_eq!(counts.invoices, 3);
        assert_eq!(counts.revenues, 2);
        assert_eq!(counts.expenses, 1);
        assert_eq!(mock.restored_bundles().len(), 1);
    }

    #[tokio::test]
    async fn settings_update_is_partial() {
        let mock = MockBackend::new();
        let updated = mock
            .update_notification_settings(&NotificationSettingsUpdate {
                vat_threshold_enabled: Some(true),
                vat_threshold_amount: Some(25000.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(updated.vat_threshold_enabled);
        assert_eq!(updated.vat_threshold_amount, 25000.0);
        assert!(!updated.periodic_enabled, "untouched field keeps default");
    }
}
