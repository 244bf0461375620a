//! Typed HTTP client for the backend REST API.
//!
//! Thin wrapper over reqwest: every call is `<origin>/api/<path>` with
//! a bearer token from the shared session store. 2xx bodies are parsed
//! into the typed models; everything else becomes an `AppError`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{
    AuthResponse, BackupBundle, BackupStatistics, Budget, BudgetCreate, BudgetStatus, Company,
    CompanyUpdate, ExportFormat, Invitation, InvitationCreated, NotificationSettings,
    NotificationSettingsUpdate, RecurringExpense, RecurringExpenseCreate, RestoreCounts, Role,
    StatisticsSummary, User,
};
use crate::session::SessionStore;

use super::Backend;

/// Connect timeout. There is no request timeout: operations run to
/// completion or failure, and the UI keeps its loading flag meanwhile.
const CONNECT_TIMEOUT_SECS: u64 = 15;

pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("{}/api", config.api_origin.trim_end_matches('/')),
            http,
            session,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Server {
            status: status.as_u16(),
            detail: extract_detail(status.as_u16(), &body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        parse_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        parse_json(response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .execute(self.request(Method::PUT, path).json(body))
            .await?;
        parse_json(response).await
    }

    async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        self.execute(self.request(Method::POST, path)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, AppError> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        let bytes = response.bytes().await.map_err(map_transport)?;
        Ok(bytes.to_vec())
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Parse(e.to_string()))
}

fn map_transport(err: reqwest::Error) -> AppError {
    AppError::Network(err.to_string())
}

/// Error message for a non-2xx response: the body's `detail` field when
/// present, a generic fallback otherwise.
pub(crate) fn extract_detail(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl Backend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        self.post_json(
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn logout(&self) -> Result<(), AppError> {
        self.post_empty("/auth/logout").await
    }

    async fn me(&self) -> Result<User, AppError> {
        self.get_json("/auth/me").await
    }

    async fn get_company(&self) -> Result<Company, AppError> {
        self.get_json("/company").await
    }

    async fn update_company(&self, update: &CompanyUpdate) -> Result<Company, AppError> {
        self.put_json("/company", update).await
    }

    async fn join_company(&self, code: &str) -> Result<Company, AppError> {
        self.post_json("/invitations/accept", &serde_json::json!({ "code": code }))
            .await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.get_json("/users").await
    }

    async fn update_user_role(&self, user_id: &str, role: Role) -> Result<(), AppError> {
        let path = format!("/users/{user_id}/role");
        let _: serde_json::Value = self
            .put_json(&path, &serde_json::json!({ "role": role }))
            .await?;
        Ok(())
    }

    async fn remove_user(&self, user_id: &str) -> Result<(), AppError> {
        self.delete(&format!("/users/{user_id}")).await
    }

    async fn create_invitation(&self, role: Role) -> Result<InvitationCreated, AppError> {
        self.post_json("/invitations", &serde_json::json!({ "role": role }))
            .await
    }

    async fn list_invitations(&self) -> Result<Vec<Invitation>, AppError> {
        self.get_json("/invitations").await
    }

    async fn cancel_invitation(&self, id: Uuid) -> Result<(), AppError> {
        self.post_empty(&format!("/invitations/{id}/cancel")).await
    }

    async fn fetch_backup_bundle(&self) -> Result<BackupBundle, AppError> {
        let response = self.execute(self.request(Method::POST, "/backup/create")).await?;
        parse_json(response).await
    }

    async fn restore_backup(&self, bundle: &serde_json::Value) -> Result<RestoreCounts, AppError> {
        self.post_json("/backup/restore", bundle).await
    }

    async fn backup_statistics(&self) -> Result<BackupStatistics, AppError> {
        self.get_json("/backup/status").await
    }

    async fn get_budget_status(&self) -> Result<BudgetStatus, AppError> {
        self.get_json("/budget").await
    }

    async fn create_budget(&self, budget: &BudgetCreate) -> Result<Budget, AppError> {
        self.post_json("/budget", budget).await
    }

    async fn list_recurring_expenses(&self) -> Result<Vec<RecurringExpense>, AppError> {
        self.get_json("/recurring-expenses").await
    }

    async fn create_recurring_expense(
        &self,
        expense: &RecurringExpenseCreate,
    ) -> Result<RecurringExpense, AppError> {
        self.post_json("/recurring-expenses", expense).await
    }

    async fn delete_recurring_expense(&self, id: Uuid) -> Result<(), AppError> {
        self.delete(&format!("/recurring-expenses/{id}")).await
    }

    async fn get_notification_settings(&self) -> Result<NotificationSettings, AppError> {
        self.get_json("/notifications/settings").await
    }

    async fn update_notification_settings(
        &self,
        update: &NotificationSettingsUpdate,
    ) -> Result<NotificationSettings, AppError> {
        self.put_json("/notifications/settings", update).await
    }

    async fn get_statistics_summary(&self) -> Result<StatisticsSummary, AppError> {
        self.get_json("/statistics/summary").await
    }

    async fn export_report(&self, format: ExportFormat) -> Result<Vec<u8>, AppError> {
        self.get_bytes(&format!("/export/{}", format.as_str())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> ApiClient {
        let config = AppConfig {
            api_origin: "https://api.example.bg/".into(),
            ..Default::default()
        };
        ApiClient::new(&config, Arc::new(SessionStore::new()))
    }

    #[test]
    fn url_joins_origin_and_api_prefix() {
        let client = make_client();
        assert_eq!(
            client.url("/statistics/summary"),
            "https://api.example.bg/api/statistics/summary"
        );
    }

    #[test]
    fn detail_comes_from_the_response_body() {
        let detail = extract_detail(400, r#"{"detail": "Липсва session_id"}"#);
        assert_eq!(detail, "Липсва session_id");
    }

    #[test]
    fn detail_falls_back_to_status_for_opaque_bodies() {
        assert_eq!(extract_detail(502, "<html>bad gateway</html>"), "HTTP 502");
        assert_eq!(extract_detail(500, r#"{"error": "boom"}"#), "HTTP 500");
    }
}
