use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-user notification preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub id: Uuid,
    pub user_id: String,
    pub vat_threshold_enabled: bool,
    pub vat_threshold_amount: f64,
    pub periodic_enabled: bool,
    /// Days of the month (1–31) on which periodic reminders fire.
    #[serde(default)]
    pub periodic_dates: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update for `PUT /notifications/settings`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationSettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_threshold_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_threshold_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodic_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodic_dates: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_serializes_only_set_fields() {
        let update = NotificationSettingsUpdate {
            periodic_enabled: Some(true),
            periodic_dates: Some(vec![1, 15]),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["periodic_enabled"], true);
        assert!(json.get("vat_threshold_amount").is_none());
    }
}
