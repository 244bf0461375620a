use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{InvitationStatus, Role};

/// A time-boxed invitation to join a company.
///
/// `code` and `invite_token` identify the same row: the code is short
/// and human-enterable, the token is opaque and only appears inside the
/// deep link. Lifecycle: pending → accepted | cancelled | expired;
/// terminal states are final and enforced server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub company_id: Uuid,
    pub invited_by: String,
    pub role: Role,
    pub code: String,
    pub invite_token: String,
    pub status: InvitationStatus,
    /// Always `created_at` + 48 hours, assigned by the server.
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Response to `POST /invitations` — everything the share message needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvitationCreated {
    pub code: String,
    pub invite_token: String,
    pub company_name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn invitation_deserializes_and_honors_expiry_contract() {
        let json = r#"{
            "id": "0c0ffee0-1234-4abc-8def-000000000001",
            "company_id": "8c5c1f84-3f5e-4a39-9f31-0d8f9f0a1b2c",
            "invited_by": "user_1a2b3c4d5e6f",
            "role": "staff",
            "code": "483920",
            "invite_token": "abc123",
            "status": "pending",
            "expires_at": "2026-03-03T10:00:00Z",
            "created_at": "2026-03-01T10:00:00Z"
        }"#;
        let inv: Invitation = serde_json::from_str(json).unwrap();
        assert_eq!(inv.status, InvitationStatus::Pending);
        assert_eq!(inv.expires_at - inv.created_at, Duration::hours(48));
    }
}
