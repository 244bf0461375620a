use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Wire representation is the lowercase string, so serde renames to
/// snake_case to match the backend.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Owner => "owner",
    Manager => "manager",
    Accountant => "accountant",
    Staff => "staff",
    Viewer => "viewer",
});

str_enum!(InvitationStatus {
    Pending => "pending",
    Accepted => "accepted",
    Cancelled => "cancelled",
    Expired => "expired",
});

str_enum!(ExportFormat {
    Excel => "excel",
    Pdf => "pdf",
});

impl Role {
    /// Only the owner may manage users and invitations.
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

impl ExportFormat {
    /// File extension for a downloaded report.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn role_round_trips_through_wire_string() {
        for role in [
            Role::Owner,
            Role::Manager,
            Role::Accountant,
            Role::Staff,
            Role::Viewer,
        ] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Staff).unwrap();
        assert_eq!(json, "\"staff\"");
        let parsed: Role = serde_json::from_str("\"accountant\"").unwrap();
        assert_eq!(parsed, Role::Accountant);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = Role::from_str("superuser").unwrap_err();
        assert!(err.to_string().contains("superuser"));
    }

    #[test]
    fn only_owner_manages_users() {
        assert!(Role::Owner.can_manage_users());
        assert!(!Role::Manager.can_manage_users());
        assert!(!Role::Accountant.can_manage_users());
        assert!(!Role::Staff.can_manage_users());
        assert!(!Role::Viewer.can_manage_users());
    }

    #[test]
    fn invitation_status_terminal_states() {
        let parsed: InvitationStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, InvitationStatus::Cancelled);
        assert_eq!(InvitationStatus::Expired.as_str(), "expired");
    }

    #[test]
    fn export_format_extensions() {
        assert_eq!(ExportFormat::Excel.extension(), "xlsx");
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    }
}
