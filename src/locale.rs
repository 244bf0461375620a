//! Localized user-facing text.
//!
//! Only the strings the workflows themselves produce live here (role
//! names, the invitation message, alert text). Full screen string
//! tables belong to the UI layer.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Role;

/// UI language. Held in `AppState` with an explicit get/set lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Bg,
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::Bg
    }
}

/// A modal alert shown to the user. Every error a screen sees becomes
/// one of these; none propagates further.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Subject and body of a shareable message.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMessage {
    pub subject: String,
    pub body: String,
}

/// Localized display name for a role.
pub fn role_name(lang: Language, role: Role) -> &'static str {
    match (lang, role) {
        (Language::Bg, Role::Owner) => "Собственик",
        (Language::Bg, Role::Manager) => "Мениджър",
        (Language::Bg, Role::Accountant) => "Счетоводител",
        (Language::Bg, Role::Staff) => "Служител",
        (Language::Bg, Role::Viewer) => "Наблюдател",
        (Language::En, Role::Owner) => "Owner",
        (Language::En, Role::Manager) => "Manager",
        (Language::En, Role::Accountant) => "Accountant",
        (Language::En, Role::Staff) => "Staff",
        (Language::En, Role::Viewer) => "Viewer",
    }
}

/// Subject line of the invitation message.
pub fn invite_subject(lang: Language, company_name: &str) -> String {
    match lang {
        Language::Bg => format!("Покана за {company_name}"),
        Language::En => format!("Invitation to {company_name}"),
    }
}

/// Body of the invitation message. Embeds exactly the join link, the
/// manual-entry code, the localized role name and the 48-hour validity.
pub fn invite_body(
    lang: Language,
    company_name: &str,
    role: Role,
    link: &str,
    code: &str,
) -> String {
    let role = role_name(lang, role);
    match lang {
        Language::Bg => format!(
            "Поканени сте да се присъедините към {company_name} като {role}.\n\n\
             Линк за присъединяване: {link}\n\
             Код за ръчно въвеждане: {code}\n\n\
             Поканата е валидна 48 часа."
        ),
        Language::En => format!(
            "You are invited to join {company_name} as {role}.\n\n\
             Join link: {link}\n\
             Manual entry code: {code}\n\n\
             The invitation is valid for 48 hours."
        ),
    }
}

/// Convert an error to the alert the screen shows.
pub fn alert_for(lang: Language, err: &AppError) -> Alert {
    let title = match lang {
        Language::Bg => "Грешка",
        Language::En => "Error",
    };
    let message = match (lang, err) {
        (Language::Bg, AppError::Network(_)) => {
            "Няма връзка със сървъра. Проверете интернет връзката си.".to_string()
        }
        (Language::En, AppError::Network(_)) => {
            "Cannot reach the server. Check your internet connection.".to_string()
        }
        (Language::Bg, AppError::Unauthorized) => "Сесията ви е изтекла. Влезте отново.".to_string(),
        (Language::En, AppError::Unauthorized) => {
            "Your session has expired. Please sign in again.".to_string()
        }
        (Language::Bg, AppError::Busy) => "Операцията вече се изпълнява.".to_string(),
        (Language::En, AppError::Busy) => "This operation is already running.".to_string(),
        (Language::Bg, AppError::ChannelUnavailable { app }) => {
            format!("{app} не е инсталиран на това устройство.")
        }
        (Language::En, AppError::ChannelUnavailable { app }) => {
            format!("{app} is not installed on this device.")
        }
        (Language::Bg, AppError::Parse(_)) => {
            "Файлът не е валиден архив във формат JSON.".to_string()
        }
        (Language::En, AppError::Parse(_)) => "The file is not a valid JSON backup.".to_string(),
        (_, AppError::Server { detail, .. }) => detail.clone(),
        // Validation and Forbidden messages are built localized.
        (_, AppError::Validation(msg)) | (_, AppError::Forbidden(msg)) => msg.clone(),
        (Language::Bg, AppError::Storage(msg)) => format!("Грешка при запис на файл: {msg}"),
        (Language::En, AppError::Storage(msg)) => format!("File error: {msg}"),
    };
    Alert {
        title: title.to_string(),
        message,
    }
}

// ── Validation / gate messages ──────────────────────────────

pub fn msg_owner_only(lang: Language) -> String {
    match lang {
        Language::Bg => "Само собственикът може да управлява потребители и покани.".into(),
        Language::En => "Only the owner can manage users and invitations.".into(),
    }
}

pub fn msg_own_row(lang: Language) -> String {
    match lang {
        Language::Bg => "Не можете да променяте собствения си достъп.".into(),
        Language::En => "You cannot change your own access.".into(),
    }
}

pub fn msg_positive_limit(lang: Language) -> String {
    match lang {
        Language::Bg => "Лимитът трябва да е положителна сума.".into(),
        Language::En => "The limit must be a positive amount.".into(),
    }
}

pub fn msg_positive_amount(lang: Language) -> String {
    match lang {
        Language::Bg => "Сумата трябва да е положителна.".into(),
        Language::En => "The amount must be positive.".into(),
    }
}

pub fn msg_description_required(lang: Language) -> String {
    match lang {
        Language::Bg => "Описанието е задължително.".into(),
        Language::En => "A description is required.".into(),
    }
}

pub fn msg_invalid_month(lang: Language) -> String {
    match lang {
        Language::Bg => "Месецът трябва да е във формат ГГГГ-ММ.".into(),
        Language::En => "The month must be in YYYY-MM format.".into(),
    }
}

pub fn msg_code_required(lang: Language) -> String {
    match lang {
        Language::Bg => "Въведете код за покана.".into(),
        Language::En => "Enter an invitation code.".into(),
    }
}

pub fn msg_company_name_required(lang: Language) -> String {
    match lang {
        Language::Bg => "Името на фирмата е задължително.".into(),
        Language::En => "The company name is required.".into(),
    }
}

pub fn msg_invalid_credentials(lang: Language) -> String {
    match lang {
        Language::Bg => "Въведете валиден имейл и парола.".into(),
        Language::En => "Enter a valid email and password.".into(),
    }
}

pub fn msg_threshold_required(lang: Language) -> String {
    match lang {
        Language::Bg => "Прагът за ДДС трябва да е положителна сума.".into(),
        Language::En => "The VAT threshold must be a positive amount.".into(),
    }
}

/// Title/message of the destructive restore confirmation, naming the file.
pub fn confirm_restore(lang: Language, file_name: &str) -> (String, String) {
    match lang {
        Language::Bg => (
            "Възстановяване от архив".into(),
            format!(
                "Да се възстановят ли данните от {file_name}? \
                 Съществуващите записи се запазват."
            ),
        ),
        Language::En => (
            "Restore from backup".into(),
            format!("Restore data from {file_name}? Existing records are kept."),
        ),
    }
}

/// Confirmation before cancelling a pending invitation.
pub fn confirm_cancel_invitation(lang: Language) -> (String, String) {
    match lang {
        Language::Bg => (
            "Отказ на покана".into(),
            "Да се отмени ли тази покана? Кодът и линкът ще спрат да работят.".into(),
        ),
        Language::En => (
            "Cancel invitation".into(),
            "Cancel this invitation? Its code and link will stop working.".into(),
        ),
    }
}

/// Confirmation before removing a user from the company.
pub fn confirm_remove_user(lang: Language, user_name: &str) -> (String, String) {
    match lang {
        Language::Bg => (
            "Премахване на потребител".into(),
            format!("Да се премахне ли {user_name} от фирмата?"),
        ),
        Language::En => (
            "Remove user".into(),
            format!("Remove {user_name} from the company?"),
        ),
    }
}
