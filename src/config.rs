use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Fakturo";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default backend origin. Every endpoint lives under `<origin>/api`.
pub const DEFAULT_API_ORIGIN: &str = "https://api.fakturo.bg";

/// Default base for invitation deep links (`<base>/invite/<token>`).
pub const DEFAULT_INVITE_LINK_BASE: &str = "https://app.fakturo.bg";

/// How long the server keeps an invitation alive.
pub const INVITATION_VALIDITY_HOURS: i64 = 48;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Fakturo/ on all platforms (user-visible, holds backups and exports)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Fakturo")
}

/// Get the directory where backup files are written
pub fn backups_dir() -> PathBuf {
    app_data_dir().join("backups")
}

/// Get the directory where exported reports are written
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

/// Runtime configuration for the client core.
///
/// Screens receive this through `AppState` instead of reading
/// process-wide globals, so tests can point everything at
/// temporary locations.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend origin, without the `/api` prefix.
    pub api_origin: String,
    /// Base URL for invitation deep links.
    pub invite_link_base: String,
    /// Where backup files are written.
    pub backups_dir: PathBuf,
    /// Where exported reports are written.
    pub exports_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_API_ORIGIN.to_string(),
            invite_link_base: DEFAULT_INVITE_LINK_BASE.to_string(),
            backups_dir: backups_dir(),
            exports_dir: exports_dir(),
        }
    }
}
