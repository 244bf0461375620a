//! Application-level error taxonomy.
//!
//! Every failure a screen can see is one of these variants. Errors are
//! caught at the screen/action boundary and converted to a localized
//! modal alert (`locale::alert_for`); nothing propagates to a crash
//! boundary and nothing retries automatically.

/// Errors surfaced to screens.
///
/// Variants carry strings rather than source errors so the whole
/// taxonomy stays `Clone + PartialEq` — tests compare errors directly
/// and mock backends replay them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// No connectivity or transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx response. `detail` comes from the response body's
    /// `detail` field, or a generic fallback when the body is opaque.
    #[error("Server error {status}: {detail}")]
    Server { status: u16, detail: String },
    /// Client-side validation failure — blocks submission before any
    /// network call. The message is already localized.
    #[error("{0}")]
    Validation(String),
    /// A share target app is not installed or refused to open.
    #[error("Channel unavailable: {app}")]
    ChannelUnavailable { app: String },
    /// A file that should contain JSON could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
    /// Local disk failure (write backup, read restore file).
    #[error("Storage error: {0}")]
    Storage(String),
    /// No session, or the server rejected the token (401).
    #[error("Not authenticated")]
    Unauthorized,
    /// The caller's role does not permit the operation.
    #[error("{0}")]
    Forbidden(String),
    /// The same action is already in flight (advisory tap guard).
    #[error("Operation already in progress")]
    Busy,
}

impl AppError {
    /// Storage error from an io failure.
    pub fn storage(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
