//! Fakturo client core.
//!
//! The shared, UI-free layer of the Fakturo invoice manager: session
//! handling, the typed REST client, invitation sharing, backup and
//! restore, budgets, notification preferences and report export. A
//! platform shell (mobile or desktop) renders screens on top of this
//! crate and implements the [`host`] traits for the share sheet, the
//! document picker and confirmation dialogs.
//!
//! Entry points:
//! - [`AppState`] wires config, session, backend and the action gate.
//! - One module per screen: [`auth`], [`invitation`], [`backup`],
//!   [`budget`], [`company`], [`notifications`], [`export`].
//! - Every fallible operation returns [`AppError`]; screens turn it
//!   into a localized alert with [`locale::alert_for`].

pub mod api;
pub mod auth;
pub mod backup;
pub mod budget;
pub mod company;
pub mod config;
pub mod error;
pub mod export;
pub mod gate;
pub mod host;
pub mod invitation;
pub mod locale;
pub mod models;
pub mod notifications;
pub mod session;
pub mod share;
pub mod state;

pub use error::AppError;
pub use state::AppState;

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// default filter. Call once, before building an [`AppState`].
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
