//! Statistics summary and report export.
//!
//! The server renders the report (Excel or PDF); the client saves the
//! bytes under the exports directory and offers the file through the
//! share sheet, same non-fatal share behavior as backups.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::AppError;
use crate::gate::ActionKind;
use crate::host::ShareOutlet;
use crate::models::{ExportFormat, StatisticsSummary};
use crate::state::AppState;

/// File name for a report exported at `now`, e.g.
/// `fakturo_report_2026-03-01_14-05.xlsx`.
pub fn export_file_name(format: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "fakturo_report_{}.{}",
        now.format("%Y-%m-%d_%H-%M"),
        format.extension()
    )
}

pub async fn load_summary(state: &AppState) -> Result<StatisticsSummary, AppError> {
    state.require_session()?;
    state.backend().get_statistics_summary().await
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub shared: bool,
}

/// Download a rendered report, save it and offer it for sharing.
pub async fn export_report(
    state: &AppState,
    outlet: &dyn ShareOutlet,
    format: ExportFormat,
) -> Result<ExportOutcome, AppError> {
    state.require_session()?;
    let _guard = state
        .gate()
        .try_begin(ActionKind::ExportReport)
        .ok_or(AppError::Busy)?;

    let bytes = state.backend().export_report(format).await?;

    let dir = &state.config().exports_dir;
    fs::create_dir_all(dir).map_err(AppError::storage)?;
    let path = dir.join(export_file_name(format, Local::now()));
    fs::write(&path, &bytes).map_err(AppError::storage)?;
    info!(path = %path.display(), format = format.as_str(), size = bytes.len(), "report exported");

    let shared = if outlet.has_share_sheet() {
        match outlet.share_file(&path) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "share sheet refused the report");
                false
            }
        }
    } else {
        false
    };

    Ok(ExportOutcome { path, shared })
}
