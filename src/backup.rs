//! Backup and restore.
//!
//! A backup is the full account snapshot fetched from the server and
//! written to disk as pretty-printed JSON, then offered through the
//! share sheet. Restore is the mirror image: pick a file, confirm,
//! parse locally, post the parsed bundle. Restoring never deletes
//! anything; the server appends and merges.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::AppError;
use crate::gate::ActionKind;
use crate::host::{ConfirmPrompt, FilePicker, ShareOutlet};
use crate::locale;
use crate::models::{BackupStatistics, BackupStatus, RestoreCounts};
use crate::state::AppState;

const BACKUP_PREFIX: &str = "invoice_backup_";

/// File name for a backup taken at `now`, e.g.
/// `invoice_backup_2026-03-01_14-05.json`. Minute precision: a second
/// backup within the same minute overwrites the first.
pub fn backup_file_name(now: DateTime<Local>) -> String {
    format!("{BACKUP_PREFIX}{}.json", now.format("%Y-%m-%d_%H-%M"))
}

/// Result of a completed backup.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupOutcome {
    pub path: PathBuf,
    pub statistics: BackupStatistics,
    /// Whether the file was also handed to the share sheet. A failed
    /// share never fails the backup.
    pub shared: bool,
}

/// Fetch a snapshot, write it to the backups directory and offer it
/// through the share sheet.
pub async fn create_backup(
    state: &AppState,
    outlet: &dyn ShareOutlet,
) -> Result<BackupOutcome, AppError> {
    state.require_session()?;
    let _guard = state
        .gate()
        .try_begin(ActionKind::CreateBackup)
        .ok_or(AppError::Busy)?;

    let bundle = state.backend().fetch_backup_bundle().await?;
    let json = serde_json::to_string_pretty(&bundle).map_err(|e| AppError::Parse(e.to_string()))?;

    let dir = &state.config().backups_dir;
    fs::create_dir_all(dir).map_err(AppError::storage)?;
    let path = dir.join(backup_file_name(Local::now()));
    fs::write(&path, json).map_err(AppError::storage)?;
    info!(path = %path.display(), invoices = bundle.statistics.invoice_count, "backup written");

    let shared = if outlet.has_share_sheet() {
        match outlet.share_file(&path) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "share sheet refused the backup file");
                false
            }
        }
    } else {
        false
    };

    Ok(BackupOutcome {
        path,
        statistics: bundle.statistics,
        shared,
    })
}

/// Restore from a user-picked backup file.
///
/// Returns `Ok(None)` when the picker is cancelled or the confirmation
/// declined; both are silent. The file is parsed locally first, so a
/// malformed file never reaches the server.
pub async fn restore_backup(
    state: &AppState,
    picker: &dyn FilePicker,
    confirm: &dyn ConfirmPrompt,
) -> Result<Option<RestoreCounts>, AppError> {
    state.require_session()?;
    let _guard = state
        .gate()
        .try_begin(ActionKind::RestoreBackup)
        .ok_or(AppError::Busy)?;

    let Some(path) = picker.pick_json() else {
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let (title, message) = locale::confirm_restore(state.language(), &file_name);
    if !confirm.confirm(&title, &message) {
        return Ok(None);
    }

    let text = fs::read_to_string(&path).map_err(AppError::storage)?;
    let bundle: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| AppError::Parse(e.to_string()))?;

    let counts = state.backend().restore_backup(&bundle).await?;
    info!(
        invoices = counts.invoices,
        revenues = counts.revenues,
        expenses = counts.expenses,
        "restore finished"
    );
    Ok(Some(counts))
}

/// State of the backup screen: server-side record counts plus the most
/// recent local backup file, if any.
pub async fn backup_status(state: &AppState) -> Result<BackupStatus, AppError> {
    state.require_session()?;
    let statistics = state.backend().backup_statistics().await?;
    let last_backup_at = latest_backup_time(&state.config().backups_dir);
    Ok(BackupStatus {
        exists: last_backup_at.is_some(),
        last_backup_at,
        statistics,
    })
}

/// Modification time of the newest `invoice_backup_*.json` file, as a
/// local ISO 8601 timestamp. `None` when the directory is empty or
/// missing.
fn latest_backup_time(dir: &Path) -> Option<String> {
    let entries = fs::read_dir(dir).ok()?;
    let newest = entries
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(BACKUP_PREFIX) && name.ends_with(".json")
        })
        .filter_map(|entry| entry.metadata().ok()?.modified().ok())
        .max()?;
    Some(DateTime::<Local>::from(newest).to_rfc3339())
}
