use serde::{Deserialize, Serialize};

use super::records::{DailyRevenue, Expense, Invoice};

/// Record counts included at the top of every backup file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupStatistics {
    pub invoice_count: u32,
    pub revenue_count: u32,
    pub expense_count: u32,
}

/// Full account snapshot as served by `GET /backup/create`.
///
/// Written to disk as pretty-printed JSON. Restoring a bundle is
/// additive — the backend appends/merges records and never deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupBundle {
    pub statistics: BackupStatistics,
    pub invoices: Vec<Invoice>,
    pub revenues: Vec<DailyRevenue>,
    pub expenses: Vec<Expense>,
}

/// How many records the backend restored from a posted bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreCounts {
    pub invoices: u32,
    pub revenues: u32,
    pub expenses: u32,
}

/// What the backup screen shows: local file state plus server counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupStatus {
    pub exists: bool,
    /// Last local backup file's timestamp, ISO 8601 local time.
    pub last_backup_at: Option<String>,
    pub statistics: BackupStatistics,
}
