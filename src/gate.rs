//! Advisory in-flight action guard.
//!
//! The UI disables the triggering control while a request runs; this
//! gate is the same guard one layer down, so two rapid taps on the same
//! button cannot start the same mutation twice. Advisory only — races
//! between different clients are resolved at the server.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::Serialize;

/// What kind of user action is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateBackup,
    RestoreBackup,
    CreateInvitation,
    CancelInvitation,
    UpdateUser,
    SaveBudget,
    SaveSettings,
    ExportReport,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateBackup => write!(f, "Create backup"),
            Self::RestoreBackup => write!(f, "Restore backup"),
            Self::CreateInvitation => write!(f, "Create invitation"),
            Self::CancelInvitation => write!(f, "Cancel invitation"),
            Self::UpdateUser => write!(f, "Update user"),
            Self::SaveBudget => write!(f, "Save budget"),
            Self::SaveSettings => write!(f, "Save settings"),
            Self::ExportReport => write!(f, "Export report"),
        }
    }
}

/// Per-action in-flight tracker.
///
/// `try_begin` returns `None` while the same action is already running.
/// The returned guard releases the slot on drop, including on the error
/// path, so a failed request re-enables the action immediately.
pub struct ActionGate {
    in_flight: Mutex<HashSet<ActionKind>>,
}

impl ActionGate {
    pub fn new() -> Self {
        Self {
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Begin an action, or `None` if it is already in flight.
    pub fn try_begin(&self, kind: ActionKind) -> Option<ActionGuard<'_>> {
        let mut set = self.in_flight.lock().ok()?;
        if !set.insert(kind) {
            return None;
        }
        Some(ActionGuard { gate: self, kind })
    }

    /// Is this action currently running?
    pub fn is_running(&self, kind: ActionKind) -> bool {
        self.in_flight
            .lock()
            .map(|set| set.contains(&kind))
            .unwrap_or(false)
    }

    fn finish(&self, kind: ActionKind) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&kind);
        }
    }
}

impl Default for ActionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII token for a running action. Dropping it re-enables the action.
pub struct ActionGuard<'a> {
    gate: &'a ActionGate,
    kind: ActionKind,
}

impl Drop for ActionGuard<'_> {
    fn drop(&mut self) {
        self.gate.finish(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_tap_is_rejected_while_running() {
        let gate = ActionGate::new();
        let guard = gate.try_begin(ActionKind::CreateBackup);
        assert!(guard.is_some());
        assert!(gate.is_running(ActionKind::CreateBackup));

        assert!(gate.try_begin(ActionKind::CreateBackup).is_none());
    }

    #[test]
    fn different_actions_run_concurrently() {
        let gate = ActionGate::new();
        let _backup = gate.try_begin(ActionKind::CreateBackup).unwrap();
        assert!(gate.try_begin(ActionKind::CreateInvitation).is_some());
    }

    #[test]
    fn drop_releases_the_slot() {
        let gate = ActionGate::new();
        {
            let _guard = gate.try_begin(ActionKind::RestoreBackup).unwrap();
            assert!(gate.is_running(ActionKind::RestoreBackup));
        }
        assert!(!gate.is_running(ActionKind::RestoreBackup));
        assert!(gate.try_begin(ActionKind::RestoreBackup).is_some());
    }
}
