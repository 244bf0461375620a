//! Seams to the host OS.
//!
//! The core never talks to the share sheet, clipboard, dialogs or the
//! document picker directly — the embedding shell implements these
//! traits, and tests use the mock implementations below.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Which platform the shell runs on. Only affects URI syntax quirks
/// (the SMS body separator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

/// Sharing capabilities of the host.
pub trait ShareOutlet: Send + Sync {
    fn platform(&self) -> Platform;
    /// Can the OS open this URI (is the target app installed)?
    fn can_open(&self, uri: &str) -> bool;
    /// Hand the URI to the OS.
    fn open(&self, uri: &str) -> Result<(), String>;
    /// Is a generic share sheet available?
    fn has_share_sheet(&self) -> bool;
    /// Offer plain text through the share sheet.
    fn share_text(&self, subject: &str, text: &str) -> Result<(), String>;
    /// Offer a file through the share sheet.
    fn share_file(&self, path: &Path) -> Result<(), String>;
    fn copy_to_clipboard(&self, text: &str) -> Result<(), String>;
}

/// System document picker.
pub trait FilePicker: Send + Sync {
    /// Let the user pick a `.json` file. `None` means cancelled.
    fn pick_json(&self) -> Option<PathBuf>;
}

/// Modal yes/no confirmation.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, title: &str, message: &str) -> bool;
}

// ═══════════════════════════════════════════════════════════
// Mock implementations for tests
// ═══════════════════════════════════════════════════════════

/// Mock share outlet — records everything and answers from config.
pub struct MockShareOutlet {
    platform: Platform,
    share_sheet: bool,
    /// URI schemes the fake OS claims to be able to open.
    openable_schemes: Vec<String>,
    /// Schemes whose `open` call fails even though probing succeeded.
    failing_schemes: Vec<String>,
    pub opened: Mutex<Vec<String>>,
    pub shared_texts: Mutex<Vec<(String, String)>>,
    pub shared_files: Mutex<Vec<PathBuf>>,
    pub clipboard: Mutex<Option<String>>,
}

impl MockShareOutlet {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            share_sheet: true,
            openable_schemes: vec![
                "viber".into(),
                "whatsapp".into(),
                "sms".into(),
                "mailto".into(),
            ],
            failing_schemes: vec![],
            opened: Mutex::new(vec![]),
            shared_texts: Mutex::new(vec![]),
            shared_files: Mutex::new(vec![]),
            clipboard: Mutex::new(None),
        }
    }

    pub fn without_share_sheet(mut self) -> Self {
        self.share_sheet = false;
        self
    }

    /// Pretend the apps behind these schemes are not installed.
    pub fn without_schemes(mut self, schemes: &[&str]) -> Self {
        self.openable_schemes
            .retain(|s| !schemes.contains(&s.as_str()));
        self
    }

    /// Probing succeeds but opening fails for these schemes.
    pub fn with_failing_schemes(mut self, schemes: &[&str]) -> Self {
        self.failing_schemes = schemes.iter().map(|s| s.to_string()).collect();
        self
    }

    fn scheme_of(uri: &str) -> &str {
        uri.split(':').next().unwrap_or(uri)
    }
}

impl ShareOutlet for MockShareOutlet {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn can_open(&self, uri: &str) -> bool {
        self.openable_schemes
            .iter()
            .any(|s| s == Self::scheme_of(uri))
    }

    fn open(&self, uri: &str) -> Result<(), String> {
        let scheme = Self::scheme_of(uri);
        if self.failing_schemes.iter().any(|s| s == scheme)
            || !self.openable_schemes.iter().any(|s| s == scheme)
        {
            return Err(format!("no handler for {scheme}"));
        }
        self.opened.lock().unwrap().push(uri.to_string());
        Ok(())
    }

    fn has_share_sheet(&self) -> bool {
        self.share_sheet
    }

    fn share_text(&self, subject: &str, text: &str) -> Result<(), String> {
        if !self.share_sheet {
            return Err("share sheet unavailable".into());
        }
        self.shared_texts
            .lock()
            .unwrap()
            .push((subject.to_string(), text.to_string()));
        Ok(())
    }

    fn share_file(&self, path: &Path) -> Result<(), String> {
        if !self.share_sheet {
            return Err("share sheet unavailable".into());
        }
        self.shared_files.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<(), String> {
        *self.clipboard.lock().unwrap() = Some(text.to_string());
        Ok(())
    }
}

/// Mock document picker with a fixed answer.
pub struct MockFilePicker {
    selection: Option<PathBuf>,
}

impl MockFilePicker {
    pub fn cancelled() -> Self {
        Self { selection: None }
    }

    pub fn picking(path: impl Into<PathBuf>) -> Self {
        Self {
            selection: Some(path.into()),
        }
    }
}

impl FilePicker for MockFilePicker {
    fn pick_json(&self) -> Option<PathBuf> {
        self.selection.clone()
    }
}

/// Mock confirmation dialog — fixed answer, records prompts.
pub struct MockConfirm {
    answer: bool,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl MockConfirm {
    pub fn accepting() -> Self {
        Self {
            answer: true,
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn declining() -> Self {
        Self {
            answer: false,
            prompts: Mutex::new(vec![]),
        }
    }
}

impl ConfirmPrompt for MockConfirm {
    fn confirm(&self, title: &str, message: &str) -> bool {
        self.prompts
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        self.answer
    }
}
