//! Persisted user preferences.
//!
//! Stored as a small JSON object. Loading never fails: a missing file gives
//! the defaults, and a corrupt one is logged and replaced by the defaults.
//! Saving writes a sibling temp file and renames it over the target so a
//! crash mid-write cannot leave a truncated file behind.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use viewer::input::InputMode;

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("prefs io failed: {0}")]
    Io(#[from] io::Error),
    #[error("prefs encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Interpret the wheel as a trackpad.
    pub trackpad_mode: bool,
    /// Do not show the open-files notice on startup.
    pub skip_open_notice: bool,
}

impl Prefs {
    /// Read prefs from `path`, falling back to defaults.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "prefs unreadable; using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "prefs corrupt; using defaults");
                Self::default()
            }
        }
    }

    /// Write prefs to `path`, creating its directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] if the directory, temp file, or rename fails.
    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let rendered = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, rendered)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), "prefs saved");
        Ok(())
    }

    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        InputMode::from_trackpad_flag(self.trackpad_mode)
    }
}

#[cfg(test)]
#[path = "prefs_test.rs"]
mod tests;
