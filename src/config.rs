//! Viewer configuration parsed from environment variables.

use std::path::PathBuf;

use viewer::consts::{DEFAULT_FRAME_RATE, WHEEL_IDLE_MS};

pub const DEFAULT_VIEWPORT: ViewportSize = ViewportSize { width: 1280.0, height: 720.0 };

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const DEFAULT_WHEEL_IDLE_MS: u64 = WHEEL_IDLE_MS as u64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Parse { var: &'static str, message: String },
}

/// Screen size the session is laid out for, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Wheel mode override; `None` defers to the saved preference.
    pub trackpad: Option<bool>,
    pub frame_rate: u32,
    pub wheel_idle_ms: u64,
    pub viewport: ViewportSize,
    pub prefs_path: PathBuf,
}

impl ViewerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PILVIEW_TRACKPAD`: `true` / `false`
    /// - `PILVIEW_FRAME_RATE`: default 60
    /// - `PILVIEW_WHEEL_IDLE_MS`: default 20
    /// - `PILVIEW_VIEWPORT`: `WIDTHxHEIGHT`, default `1280x720`
    /// - `PILVIEW_PREFS`: default `$HOME/.config/pilview/prefs.json`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when `PILVIEW_TRACKPAD` or
    /// `PILVIEW_VIEWPORT` is set to something unparsable. Unparsable timing
    /// values fall back to their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let trackpad = lookup("PILVIEW_TRACKPAD").map(|raw| parse_bool("PILVIEW_TRACKPAD", &raw)).transpose()?;
        let frame_rate = parse_or(&lookup, "PILVIEW_FRAME_RATE", DEFAULT_FRAME_RATE);
        let wheel_idle_ms = parse_or(&lookup, "PILVIEW_WHEEL_IDLE_MS", DEFAULT_WHEEL_IDLE_MS);
        let viewport = match lookup("PILVIEW_VIEWPORT") {
            Some(raw) => parse_viewport(&raw)?,
            None => DEFAULT_VIEWPORT,
        };
        let prefs_path = lookup("PILVIEW_PREFS")
            .map_or_else(|| default_prefs_path(lookup("HOME")), PathBuf::from);

        Ok(Self { trackpad, frame_rate, wheel_idle_ms, viewport, prefs_path })
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Parse { var, message: format!("expected true or false, got '{other}'") }),
    }
}

fn parse_viewport(raw: &str) -> Result<ViewportSize, ConfigError> {
    let invalid = || ConfigError::Parse {
        var: "PILVIEW_VIEWPORT",
        message: format!("expected WIDTHxHEIGHT, got '{raw}'"),
    };
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let width = w.trim().parse::<u32>().map_err(|_| invalid())?;
    let height = h.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok(ViewportSize { width: f64::from(width), height: f64::from(height) })
}

fn default_prefs_path(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join(".config").join("pilview").join("prefs.json"),
        None => PathBuf::from(".pilview-prefs.json"),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
