// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted editor settings (RON, in the user config directory).
//!
//! Only host preferences live here. Diagram content is deliberately not
//! persisted.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Error while saving settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Filesystem failure
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),
}

/// User-tunable editor preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Initial window width
    pub window_width: f32,
    /// Initial window height
    pub window_height: f32,
    /// Preferred transition rest length for the layout
    #[serde(default = "AppSettings::default_link_distance")]
    pub link_distance: f32,
    /// Node repulsion strength for the layout
    #[serde(default = "AppSettings::default_charge_strength")]
    pub charge_strength: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: 1400.0,
            window_height: 640.0,
            link_distance: Self::default_link_distance(),
            charge_strength: Self::default_charge_strength(),
        }
    }
}

impl AppSettings {
    fn default_link_distance() -> f32 {
        200.0
    }

    fn default_charge_strength() -> f32 {
        30.0
    }

    fn config_dir() -> PathBuf {
        // Cross-platform user config dir
        #[cfg(target_os = "macos")]
        {
            let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("~"));
            return home.join("Library").join("Application Support").join("MachinaEditor");
        }
        #[cfg(target_os = "windows")]
        {
            let appdata = std::env::var_os("APPDATA").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            return appdata.join("MachinaEditor");
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let base = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from).unwrap_or_else(|| {
                let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
                home.join(".config")
            });
            base.join("machina-editor")
        }
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("settings.ron")
    }

    /// Load settings from disk, falling back to defaults on any failure
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        match fs::read_to_string(&path) {
            Ok(text) => match ron::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!(?path, %err, "unreadable settings file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write settings back to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(Self::config_path(), text)?;
        Ok(())
    }
}
