//! User settings, persisted as TOML.
//!
//! Settings are stored in the platform-specific application config folder:
//! - macOS: ~/Library/Application Support/com.adforge.Adforge/
//! - Windows: %APPDATA%/adforge/Adforge/config/
//! - Linux: ~/.config/adforge/
//!
//! The session store defaults to `session.json` in the matching data folder.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use adforge_output::{DEFAULT_DISPATCH_DELAY, DEFAULT_SAFETY_CAP, ExportOptions};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "adforge";
const APP_NAME: &str = "Adforge";
const CONFIG_FILENAME: &str = "settings.toml";
const SESSION_FILENAME: &str = "session.json";

/// Application settings (persisted to disk as TOML).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub export: ExportSettings,
    pub explorer: ExplorerSettings,
    pub store: StoreSettings,
}

/// Defaults for the export commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Exports producing more files than this ask first.
    pub safety_cap: u64,
    /// Pause between individual files, in milliseconds.
    pub dispatch_delay_ms: u64,
    pub archive_name: String,
    pub document_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            safety_cap: DEFAULT_SAFETY_CAP,
            dispatch_delay_ms: u64::try_from(DEFAULT_DISPATCH_DELAY.as_millis())
                .unwrap_or(u64::MAX),
            archive_name: options.archive_name,
            document_name: options.document_name,
        }
    }
}

impl ExportSettings {
    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            safety_cap: self.safety_cap,
            dispatch_delay: Duration::from_millis(self.dispatch_delay_ms),
            archive_name: self.archive_name.clone(),
            document_name: self.document_name.clone(),
            ..ExportOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerSettings {
    /// Rows shown by `preview` when no limit is given.
    pub preview_cap: u64,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self { preview_cap: 20 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Session file; the platform data folder is used when unset.
    pub path: Option<PathBuf>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Get the path to the settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Default location of the session store.
pub fn default_store_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(SESSION_FILENAME))
}

/// Load settings from the platform config folder.
pub fn load_settings() -> Settings {
    let Some(path) = settings_path() else {
        tracing::warn!("Could not determine settings path, using defaults");
        return Settings::default();
    };
    load_settings_from(&path)
}

/// Load settings from `path`.
///
/// Returns default settings if the file doesn't exist or cannot be parsed.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file: {}, using defaults", e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No settings file found at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file: {}, using defaults", e);
            Settings::default()
        }
    }
}

/// Save settings to `path`, creating the parent directory if needed.
pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create config directory")?;
    }
    let content = toml::to_string_pretty(settings).context("serialize settings")?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;

    tracing::info!("Saved settings to {:?}", path);
    Ok(())
}
