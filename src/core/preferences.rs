// src/core/preferences.rs
//! Client-local preference storage (one TOML file)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::core::FsOps;
use crate::dashboard::theme::ThemePreference;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferencesFile {
    resume_theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored theme, or `None` when absent, unreadable or unrecognized
    pub fn load_theme(&self) -> Option<ThemePreference> {
        let raw = match self.read() {
            Ok(prefs) => prefs.resume_theme?,
            Err(e) => {
                warn!("Ignoring unreadable preferences: {:#}", e);
                return None;
            }
        };

        let theme = ThemePreference::parse(&raw);
        if theme.is_none() {
            warn!("Unrecognized stored theme {:?}, using default", raw);
        }
        theme
    }

    pub fn save_theme(&self, theme: ThemePreference) -> Result<()> {
        let mut prefs = self.read().unwrap_or_default();
        prefs.resume_theme = Some(theme.as_str().to_string());

        let content = toml::to_string(&prefs).context("Failed to serialize preferences")?;
        FsOps::write_file_safe(&self.path, &content)?;

        info!("Saved theme preference: {}", theme.as_str());
        Ok(())
    }

    fn read(&self) -> Result<PreferencesFile> {
        match FsOps::read_optional(&self.path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", self.path.display())),
            None => Ok(PreferencesFile::default()),
        }
    }
}
