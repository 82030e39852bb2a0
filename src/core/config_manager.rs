// src/core/config_manager.rs
//! Client configuration: compiled-in service endpoint plus optional config.yaml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::{FsOps, PreferenceStore};

/// Analysis backend. Not configurable at runtime.
pub const API_URL: &str = "https://ai-resume-insight.onrender.com";

const DEFAULT_STORAGE_PATH: &str = ".resume_insight/preferences.toml";
const DEFAULT_LOG_PATH: &str = "/tmp/resume_insight.log";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub name: String,
    pub storage_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

/// One section of config.yaml; every field is optional
#[derive(Debug, Default, Deserialize)]
struct EnvironmentSection {
    storage_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load configuration for `environment`, reading `config_path` when it exists
    pub fn load(environment: &str, config_path: &Path) -> Result<Self> {
        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(environment, config_path, &base_dir)
    }

    fn load_from(environment: &str, config_path: &Path, base_dir: &Path) -> Result<Self> {
        let section = Self::load_section(environment, config_path)?;

        let environment = EnvironmentConfig {
            name: environment.to_string(),
            storage_path: resolve_path(
                base_dir,
                section
                    .storage_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH)),
            ),
            log_path: resolve_path(
                base_dir,
                section
                    .log_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            ),
        };

        let service = ServiceConfig {
            base_url: API_URL.to_string(),
            timeout_seconds: section.request_timeout_seconds,
        };

        Ok(Self {
            environment,
            service,
        })
    }

    fn load_section(environment: &str, config_path: &Path) -> Result<EnvironmentSection> {
        let Some(content) = FsOps::read_optional(config_path)? else {
            return Ok(EnvironmentSection::default());
        };

        let config_file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    pub fn preference_store(&self) -> PreferenceStore {
        PreferenceStore::new(&self.environment.storage_path)
    }

    /// Log where everything lives; called once logging is up
    pub fn log_summary(&self) {
        info!("Environment: {}", self.environment.name);
        info!("Preferences: {}", self.environment.storage_path.display());
        info!("Analysis service: {}", self.service.base_url);
        match self.service.timeout_seconds {
            Some(secs) => info!("Request timeout: {}s", secs),
            None => info!("Request timeout: none"),
        }
    }
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
