// src/core/mod.rs
//! Core services: configuration, local storage and the backend client

pub mod config_manager;
pub mod fs_ops;
pub mod preferences;
pub mod service_client;

pub use config_manager::{ConfigManager, API_URL};
pub use fs_ops::FsOps;
pub use preferences::PreferenceStore;
pub use service_client::{AnalysisBackend, ServiceClient};
